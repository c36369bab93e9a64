use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::MoneyError;

/// Symbol iso_currency reports for currencies without a dedicated sign
const GENERIC_CURRENCY_SIGN: &str = "¤";

/// An ISO 4217 currency with its minor-unit rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(iso_currency::Currency);

impl Currency {
    pub const USD: Currency = Currency(iso_currency::Currency::USD);
    pub const EUR: Currency = Currency(iso_currency::Currency::EUR);

    /// Look up a currency by its three-letter code (case-insensitive)
    pub fn from_code(code: &str) -> Result<Self, MoneyError> {
        iso_currency::Currency::from_code(&code.trim().to_uppercase())
            .map(Currency)
            .ok_or_else(|| MoneyError::UnknownCurrency(code.to_string()))
    }

    pub fn code(&self) -> &'static str {
        self.0.code()
    }

    /// Number of fractional digits the currency is conventionally shown with
    /// - JPY: 0
    /// - USD/EUR: 2
    /// - KWD: 3
    pub fn scale(&self) -> u32 {
        self.0.exponent().map(u32::from).unwrap_or(0)
    }

    /// Display symbol, falling back to the code when the currency has none
    pub fn symbol(&self) -> String {
        let symbol = self.0.symbol().symbol;
        if symbol.is_empty() || symbol == GENERIC_CURRENCY_SIGN {
            self.code().to_string()
        } else {
            symbol
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}
