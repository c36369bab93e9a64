use crate::core::money::DEFAULT_CENTS_PRECISION;
use crate::core::{AppError, Currency, MoneyContext, Result, Rounding};
use serde::Deserialize;

/// Largest cents precision whose scaled amounts still fit an i64
pub const MAX_CENTS_PRECISION: u32 = 18;

/// Money arithmetic and display settings of an organization
#[derive(Debug, Clone, Deserialize)]
pub struct MoneyConfig {
    /// Working precision, in significant digits
    pub decimal_precision: u32,
    pub rounding: Rounding,
    /// Fractional digits between stored cents and displayed units
    pub cents_precision: u32,
    pub currency: String,
    pub locale: String,
    pub minimum_fraction_digits: Option<u32>,
}

impl Default for MoneyConfig {
    fn default() -> Self {
        Self {
            decimal_precision: MoneyContext::DEFAULT_PRECISION,
            rounding: Rounding::HalfUp,
            cents_precision: DEFAULT_CENTS_PRECISION,
            currency: "USD".to_string(),
            locale: "en-US".to_string(),
            minimum_fraction_digits: None,
        }
    }
}

impl MoneyConfig {
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(MoneyConfig {
            decimal_precision: parse_or(&var, "UPCOUNT_DECIMAL_PRECISION", defaults.decimal_precision)?,
            rounding: parse_or(&var, "UPCOUNT_ROUNDING", defaults.rounding)?,
            cents_precision: parse_or(&var, "UPCOUNT_CENTS_PRECISION", defaults.cents_precision)?,
            currency: var("UPCOUNT_CURRENCY").unwrap_or(defaults.currency),
            locale: var("UPCOUNT_LOCALE").unwrap_or(defaults.locale),
            minimum_fraction_digits: var("UPCOUNT_MIN_FRACTION_DIGITS")
                .map(|raw| {
                    raw.trim().parse().map_err(|_| {
                        AppError::configuration("Invalid UPCOUNT_MIN_FRACTION_DIGITS")
                    })
                })
                .transpose()?,
        })
    }

    /// Build the arithmetic context these settings describe
    pub fn context(&self) -> Result<MoneyContext> {
        MoneyContext::new(self.decimal_precision, self.rounding)
            .map_err(|e| AppError::configuration(format!("UPCOUNT_DECIMAL_PRECISION: {}", e)))
    }

    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency)
            .map_err(|e| AppError::configuration(format!("UPCOUNT_CURRENCY: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        self.context()?;
        self.currency()?;

        if self.cents_precision > MAX_CENTS_PRECISION {
            return Err(AppError::configuration(format!(
                "Cents precision must be at most {}, got {}",
                MAX_CENTS_PRECISION, self.cents_precision
            )));
        }

        Ok(())
    }
}

pub(super) fn parse_or<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}
