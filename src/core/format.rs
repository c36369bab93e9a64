// Locale- and currency-aware display of monetary amounts.
//
// Purely presentational: amounts arrive already converted to units and are
// only rounded to the number of fraction digits being displayed.

use rust_decimal::{Decimal, RoundingStrategy};

use super::currency::Currency;
use super::error::MoneyError;
use super::money::{DecimalInput, MoneyContext, DEFAULT_CENTS_PRECISION};

/// Rendered in place of an amount that is not a finite number
pub const MISSING_AMOUNT: &str = "-";

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

/// Where the currency symbol goes relative to the number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPlacement {
    /// `$1,234.56`
    Prefix,
    /// `€ 1.234,56`
    PrefixSpaced,
    /// `1.234,56 €`
    SuffixSpaced,
}

/// Number formatting conventions of one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleFormat {
    pub decimal_separator: char,
    pub group_separator: &'static str,
    pub placement: SymbolPlacement,
    /// Put the minus sign in front of a leading symbol (`-R$ 5,00`) instead
    /// of right before the digits (`€ -5,00`)
    pub sign_before_symbol: bool,
    /// Integer parts shorter than `3 + min_grouping_digits` stay ungrouped
    pub min_grouping_digits: usize,
}

impl LocaleFormat {
    const ENGLISH: LocaleFormat = LocaleFormat {
        decimal_separator: '.',
        group_separator: ",",
        placement: SymbolPlacement::Prefix,
        sign_before_symbol: true,
        min_grouping_digits: 1,
    };

    const fn suffixed(decimal_separator: char, group_separator: &'static str) -> LocaleFormat {
        LocaleFormat {
            decimal_separator,
            group_separator,
            placement: SymbolPlacement::SuffixSpaced,
            sign_before_symbol: true,
            min_grouping_digits: 1,
        }
    }

    /// Resolve a BCP 47 tag (`de-DE`, `pt_BR`, `fr`) to its conventions.
    ///
    /// The full tag is tried first, then the language alone; anything unknown
    /// formats like `en-US`.
    pub fn for_locale(locale: &str) -> LocaleFormat {
        let tag = locale.trim().replace('_', "-").to_lowercase();
        if let Some(format) = Self::lookup(&tag) {
            return format;
        }
        let language = tag.split('-').next().unwrap_or_default();
        Self::lookup(language).unwrap_or(Self::ENGLISH)
    }

    fn lookup(tag: &str) -> Option<LocaleFormat> {
        let format = match tag {
            "en" | "ja" | "zh" | "ko" | "he" | "th" | "es-mx" | "es-us" => Self::ENGLISH,
            "de" | "it" | "da" | "id" | "el" | "ro" | "hr" | "sl" => Self::suffixed(',', "."),
            "de-at" => LocaleFormat {
                placement: SymbolPlacement::PrefixSpaced,
                sign_before_symbol: true,
                ..Self::suffixed(',', NBSP)
            },
            "es" => LocaleFormat {
                min_grouping_digits: 2,
                ..Self::suffixed(',', ".")
            },
            "fr" => Self::suffixed(',', NARROW_NBSP),
            "sv" | "nb" | "no" | "fi" | "cs" | "sk" | "ru" | "uk" | "hu" | "pt-pt" => {
                Self::suffixed(',', NBSP)
            }
            "pl" => LocaleFormat {
                min_grouping_digits: 2,
                ..Self::suffixed(',', NBSP)
            },
            "nl" => LocaleFormat {
                decimal_separator: ',',
                group_separator: ".",
                placement: SymbolPlacement::PrefixSpaced,
                sign_before_symbol: false,
                min_grouping_digits: 1,
            },
            "pt" | "pt-br" => LocaleFormat {
                decimal_separator: ',',
                group_separator: ".",
                placement: SymbolPlacement::PrefixSpaced,
                sign_before_symbol: true,
                min_grouping_digits: 1,
            },
            "tr" => LocaleFormat {
                decimal_separator: ',',
                group_separator: ".",
                ..Self::ENGLISH
            },
            _ => return None,
        };
        Some(format)
    }

    fn group(&self, integer: &str) -> String {
        if integer.len() < 3 + self.min_grouping_digits {
            return integer.to_string();
        }
        let mut out = String::with_capacity(integer.len() * 2);
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                out.push_str(self.group_separator);
            }
            out.push(digit);
        }
        out
    }
}

/// Format integer cents (two fractional digits) for display
pub fn format_cents(cents: i64, currency_code: &str, locale: &str) -> Result<String, MoneyError> {
    let currency = Currency::from_code(currency_code)?;
    let units = MoneyContext::default().cents_to_units_decimal(cents, DEFAULT_CENTS_PRECISION)?;
    Ok(format_amount(units, currency, locale, None))
}

/// Format a units value, honouring an organization's minimum fraction digits.
///
/// Non-finite input renders as [`MISSING_AMOUNT`].
pub fn format_units(
    units: f64,
    currency_code: &str,
    locale: &str,
    minimum_fraction_digits: Option<u32>,
) -> Result<String, MoneyError> {
    let currency = Currency::from_code(currency_code)?;
    if !units.is_finite() {
        return Ok(MISSING_AMOUNT.to_string());
    }
    let amount = units.to_decimal()?;
    Ok(format_amount(amount, currency, locale, minimum_fraction_digits))
}

/// Symbol used when displaying amounts in `currency_code`
pub fn currency_symbol(currency_code: &str) -> Result<String, MoneyError> {
    Ok(Currency::from_code(currency_code)?.symbol())
}

/// Render a decimal amount.
///
/// Shows at least `minimum_fraction_digits` (default: the currency's scale)
/// and at most `max(minimum, scale)` fraction digits, rounding half away from
/// zero.
pub fn format_amount(
    amount: Decimal,
    currency: Currency,
    locale: &str,
    minimum_fraction_digits: Option<u32>,
) -> String {
    let conventions = LocaleFormat::for_locale(locale);
    let scale = currency.scale();
    let min_digits = minimum_fraction_digits.unwrap_or(scale).min(MoneyContext::MAX_PRECISION);
    let max_digits = min_digits.max(scale);

    let rounded = amount.round_dp_with_strategy(max_digits, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.*}", max_digits as usize, rounded.abs());

    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (digits.as_str(), ""),
    };
    let mut fraction = fraction.to_string();
    while fraction.len() > min_digits as usize && fraction.ends_with('0') {
        fraction.pop();
    }

    let mut number = conventions.group(integer);
    if !fraction.is_empty() {
        number.push(conventions.decimal_separator);
        number.push_str(&fraction);
    }

    let symbol = currency.symbol();
    let sign = if negative { "-" } else { "" };
    match conventions.placement {
        SymbolPlacement::Prefix => format!("{}{}{}", sign, symbol, number),
        SymbolPlacement::PrefixSpaced if conventions.sign_before_symbol => {
            format!("{}{}{}{}", sign, symbol, NBSP, number)
        }
        SymbolPlacement::PrefixSpaced => format!("{}{}{}{}", symbol, NBSP, sign, number),
        SymbolPlacement::SuffixSpaced => format!("{}{}{}{}", sign, number, NBSP, symbol),
    }
}
