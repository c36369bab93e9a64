// Operand parsing for the money primitives.
//
// Form fields hand us floats, integers or raw strings. Strings are parsed
// directly into a Decimal so arbitrary-precision input never passes through
// binary floating point.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::core::error::MoneyError;

/// Most significant digits a `Decimal` holds exactly
const MAX_SIGNIFICANT_DIGITS: usize = 28;

/// Most fractional digits a `Decimal` holds
const MAX_SCALE: i64 = 28;

/// A value that can be turned into an exact decimal operand
pub trait DecimalInput {
    fn to_decimal(&self) -> Result<Decimal, MoneyError>;
}

impl DecimalInput for Decimal {
    fn to_decimal(&self) -> Result<Decimal, MoneyError> {
        Ok(*self)
    }
}

impl DecimalInput for f64 {
    fn to_decimal(&self) -> Result<Decimal, MoneyError> {
        if !self.is_finite() {
            return Err(MoneyError::invalid(self));
        }
        // Display yields the shortest string that round-trips, which is the
        // decimal the user actually typed.
        parse_decimal(&self.to_string())
    }
}

impl DecimalInput for f32 {
    fn to_decimal(&self) -> Result<Decimal, MoneyError> {
        if !self.is_finite() {
            return Err(MoneyError::invalid(self));
        }
        parse_decimal(&self.to_string())
    }
}

macro_rules! impl_integer_input {
    ($($t:ty),*) => {
        $(
            impl DecimalInput for $t {
                fn to_decimal(&self) -> Result<Decimal, MoneyError> {
                    Ok(Decimal::from(*self))
                }
            }
        )*
    };
}

impl_integer_input!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl DecimalInput for str {
    fn to_decimal(&self) -> Result<Decimal, MoneyError> {
        parse_decimal(self)
    }
}

impl DecimalInput for String {
    fn to_decimal(&self) -> Result<Decimal, MoneyError> {
        parse_decimal(self)
    }
}

impl<T: DecimalInput + ?Sized> DecimalInput for &T {
    fn to_decimal(&self) -> Result<Decimal, MoneyError> {
        (**self).to_decimal()
    }
}

/// Parse a numeric string such as `"-12.50"`, `"+3"`, `".5"` or `"1.5e3"`.
///
/// Syntax errors yield `InvalidAmount`. Well-formed numbers that a `Decimal`
/// cannot hold exactly (too many significant digits, digits beyond 28 decimal
/// places, or too large) yield `PrecisionOverflow`; they are never rounded.
pub fn parse_decimal(raw: &str) -> Result<Decimal, MoneyError> {
    let trimmed = raw.trim();
    let literal = NumericLiteral::scan(trimmed).ok_or_else(|| MoneyError::invalid(raw))?;

    if literal.significant_digits > MAX_SIGNIFICANT_DIGITS {
        return Err(MoneyError::overflow(format!(
            "{} has {} significant digits, at most {} are supported",
            trimmed, literal.significant_digits, MAX_SIGNIFICANT_DIGITS
        )));
    }
    if literal.required_scale > MAX_SCALE {
        return Err(MoneyError::overflow(format!(
            "{} needs {} decimal places, at most {} are supported",
            trimmed, literal.required_scale, MAX_SCALE
        )));
    }

    let canonical = literal.canonical(trimmed);
    let parsed = if literal.has_exponent {
        Decimal::from_scientific(&canonical)
    } else {
        Decimal::from_str(&canonical)
    };

    parsed.map_err(|e| MoneyError::overflow(format!("{}: {}", trimmed, e)))
}

/// Number of significant digits in `value`, ignoring leading and trailing zeros
pub fn significant_digits(value: &Decimal) -> u32 {
    let mut mantissa = value.mantissa().unsigned_abs();
    if mantissa == 0 {
        return 0;
    }
    while mantissa % 10 == 0 {
        mantissa /= 10;
    }
    let mut digits = 0;
    while mantissa > 0 {
        mantissa /= 10;
        digits += 1;
    }
    digits
}

struct NumericLiteral {
    has_exponent: bool,
    /// Digits from the first to the last nonzero digit
    significant_digits: usize,
    /// Decimal places needed to hold the last nonzero digit
    required_scale: i64,
}

impl NumericLiteral {
    fn scan(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        let mut i = 0;

        if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
            i += 1;
        }

        let integer_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let integer = &bytes[integer_start..i];

        let mut fraction: &[u8] = &[];
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            let fraction_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            fraction = &bytes[fraction_start..i];
        }
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }

        let mut has_exponent = false;
        let mut exponent: i64 = 0;
        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            has_exponent = true;
            i += 1;
            let negative = bytes.get(i) == Some(&b'-');
            if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
                i += 1;
            }
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i == start {
                return None;
            }
            // Saturate absurd exponents; the value is rejected either way
            let magnitude = s[start..i].parse::<i64>().unwrap_or(i64::MAX / 2);
            exponent = if negative { -magnitude } else { magnitude };
        }

        if i != bytes.len() {
            return None;
        }

        let digits: Vec<u8> = integer.iter().chain(fraction).copied().collect();
        let first = digits.iter().position(|d| *d != b'0');
        let last = digits.iter().rposition(|d| *d != b'0');
        let (significant_digits, required_scale) = match (first, last) {
            (Some(first), Some(last)) => (
                last - first + 1,
                (last as i64 + 1 - integer.len() as i64).saturating_sub(exponent),
            ),
            _ => (0, 0),
        };

        Some(NumericLiteral {
            has_exponent,
            significant_digits,
            required_scale,
        })
    }

    /// Rewrite a scanned literal into the form the decimal parser accepts:
    /// no `+` sign, a leading digit, no trailing fractional zeros, lowercase
    /// exponent.
    fn canonical(&self, s: &str) -> String {
        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let body = body.to_ascii_lowercase();
        let (number, exponent) = match body.split_once('e') {
            Some((number, exponent)) => (number, Some(exponent)),
            None => (body.as_str(), None),
        };

        let mut out = String::with_capacity(s.len() + 2);
        if negative {
            out.push('-');
        }
        // Trailing fractional zeros carry no value and may exceed the
        // parser's scale limit
        let (integer, fraction) = number.split_once('.').unwrap_or((number, ""));
        let fraction = fraction.trim_end_matches('0');
        out.push_str(if integer.is_empty() { "0" } else { integer });
        if !fraction.is_empty() {
            out.push('.');
            out.push_str(fraction);
        }
        if let Some(exponent) = exponent {
            out.push('e');
            out.push_str(exponent.strip_prefix('+').unwrap_or(exponent));
        }
        out
    }
}
