//! Exact decimal money arithmetic.
//!
//! Amounts are persisted as integer cents and edited as decimal units. Every
//! computation in between goes through [`rust_decimal::Decimal`] so invoice
//! totals never pick up binary floating-point drift.
//!
//! The free functions use [`MoneyContext::default`] (20 significant digits,
//! half-up rounding) and hand back `f64` after each operation. Callers that
//! chain many operations should use [`DecimalChain`] and convert once.

mod chain;
mod input;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::MoneyError;

pub use chain::DecimalChain;
pub use input::{parse_decimal, significant_digits, DecimalInput};

/// Default number of fractional digits between cents and units
pub const DEFAULT_CENTS_PRECISION: u32 = 2;

/// Tax amounts are always rounded to this many decimal places
pub const TAX_DECIMAL_PLACES: u32 = 2;

/// Rounding modes available to a [`MoneyContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Midpoints round away from zero (`0.005 -> 0.01`, `-0.005 -> -0.01`)
    #[default]
    HalfUp,
    /// Midpoints round to the even neighbour
    HalfEven,
    /// Midpoints round towards zero
    HalfDown,
    /// Always away from zero
    Up,
    /// Always towards zero
    Down,
    /// Towards positive infinity
    Ceiling,
    /// Towards negative infinity
    Floor,
}

impl Rounding {
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
            Rounding::HalfDown => RoundingStrategy::MidpointTowardZero,
            Rounding::Up => RoundingStrategy::AwayFromZero,
            Rounding::Down => RoundingStrategy::ToZero,
            Rounding::Ceiling => RoundingStrategy::ToPositiveInfinity,
            Rounding::Floor => RoundingStrategy::ToNegativeInfinity,
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rounding::HalfUp => "half_up",
            Rounding::HalfEven => "half_even",
            Rounding::HalfDown => "half_down",
            Rounding::Up => "up",
            Rounding::Down => "down",
            Rounding::Ceiling => "ceiling",
            Rounding::Floor => "floor",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Rounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "half_up" => Ok(Rounding::HalfUp),
            "half_even" => Ok(Rounding::HalfEven),
            "half_down" => Ok(Rounding::HalfDown),
            "up" => Ok(Rounding::Up),
            "down" => Ok(Rounding::Down),
            "ceiling" => Ok(Rounding::Ceiling),
            "floor" => Ok(Rounding::Floor),
            _ => Err(format!("Invalid rounding mode: {}", s)),
        }
    }
}

/// Working precision and rounding mode for decimal money operations.
///
/// A context is plain data: build one at startup from configuration and pass
/// it to whoever needs it. Nothing is stored globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyContext {
    precision: u32,
    rounding: Rounding,
}

impl Default for MoneyContext {
    fn default() -> Self {
        Self {
            precision: Self::DEFAULT_PRECISION,
            rounding: Rounding::HalfUp,
        }
    }
}

impl MoneyContext {
    /// Significant digits kept by default
    pub const DEFAULT_PRECISION: u32 = 20;

    /// Largest working precision a `Decimal` can honour
    pub const MAX_PRECISION: u32 = 28;

    pub fn new(precision: u32, rounding: Rounding) -> Result<Self, MoneyError> {
        if precision == 0 || precision > Self::MAX_PRECISION {
            return Err(MoneyError::overflow(format!(
                "working precision must be between 1 and {} significant digits, got {}",
                Self::MAX_PRECISION,
                precision
            )));
        }
        Ok(Self {
            precision,
            rounding,
        })
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Parse an operand, rejecting values with more significant digits than
    /// the working precision can hold.
    pub fn parse(&self, input: impl DecimalInput) -> Result<Decimal, MoneyError> {
        let value = input.to_decimal()?;
        let digits = significant_digits(&value);
        if digits > self.precision {
            return Err(MoneyError::overflow(format!(
                "{} has {} significant digits, working precision is {}",
                value, digits, self.precision
            )));
        }
        Ok(value)
    }

    /// Round a result to the working precision
    pub(crate) fn fit(&self, value: Decimal) -> Result<Decimal, MoneyError> {
        if value.is_zero() {
            return Ok(Decimal::ZERO);
        }
        value
            .round_sf_with_strategy(self.precision, self.rounding.strategy())
            .map(|v| v.normalize())
            .ok_or_else(|| MoneyError::overflow(format!("{} cannot be rounded", value)))
    }

    /// Start a decimal accumulator that stays exact across operations
    pub fn chain(&self, start: impl DecimalInput) -> Result<DecimalChain, MoneyError> {
        DecimalChain::new(*self, start)
    }

    pub fn checked_add(&self, a: Decimal, b: Decimal) -> Result<Decimal, MoneyError> {
        let sum = a
            .checked_add(b)
            .ok_or_else(|| MoneyError::overflow(format!("{} + {} overflows", a, b)))?;
        self.fit(sum)
    }

    pub fn checked_sub(&self, a: Decimal, b: Decimal) -> Result<Decimal, MoneyError> {
        let difference = a
            .checked_sub(b)
            .ok_or_else(|| MoneyError::overflow(format!("{} - {} overflows", a, b)))?;
        self.fit(difference)
    }

    pub fn checked_mul(&self, a: Decimal, b: Decimal) -> Result<Decimal, MoneyError> {
        let product = a
            .checked_mul(b)
            .ok_or_else(|| MoneyError::overflow(format!("{} * {} overflows", a, b)))?;
        self.fit(product)
    }

    pub fn checked_div(&self, a: Decimal, b: Decimal) -> Result<Decimal, MoneyError> {
        if b.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let quotient = a
            .checked_div(b)
            .ok_or_else(|| MoneyError::overflow(format!("{} / {} overflows", a, b)))?;
        self.fit(quotient)
    }

    /// `cents / 10^precision`, exact
    pub fn cents_to_units_decimal(&self, cents: i64, precision: u32) -> Result<Decimal, MoneyError> {
        let units = Decimal::try_from_i128_with_scale(i128::from(cents), precision)
            .map_err(|e| MoneyError::overflow(format!("{} cents at precision {}: {}", cents, precision, e)))?;
        self.fit(units)
    }

    pub fn cents_to_units(&self, cents: i64, precision: u32) -> Result<f64, MoneyError> {
        to_native(self.cents_to_units_decimal(cents, precision)?)
    }

    /// `units * 10^precision`, rounded to an integer with the context's
    /// rounding mode
    pub fn units_to_cents(&self, units: impl DecimalInput, precision: u32) -> Result<i64, MoneyError> {
        let units = self.parse(units)?;
        self.decimal_to_cents(units, precision)
    }

    pub(crate) fn decimal_to_cents(&self, units: Decimal, precision: u32) -> Result<i64, MoneyError> {
        let scaled = self.checked_mul(units, pow10(precision)?)?;
        let rounded = scaled.round_dp_with_strategy(0, self.rounding.strategy());
        rounded
            .trunc()
            .to_i64()
            .ok_or_else(|| MoneyError::overflow(format!("{} cents does not fit in i64", rounded)))
    }

    pub fn add(&self, a: impl DecimalInput, b: impl DecimalInput) -> Result<f64, MoneyError> {
        to_native(self.checked_add(self.parse(a)?, self.parse(b)?)?)
    }

    pub fn subtract(&self, a: impl DecimalInput, b: impl DecimalInput) -> Result<f64, MoneyError> {
        to_native(self.checked_sub(self.parse(a)?, self.parse(b)?)?)
    }

    pub fn multiply(&self, a: impl DecimalInput, b: impl DecimalInput) -> Result<f64, MoneyError> {
        to_native(self.checked_mul(self.parse(a)?, self.parse(b)?)?)
    }

    pub fn divide(&self, a: impl DecimalInput, b: impl DecimalInput) -> Result<f64, MoneyError> {
        to_native(self.checked_div(self.parse(a)?, self.parse(b)?)?)
    }

    /// `amount * percentage / 100`, rounded half-up to two decimal places.
    ///
    /// The two places are fixed: they do not follow the cents precision or the
    /// context's rounding mode, because stored invoice totals were reconciled
    /// against tax rounded this way.
    pub fn tax_amount(&self, amount: Decimal, percentage: Decimal) -> Result<Decimal, MoneyError> {
        let gross = self.checked_mul(amount, percentage)?;
        let tax = self.checked_div(gross, Decimal::ONE_HUNDRED)?;
        Ok(tax
            .round_dp_with_strategy(TAX_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
            .normalize())
    }

    pub fn calculate_tax(&self, amount: impl DecimalInput, percentage: impl DecimalInput) -> Result<f64, MoneyError> {
        to_native(self.tax_amount(self.parse(amount)?, self.parse(percentage)?)?)
    }
}

/// Convert a decimal result to `f64` through its shortest decimal string,
/// the same way a decimal library hands a number back to a float host.
pub fn to_native(value: Decimal) -> Result<f64, MoneyError> {
    let text = value.normalize().to_string();
    text.parse::<f64>().map_err(|_| MoneyError::invalid(text))
}

fn pow10(precision: u32) -> Result<Decimal, MoneyError> {
    if precision > MoneyContext::MAX_PRECISION {
        return Err(MoneyError::overflow(format!(
            "precision {} exceeds {} decimal places",
            precision,
            MoneyContext::MAX_PRECISION
        )));
    }
    Decimal::try_from_i128_with_scale(10i128.pow(precision), 0)
        .map_err(|e| MoneyError::overflow(e.to_string()))
}

/// Convert integer cents to units (`cents / 10^precision`)
pub fn cents_to_units(cents: i64, precision: u32) -> Result<f64, MoneyError> {
    MoneyContext::default().cents_to_units(cents, precision)
}

/// Convert units to integer cents, rounding half-up
pub fn units_to_cents(units: impl DecimalInput, precision: u32) -> Result<i64, MoneyError> {
    MoneyContext::default().units_to_cents(units, precision)
}

pub fn add_decimal(a: impl DecimalInput, b: impl DecimalInput) -> Result<f64, MoneyError> {
    MoneyContext::default().add(a, b)
}

pub fn subtract_decimal(a: impl DecimalInput, b: impl DecimalInput) -> Result<f64, MoneyError> {
    MoneyContext::default().subtract(a, b)
}

pub fn multiply_decimal(a: impl DecimalInput, b: impl DecimalInput) -> Result<f64, MoneyError> {
    MoneyContext::default().multiply(a, b)
}

/// Divide `a` by `b`; a zero divisor is an error, never infinity
pub fn divide_decimal(a: impl DecimalInput, b: impl DecimalInput) -> Result<f64, MoneyError> {
    MoneyContext::default().divide(a, b)
}

/// Tax on `amount` at `percentage` percent, rounded half-up to two places
pub fn calculate_tax(amount: impl DecimalInput, percentage: impl DecimalInput) -> Result<f64, MoneyError> {
    MoneyContext::default().calculate_tax(amount, percentage)
}
