use rust_decimal::Decimal;

use super::{to_native, DecimalInput, MoneyContext};
use crate::core::error::MoneyError;

/// A running decimal value that is only converted to a native number on
/// request.
///
/// ```
/// use upcount::core::money::{DecimalChain, MoneyContext};
///
/// let total = MoneyContext::default()
///     .chain(19.99)?
///     .multiply(3)?
///     .add("0.03")?
///     .to_f64()?;
/// assert_eq!(total, 60.0);
/// # Ok::<(), upcount::core::MoneyError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalChain {
    ctx: MoneyContext,
    value: Decimal,
}

impl DecimalChain {
    pub fn new(ctx: MoneyContext, start: impl DecimalInput) -> Result<Self, MoneyError> {
        let value = ctx.parse(start)?;
        Ok(Self { ctx, value })
    }

    /// An accumulator starting at zero
    pub fn zero(ctx: MoneyContext) -> Self {
        Self {
            ctx,
            value: Decimal::ZERO,
        }
    }

    /// Sum every operand without leaving decimal arithmetic
    pub fn sum<I>(ctx: MoneyContext, operands: I) -> Result<Self, MoneyError>
    where
        I: IntoIterator,
        I::Item: DecimalInput,
    {
        operands
            .into_iter()
            .try_fold(Self::zero(ctx), |acc, operand| acc.add(operand))
    }

    pub fn add(self, operand: impl DecimalInput) -> Result<Self, MoneyError> {
        let operand = self.ctx.parse(operand)?;
        self.with(self.ctx.checked_add(self.value, operand)?)
    }

    pub fn subtract(self, operand: impl DecimalInput) -> Result<Self, MoneyError> {
        let operand = self.ctx.parse(operand)?;
        self.with(self.ctx.checked_sub(self.value, operand)?)
    }

    pub fn multiply(self, operand: impl DecimalInput) -> Result<Self, MoneyError> {
        let operand = self.ctx.parse(operand)?;
        self.with(self.ctx.checked_mul(self.value, operand)?)
    }

    pub fn divide(self, operand: impl DecimalInput) -> Result<Self, MoneyError> {
        let operand = self.ctx.parse(operand)?;
        self.with(self.ctx.checked_div(self.value, operand)?)
    }

    /// Tax on the current value, rounded half-up to two places
    pub fn tax(self, percentage: impl DecimalInput) -> Result<Self, MoneyError> {
        let percentage = self.ctx.parse(percentage)?;
        self.with(self.ctx.tax_amount(self.value, percentage)?)
    }

    /// Round to `dp` decimal places with the context's rounding mode
    pub fn round_dp(self, dp: u32) -> Self {
        Self {
            ctx: self.ctx,
            value: self
                .value
                .round_dp_with_strategy(dp, self.ctx.rounding().strategy())
                .normalize(),
        }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn to_f64(&self) -> Result<f64, MoneyError> {
        to_native(self.value)
    }

    /// Convert the accumulated units to integer cents
    pub fn to_cents(&self, precision: u32) -> Result<i64, MoneyError> {
        self.ctx.decimal_to_cents(self.value, precision)
    }

    fn with(self, value: Decimal) -> Result<Self, MoneyError> {
        Ok(Self {
            ctx: self.ctx,
            value,
        })
    }
}

impl From<DecimalChain> for Decimal {
    fn from(chain: DecimalChain) -> Self {
        chain.value
    }
}
