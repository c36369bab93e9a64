use rust_decimal::Decimal;

use crate::core::{AppError, MoneyContext, Result};
use crate::modules::taxes::models::TaxRate;

/// TaxCalculator handles per-line-item tax calculations
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxCalculator {
    ctx: MoneyContext,
}

impl TaxCalculator {
    pub fn new(ctx: MoneyContext) -> Self {
        Self { ctx }
    }

    /// Calculate tax amount for a line item
    /// tax_amount = amount × percentage / 100, rounded half-up to 2 places
    pub fn calculate_tax(&self, amount: Decimal, percentage: Decimal) -> Result<Decimal> {
        // Validate percentage first
        self.validate_percentage(percentage)?;

        Ok(self.ctx.tax_amount(amount, percentage)?)
    }

    /// Tax owed on `amount` under a stored tax rate
    pub fn tax_for_rate(&self, amount: Decimal, rate: &TaxRate) -> Result<Decimal> {
        self.calculate_tax(amount, rate.percentage)
            .map_err(|e| match e {
                AppError::Validation(msg) => {
                    AppError::Validation(format!("Tax rate '{}': {}", rate.name, msg))
                }
                other => other,
            })
    }

    /// Validate percentage is within acceptable range (0-100)
    pub fn validate_percentage(&self, percentage: Decimal) -> Result<()> {
        TaxRate::validate_percentage(percentage)
    }
}
