// A line item is one row of an invoice: quantity × unit price, optionally
// linked to a tax rate. Amounts are held as exact decimals in units; the
// stored form (cents) lives in `LineItemRecord`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, DecimalInput, MoneyContext, MoneyError, Result};

/// Represents a single line item in an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub id: Option<String>,

    /// Description of the product or service
    #[serde(default)]
    pub description: Option<String>,

    /// Quantity, possibly fractional (hours of work)
    pub quantity: Decimal,

    /// Price per unit, in currency units
    pub unit_price: Decimal,

    /// Id of the tax rate applied to this line
    #[serde(default, rename = "taxRate")]
    pub tax_rate_id: Option<String>,
}

impl LineItem {
    /// Create a new line item with validation
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Result<Self> {
        Self::validate_quantity(quantity)?;

        Ok(Self {
            id: None,
            description: Some(description.into()),
            quantity,
            unit_price,
            tax_rate_id: None,
        })
    }

    /// Build a line item from raw form input.
    ///
    /// A value that does not parse is reported against its field rather than
    /// being treated as zero.
    pub fn from_input(
        ctx: &MoneyContext,
        description: impl Into<String>,
        quantity: impl DecimalInput,
        unit_price: impl DecimalInput,
    ) -> Result<Self> {
        let quantity = ctx
            .parse(quantity)
            .map_err(|e| AppError::field("quantity", e))?;
        let unit_price = ctx
            .parse(unit_price)
            .map_err(|e| AppError::field("unitPrice", e))?;

        Self::new(description, quantity, unit_price)
    }

    pub fn with_tax_rate(mut self, tax_rate_id: impl Into<String>) -> Self {
        self.tax_rate_id = Some(tax_rate_id.into());
        self
    }

    /// Set the line's total directly, back-solving the unit price as
    /// total ÷ quantity at the context's working precision.
    ///
    /// A zero quantity (possible on deserialized items) is reported against
    /// the quantity field.
    pub fn with_total(mut self, ctx: &MoneyContext, total: impl DecimalInput) -> Result<Self> {
        let unit_price = ctx
            .chain(total)
            .map_err(|e| AppError::field("total", e))?
            .divide(self.quantity)
            .map_err(|e| match e {
                MoneyError::DivisionByZero => AppError::field("quantity", e),
                other => AppError::field("total", other),
            })?;

        self.unit_price = unit_price.value();
        Ok(self)
    }

    /// Extended amount: quantity × unit_price, exact and unrounded
    pub fn total(&self, ctx: &MoneyContext) -> std::result::Result<Decimal, MoneyError> {
        ctx.checked_mul(self.quantity, self.unit_price)
    }

    /// Validate quantity (must be positive)
    fn validate_quantity(quantity: Decimal) -> Result<()> {
        if quantity <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }

        Ok(())
    }
}
