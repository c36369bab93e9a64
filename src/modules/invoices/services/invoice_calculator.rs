use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::core::{AppError, DecimalChain, MoneyContext, Result};
use crate::modules::invoices::models::{Invoice, InvoiceTotals, LineItem};
use crate::modules::taxes::{TaxCalculator, TaxRate};

/// Computes invoice subtotals, tax totals and grand totals.
///
/// Running sums are kept in a [`DecimalChain`], so adding many line items
/// never round-trips through `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceCalculator {
    ctx: MoneyContext,
    taxes: TaxCalculator,
}

impl InvoiceCalculator {
    pub fn new(ctx: MoneyContext) -> Self {
        Self {
            ctx,
            taxes: TaxCalculator::new(ctx),
        }
    }

    /// Extended amount of one line (quantity × unit price)
    pub fn line_total(&self, item: &LineItem) -> Result<Decimal> {
        item.total(&self.ctx)
            .map_err(|e| AppError::field("total", e))
    }

    /// Tax owed on one line, or zero when it has no (known) tax rate
    pub fn line_tax(&self, item: &LineItem, rates: &HashMap<&str, &TaxRate>) -> Result<Decimal> {
        let Some(rate_id) = item.tax_rate_id.as_deref() else {
            return Ok(Decimal::ZERO);
        };

        match rates.get(rate_id) {
            Some(rate) => self.taxes.tax_for_rate(self.line_total(item)?, rate),
            None => {
                warn!(
                    "Line item {:?} references unknown tax rate {}; no tax applied",
                    item.description, rate_id
                );
                Ok(Decimal::ZERO)
            }
        }
    }

    /// Calculate totals for a set of line items.
    ///
    /// - sub_total = Σ line totals
    /// - tax_total = Σ per-line tax, each rounded half-up to two places
    /// - total = sub_total + tax_total
    pub fn calculate(&self, line_items: &[LineItem], tax_rates: &[TaxRate]) -> Result<InvoiceTotals> {
        let rates: HashMap<&str, &TaxRate> = tax_rates
            .iter()
            .map(|rate| (rate.id.as_str(), rate))
            .collect();

        let mut sub_total = DecimalChain::zero(self.ctx);
        let mut tax_total = DecimalChain::zero(self.ctx);

        for item in line_items {
            sub_total = sub_total.add(self.line_total(item)?)?;
            tax_total = tax_total.add(self.line_tax(item, &rates)?)?;
        }

        let total = sub_total.add(tax_total.value())?;

        let totals = InvoiceTotals {
            sub_total: sub_total.value(),
            tax_total: tax_total.value(),
            total: total.value(),
        };

        debug!(
            "Calculated totals for {} line items (sub_total: {}, tax_total: {}, total: {})",
            line_items.len(),
            totals.sub_total,
            totals.tax_total,
            totals.total
        );

        Ok(totals)
    }

    /// Recalculate an invoice's totals in place, as done before saving
    pub fn apply(&self, invoice: &mut Invoice, tax_rates: &[TaxRate]) -> Result<InvoiceTotals> {
        let totals = self.calculate(&invoice.line_items, tax_rates)?;
        invoice.apply_totals(totals);
        Ok(totals)
    }
}
