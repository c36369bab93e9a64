use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::info;

use crate::config::MoneyConfig;
use crate::core::{format_amount, Result};
use crate::modules::invoices::models::{Invoice, InvoiceRecord};
use crate::modules::invoices::services::InvoiceCalculator;
use crate::modules::taxes::TaxRate;

/// An invoice as submitted by the editing form, with the organization's
/// tax rates it may reference
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub invoice: Invoice,
    #[serde(default)]
    pub tax_rates: Vec<TaxRate>,
}

impl InvoiceDraft {
    /// Read a draft from its JSON form
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Ok(serde_json::from_str(&input)?)
    }
}

/// Display strings for an invoice's totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub sub_total: String,
    pub tax_total: String,
    pub total: String,
}

/// Result of saving a draft: the record to persist plus what the summary
/// table shows
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceSummary {
    pub record: InvoiceRecord,
    pub formatted: FormattedTotals,
}

impl InvoiceSummary {
    /// Compute totals, convert to cents once, and format the totals as they
    /// will read back from storage.
    pub fn build(draft: InvoiceDraft, settings: &MoneyConfig) -> Result<Self> {
        let ctx = settings.context()?;
        let calculator = InvoiceCalculator::new(ctx);

        let mut invoice = draft.invoice;
        calculator.apply(&mut invoice, &draft.tax_rates)?;

        let record = invoice.to_record(&ctx, settings.cents_precision)?;
        let stored = record.to_invoice(&ctx, settings.cents_precision)?;

        let format = |amount| {
            format_amount(
                amount,
                stored.currency,
                &settings.locale,
                settings.minimum_fraction_digits,
            )
        };
        let formatted = FormattedTotals {
            sub_total: format(stored.sub_total),
            tax_total: format(stored.tax_total),
            total: format(stored.total),
        };

        info!(
            "Invoice {} totals: {} (subtotal {}, tax {})",
            record.number, formatted.total, formatted.sub_total, formatted.tax_total
        );

        Ok(Self { record, formatted })
    }
}
