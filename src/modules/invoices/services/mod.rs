mod invoice_calculator;
mod invoice_summary;

pub use invoice_calculator::InvoiceCalculator;
pub use invoice_summary::{FormattedTotals, InvoiceDraft, InvoiceSummary};
