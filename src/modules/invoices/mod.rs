// Invoices module

pub mod models;
pub mod services;

pub use models::{Invoice, InvoiceRecord, InvoiceState, InvoiceTotals, LineItem, LineItemRecord};
pub use services::{InvoiceCalculator, InvoiceDraft, InvoiceSummary};
