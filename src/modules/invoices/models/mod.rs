mod invoice;
mod line_item;
mod record;

pub use invoice::{Invoice, InvoiceState, InvoiceTotals};
pub use line_item::LineItem;
pub use record::{InvoiceRecord, LineItemRecord};
