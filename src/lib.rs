//! Upcount invoicing core library
//!
//! Exact decimal money arithmetic, cents <-> units conversion, currency
//! formatting and invoice totals for the Upcount invoicing application.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::invoices;
pub use modules::taxes;
