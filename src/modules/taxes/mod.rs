pub mod models;
pub mod services;

pub use models::TaxRate;
pub use services::TaxCalculator;
