mod tax;

pub use tax::TaxRate;
