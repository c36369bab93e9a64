pub mod currency;
pub mod error;
pub mod format;
pub mod money;

pub use currency::Currency;
pub use error::{AppError, MoneyError, Result};
pub use format::{currency_symbol, format_amount, format_cents, format_units};
pub use money::{
    add_decimal, calculate_tax, cents_to_units, divide_decimal, multiply_decimal,
    subtract_decimal, units_to_cents, DecimalChain, DecimalInput, MoneyContext, Rounding,
};
