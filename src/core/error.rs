use std::fmt;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors raised by the decimal money primitives.
///
/// The set is closed: every failure of the underlying decimal library is
/// mapped onto one of these variants at the boundary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Input is not a finite decimal (non-numeric string, NaN, infinity)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Divisor was zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Input or result does not fit the configured working precision
    #[error("Precision overflow: {0}")]
    PrecisionOverflow(String),

    /// Currency code is not a known ISO 4217 code
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

impl MoneyError {
    pub fn invalid(input: impl fmt::Display) -> Self {
        MoneyError::InvalidAmount(input.to_string())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        MoneyError::PrecisionOverflow(msg.into())
    }
}

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// A monetary form field could not be used
    #[error("Invalid value for {field}: {source}")]
    Field {
        field: String,
        #[source]
        source: MoneyError,
    },

    /// Money arithmetic errors outside of a specific field
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Attach a form field name to a money error, so the caller can surface it
    /// next to the offending input instead of zeroing the value.
    pub fn field(field: impl Into<String>, source: MoneyError) -> Self {
        AppError::Field {
            field: field.into(),
            source,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    /// Name of the form field this error belongs to, if any
    pub fn field_name(&self) -> Option<&str> {
        match self {
            AppError::Field { field, .. } => Some(field),
            _ => None,
        }
    }
}
