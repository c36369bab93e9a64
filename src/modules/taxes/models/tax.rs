use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};

/// A named tax rate an organization applies to line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRate {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Percentage points, e.g. `20` for 20%
    pub percentage: Decimal,

    #[serde(default)]
    pub is_default: bool,
}

impl TaxRate {
    pub fn new(name: impl Into<String>, percentage: Decimal) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::validation("Tax rate name cannot be empty"));
        }
        Self::validate_percentage(percentage)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            description: None,
            percentage,
            is_default: false,
        })
    }

    /// Percentage must lie within 0..=100
    pub fn validate_percentage(percentage: Decimal) -> Result<()> {
        if percentage < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Tax percentage cannot be negative, got: {}",
                percentage
            )));
        }

        if percentage > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "Tax percentage cannot exceed 100, got: {}",
                percentage
            )));
        }

        Ok(())
    }
}
