// An invoice as the editing layer sees it: amounts in exact decimal units.
// Conversion to and from the stored cents form happens exactly once in each
// direction (see `record.rs`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::LineItem;
use crate::core::{AppError, Currency, Result};

/// Invoice state lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceState {
    /// Being edited, not yet sent to the client
    #[default]
    Draft,

    /// Sent to the client, awaiting payment
    Sent,

    /// Paid in full
    Paid,

    /// Cancelled; kept for numbering continuity
    Void,
}

impl std::fmt::Display for InvoiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceState::Draft => write!(f, "draft"),
            InvoiceState::Sent => write!(f, "sent"),
            InvoiceState::Paid => write!(f, "paid"),
            InvoiceState::Void => write!(f, "void"),
        }
    }
}

impl std::str::FromStr for InvoiceState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(InvoiceState::Draft),
            "sent" => Ok(InvoiceState::Sent),
            "paid" => Ok(InvoiceState::Paid),
            "void" => Ok(InvoiceState::Void),
            _ => Err(format!("Invalid invoice state: {}", s)),
        }
    }
}

/// Subtotal, tax total and grand total of an invoice, in units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub sub_total: Decimal,
    pub tax_total: Decimal,
    pub total: Decimal,
}

/// An invoice with amounts in currency units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default)]
    pub id: Option<String>,

    pub number: String,

    #[serde(default)]
    pub state: InvoiceState,

    #[serde(default)]
    pub client_id: Option<String>,

    /// Issue date, stored as unix milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub customer_notes: Option<String>,

    #[serde(default)]
    pub line_items: Vec<LineItem>,

    #[serde(default)]
    pub sub_total: Decimal,

    #[serde(default)]
    pub tax_total: Decimal,

    #[serde(default)]
    pub total: Decimal,
}

impl Invoice {
    /// Create a new draft invoice dated `date`
    pub fn new(number: impl Into<String>, currency: Currency, date: DateTime<Utc>) -> Result<Self> {
        let number = number.into();
        Self::validate_number(&number)?;

        Ok(Self {
            id: None,
            number,
            state: InvoiceState::Draft,
            client_id: None,
            date,
            due_date: None,
            currency,
            customer_notes: None,
            line_items: Vec::new(),
            sub_total: Decimal::ZERO,
            tax_total: Decimal::ZERO,
            total: Decimal::ZERO,
        })
    }

    pub fn add_line_item(&mut self, item: LineItem) {
        self.line_items.push(item);
    }

    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals {
            sub_total: self.sub_total,
            tax_total: self.tax_total,
            total: self.total,
        }
    }

    pub fn apply_totals(&mut self, totals: InvoiceTotals) {
        self.sub_total = totals.sub_total;
        self.tax_total = totals.tax_total;
        self.total = totals.total;
    }

    /// Copy this invoice into a new draft numbered `number` and dated
    /// `date`. The due date keeps the same distance from the issue date.
    pub fn duplicate(&self, number: impl Into<String>, date: DateTime<Utc>) -> Result<Self> {
        let number = number.into();
        Self::validate_number(&number)?;

        let due_date = self.due_date.map(|due| date + (due - self.date));
        let line_items = self
            .line_items
            .iter()
            .cloned()
            .map(|item| LineItem { id: None, ..item })
            .collect();

        Ok(Self {
            id: None,
            number,
            state: InvoiceState::Draft,
            client_id: self.client_id.clone(),
            date,
            due_date,
            currency: self.currency,
            customer_notes: self.customer_notes.clone(),
            line_items,
            sub_total: self.sub_total,
            tax_total: self.tax_total,
            total: self.total,
        })
    }

    fn validate_number(number: &str) -> Result<()> {
        if number.trim().is_empty() {
            return Err(AppError::validation("Invoice number cannot be empty"));
        }

        Ok(())
    }
}
