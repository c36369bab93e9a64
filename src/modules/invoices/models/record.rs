// Storage shape of an invoice: every monetary field is integer cents.
//
// `Invoice::to_record` runs once before persisting and `InvoiceRecord::to_invoice`
// once after loading; nothing else converts between the two representations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::invoice::{Invoice, InvoiceState};
use super::line_item::LineItem;
use crate::core::{AppError, Currency, MoneyContext, Result};

/// Invoice as persisted by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub number: String,
    pub state: InvoiceState,
    #[serde(default)]
    pub client_id: Option<String>,
    /// Unix milliseconds
    pub date: i64,
    #[serde(default)]
    pub due_date: Option<i64>,
    pub currency: Currency,
    #[serde(default)]
    pub customer_notes: Option<String>,
    /// Stored as cents
    pub sub_total: i64,
    /// Stored as cents
    pub tax_total: i64,
    /// Stored as cents
    pub total: i64,
    #[serde(default)]
    pub line_items: Vec<LineItemRecord>,
}

/// Line item as persisted by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: Decimal,
    /// Stored as cents
    pub unit_price: i64,
    #[serde(default)]
    pub tax_rate: Option<String>,
}

impl Invoice {
    /// Convert unit amounts to cents at `precision` fractional digits
    pub fn to_record(&self, ctx: &MoneyContext, precision: u32) -> Result<InvoiceRecord> {
        let to_cents = |field: &str, units: Decimal| {
            ctx.decimal_to_cents(units, precision)
                .map_err(|e| AppError::field(field, e))
        };

        let line_items = self
            .line_items
            .iter()
            .map(|item| -> Result<LineItemRecord> {
                Ok(LineItemRecord {
                    id: item.id.clone(),
                    description: item.description.clone(),
                    quantity: item.quantity,
                    unit_price: to_cents("unitPrice", item.unit_price)?,
                    tax_rate: item.tax_rate_id.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(InvoiceRecord {
            id: self.id.clone(),
            number: self.number.clone(),
            state: self.state,
            client_id: self.client_id.clone(),
            date: self.date.timestamp_millis(),
            due_date: self.due_date.map(|due| due.timestamp_millis()),
            currency: self.currency,
            customer_notes: self.customer_notes.clone(),
            sub_total: to_cents("subTotal", self.sub_total)?,
            tax_total: to_cents("taxTotal", self.tax_total)?,
            total: to_cents("total", self.total)?,
            line_items,
        })
    }
}

impl InvoiceRecord {
    /// Convert stored cents back to unit amounts
    pub fn to_invoice(&self, ctx: &MoneyContext, precision: u32) -> Result<Invoice> {
        let to_units = |cents: i64| ctx.cents_to_units_decimal(cents, precision);

        let line_items = self
            .line_items
            .iter()
            .map(|item| -> Result<LineItem> {
                Ok(LineItem {
                    id: item.id.clone(),
                    description: item.description.clone(),
                    quantity: item.quantity,
                    unit_price: to_units(item.unit_price)?,
                    tax_rate_id: item.tax_rate.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Invoice {
            id: self.id.clone(),
            number: self.number.clone(),
            state: self.state,
            client_id: self.client_id.clone(),
            date: millis_to_datetime(self.date)?,
            due_date: self.due_date.map(millis_to_datetime).transpose()?,
            currency: self.currency,
            customer_notes: self.customer_notes.clone(),
            line_items,
            sub_total: to_units(self.sub_total)?,
            tax_total: to_units(self.tax_total)?,
            total: to_units(self.total)?,
        })
    }
}

fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| AppError::validation(format!("Invalid timestamp: {}", millis)))
}
