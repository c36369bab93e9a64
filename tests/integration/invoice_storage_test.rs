// Storage shape of invoices: cents on disk, units in memory

use chrono::{Duration, TimeZone, Utc};
use rust_decimal_macros::dec;
use upcount::core::{Currency, MoneyContext, Rounding};
use upcount::invoices::{Invoice, InvoiceCalculator, InvoiceRecord, InvoiceState, LineItem};
use upcount::taxes::TaxRate;

fn reduced_rate() -> TaxRate {
    TaxRate {
        id: "reduced".to_string(),
        name: "Reduced VAT".to_string(),
        description: Some("Books and food".to_string()),
        percentage: dec!(7),
        is_default: false,
    }
}

fn saved_invoice(ctx: &MoneyContext) -> Invoice {
    let date = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
    let mut invoice = Invoice::new("INV-0007", Currency::EUR, date).unwrap();
    invoice.id = Some("inv_7".to_string());
    invoice.client_id = Some("client_3".to_string());
    invoice.due_date = Some(date + Duration::days(30));
    invoice.customer_notes = Some("Thank you!".to_string());
    invoice.add_line_item(
        LineItem::from_input(ctx, "Paperback", 3, "12.99")
            .unwrap()
            .with_tax_rate("reduced"),
    );
    invoice.add_line_item(LineItem::from_input(ctx, "Shipping", 1, 4.5).unwrap());
    InvoiceCalculator::new(*ctx)
        .apply(&mut invoice, &[reduced_rate()])
        .unwrap();
    invoice
}

#[test]
fn test_record_round_trip_preserves_invoice() {
    let ctx = MoneyContext::default();
    let invoice = saved_invoice(&ctx);

    let record = invoice.to_record(&ctx, 2).unwrap();
    assert_eq!(record.sub_total, 4347);
    assert_eq!(record.tax_total, 273);
    assert_eq!(record.total, 4620);

    let loaded = record.to_invoice(&ctx, 2).unwrap();
    assert_eq!(loaded, invoice);
}

#[test]
fn test_record_json_uses_storage_field_names() {
    let ctx = MoneyContext::default();
    let record = saved_invoice(&ctx).to_record(&ctx, 2).unwrap();

    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["number"], "INV-0007");
    assert_eq!(json["clientId"], "client_3");
    assert_eq!(json["currency"], "EUR");
    assert_eq!(json["state"], "draft");
    assert_eq!(json["date"], 1_705_311_000_000i64);
    assert_eq!(json["subTotal"], 4347);
    assert_eq!(json["taxTotal"], 273);
    assert_eq!(json["total"], 4620);
    assert_eq!(json["lineItems"][0]["unitPrice"], 1299);
    assert_eq!(json["lineItems"][0]["taxRate"], "reduced");
    assert!(json["lineItems"][1]["taxRate"].is_null());
}

#[test]
fn test_record_survives_json_storage() {
    let ctx = MoneyContext::default();
    let record = saved_invoice(&ctx).to_record(&ctx, 2).unwrap();

    let stored = serde_json::to_string(&record).unwrap();
    let restored: InvoiceRecord = serde_json::from_str(&stored).unwrap();

    assert_eq!(restored, record);
}

#[test]
fn test_three_digit_precision_storage() {
    let ctx = MoneyContext::default();
    let date = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let mut invoice = Invoice::new("INV-KWD-1", Currency::from_code("KWD").unwrap(), date).unwrap();
    invoice.add_line_item(LineItem::from_input(&ctx, "Retainer", 1, "10.1235").unwrap());
    InvoiceCalculator::new(ctx).apply(&mut invoice, &[]).unwrap();

    let record = invoice.to_record(&ctx, 3).unwrap();

    assert_eq!(record.line_items[0].unit_price, 10_124);
    assert_eq!(record.total, 10_124);
    assert_eq!(record.to_invoice(&ctx, 3).unwrap().total, dec!(10.124));
}

#[test]
fn test_configured_rounding_applies_on_save() {
    let ctx = MoneyContext::new(20, Rounding::HalfEven).unwrap();
    let date = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let mut invoice = Invoice::new("INV-0008", Currency::USD, date).unwrap();
    invoice.add_line_item(LineItem::from_input(&ctx, "Widget", 1, "0.125").unwrap());
    InvoiceCalculator::new(ctx).apply(&mut invoice, &[]).unwrap();

    let record = invoice.to_record(&ctx, 2).unwrap();

    assert_eq!(record.line_items[0].unit_price, 12);
    assert_eq!(record.total, 12);
}

#[test]
fn test_duplicate_of_stored_invoice() {
    let ctx = MoneyContext::default();
    let mut invoice = saved_invoice(&ctx)
        .to_record(&ctx, 2)
        .unwrap()
        .to_invoice(&ctx, 2)
        .unwrap();
    invoice.state = InvoiceState::Sent;

    let today = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let copy = invoice.duplicate("INV-0009", today).unwrap();

    assert_eq!(copy.id, None);
    assert_eq!(copy.state, InvoiceState::Draft);
    assert_eq!(copy.due_date, Some(today + Duration::days(30)));
    assert_eq!(copy.client_id.as_deref(), Some("client_3"));
    assert!(copy.line_items.iter().all(|item| item.id.is_none()));
    assert_eq!(copy.totals(), invoice.totals());

    let record = copy.to_record(&ctx, 2).unwrap();
    assert_eq!(record.total, 4620);
}
