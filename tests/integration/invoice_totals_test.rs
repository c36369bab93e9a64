// End-to-end invoice totals: form input -> totals -> cents -> reload -> display

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use upcount::config::MoneyConfig;
use upcount::core::{format_cents, AppError, Currency, MoneyContext, MoneyError};
use upcount::invoices::{Invoice, InvoiceCalculator, InvoiceDraft, InvoiceSummary, LineItem};
use upcount::taxes::TaxRate;

fn standard_vat() -> TaxRate {
    TaxRate {
        id: "vat20".to_string(),
        name: "VAT".to_string(),
        description: None,
        percentage: dec!(20),
        is_default: true,
    }
}

fn sample_invoice(ctx: &MoneyContext) -> Invoice {
    let date = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let mut invoice = Invoice::new("INV-2024-001", Currency::USD, date).unwrap();
    invoice.add_line_item(
        LineItem::from_input(ctx, "Consulting", 2, "10.005")
            .unwrap()
            .with_tax_rate("vat20"),
    );
    invoice.add_line_item(
        LineItem::from_input(ctx, "Expenses", 1, 5.00)
            .unwrap()
            .with_tax_rate("vat20"),
    );
    invoice
}

#[test]
fn test_totals_are_exact_and_convert_once() {
    let ctx = MoneyContext::default();
    let calculator = InvoiceCalculator::new(ctx);
    let mut invoice = sample_invoice(&ctx);

    let totals = calculator.apply(&mut invoice, &[standard_vat()]).unwrap();

    assert_eq!(totals.sub_total, dec!(25.01));
    assert_eq!(totals.tax_total, dec!(5.00));
    assert_eq!(totals.total, dec!(30.01));

    let record = invoice.to_record(&ctx, 2).unwrap();
    assert_eq!(record.sub_total, 2501);
    assert_eq!(record.tax_total, 500);
    assert_eq!(record.total, 3001);
    assert_eq!(record.line_items[0].unit_price, 1001);

    let reloaded = record.to_invoice(&ctx, 2).unwrap();
    assert_eq!(reloaded.totals(), totals);
    assert_eq!(format_cents(record.total, "USD", "en-US").unwrap(), "$30.01");
}

#[test]
fn test_recalculating_after_reload_uses_stored_cent_prices() {
    let ctx = MoneyContext::default();
    let calculator = InvoiceCalculator::new(ctx);
    let mut invoice = sample_invoice(&ctx);
    calculator.apply(&mut invoice, &[standard_vat()]).unwrap();
    let first = invoice.to_record(&ctx, 2).unwrap();
    assert_eq!(first.total, 3001);

    // The 10.005 unit price is stored as 1001 cents, so recalculating the
    // reloaded invoice sees 2 × 10.01 and the subtotal moves up a cent
    let mut reloaded = first.to_invoice(&ctx, 2).unwrap();
    assert_eq!(reloaded.line_items[0].unit_price, dec!(10.01));
    let totals = calculator.apply(&mut reloaded, &[standard_vat()]).unwrap();
    assert_eq!(totals.sub_total, dec!(25.02));
    assert_eq!(totals.tax_total, dec!(5.00));
    assert_eq!(totals.total, dec!(30.02));

    // From then on every price is whole cents and further saves are a fixed point
    let second = reloaded.to_record(&ctx, 2).unwrap();
    assert_eq!(second.sub_total, 2502);
    let mut again = second.to_invoice(&ctx, 2).unwrap();
    calculator.apply(&mut again, &[standard_vat()]).unwrap();
    assert_eq!(again.to_record(&ctx, 2).unwrap(), second);
}

#[test]
fn test_editing_line_total_back_solves_unit_price() {
    let ctx = MoneyContext::default();
    let mut invoice = sample_invoice(&ctx);
    let edited = invoice.line_items[0].clone().with_total(&ctx, "30").unwrap();
    invoice.line_items[0] = edited;

    let totals = InvoiceCalculator::new(ctx)
        .apply(&mut invoice, &[standard_vat()])
        .unwrap();

    assert_eq!(invoice.line_items[0].unit_price, dec!(15));
    assert_eq!(totals.sub_total, dec!(35));
    assert_eq!(totals.tax_total, dec!(7));
    assert_eq!(totals.total, dec!(42));
}

#[test]
fn test_many_small_lines_do_not_drift() {
    let ctx = MoneyContext::default();
    let calculator = InvoiceCalculator::new(ctx);
    let items: Vec<LineItem> = (0..1000)
        .map(|_| LineItem::from_input(&ctx, "Tick", 1, 0.1).unwrap())
        .collect();

    let totals = calculator.calculate(&items, &[]).unwrap();

    assert_eq!(totals.sub_total, dec!(100));
    assert_eq!(totals.tax_total, Decimal::ZERO);
    assert_eq!(totals.total, dec!(100));
}

#[test]
fn test_unknown_tax_rate_applies_no_tax() {
    let ctx = MoneyContext::default();
    let items = vec![LineItem::from_input(&ctx, "Design", 3, "40")
        .unwrap()
        .with_tax_rate("missing")];

    let totals = InvoiceCalculator::new(ctx).calculate(&items, &[standard_vat()]).unwrap();

    assert_eq!(totals.sub_total, dec!(120));
    assert_eq!(totals.tax_total, Decimal::ZERO);
    assert_eq!(totals.total, dec!(120));
}

#[test]
fn test_invalid_form_input_is_reported_per_field() {
    let ctx = MoneyContext::default();

    let err = LineItem::from_input(&ctx, "Hours", "two", 10).unwrap_err();
    assert_eq!(err.field_name(), Some("quantity"));

    let err = LineItem::from_input(&ctx, "Hours", 2, "10,50").unwrap_err();
    assert_eq!(err.field_name(), Some("unitPrice"));
    assert!(matches!(
        err,
        AppError::Field {
            source: MoneyError::InvalidAmount(_),
            ..
        }
    ));

    assert!(LineItem::from_input(&ctx, "Hours", 0, 10).is_err());
}

#[test]
fn test_discount_lines_reduce_totals() {
    let ctx = MoneyContext::default();
    let items = vec![
        LineItem::from_input(&ctx, "Retainer", 1, 1000).unwrap().with_tax_rate("vat20"),
        LineItem::from_input(&ctx, "Loyalty discount", 1, -100.5)
            .unwrap()
            .with_tax_rate("vat20"),
    ];

    let totals = InvoiceCalculator::new(ctx).calculate(&items, &[standard_vat()]).unwrap();

    assert_eq!(totals.sub_total, dec!(899.5));
    assert_eq!(totals.tax_total, dec!(179.9));
    assert_eq!(totals.total, dec!(1079.4));
}

#[test]
fn test_summary_from_json_draft() {
    let draft: InvoiceDraft = serde_json::from_str(
        r#"{
            "invoice": {
                "number": "INV-2024-001",
                "date": 1714521600000,
                "currency": "USD",
                "lineItems": [
                    {"description": "Consulting", "quantity": 2, "unitPrice": "10.005", "taxRate": "vat20"},
                    {"description": "Expenses", "quantity": 1, "unitPrice": 5, "taxRate": "vat20"}
                ]
            },
            "taxRates": [{"id": "vat20", "name": "VAT", "percentage": 20}]
        }"#,
    )
    .unwrap();

    let summary = InvoiceSummary::build(draft, &MoneyConfig::default()).unwrap();

    assert_eq!(summary.record.sub_total, 2501);
    assert_eq!(summary.record.tax_total, 500);
    assert_eq!(summary.record.total, 3001);
    assert_eq!(summary.formatted.sub_total, "$25.01");
    assert_eq!(summary.formatted.tax_total, "$5.00");
    assert_eq!(summary.formatted.total, "$30.01");
}
