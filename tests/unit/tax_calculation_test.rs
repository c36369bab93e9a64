// Tax calculation: amount × percentage / 100, rounded half-up to two places
//
// The two-place rounding is fixed; it does not follow the cents precision or
// the rounding mode configured for everything else.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use upcount::core::{calculate_tax, MoneyContext, MoneyError, Rounding};
use upcount::taxes::{TaxCalculator, TaxRate};

#[test]
fn test_calculate_tax_reference_values() {
    assert_eq!(calculate_tax(33.33, 20).unwrap(), 6.67);
    assert_eq!(calculate_tax(100, 7.5).unwrap(), 7.5);
    assert_eq!(calculate_tax("19.99", "21").unwrap(), 4.2);
    assert_eq!(calculate_tax(0.1, 5).unwrap(), 0.01);
}

#[test]
fn test_tax_rounding_ignores_context_settings() {
    for (precision, rounding) in [
        (4, Rounding::Down),
        (20, Rounding::HalfEven),
        (28, Rounding::Floor),
    ] {
        let ctx = MoneyContext::new(precision, rounding).unwrap();
        assert_eq!(ctx.calculate_tax(33.33, 20).unwrap(), 6.67);
        // 0.125 is a midpoint at two places
        assert_eq!(ctx.calculate_tax("1.25", 10).unwrap(), 0.13);
    }
}

#[test]
fn test_negative_amount_tax_rounds_away_from_zero() {
    assert_eq!(calculate_tax(-1.25, 10).unwrap(), -0.13);
}

#[test]
fn test_calculate_tax_rejects_invalid_input() {
    assert!(matches!(
        calculate_tax("twenty", 20),
        Err(MoneyError::InvalidAmount(_))
    ));
    assert!(matches!(
        calculate_tax(10, f64::NAN),
        Err(MoneyError::InvalidAmount(_))
    ));
}

#[test]
fn test_tax_calculator_validates_percentage() {
    let calculator = TaxCalculator::default();
    assert!(calculator.calculate_tax(dec!(10), dec!(101)).is_err());
    assert!(calculator.calculate_tax(dec!(10), dec!(-0.5)).is_err());
    assert_eq!(calculator.calculate_tax(dec!(10), dec!(0)).unwrap(), Decimal::ZERO);
}

#[test]
fn test_tax_rate_percentages() {
    let rate = TaxRate::new("Reduced VAT", dec!(9.5)).unwrap();
    let calculator = TaxCalculator::default();
    assert_eq!(calculator.tax_for_rate(dec!(200), &rate).unwrap(), dec!(19));
}

proptest! {
    /// Property: tax always has at most two decimal places
    #[test]
    fn test_tax_has_two_decimal_places(
        amount_cents in 0i64..1_000_000_000,
        basis_points in 0u32..=10_000
    ) {
        let calculator = TaxCalculator::default();
        let amount = Decimal::new(amount_cents, 2);
        let percentage = Decimal::new(basis_points as i64, 2);

        let tax = calculator.calculate_tax(amount, percentage).unwrap();

        prop_assert!(tax.normalize().scale() <= 2, "tax {} has more than two places", tax);
    }

    /// Property: tax is within half a cent of the exact product
    #[test]
    fn test_tax_is_within_half_a_cent(
        amount_cents in 0i64..1_000_000_000,
        percent in 0u32..=100
    ) {
        let calculator = TaxCalculator::default();
        let amount = Decimal::new(amount_cents, 2);
        let percentage = Decimal::from(percent);

        let tax = calculator.calculate_tax(amount, percentage).unwrap();
        let exact = amount * percentage / Decimal::ONE_HUNDRED;

        prop_assert!((tax - exact).abs() <= dec!(0.005));
    }

    /// Property: tax never exceeds the taxed amount for rates up to 100%
    #[test]
    fn test_tax_never_exceeds_amount(
        amount_cents in 0i64..1_000_000_000,
        percent in 0u32..=100
    ) {
        let calculator = TaxCalculator::default();
        let amount = Decimal::new(amount_cents, 2);

        let tax = calculator.calculate_tax(amount, Decimal::from(percent)).unwrap();

        prop_assert!(tax >= Decimal::ZERO);
        prop_assert!(tax <= amount, "tax {} exceeds amount {}", tax, amount);
    }
}
