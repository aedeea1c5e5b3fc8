//! Tests for the estimate calculation (`compute`)

use rstest::{fixture, rstest};

use floorcalc::domain::{
    compute, parse_real, CalculationResult, CalculatorInputs, PriceCategory, PriceTable,
};
use floorcalc::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[fixture]
fn prices() -> PriceTable {
    PriceTable::default()
}

fn categories(result: &CalculationResult) -> Vec<PriceCategory> {
    result.lines().iter().map(|l| l.category).collect()
}

fn sum(result: &CalculationResult) -> f64 {
    result.lines().iter().map(|l| l.amount).sum()
}

// ============================================================
// No area, no estimate
// ============================================================

#[rstest]
#[case(CalculatorInputs::new(0.0, 0.0, 0, false, false))]
#[case(CalculatorInputs::new(0.0, 12.0, 3, true, true))]
#[case(CalculatorInputs::new(-10.0, 5.0, 2, true, false))]
#[case(CalculatorInputs::new(parse_real("abc"), 5.0, 2, false, true))]
#[case(CalculatorInputs::new(f64::NAN, 5.0, 2, true, true))]
fn given_no_positive_area_when_computing_then_empty_and_zero(
    prices: PriceTable,
    #[case] inputs: CalculatorInputs,
) {
    let result = compute(&inputs, &prices);

    assert!(result.is_empty());
    assert_eq!(result.total(), 0.0);
}

// ============================================================
// Concrete scenarios
// ============================================================

#[rstest]
fn given_plain_area_when_computing_then_labor_material_and_fees(prices: PriceTable) {
    // Arrange
    let inputs = CalculatorInputs::new(10.0, 0.0, 0, false, false);

    // Act
    let result = compute(&inputs, &prices);

    // Assert
    assert_eq!(
        categories(&result),
        vec![
            PriceCategory::Installation,
            PriceCategory::FlooringMaterial,
            PriceCategory::Delivery,
            PriceCategory::Handling,
        ]
    );
    assert_eq!(result.lines()[0].amount, 2400.0);
    assert_eq!(result.lines()[1].amount, 6490.0);
    assert_eq!(result.lines()[2].amount, 600.0);
    assert_eq!(result.lines()[3].amount, 900.0);
    assert_eq!(result.total(), 10.0 * 240.0 + 10.0 * 649.0 + 600.0 + 900.0);
}

#[rstest]
fn given_every_option_when_computing_then_all_categories_in_rule_order(prices: PriceTable) {
    let inputs = CalculatorInputs::new(20.0, 5.0, 2, true, true);

    let result = compute(&inputs, &prices);

    assert_eq!(categories(&result), PriceCategory::ALL.to_vec());
    let expected = [
        800.0, 600.0, 3000.0, 400.0, 4800.0, 600.0, 300.0, 12980.0, 1245.0, 320.0, 600.0, 900.0,
    ];
    let amounts: Vec<f64> = result.lines().iter().map(|l| l.amount).collect();
    assert_eq!(amounts, expected.to_vec());
    assert_eq!(result.total(), 26545.0);
    assert_eq!(result.total(), sum(&result));
}

#[rstest]
fn given_baseboard_only_when_computing_then_baseboard_lines_follow_their_group(
    prices: PriceTable,
) {
    let inputs = CalculatorInputs::new(10.0, 4.5, 0, false, false);

    let result = compute(&inputs, &prices);

    assert_eq!(
        categories(&result),
        vec![
            PriceCategory::Installation,
            PriceCategory::BaseboardInstallation,
            PriceCategory::FlooringMaterial,
            PriceCategory::BaseboardMaterial,
            PriceCategory::Delivery,
            PriceCategory::Handling,
        ]
    );
    let labor = result.line(PriceCategory::BaseboardInstallation).unwrap();
    assert_eq!(labor.quantity, 4.5);
    assert_eq!(labor.rate, 120.0);
    assert_eq!(labor.amount, 540.0);
}

#[rstest]
fn given_fractional_area_when_computing_then_amounts_not_rounded(prices: PriceTable) {
    let inputs = CalculatorInputs::new(12.345, 0.0, 0, false, false);

    let result = compute(&inputs, &prices);

    let install = result.line(PriceCategory::Installation).unwrap();
    assert_eq!(install.amount, 12.345 * 240.0);
    assert_eq!(result.total(), sum(&result));
}

// ============================================================
// Zero rates never produce lines
// ============================================================

#[test]
fn given_zero_flat_fees_when_computing_then_fee_lines_absent() {
    let prices = PriceTable {
        delivery: 0.0,
        handling: 0.0,
        ..Default::default()
    };
    let inputs = CalculatorInputs::new(10.0, 0.0, 0, false, false);

    let result = compute(&inputs, &prices);

    assert!(result.line(PriceCategory::Delivery).is_none());
    assert!(result.line(PriceCategory::Handling).is_none());
    assert_eq!(result.lines().len(), 2);
}

#[test]
fn given_zero_removal_rate_when_toggle_on_then_only_disposal_added() {
    let prices = PriceTable {
        old_floor_removal: 0.0,
        ..Default::default()
    };
    let inputs = CalculatorInputs::new(10.0, 0.0, 0, true, false);

    let result = compute(&inputs, &prices);

    assert!(result.line(PriceCategory::OldFloorRemoval).is_none());
    assert_eq!(result.lines()[0].category, PriceCategory::Disposal);
}

// ============================================================
// Properties
// ============================================================

#[rstest]
fn given_same_inputs_when_computing_twice_then_identical(prices: PriceTable) {
    let inputs = CalculatorInputs::new(33.3, 7.0, 3, true, false);

    assert_eq!(compute(&inputs, &prices), compute(&inputs, &prices));
}

#[rstest]
fn given_growing_area_when_computing_then_total_never_decreases(prices: PriceTable) {
    for (baseboard, transitions, old, prep) in [
        (0.0, 0, false, false),
        (6.0, 1, true, false),
        (12.5, 4, true, true),
    ] {
        let mut previous = 0.0;
        for step in 0..200 {
            let area = step as f64 * 0.75;
            let total =
                compute(&CalculatorInputs::new(area, baseboard, transitions, old, prep), &prices)
                    .total();
            assert!(total >= previous, "area {area}: {total} < {previous}");
            previous = total;
        }
    }
}

#[rstest]
#[case(1.0, 0.0, 0, false)]
#[case(15.0, 3.0, 1, true)]
#[case(42.25, 0.0, 5, false)]
fn given_removal_toggled_when_computing_then_exactly_two_lines_added(
    prices: PriceTable,
    #[case] area: f64,
    #[case] baseboard: f64,
    #[case] transitions: i64,
    #[case] prep: bool,
) {
    let without = compute(
        &CalculatorInputs::new(area, baseboard, transitions, false, prep),
        &prices,
    );
    let with = compute(
        &CalculatorInputs::new(area, baseboard, transitions, true, prep),
        &prices,
    );

    assert_eq!(with.lines().len(), without.lines().len() + 2);
    assert_eq!(with.lines()[0].category, PriceCategory::OldFloorRemoval);
    assert_eq!(with.lines()[1].category, PriceCategory::Disposal);
    assert_eq!(&with.lines()[2..], without.lines());

    let added = with.lines()[0].amount + with.lines()[1].amount;
    assert!((with.total() - (without.total() + added)).abs() < 1e-9);
}

#[rstest]
fn given_any_positive_area_when_computing_then_total_is_sum_of_lines(prices: PriceTable) {
    for area in [0.01, 1.0, 9.99, 57.5, 1000.0] {
        for transitions in 0..3 {
            let result = compute(
                &CalculatorInputs::new(area, area / 3.0, transitions, true, true),
                &prices,
            );
            assert_eq!(result.total(), sum(&result));
            assert!(result.lines().iter().all(|l| l.amount > 0.0));
        }
    }
}

#[rstest]
#[case("1e306")]
#[case("1e308")]
fn given_area_too_large_to_price_when_computing_then_empty_and_zero(
    prices: PriceTable,
    #[case] area: &str,
) {
    let result = compute(
        &CalculatorInputs::new(parse_real(area), 5.0, 2, true, true),
        &prices,
    );

    assert!(result.is_empty());
    assert_eq!(result.total(), 0.0);
}

#[rstest]
fn given_huge_finite_area_when_computing_then_lines_stay_finite_and_consistent(
    prices: PriceTable,
) {
    let result = compute(&CalculatorInputs::new(1e12, 0.0, 0, false, false), &prices);

    assert_eq!(result.lines().len(), 4);
    assert!(result.total().is_finite());
    assert_eq!(result.total(), sum(&result));
}
