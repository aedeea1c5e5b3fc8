//! Pricing rules and the estimate calculation
//!
//! The rule table order is the display order of the breakdown.

use std::fmt;

use crate::domain::entities::{
    CalculationResult, CalculatorInputs, LineItem, PriceCategory, PriceTable,
};

/// A conditional cost step: which category, when it applies, and what quantity
/// the category's rate is multiplied by.
#[derive(Clone, Copy)]
pub struct Rule {
    pub category: PriceCategory,
    applies: fn(&CalculatorInputs) -> bool,
    quantity: fn(&CalculatorInputs) -> f64,
}

impl Rule {
    const fn new(
        category: PriceCategory,
        applies: fn(&CalculatorInputs) -> bool,
        quantity: fn(&CalculatorInputs) -> f64,
    ) -> Self {
        Self {
            category,
            applies,
            quantity,
        }
    }

    /// Line produced by this rule, if it applies and its amount is positive.
    pub fn evaluate(&self, inputs: &CalculatorInputs, prices: &PriceTable) -> Option<LineItem> {
        if !(self.applies)(inputs) {
            return None;
        }
        let quantity = (self.quantity)(inputs);
        let rate = prices.rate(self.category);
        let amount = quantity * rate;
        (amount > 0.0).then(|| LineItem {
            category: self.category,
            label: self.category.label().to_string(),
            quantity,
            rate,
            amount,
        })
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("category", &self.category).finish()
    }
}

fn always(_: &CalculatorInputs) -> bool {
    true
}

fn removes_old_floor(inputs: &CalculatorInputs) -> bool {
    inputs.include_old_floor_removal
}

fn prepares_subfloor(inputs: &CalculatorInputs) -> bool {
    inputs.include_subfloor_prep
}

fn has_baseboard(inputs: &CalculatorInputs) -> bool {
    inputs.baseboard_length > 0.0
}

fn has_transitions(inputs: &CalculatorInputs) -> bool {
    inputs.transition_count > 0
}

fn area(inputs: &CalculatorInputs) -> f64 {
    inputs.area
}

fn baseboard_length(inputs: &CalculatorInputs) -> f64 {
    inputs.baseboard_length
}

fn transition_count(inputs: &CalculatorInputs) -> f64 {
    inputs.transition_count as f64
}

fn flat(_: &CalculatorInputs) -> f64 {
    1.0
}

/// All rules, evaluated in order. Labor precedes material; flat fees come last.
pub const RULES: [Rule; 12] = [
    Rule::new(PriceCategory::OldFloorRemoval, removes_old_floor, area),
    Rule::new(PriceCategory::Disposal, removes_old_floor, area),
    Rule::new(PriceCategory::SubfloorSanding, prepares_subfloor, area),
    Rule::new(PriceCategory::SubfloorVacuuming, prepares_subfloor, area),
    Rule::new(PriceCategory::Installation, always, area),
    Rule::new(PriceCategory::BaseboardInstallation, has_baseboard, baseboard_length),
    Rule::new(PriceCategory::TransitionInstallation, has_transitions, transition_count),
    Rule::new(PriceCategory::FlooringMaterial, always, area),
    Rule::new(PriceCategory::BaseboardMaterial, has_baseboard, baseboard_length),
    Rule::new(PriceCategory::TransitionMaterial, has_transitions, transition_count),
    Rule::new(PriceCategory::Delivery, always, flat),
    Rule::new(PriceCategory::Handling, always, flat),
];

/// Compute the itemized estimate.
///
/// Without a positive floor area there is no estimate at all: the result is
/// empty and totals zero, whatever the other inputs say. The same holds for
/// inputs so large that a line or the total overflows `f64`.
pub fn compute(inputs: &CalculatorInputs, prices: &PriceTable) -> CalculationResult {
    let inputs = inputs.sanitized();
    if inputs.area <= 0.0 {
        return CalculationResult::empty();
    }

    let result = RULES
        .iter()
        .filter_map(|rule| rule.evaluate(&inputs, prices))
        .fold(CalculationResult::empty(), CalculationResult::with_line);
    if result.total().is_finite() {
        result
    } else {
        CalculationResult::empty()
    }
}
