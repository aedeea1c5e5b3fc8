//! Domain entities: price table, calculator fields, inputs and results

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Unit a rate is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceUnit {
    SquareMetre,
    Metre,
    Piece,
    Flat,
}

impl PriceUnit {
    /// Suffix appended to a formatted rate, e.g. `/m²`. Empty for flat fees.
    pub fn suffix(&self) -> &'static str {
        match self {
            PriceUnit::SquareMetre => "/m²",
            PriceUnit::Metre => "/m",
            PriceUnit::Piece => "/pc",
            PriceUnit::Flat => "",
        }
    }
}

/// Cost category: one entry of the price table, one possible line of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceCategory {
    OldFloorRemoval,
    Disposal,
    SubfloorSanding,
    SubfloorVacuuming,
    Installation,
    BaseboardInstallation,
    TransitionInstallation,
    FlooringMaterial,
    BaseboardMaterial,
    TransitionMaterial,
    Delivery,
    Handling,
}

impl PriceCategory {
    /// All categories in display order.
    pub const ALL: [PriceCategory; 12] = [
        PriceCategory::OldFloorRemoval,
        PriceCategory::Disposal,
        PriceCategory::SubfloorSanding,
        PriceCategory::SubfloorVacuuming,
        PriceCategory::Installation,
        PriceCategory::BaseboardInstallation,
        PriceCategory::TransitionInstallation,
        PriceCategory::FlooringMaterial,
        PriceCategory::BaseboardMaterial,
        PriceCategory::TransitionMaterial,
        PriceCategory::Delivery,
        PriceCategory::Handling,
    ];

    /// Settings key of this category (`[prices]` table).
    pub fn key(&self) -> &'static str {
        match self {
            PriceCategory::OldFloorRemoval => "old_floor_removal",
            PriceCategory::Disposal => "disposal",
            PriceCategory::SubfloorSanding => "subfloor_sanding",
            PriceCategory::SubfloorVacuuming => "subfloor_vacuuming",
            PriceCategory::Installation => "installation",
            PriceCategory::BaseboardInstallation => "baseboard_installation",
            PriceCategory::TransitionInstallation => "transition_installation",
            PriceCategory::FlooringMaterial => "flooring_material",
            PriceCategory::BaseboardMaterial => "baseboard_material",
            PriceCategory::TransitionMaterial => "transition_material",
            PriceCategory::Delivery => "delivery",
            PriceCategory::Handling => "handling",
        }
    }

    /// Human readable label shown in the breakdown.
    pub fn label(&self) -> &'static str {
        match self {
            PriceCategory::OldFloorRemoval => "Old floor removal",
            PriceCategory::Disposal => "Disposal and haulage",
            PriceCategory::SubfloorSanding => "Subfloor sanding",
            PriceCategory::SubfloorVacuuming => "Subfloor vacuuming",
            PriceCategory::Installation => "Flooring installation labor",
            PriceCategory::BaseboardInstallation => "Baseboard installation labor",
            PriceCategory::TransitionInstallation => "Transition strip installation labor",
            PriceCategory::FlooringMaterial => "Flooring material",
            PriceCategory::BaseboardMaterial => "Baseboard material",
            PriceCategory::TransitionMaterial => "Transition strip material",
            PriceCategory::Delivery => "Delivery",
            PriceCategory::Handling => "Handling and carry-in",
        }
    }

    pub fn unit(&self) -> PriceUnit {
        match self {
            PriceCategory::OldFloorRemoval
            | PriceCategory::Disposal
            | PriceCategory::SubfloorSanding
            | PriceCategory::SubfloorVacuuming
            | PriceCategory::Installation
            | PriceCategory::FlooringMaterial => PriceUnit::SquareMetre,
            PriceCategory::BaseboardInstallation | PriceCategory::BaseboardMaterial => {
                PriceUnit::Metre
            }
            PriceCategory::TransitionInstallation | PriceCategory::TransitionMaterial => {
                PriceUnit::Piece
            }
            PriceCategory::Delivery | PriceCategory::Handling => PriceUnit::Flat,
        }
    }
}

/// Fixed unit prices, in whole currency units, one field per category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTable {
    pub old_floor_removal: f64,
    pub disposal: f64,
    pub subfloor_sanding: f64,
    pub subfloor_vacuuming: f64,
    pub installation: f64,
    pub baseboard_installation: f64,
    pub transition_installation: f64,
    pub flooring_material: f64,
    pub baseboard_material: f64,
    pub transition_material: f64,
    pub delivery: f64,
    pub handling: f64,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            old_floor_removal: 40.0,
            disposal: 30.0,
            subfloor_sanding: 150.0,
            subfloor_vacuuming: 20.0,
            installation: 240.0,
            baseboard_installation: 120.0,
            transition_installation: 150.0,
            flooring_material: 649.0,
            baseboard_material: 249.0,
            transition_material: 160.0,
            delivery: 600.0,
            handling: 900.0,
        }
    }
}

impl PriceTable {
    /// Unit price of a category.
    pub fn rate(&self, category: PriceCategory) -> f64 {
        match category {
            PriceCategory::OldFloorRemoval => self.old_floor_removal,
            PriceCategory::Disposal => self.disposal,
            PriceCategory::SubfloorSanding => self.subfloor_sanding,
            PriceCategory::SubfloorVacuuming => self.subfloor_vacuuming,
            PriceCategory::Installation => self.installation,
            PriceCategory::BaseboardInstallation => self.baseboard_installation,
            PriceCategory::TransitionInstallation => self.transition_installation,
            PriceCategory::FlooringMaterial => self.flooring_material,
            PriceCategory::BaseboardMaterial => self.baseboard_material,
            PriceCategory::TransitionMaterial => self.transition_material,
            PriceCategory::Delivery => self.delivery,
            PriceCategory::Handling => self.handling,
        }
    }

    /// Categories paired with their rates, in display order.
    pub fn entries(&self) -> impl Iterator<Item = (PriceCategory, f64)> + '_ {
        PriceCategory::ALL.iter().map(move |c| (*c, self.rate(*c)))
    }

    /// Reject negative and non-finite prices.
    pub fn validate(&self) -> DomainResult<()> {
        for (category, rate) in self.entries() {
            if !rate.is_finite() || rate < 0.0 {
                return Err(DomainError::InvalidPrice {
                    category: category.key(),
                    value: rate,
                });
            }
        }
        Ok(())
    }
}

/// Event a field emits when its value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Fired on every edit of a text field.
    Input,
    /// Fired when a toggle flips (or a text field is committed).
    Change,
}

/// The five form fields the estimator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Area,
    Baseboard,
    Transitions,
    OldFloor,
    Prep,
}

impl FieldId {
    pub const ALL: [FieldId; 5] = [
        FieldId::Area,
        FieldId::Baseboard,
        FieldId::Transitions,
        FieldId::OldFloor,
        FieldId::Prep,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldId::Area => "area",
            FieldId::Baseboard => "baseboard",
            FieldId::Transitions => "transitions",
            FieldId::OldFloor => "old-floor",
            FieldId::Prep => "prep",
        }
    }

    /// The event kind that triggers recomputation for this field.
    pub fn trigger(&self) -> EventKind {
        match self {
            FieldId::Area | FieldId::Baseboard | FieldId::Transitions => EventKind::Input,
            FieldId::OldFloor | FieldId::Prep => EventKind::Change,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        FieldId::ALL
            .into_iter()
            .find(|field| field.name() == wanted)
            .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

/// Normalized calculator inputs. Every quantity is finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalculatorInputs {
    /// Floor area in m²
    pub area: f64,
    /// Baseboard length in m
    pub baseboard_length: f64,
    pub transition_count: u64,
    pub include_old_floor_removal: bool,
    pub include_subfloor_prep: bool,
}

impl CalculatorInputs {
    /// Build inputs, clamping negative and non-finite quantities to zero.
    pub fn new(
        area: f64,
        baseboard_length: f64,
        transition_count: i64,
        include_old_floor_removal: bool,
        include_subfloor_prep: bool,
    ) -> Self {
        Self {
            area: non_negative(area),
            baseboard_length: non_negative(baseboard_length),
            transition_count: transition_count.max(0) as u64,
            include_old_floor_removal,
            include_subfloor_prep,
        }
    }

    /// Re-apply clamping, e.g. after fields were set directly.
    pub fn sanitized(&self) -> Self {
        Self {
            area: non_negative(self.area),
            baseboard_length: non_negative(self.baseboard_length),
            ..*self
        }
    }
}

pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// One labelled cost entry of an estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub category: PriceCategory,
    pub label: String,
    /// Quantity the rate was applied to (1 for flat fees)
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64,
}

/// Ordered line items and their unrounded total.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CalculationResult {
    lines: Vec<LineItem>,
    total: f64,
}

impl CalculationResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a line, keeping the total equal to the sum of all lines.
    pub fn with_line(mut self, line: LineItem) -> Self {
        self.total += line.amount;
        self.lines.push(line);
        self
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, category: PriceCategory) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.category == category)
    }
}
