//! Estimator binding
//!
//! Connects the calculation core to the surfaces: field change events update
//! the form, subscribed events trigger a synchronous recompute and render.

use tracing::{debug, instrument};

use crate::application::error_ext::IoResultExt;
use crate::application::render::Renderer;
use crate::application::ApplicationResult;
use crate::domain::{
    compute, parse_count, parse_real, CalculationResult, CalculatorInputs, EventKind, FieldId,
    PriceTable,
};
use crate::infrastructure::traits::{FieldStore, InputSurface, OutputSurface};

/// A field value change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEvent {
    pub field: FieldId,
    pub kind: EventKind,
    pub value: String,
}

impl FieldEvent {
    pub fn new(field: FieldId, kind: EventKind, value: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            value: value.into(),
        }
    }

    /// The event a user edit of this field naturally fires: `input` for text
    /// fields, `change` for toggles.
    pub fn edit(field: FieldId, value: impl Into<String>) -> Self {
        Self::new(field, field.trigger(), value)
    }
}

/// Read and normalize the calculator inputs from an input surface.
pub fn read_inputs(surface: &impl InputSurface) -> CalculatorInputs {
    let real = |field: FieldId| surface.value(field).map(parse_real).unwrap_or(0.0);
    CalculatorInputs {
        area: real(FieldId::Area),
        baseboard_length: real(FieldId::Baseboard),
        transition_count: surface
            .value(FieldId::Transitions)
            .map(parse_count)
            .unwrap_or(0),
        include_old_floor_removal: surface.is_checked(FieldId::OldFloor),
        include_subfloor_prep: surface.is_checked(FieldId::Prep),
    }
}

/// Keeps an output surface in sync with the form.
pub struct EstimatorBinding<O: OutputSurface> {
    fields: FieldStore,
    output: O,
    prices: PriceTable,
    renderer: Renderer,
}

impl<O: OutputSurface> EstimatorBinding<O> {
    pub fn new(fields: FieldStore, output: O, prices: PriceTable, renderer: Renderer) -> Self {
        Self {
            fields,
            output,
            prices,
            renderer,
        }
    }

    /// Establish the initial display.
    pub fn init(&mut self) -> ApplicationResult<CalculationResult> {
        debug!("init: rendering initial estimate");
        self.refresh()
    }

    /// Apply a change notification.
    ///
    /// The field value is always stored. Recomputation only happens for the
    /// event kind the field is subscribed to; returns the new result if so.
    #[instrument(level = "debug", skip(self))]
    pub fn dispatch(&mut self, event: FieldEvent) -> ApplicationResult<Option<CalculationResult>> {
        self.fields.set(event.field, event.value);
        if event.kind != event.field.trigger() {
            debug!("dispatch: {:?} on {} not subscribed", event.kind, event.field);
            return Ok(None);
        }
        self.refresh().map(Some)
    }

    /// Recompute from the current field values and render.
    pub fn refresh(&mut self) -> ApplicationResult<CalculationResult> {
        let inputs = read_inputs(&self.fields);
        let result = compute(&inputs, &self.prices);
        debug!(
            "refresh: {} lines, total={}",
            result.lines().len(),
            result.total()
        );

        let breakdown = self.renderer.breakdown(&result);
        let total = self.renderer.total(&result);
        self.output
            .show_breakdown(&breakdown)
            .with_context("render breakdown")?;
        self.output.show_total(&total).with_context("render total")?;
        Ok(result)
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }
}
