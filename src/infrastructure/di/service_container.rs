//! Service container for dependency injection
//!
//! Wires validated settings into renderers and estimator bindings.

use std::sync::Arc;

use crate::application::render::{BreakdownStyle, Renderer};
use crate::application::services::EstimatorBinding;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{CurrencyFormatter, PriceTable};
use crate::infrastructure::traits::{FieldStore, OutputSurface};

/// Container holding the validated price table and formatter.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    prices: PriceTable,
    formatter: CurrencyFormatter,
}

impl ServiceContainer {
    /// Create a container, rejecting invalid prices.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        settings.prices.validate()?;
        let prices = settings.prices;
        let formatter = settings.currency.formatter();
        Ok(Self {
            settings: Arc::new(settings),
            prices,
            formatter,
        })
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    pub fn formatter(&self) -> &CurrencyFormatter {
        &self.formatter
    }

    pub fn renderer(&self, style: BreakdownStyle) -> Renderer {
        Renderer::new(self.formatter.clone(), style)
    }

    /// Bind a form to an output surface.
    pub fn binding<O: OutputSurface>(
        &self,
        fields: FieldStore,
        output: O,
        style: BreakdownStyle,
    ) -> EstimatorBinding<O> {
        EstimatorBinding::new(fields, output, self.prices, self.renderer(style))
    }
}
