//! Breakdown rendering for output surfaces
//!
//! Amounts stay unrounded in `CalculationResult`; rounding happens here,
//! through the currency formatter, and nowhere else.

use itertools::Itertools;
use serde::Serialize;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CalculationResult, CurrencyFormatter, LineItem};

/// Shown instead of a breakdown while there is no floor area.
pub const PLACEHOLDER: &str = "Enter the floor area for an estimate.";

/// Markup of the rendered breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakdownStyle {
    /// Aligned plain-text columns
    #[default]
    Text,
    /// `<li><span>label</span><span>amount</span></li>` per line
    Html,
}

/// Serializable estimate, used for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateView {
    pub lines: Vec<LineView>,
    pub total: f64,
    pub total_formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineView {
    pub category: String,
    pub label: String,
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64,
    pub amount_formatted: String,
}

/// Turns calculation results into breakdown and total strings.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    formatter: CurrencyFormatter,
    style: BreakdownStyle,
}

impl Renderer {
    pub fn new(formatter: CurrencyFormatter, style: BreakdownStyle) -> Self {
        Self { formatter, style }
    }

    pub fn formatter(&self) -> &CurrencyFormatter {
        &self.formatter
    }

    /// Label with its rate annotation, e.g. `Delivery (600 Kč)`.
    pub fn label(&self, line: &LineItem) -> String {
        format!(
            "{} ({})",
            line.label,
            self.formatter.format_rate(line.rate, line.category.unit())
        )
    }

    /// Formatted total; `0 Kč` for an empty estimate.
    pub fn total(&self, result: &CalculationResult) -> String {
        self.formatter.format(result.total())
    }

    pub fn breakdown(&self, result: &CalculationResult) -> String {
        match self.style {
            BreakdownStyle::Text => self.text(result),
            BreakdownStyle::Html => self.html(result),
        }
    }

    fn text(&self, result: &CalculationResult) -> String {
        if result.is_empty() {
            return PLACEHOLDER.to_string();
        }
        let rows: Vec<(String, String)> = result
            .lines()
            .iter()
            .map(|line| (self.label(line), self.formatter.format(line.amount)))
            .collect();
        let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        let amount_width = rows.iter().map(|(_, a)| a.chars().count()).max().unwrap_or(0);
        rows.iter()
            .map(|(label, amount)| format!("{label:<label_width$}  {amount:>amount_width$}"))
            .join("\n")
    }

    fn html(&self, result: &CalculationResult) -> String {
        if result.is_empty() {
            return format!("<li>{}</li>", escape_html(PLACEHOLDER));
        }
        result
            .lines()
            .iter()
            .map(|line| {
                format!(
                    "<li><span>{}</span><span>{}</span></li>",
                    escape_html(&self.label(line)),
                    escape_html(&self.formatter.format(line.amount))
                )
            })
            .join("\n")
    }

    pub fn view(&self, result: &CalculationResult) -> EstimateView {
        EstimateView {
            lines: result
                .lines()
                .iter()
                .map(|line| LineView {
                    category: line.category.key().to_string(),
                    label: self.label(line),
                    quantity: line.quantity,
                    rate: line.rate,
                    amount: line.amount,
                    amount_formatted: self.formatter.format(line.amount),
                })
                .collect(),
            total: result.total(),
            total_formatted: self.total(result),
            message: result.is_empty().then(|| PLACEHOLDER.to_string()),
        }
    }

    pub fn json(&self, result: &CalculationResult) -> ApplicationResult<String> {
        serde_json::to_string_pretty(&self.view(result)).map_err(|e| {
            ApplicationError::OperationFailed {
                context: "serialize estimate".to_string(),
                source: Box::new(e),
            }
        })
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
