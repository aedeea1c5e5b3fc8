//! Input/output surface traits
//!
//! The estimator reads field values from an input surface and writes the
//! rendered breakdown and total to an output surface. These traits abstract
//! both, so the binding can be driven by the terminal or by tests.

use std::collections::HashMap;
use std::io::{self, Write};

use colored::Colorize;

use crate::domain::{parse_toggle, FieldId};

/// Current raw values of the calculator's form fields.
pub trait InputSurface {
    /// Raw text of a field, `None` if the field was never set.
    fn value(&self, field: FieldId) -> Option<&str>;

    /// Whether a toggle field is checked. Absent means unchecked.
    fn is_checked(&self, field: FieldId) -> bool {
        self.value(field).map(parse_toggle).unwrap_or(false)
    }
}

/// Destination of a rendered estimate.
pub trait OutputSurface {
    /// Replace the breakdown container's content.
    fn show_breakdown(&mut self, content: &str) -> io::Result<()>;

    /// Replace the total element's text.
    fn show_total(&mut self, total: &str) -> io::Result<()>;
}

// ============================================================
// IMPLEMENTATIONS
// ============================================================

/// In-memory field values, the calculator's form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStore {
    values: HashMap<FieldId, String>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field's raw value.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Builder-style `set`.
    pub fn with(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a toggle field to checked/unchecked.
    pub fn set_checked(&mut self, field: FieldId, checked: bool) {
        self.set(field, if checked { "on" } else { "off" });
    }
}

impl InputSurface for FieldStore {
    fn value(&self, field: FieldId) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }
}

/// Writes the estimate to a terminal (or any writer).
///
/// Decorated mode prints a blank line and a bold `Total:` label; plain mode
/// writes breakdown and total verbatim, for markup consumers.
pub struct TerminalSurface<W: Write> {
    writer: W,
    decorated: bool,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout(decorated: bool) -> Self {
        Self::new(io::stdout(), decorated)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(writer: W, decorated: bool) -> Self {
        Self { writer, decorated }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSurface for TerminalSurface<W> {
    fn show_breakdown(&mut self, content: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", content)
    }

    fn show_total(&mut self, total: &str) -> io::Result<()> {
        if self.decorated {
            writeln!(self.writer, "\n{} {}", "Total:".bold(), total.green().bold())?;
        } else {
            writeln!(self.writer, "{}", total)?;
        }
        self.writer.flush()
    }
}

/// Keeps the latest rendered content in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferedSurface {
    pub breakdown: String,
    pub total: String,
    /// Number of breakdown renders received
    pub renders: usize,
}

impl OutputSurface for BufferedSurface {
    fn show_breakdown(&mut self, content: &str) -> io::Result<()> {
        self.breakdown = content.to_string();
        self.renders += 1;
        Ok(())
    }

    fn show_total(&mut self, total: &str) -> io::Result<()> {
        self.total = total.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_unset_toggle_when_checking_then_false() {
        let store = FieldStore::new();
        assert!(!store.is_checked(FieldId::Prep));
        assert_eq!(store.value(FieldId::Area), None);
    }

    #[test]
    fn given_checked_toggle_when_unchecked_then_off() {
        let mut store = FieldStore::new();
        store.set_checked(FieldId::OldFloor, true);
        assert!(store.is_checked(FieldId::OldFloor));
        store.set_checked(FieldId::OldFloor, false);
        assert!(!store.is_checked(FieldId::OldFloor));
    }

    #[test]
    fn given_plain_terminal_surface_when_rendering_then_writes_verbatim() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.show_breakdown("<li>x</li>").unwrap();
        surface.show_total("0 Kč").unwrap();
        let written = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(written, "<li>x</li>\n0 Kč\n");
    }
}
