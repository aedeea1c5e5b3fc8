//! Domain layer: price table, inputs, rules and formatting
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod format;
pub mod parse;
pub mod rules;

pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use format::CurrencyFormatter;
pub use parse::{parse_count, parse_real, parse_toggle};
pub use rules::{compute, Rule, RULES};
