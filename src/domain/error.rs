//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid business data.
///
/// Calculation itself never fails: malformed field values are coerced at the
/// boundary. These errors only arise when building a price table from
/// settings or when naming a field that does not exist.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid price for {category}: {value} (expected a finite, non-negative number)")]
    InvalidPrice { category: &'static str, value: f64 },

    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
