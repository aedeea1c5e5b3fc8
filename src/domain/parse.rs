//! Lenient parsing of raw field text
//!
//! Field values come from free-text inputs. Nothing here fails: the longest
//! leading numeric literal wins, anything unparsable becomes zero.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::non_negative;

static REAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
});

static INTEGER_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?\d+").unwrap());

/// Parse a real number from the start of `raw`.
///
/// `"12.5 m2"` → 12.5, `"abc"` → 0, `"-4"` → 0. Non-finite results are 0.
pub fn parse_real(raw: &str) -> f64 {
    let parsed = REAL_PREFIX
        .find(raw.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);
    non_negative(parsed)
}

/// Parse a whole count from the start of `raw`.
///
/// `"2.7"` → 2, `"3 pcs"` → 3. Negative or out of range values are 0.
pub fn parse_count(raw: &str) -> u64 {
    INTEGER_PREFIX
        .find(raw.trim())
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .map(|n| n.max(0) as u64)
        .unwrap_or(0)
}

/// Interpret a toggle value. Absent or unrecognized values are off.
pub fn parse_toggle(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "yes" | "1" | "checked"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("20", 20.0)]
    #[case("  12.5 ", 12.5)]
    #[case("12.5 m2", 12.5)]
    #[case(".5", 0.5)]
    #[case("7.", 7.0)]
    #[case("1e2", 100.0)]
    #[case("3e", 3.0)]
    #[case("+4", 4.0)]
    #[case("12,5", 12.0)]
    #[case("", 0.0)]
    #[case("abc", 0.0)]
    #[case("-5", 0.0)]
    #[case("NaN", 0.0)]
    #[case("Infinity", 0.0)]
    #[case("1e400", 0.0)]
    fn test_parse_real(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_real(raw), expected);
    }

    #[rstest]
    #[case("2", 2)]
    #[case("2.7", 2)]
    #[case(" 3 pcs", 3)]
    #[case("-1", 0)]
    #[case("", 0)]
    #[case("x3", 0)]
    #[case("99999999999999999999999", 0)]
    fn test_parse_count(#[case] raw: &str, #[case] expected: u64) {
        assert_eq!(parse_count(raw), expected);
    }

    #[rstest]
    #[case("on", true)]
    #[case("TRUE", true)]
    #[case(" yes ", true)]
    #[case("1", true)]
    #[case("checked", true)]
    #[case("off", false)]
    #[case("", false)]
    #[case("0", false)]
    fn test_parse_toggle(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(parse_toggle(raw), expected);
    }
}
