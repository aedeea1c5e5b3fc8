//! Whole-unit currency formatting

use crate::domain::entities::PriceUnit;

/// Formats amounts as rounded, digit-grouped currency strings (`12 345 Kč`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    symbol: String,
    group_separator: String,
    /// Grouping starts once the number has `3 + min_grouping_digits` digits.
    min_grouping_digits: usize,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new("Kč", "\u{a0}", 1)
    }
}

impl CurrencyFormatter {
    pub fn new(
        symbol: impl Into<String>,
        group_separator: impl Into<String>,
        min_grouping_digits: usize,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            group_separator: group_separator.into(),
            min_grouping_digits: min_grouping_digits.max(1),
        }
    }

    /// Round to the nearest whole unit and format. Non-finite amounts render as zero.
    pub fn format(&self, amount: f64) -> String {
        let whole = if amount.is_finite() { amount.round() } else { 0.0 };
        let sign = if whole < 0.0 { "-" } else { "" };
        let digits = self.group(&format!("{:.0}", whole.abs()));
        if self.symbol.is_empty() {
            format!("{sign}{digits}")
        } else {
            format!("{sign}{digits} {}", self.symbol)
        }
    }

    /// Rate annotation for a label, e.g. `240 Kč/m²`.
    pub fn format_rate(&self, rate: f64, unit: PriceUnit) -> String {
        format!("{}{}", self.format(rate), unit.suffix())
    }

    fn group(&self, digits: &str) -> String {
        if digits.len() < 3 + self.min_grouping_digits {
            return digits.to_string();
        }
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&self.group_separator);
            }
            grouped.push(ch);
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0 Kč")]
    #[case(0.4, "0 Kč")]
    #[case(0.5, "1 Kč")]
    #[case(999.0, "999 Kč")]
    #[case(1234.5, "1\u{a0}235 Kč")]
    #[case(12345.0, "12\u{a0}345 Kč")]
    #[case(1234567.0, "1\u{a0}234\u{a0}567 Kč")]
    #[case(f64::NAN, "0 Kč")]
    #[case(-0.4, "0 Kč")]
    #[case(1e19, "10\u{a0}000\u{a0}000\u{a0}000\u{a0}000\u{a0}000\u{a0}000 Kč")]
    fn test_format_default_locale(#[case] amount: f64, #[case] expected: &str) {
        assert_eq!(CurrencyFormatter::default().format(amount), expected);
    }

    #[test]
    fn given_min_grouping_two_when_formatting_four_digits_then_ungrouped() {
        let fmt = CurrencyFormatter::new("zł", " ", 2);
        assert_eq!(fmt.format(1234.0), "1234 zł");
        assert_eq!(fmt.format(12345.0), "12 345 zł");
    }

    #[test]
    fn given_empty_symbol_when_formatting_then_number_only() {
        let fmt = CurrencyFormatter::new("", ",", 1);
        assert_eq!(fmt.format(-9876.0), "-9,876");
    }

    #[test]
    fn test_format_rate_appends_unit() {
        let fmt = CurrencyFormatter::default();
        assert_eq!(fmt.format_rate(240.0, PriceUnit::SquareMetre), "240 Kč/m²");
        assert_eq!(fmt.format_rate(600.0, PriceUnit::Flat), "600 Kč");
    }
}
