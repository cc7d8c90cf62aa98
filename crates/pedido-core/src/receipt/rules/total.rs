//! Grand total extraction.
//!
//! After "Total Geral" the receipt prints subtotal, discount and grand total,
//! each on its own line, so the grand total is the third amount found.

use tracing::debug;

use super::keywords::TOTAL_ANCHOR;
use super::patterns::BRL_AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// Grand total extractor.
pub struct TotalValueExtractor {
    match_index: usize,
}

impl TotalValueExtractor {
    pub fn new() -> Self {
        Self { match_index: 2 }
    }

    /// Set which amount after the anchor is the grand total (0-based).
    pub fn with_match_index(mut self, index: usize) -> Self {
        self.match_index = index;
        self
    }
}

impl Default for TotalValueExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalValueExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, lines: &[&str]) -> Option<Self::Output> {
        let mut amounts = Vec::new();
        let mut after_anchor = false;

        for (i, line) in lines.iter().enumerate() {
            if line.contains(TOTAL_ANCHOR) {
                after_anchor = true;
                continue;
            }

            if !after_anchor {
                continue;
            }

            if let Some(m) = BRL_AMOUNT.find(line) {
                amounts.push(m.as_str());
            }

            if amounts.len() == self.match_index + 1 {
                let total = amounts[self.match_index];
                debug!("Grand total {} found on line {}", total, i);
                return Some(ExtractionMatch::new(total.to_string(), i, *line));
            }
        }

        None
    }
}

/// Extract the grand total, or an empty string.
pub fn extract_total_value(lines: &[&str]) -> String {
    TotalValueExtractor::new()
        .extract(lines)
        .map(|m| m.value)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_third_amount_is_total() {
        let lines = ["Total Geral", "R$ 1.250,00", "R$ 50,00", "R$ 1.200,00", "R$ 9,99"];
        assert_eq!(extract_total_value(&lines), "1.200,00");
    }

    #[test]
    fn test_lines_without_amount_are_skipped() {
        let lines = ["Total Geral", "Subtotal", "10,00", "Desconto", "0,00", "Total", "10,00"];
        let found = TotalValueExtractor::new().extract(&lines).unwrap();
        assert_eq!(found.value, "10,00");
        assert_eq!(found.line, 6);
        assert_eq!(found.source, "10,00");
    }

    #[test]
    fn test_amounts_before_anchor_are_ignored() {
        let lines = ["5,00", "6,00", "7,00", "Total Geral", "8,00"];
        assert_eq!(extract_total_value(&lines), "");
    }

    #[test]
    fn test_fewer_than_three_amounts() {
        assert_eq!(extract_total_value(&["Total Geral", "10,00", "0,00"]), "");
        assert_eq!(extract_total_value(&[]), "");
    }

    #[test]
    fn test_only_first_amount_per_line() {
        let lines = ["Total Geral", "10,00 2,00 8,00", "3,00", "4,00"];
        assert_eq!(extract_total_value(&lines), "4,00");
    }

    #[test]
    fn test_custom_match_index() {
        let lines = ["Total Geral", "10,00", "0,00"];
        let extractor = TotalValueExtractor::new().with_match_index(1);
        assert_eq!(extractor.extract(&lines).unwrap().value, "0,00");
    }
}
