//! Order id detection from the "last quote of this terminal" footer.
//!
//! The receipt prints the sequence number of the previous quote issued by the
//! terminal. The current order is taken to be the next number. Uniqueness is
//! not checked here; that belongs to whoever persists the order.

use tracing::debug;

use super::keywords::LAST_QUOTE_PREFIXES;
use super::{ExtractionMatch, FieldExtractor};

/// Order id extractor.
pub struct OrderIdExtractor;

impl OrderIdExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OrderIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for OrderIdExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, lines: &[&str]) -> Option<Self::Output> {
        for (i, line) in lines.iter().enumerate() {
            if !is_last_quote_anchor(line) {
                continue;
            }

            let Some(next) = lines.get(i + 1).map(|l| l.trim()) else {
                continue;
            };

            if let Some(order_id) = next_sequence_number(next) {
                debug!("Order id {} derived from line {}", order_id, i + 1);
                return Some(ExtractionMatch::new(order_id, i + 1, next));
            }
        }

        None
    }
}

/// Extract the order id, or an empty string.
pub fn extract_order_id(lines: &[&str]) -> String {
    OrderIdExtractor::new()
        .extract(lines)
        .map(|m| m.value)
        .unwrap_or_default()
}

fn is_last_quote_anchor(line: &str) -> bool {
    let line = line.trim();
    LAST_QUOTE_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

/// The number after `s`, when `s` is a plain non-negative integer.
fn next_sequence_number(s: &str) -> Option<String> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    s.parse::<u64>()
        .ok()
        .and_then(|n| n.checked_add(1))
        .map(|n| n.to_string())
}
