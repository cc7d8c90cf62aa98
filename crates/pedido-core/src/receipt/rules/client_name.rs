//! Customer name detection.

use tracing::debug;

use super::keywords::{CLIENT_NAME_LABEL, NAME_DELIMITER, NAME_REJECT_PHRASES, NAME_REJECT_SYMBOLS, contains_any};
use super::{ExtractionMatch, FieldExtractor};

/// Customer name extractor.
///
/// Looks after the "Nome do Cliente" label first, then falls back to a name
/// framed by `...` lines.
pub struct ClientNameExtractor {
    lookahead: usize,
}

impl ClientNameExtractor {
    pub fn new() -> Self {
        Self { lookahead: 5 }
    }

    /// Set how many lines after the label are inspected.
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    fn find_after_label(&self, lines: &[&str]) -> Option<ExtractionMatch<String>> {
        for (i, line) in lines.iter().enumerate() {
            let Some(rest) = line.split(CLIENT_NAME_LABEL).nth(1) else {
                continue;
            };

            let same_line = rest.trim();
            if is_valid_name(same_line) {
                return Some(ExtractionMatch::new(same_line.to_string(), i, *line));
            }

            let end = (i + 1 + self.lookahead).min(lines.len());
            for (j, candidate) in lines.iter().enumerate().take(end).skip(i + 1) {
                let candidate = candidate.trim();
                if is_valid_name(candidate) {
                    return Some(ExtractionMatch::new(candidate.to_string(), j, candidate));
                }
            }
        }

        None
    }

    fn find_between_delimiters(&self, lines: &[&str]) -> Option<ExtractionMatch<String>> {
        for i in 0..lines.len().saturating_sub(2) {
            if lines[i].trim() != NAME_DELIMITER
                || lines[i + 2].trim() != NAME_DELIMITER
                || lines[i + 1].trim() == NAME_DELIMITER
            {
                continue;
            }

            let candidate = lines[i + 1].trim();
            if is_valid_name(candidate) {
                return Some(ExtractionMatch::new(candidate.to_string(), i + 1, candidate));
            }
        }

        None
    }
}

impl Default for ClientNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ClientNameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, lines: &[&str]) -> Option<Self::Output> {
        let found = self
            .find_after_label(lines)
            .or_else(|| self.find_between_delimiters(lines));

        if let Some(m) = &found {
            debug!("Client name found on line {}", m.line);
        }

        found
    }
}

/// Extract the customer name, or an empty string.
pub fn extract_client_name(lines: &[&str]) -> String {
    ClientNameExtractor::new()
        .extract(lines)
        .map(|m| m.value)
        .unwrap_or_default()
}

/// Whether `name` plausibly is a person's name rather than receipt noise.
pub fn is_valid_name(name: &str) -> bool {
    let length = name.chars().count();
    if length < 2 {
        return false;
    }

    if contains_any(name, NAME_REJECT_PHRASES) {
        return false;
    }

    if name.contains(NAME_REJECT_SYMBOLS) {
        return false;
    }

    // Phone numbers and codes
    let digits = name.chars().filter(|c| c.is_ascii_digit()).count();
    if digits > 4 || digits as f64 / length as f64 > 0.3 {
        return false;
    }

    true
}
