//! Delivery address and CEP (postal code) extraction.

use tracing::debug;

use super::keywords::{
    ADDRESS_KEYWORDS, ADDRESS_REJECT_PHRASES, CEP_LABEL, DELIVERY_ADDRESS_LABEL, contains_any,
};
use super::patterns::{
    CEP, CEP_SUFFIX, DANGLING_CEP, REPEATED_COMMAS, REPEATED_DOTS, SPACE_BEFORE_PUNCT,
};
use super::FieldExtractor;

/// Address found on a receipt, before it is folded into one string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryAddress {
    /// Street part, possibly with a complement line appended.
    pub street: String,
    /// Postal code in `NNNNN-NNN` or `NN.NNN-NNN` form.
    pub cep: Option<String>,
}

impl DeliveryAddress {
    /// Format as a single line, appending ` CEP: <code>` unless the street
    /// already contains the code.
    pub fn format(&self) -> String {
        let mut full = DANGLING_CEP.replace(&self.street, "").into_owned();

        if let Some(cep) = &self.cep {
            if !full.contains(cep.as_str()) {
                full.push_str(" CEP: ");
                full.push_str(cep);
            }
        }

        clean_punctuation(&full)
    }
}

/// Address field extractor.
pub struct AddressExtractor {
    lookahead: usize,
    min_anchored_len: usize,
    min_fallback_len: usize,
    min_complement_len: usize,
}

impl AddressExtractor {
    pub fn new() -> Self {
        Self {
            lookahead: 3,
            min_anchored_len: 10,
            min_fallback_len: 20,
            min_complement_len: 3,
        }
    }

    /// Set how many lines after "Endereço de entrega" are inspected.
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Set the length thresholds for anchored candidates, unanchored lines
    /// and complement lines.
    pub fn with_min_lengths(mut self, anchored: usize, fallback: usize, complement: usize) -> Self {
        self.min_anchored_len = anchored;
        self.min_fallback_len = fallback;
        self.min_complement_len = complement;
        self
    }

    /// Street address, searched below the delivery label first and then
    /// anywhere in the text.
    pub fn find_street(&self, lines: &[&str]) -> Option<String> {
        self.find_anchored(lines).or_else(|| self.find_unanchored(lines))
    }

    // Every label occurrence is searched; a later one overrides an earlier hit.
    fn find_anchored(&self, lines: &[&str]) -> Option<String> {
        let mut found = None;

        for (i, line) in lines.iter().enumerate() {
            if !line.contains(DELIVERY_ADDRESS_LABEL) {
                continue;
            }

            for j in 1..=self.lookahead {
                let Some(raw) = lines.get(i + j) else {
                    break;
                };

                let candidate = CEP_SUFFIX.replace(raw.trim(), "");
                let candidate = candidate.trim();
                if candidate.chars().count() <= self.min_anchored_len || !is_valid_address(candidate) {
                    continue;
                }

                let mut street = candidate.to_string();
                if let Some(next) = lines.get(i + j + 1).map(|l| l.trim()) {
                    if next.chars().count() > self.min_complement_len && is_valid_address(next) {
                        street.push(' ');
                        street.push_str(next);
                    }
                }

                debug!("Delivery address found on line {}", i + j);
                found = Some(street);
                break;
            }
        }

        found
    }

    fn find_unanchored(&self, lines: &[&str]) -> Option<String> {
        lines
            .iter()
            .map(|l| l.trim())
            .find(|l| l.chars().count() >= self.min_fallback_len && is_valid_address(l))
            .map(|l| {
                debug!("Address taken from unlabeled line");
                l.to_string()
            })
    }
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AddressExtractor {
    type Output = DeliveryAddress;

    fn extract(&self, lines: &[&str]) -> Option<Self::Output> {
        let street = self.find_street(lines);
        let cep = find_cep(lines);

        if street.is_none() && cep.is_none() {
            return None;
        }

        Some(DeliveryAddress {
            street: street.unwrap_or_default(),
            cep,
        })
    }
}

/// Extract the delivery address with its CEP, or an empty string.
pub fn extract_address(lines: &[&str]) -> String {
    AddressExtractor::new()
        .extract(lines)
        .map(|a| a.format())
        .unwrap_or_default()
}

/// Find the postal code.
///
/// A code after a `CEP:` label (on the same line or the next) ends the
/// search. Without one, the last unlabeled code in the text is used.
pub fn find_cep(lines: &[&str]) -> Option<String> {
    let mut cep = None;

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();

        if let Some(after_label) = line.split(CEP_LABEL).nth(1) {
            let labeled = CEP
                .find(after_label.trim())
                .map(|m| m.as_str().to_string())
                .or_else(|| {
                    lines
                        .get(i + 1)
                        .and_then(|next| CEP.find(next))
                        .map(|m| m.as_str().to_string())
                });

            if labeled.is_some() {
                return labeled;
            }
        }

        if let Some(m) = CEP.find(line) {
            cep = Some(m.as_str().to_string());
        }
    }

    cep
}

/// Whether `text` reads like a Brazilian street address.
pub fn is_valid_address(text: &str) -> bool {
    !contains_any(text, ADDRESS_REJECT_PHRASES) && contains_any(text, ADDRESS_KEYWORDS)
}

/// Collapse repeated `.` and `,` and drop whitespace before `.`, `,` and `:`.
pub fn clean_punctuation(text: &str) -> String {
    let text = REPEATED_DOTS.replace_all(text, ".");
    let text = REPEATED_COMMAS.replace_all(&text, ",");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
    text.trim().to_string()
}
