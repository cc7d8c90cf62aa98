//! Brazilian phone number extraction and formatting.

use tracing::debug;

use super::patterns::PHONE;
use super::{ExtractionMatch, FieldExtractor};

/// Phone field extractor.
pub struct PhoneExtractor;

impl PhoneExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, lines: &[&str]) -> Option<Self::Output> {
        for (i, line) in lines.iter().enumerate() {
            let Some(m) = PHONE.find(line) else {
                continue;
            };

            if let Some(phone) = normalize_phone(m.as_str()) {
                debug!("Phone found on line {}", i);
                return Some(ExtractionMatch::new(phone, i, m.as_str()));
            }
        }

        None
    }
}

/// Extract the first phone number, or an empty string.
pub fn extract_phone(lines: &[&str]) -> String {
    PhoneExtractor::new()
        .extract(lines)
        .map(|m| m.value)
        .unwrap_or_default()
}

/// Reformat a noisy phone number as `(DD) NNNNN-NNNN` or `(DD) NNNN-NNNN`.
///
/// Returns `None` unless the input holds exactly 10 or 11 digits.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let split = match digits.len() {
        11 => 7,
        10 => 6,
        _ => return None,
    };

    Some(format!(
        "({}) {}-{}",
        &digits[..2],
        &digits[2..split],
        &digits[split..]
    ))
}

/// Apply the phone mask to partially typed input.
///
/// Keeps at most 11 digits: `61` stays `61`, `6199` becomes `(61) 99`, and
/// longer input becomes `(61) 99876-5432`.
pub fn format_phone_input(value: &str) -> String {
    let digits: String = value
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(11)
        .collect();

    match digits.len() {
        0..=2 => digits,
        3..=7 => format!("({}) {}", &digits[..2], &digits[2..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("(61) 99876-5432"), Some("(61) 99876-5432".to_string()));
        assert_eq!(normalize_phone("[61]3333 4444"), Some("(61) 3333-4444".to_string()));
        assert_eq!(normalize_phone("6199876543"), Some("(61) 9987-6543".to_string()));
        assert_eq!(normalize_phone("123456789"), None);
        assert_eq!(normalize_phone("123456789012"), None);
    }

    #[test]
    fn test_extract_phone_noisy_brackets() {
        let lines = ["Cliente: Maria", "Tel.: {62 98765-4321 / recado"];
        assert_eq!(extract_phone(&lines), "(62) 98765-4321");
    }

    #[test]
    fn test_first_phone_wins() {
        let lines = ["(61) 3333-4444", "(61) 99876-5432"];
        let found = PhoneExtractor::new().extract(&lines).unwrap();
        assert_eq!(found.value, "(61) 3333-4444");
        assert_eq!(found.line, 0);
        assert_eq!(found.source, "(61) 3333-4444");
    }

    #[test]
    fn test_normalized_phone_has_one_of_two_masks() {
        let lines = ["61999998888", "(61)3222-1111", "[61] 98888 7777"];
        for line in lines {
            let phone = extract_phone(&[line]);
            let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
            assert!(digits == 10 || digits == 11, "{phone}");
            assert!(phone.starts_with('(') && phone[3..].starts_with(") "), "{phone}");
            assert_eq!(phone.len() - phone.rfind('-').unwrap(), 5, "{phone}");
        }
    }

    #[test]
    fn test_no_phone() {
        assert_eq!(extract_phone(&["CEP: 74.210-000", "Total Geral"]), "");
    }

    #[test]
    fn test_format_phone_input() {
        assert_eq!(format_phone_input(""), "");
        assert_eq!(format_phone_input("61"), "61");
        assert_eq!(format_phone_input("6199"), "(61) 99");
        assert_eq!(format_phone_input("6199876"), "(61) 99876");
        assert_eq!(format_phone_input("61998765432"), "(61) 99876-5432");
        assert_eq!(format_phone_input("(61) 99876-54321"), "(61) 99876-5432");
    }
}
