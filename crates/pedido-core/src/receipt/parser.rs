//! Receipt parser combining the field rules with the accumulation policy.

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::order::OrderRecord;

use super::rules::{
    AddressExtractor, ClientNameExtractor, ExtractionMatch, FieldExtractor, OrderIdExtractor,
    PhoneExtractor, ProductExtractor, TotalValueExtractor,
};
use super::OrderParser;

/// Result of extracting one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    /// Record merged over the prior state.
    pub record: OrderRecord,
    /// What this image alone yielded.
    pub extracted: OrderRecord,
    /// Fields this image did not yield.
    pub warnings: Vec<String>,
}

/// Rule-based receipt parser.
///
/// Holds no state between calls; one parser can serve any number of
/// sessions, including from several threads.
#[derive(Debug, Clone, Default)]
pub struct ReceiptParser {
    config: ExtractionConfig,
}

impl ReceiptParser {
    /// Create a parser with the default scan windows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom scan windows.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Run every field rule over the lines of one image.
    fn extract_fields(&self, lines: &[&str]) -> OrderRecord {
        let config = &self.config;

        let client_name = ClientNameExtractor::new()
            .with_lookahead(config.name_lookahead)
            .extract(lines)
            .map(|m| matched("client name", m))
            .unwrap_or_default();

        let phone = PhoneExtractor::new()
            .extract(lines)
            .map(|m| matched("phone", m))
            .unwrap_or_default();

        let address = AddressExtractor::new()
            .with_lookahead(config.address_lookahead)
            .with_min_lengths(
                config.min_anchored_address_len,
                config.min_fallback_address_len,
                config.min_complement_len,
            )
            .extract(lines)
            .map(|a| a.format())
            .unwrap_or_default();

        let products = ProductExtractor::new()
            .with_quantity_lookahead(config.quantity_lookahead)
            .extract(lines)
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect();

        let total_value = TotalValueExtractor::new()
            .with_match_index(config.total_match_index)
            .extract(lines)
            .map(|m| matched("total", m))
            .unwrap_or_default();

        let order_id = OrderIdExtractor::new()
            .extract(lines)
            .map(|m| matched("order id", m))
            .unwrap_or_default();

        OrderRecord {
            client_name,
            phone,
            address,
            products,
            total_value,
            order_id,
        }
    }
}

impl OrderParser for ReceiptParser {
    fn parse(&self, text: &str, prior: Option<&OrderRecord>) -> ExtractionResult {
        let lines: Vec<&str> = text.split('\n').collect();
        debug!("Parsing receipt text with {} lines", lines.len());

        let extracted = self.extract_fields(&lines);
        let warnings = missing_warnings(&extracted);

        info!(
            "Extracted {} products, {} of 6 fields empty",
            extracted.products.len(),
            warnings.len()
        );

        ExtractionResult {
            record: extracted.clone().merge_over(prior),
            extracted,
            warnings,
        }
    }
}

fn matched(field: &str, m: ExtractionMatch<String>) -> String {
    debug!("Found {} on line {}: {:?}", field, m.line, m.source);
    m.value
}

fn missing_warnings(record: &OrderRecord) -> Vec<String> {
    let checks = [
        (record.client_name.is_empty(), "client name"),
        (record.phone.is_empty(), "phone"),
        (record.address.is_empty(), "address"),
        (record.products.is_empty(), "products"),
        (record.total_value.is_empty(), "total value"),
        (record.order_id.is_empty(), "order id"),
    ];

    checks
        .iter()
        .filter(|(missing, _)| *missing)
        .map(|(_, field)| format!("Could not extract {}", field))
        .collect()
}

/// Extract an order record from the OCR text of one image, merged over the
/// record accumulated so far.
///
/// Never fails: fields that cannot be found fall back to `prior`, or stay
/// empty.
pub fn extract(text: &str, prior: Option<&OrderRecord>) -> OrderRecord {
    ReceiptParser::new().parse(text, prior).record
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RECEIPT: &str = "Drogaria Central\n\
        Nome do Cliente\n\
        Maria Silva\n\
        Telefone: (61) 99876-5432\n\
        Endereço de entrega\n\
        Rua das Flores, 123, Setor Bueno CEP: 74.210-000\n\
        CRM/CRO/CRV\n\
        123456 Dipirona 500mg\n\
        2\n\
        Total Geral\n\
        10,00\n\
        0,00\n\
        10,00\n\
        Último orçamento deste terminal\n\
        4821";

    #[test]
    fn test_parse_full_receipt() {
        let result = ReceiptParser::new().parse(RECEIPT, None);

        assert_eq!(
            result.record,
            OrderRecord {
                client_name: "Maria Silva".to_string(),
                phone: "(61) 99876-5432".to_string(),
                address: "Rua das Flores, 123, Setor Bueno CEP: 74.210-000".to_string(),
                products: vec!["Dipirona 500mg (2x)".to_string()],
                total_value: "10,00".to_string(),
                order_id: "4822".to_string(),
            }
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_warnings_name_missing_fields() {
        let result = ReceiptParser::new().parse("Total Geral\n1,00\n2,00\n3,00", None);
        assert_eq!(result.extracted.total_value, "3,00");
        assert_eq!(result.warnings.len(), 5);
        assert!(result.warnings.contains(&"Could not extract phone".to_string()));
    }

    #[test]
    fn test_extracted_is_pre_merge() {
        let prior = extract(RECEIPT, None);
        let result = ReceiptParser::new().parse("(62) 3333-4444", Some(&prior));

        assert_eq!(result.extracted.phone, "(62) 3333-4444");
        assert_eq!(result.extracted.client_name, "");
        assert_eq!(result.record.client_name, "Maria Silva");
        assert_eq!(result.record.phone, "(62) 3333-4444");
    }

    #[test]
    fn test_custom_config() {
        let config = ExtractionConfig {
            total_match_index: 0,
            ..ExtractionConfig::default()
        };
        let parser = ReceiptParser::with_config(config);
        let result = parser.parse("Total Geral\n12,34", None);
        assert_eq!(result.record.total_value, "12,34");
    }

    #[test]
    fn test_windows_line_endings() {
        let text = RECEIPT.replace('\n', "\r\n");
        let record = extract(&text, None);
        assert_eq!(record.client_name, "Maria Silva");
        assert_eq!(record.products, vec!["Dipirona 500mg (2x)".to_string()]);
        assert_eq!(record.total_value, "10,00");
        assert_eq!(record.order_id, "4822");
    }
}
