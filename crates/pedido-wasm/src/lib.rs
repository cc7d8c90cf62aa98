//! WASM bindings for pharmacy order receipt OCR.
//!
//! The browser uploads receipt photos to the text-recognition service and
//! passes the recognized text (or the raw read-result JSON) here.

use js_sys::Array;
use wasm_bindgen::prelude::*;

use pedido_core::receipt::rules::format_phone_input as mask_phone;
use pedido_core::{OcrResult, OrderParser, OrderRecord, OrderSession, ReceiptParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn record_from_js(value: JsValue) -> Result<Option<OrderRecord>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(to_js_error)
}

fn record_to_js(record: &OrderRecord) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(record).map_err(to_js_error)
}

/// Extract an order from the OCR text of one image, merged over `prior`
/// (the record accumulated so far, or `undefined`).
#[wasm_bindgen]
pub fn extract(text: &str, prior: JsValue) -> Result<JsValue, JsValue> {
    let prior = record_from_js(prior)?;
    let record = pedido_core::extract(text, prior.as_ref());
    record_to_js(&record)
}

/// Same as [`extract`], taking the read-result JSON of the analysis service.
#[wasm_bindgen]
pub fn extract_from_read_result(json: &str, prior: JsValue) -> Result<JsValue, JsValue> {
    let prior = record_from_js(prior)?;
    let ocr_result = OcrResult::from_read_result_json(json).map_err(to_js_error)?;
    let result = ReceiptParser::new().parse_ocr(&ocr_result, prior.as_ref());
    record_to_js(&result.record)
}

/// Mask a phone number as it is typed: `(DD) NNNNN-NNNN`.
#[wasm_bindgen]
pub fn format_phone_input(value: &str) -> String {
    mask_phone(value)
}

/// Parse a Brazilian-formatted amount (e.g., "1.234,56").
#[wasm_bindgen]
pub fn parse_brl_amount(amount: &str) -> Option<f64> {
    pedido_core::parse_brl_amount(amount).map(|d| d.to_string().parse().unwrap_or(0.0))
}

/// Order being built from several receipt photos.
#[wasm_bindgen]
pub struct OrderBuilder {
    session: OrderSession,
}

#[wasm_bindgen]
impl OrderBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: OrderSession::new(),
        }
    }

    /// Start from an order assigned elsewhere; its id is kept.
    #[wasm_bindgen]
    pub fn with_order_id(order_id: &str) -> Self {
        Self {
            session: OrderSession::new().with_order_id(order_id),
        }
    }

    /// Merge the text of the next photo. Returns the fields it lacked.
    #[wasm_bindgen]
    pub fn add_text(&mut self, text: &str) -> Array {
        let result = self.session.ingest(text);
        result.warnings.iter().map(|w| JsValue::from_str(w)).collect()
    }

    /// Merge the read-result JSON of the next photo.
    #[wasm_bindgen]
    pub fn add_read_result(&mut self, json: &str) -> Result<Array, JsValue> {
        let ocr_result = OcrResult::from_read_result_json(json).map_err(to_js_error)?;
        let result = self.session.ingest_ocr(&ocr_result);
        Ok(result.warnings.iter().map(|w| JsValue::from_str(w)).collect())
    }

    /// The order accumulated so far.
    #[wasm_bindgen]
    pub fn record(&self) -> Result<JsValue, JsValue> {
        record_to_js(self.session.record())
    }

    /// Names of the fields still empty (camelCase).
    #[wasm_bindgen]
    pub fn missing_fields(&self) -> Array {
        self.session
            .record()
            .missing_fields()
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }

    /// Whether the order has enough data to show for review.
    #[wasm_bindgen]
    pub fn has_valid_data(&self) -> bool {
        self.session.record().has_valid_data()
    }

    /// Total formatted for display, e.g. "R$ 10.00".
    #[wasm_bindgen]
    pub fn price_label(&self) -> String {
        self.session.record().price_label()
    }

    #[wasm_bindgen(getter)]
    pub fn images(&self) -> usize {
        self.session.images_processed()
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.session.reset();
    }
}

impl Default for OrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const RECEIPT: &str = "Nome do Cliente\nMaria Silva\nCRM/CRO/CRV\n123456 Dipirona 500mg\n2\n\
        Total Geral\n10,00\n0,00\n10,00";

    #[wasm_bindgen_test]
    fn test_format_phone_input() {
        assert_eq!(format_phone_input("61998765432"), "(61) 99876-5432");
        assert_eq!(format_phone_input("619"), "(61) 9");
    }

    #[wasm_bindgen_test]
    fn test_parse_brl_amount() {
        let amount = parse_brl_amount("1.234,56");
        assert!(amount.is_some());
        assert!((amount.unwrap() - 1234.56).abs() < 0.01);
        assert_eq!(parse_brl_amount("sem valor"), None);
    }

    #[wasm_bindgen_test]
    fn test_extract_without_prior() {
        let value = extract(RECEIPT, JsValue::UNDEFINED).unwrap();
        let record: OrderRecord = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(record.client_name, "Maria Silva");
        assert_eq!(record.total_value, "10,00");
    }

    #[wasm_bindgen_test]
    fn test_order_builder() {
        let mut builder = OrderBuilder::with_order_id("W1");
        let warnings = builder.add_text(RECEIPT);
        assert_eq!(warnings.length(), 3);

        builder.add_text("Telefone (61) 3333-4444");
        assert_eq!(builder.images(), 2);
        assert_eq!(builder.missing_fields().length(), 1);
        assert_eq!(builder.price_label(), "R$ 10.00");
        assert!(builder.has_valid_data());
    }
}
