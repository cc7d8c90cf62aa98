//! Order field extraction from receipt OCR text.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, ReceiptParser, extract};

use crate::models::order::OrderRecord;
use crate::ocr::OcrResult;

/// Trait for receipt parsers.
pub trait OrderParser {
    /// Extract order fields from the text of one image and merge them over
    /// the record accumulated from earlier images.
    fn parse(&self, text: &str, prior: Option<&OrderRecord>) -> ExtractionResult;

    /// Same as [`OrderParser::parse`], reading the text of an OCR result.
    fn parse_ocr(&self, ocr_result: &OcrResult, prior: Option<&OrderRecord>) -> ExtractionResult {
        self.parse(&ocr_result.text, prior)
    }
}
