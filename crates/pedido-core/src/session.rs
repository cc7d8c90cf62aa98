//! Accumulating one order across several receipt photos.
//!
//! The parser is stateless; a session owns the record built so far and
//! threads it into each extraction in the order images arrive.

use tracing::info;

use crate::models::order::OrderRecord;
use crate::ocr::OcrResult;
use crate::receipt::{ExtractionResult, OrderParser, ReceiptParser};

/// An order being built from a sequence of images.
#[derive(Debug, Clone, Default)]
pub struct OrderSession {
    parser: ReceiptParser,
    record: OrderRecord,
    pinned_order_id: Option<String>,
    images: usize,
}

impl OrderSession {
    /// Start an empty session with the default parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom parser.
    pub fn with_parser(mut self, parser: ReceiptParser) -> Self {
        self.parser = parser;
        self
    }

    /// Continue from a previously accumulated record.
    pub fn with_record(mut self, record: OrderRecord) -> Self {
        self.record = record;
        self.apply_pinned_id();
        self
    }

    /// Assign the order id up front. Ids detected on receipts are then
    /// ignored for this session.
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.pinned_order_id = Some(order_id.into());
        self.apply_pinned_id();
        self
    }

    /// Extract the text of the next image and merge it into the order.
    pub fn ingest(&mut self, text: &str) -> ExtractionResult {
        let mut result = self.parser.parse(text, Some(&self.record));
        if let Some(order_id) = &self.pinned_order_id {
            result.record.order_id = order_id.clone();
        }

        self.images += 1;
        self.record = result.record.clone();

        info!(
            "Image {} merged: {} products, complete: {}",
            self.images,
            self.record.products.len(),
            self.record.missing_fields().is_empty()
        );

        result
    }

    /// Same as [`OrderSession::ingest`] for an OCR result.
    pub fn ingest_ocr(&mut self, ocr_result: &OcrResult) -> ExtractionResult {
        self.ingest(&ocr_result.text)
    }

    /// The order accumulated so far.
    pub fn record(&self) -> &OrderRecord {
        &self.record
    }

    /// Number of images merged into this session.
    pub fn images_processed(&self) -> usize {
        self.images
    }

    /// Finish the session and take the record.
    pub fn into_record(self) -> OrderRecord {
        self.record
    }

    /// Discard the accumulated order, including a pinned id.
    pub fn reset(&mut self) {
        self.record = OrderRecord::default();
        self.pinned_order_id = None;
        self.images = 0;
    }

    fn apply_pinned_id(&mut self) {
        if let Some(order_id) = &self.pinned_order_id {
            self.record.order_id = order_id.clone();
        }
    }
}
