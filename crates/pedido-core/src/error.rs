//! Error types for the pedido-core library.
//!
//! Field extraction itself never fails; these errors come from the layers
//! around it (read-result parsing, record submission checks, configuration).

use thiserror::Error;

/// Main error type for the pedido library.
#[derive(Error, Debug)]
pub enum PedidoError {
    /// OCR result handling error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Order record is not ready for submission.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR read results.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The read-result document could not be parsed.
    #[error("malformed read result: {0}")]
    Malformed(String),

    /// The read result carried no recognized text.
    #[error("no text recognized")]
    NoText,
}

/// Errors raised when an order record is checked before submission.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    /// Required field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A product entry is blank.
    #[error("product #{0} is blank")]
    BlankProduct(usize),
}

/// Result type for the pedido library.
pub type Result<T> = std::result::Result<T, PedidoError>;
