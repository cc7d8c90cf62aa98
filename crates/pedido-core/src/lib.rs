//! Core library for pharmacy order receipt OCR processing.
//!
//! This crate provides:
//! - Field extraction from OCR text of pharmacy quote receipts (client name,
//!   phone, delivery address with CEP, products, total value, order id)
//! - Order record model with the multi-image merge policy
//! - Order sessions that accumulate one order across several photos
//! - An adapter for image-analysis "read" results

pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;
pub mod session;

pub use error::{PedidoError, Result};
pub use models::order::{OrderRecord, parse_brl_amount};
pub use models::config::{ExtractionConfig, PedidoConfig};
pub use ocr::{OcrLine, OcrResult};
pub use receipt::{ExtractionResult, OrderParser, ReceiptParser, extract};
pub use session::OrderSession;
