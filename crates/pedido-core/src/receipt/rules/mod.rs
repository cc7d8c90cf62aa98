//! Rule-based field extractors for pharmacy quote receipts.
//!
//! Every extractor scans the OCR lines in order and is independent of the
//! others. None of them fail: a field that is not found is `None`.

pub mod address;
pub mod client_name;
pub mod keywords;
pub mod order_id;
pub mod patterns;
pub mod phone;
pub mod products;
pub mod total;

pub use address::{AddressExtractor, DeliveryAddress, clean_punctuation, extract_address, is_valid_address};
pub use client_name::{ClientNameExtractor, extract_client_name, is_valid_name};
pub use order_id::{OrderIdExtractor, extract_order_id};
pub use phone::{PhoneExtractor, extract_phone, format_phone_input, normalize_phone};
pub use products::{ProductExtractor, ProductLine, extract_products};
pub use total::{TotalValueExtractor, extract_total_value};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from the OCR lines of one image.
    fn extract(&self, lines: &[&str]) -> Option<Self::Output>;
}

/// An extracted value together with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the line the value was taken from.
    pub line: usize,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, line: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            line,
            source: source.into(),
        }
    }
}
