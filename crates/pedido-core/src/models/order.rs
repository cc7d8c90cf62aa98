//! Order record produced by receipt extraction.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Structured order data extracted from one or more receipt images.
///
/// Every field is always present. A value that could not be detected is an
/// empty string (or an empty product list), never a distinct "missing" state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderRecord {
    /// Customer name.
    pub client_name: String,

    /// Phone in `(DD) NNNNN-NNNN` or `(DD) NNNN-NNNN` form.
    pub phone: String,

    /// Delivery address, with ` CEP: <code>` appended when known.
    pub address: String,

    /// Products as `"<name> (<qty>x)"`, unique by name.
    pub products: Vec<String>,

    /// Grand total in Brazilian format (`1.234,56`).
    pub total_value: String,

    /// Order identifier, derived from the receipt or assigned by the caller.
    pub order_id: String,
}

impl OrderRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.client_name.is_empty()
            && self.phone.is_empty()
            && self.address.is_empty()
            && self.products.is_empty()
            && self.total_value.is_empty()
            && self.order_id.is_empty()
    }

    /// Merge a freshly extracted record over a previously accumulated one.
    ///
    /// Scalar fields keep the new value when non-empty and fall back to the
    /// prior value otherwise. The product list is replaced wholesale when the
    /// new record has any product; it is never appended to.
    pub fn merge_over(self, prior: Option<&OrderRecord>) -> OrderRecord {
        let Some(prior) = prior else {
            return self;
        };

        OrderRecord {
            client_name: or_prior(self.client_name, &prior.client_name),
            phone: or_prior(self.phone, &prior.phone),
            address: or_prior(self.address, &prior.address),
            products: if self.products.is_empty() {
                prior.products.clone()
            } else {
                self.products
            },
            total_value: or_prior(self.total_value, &prior.total_value),
            order_id: or_prior(self.order_id, &prior.order_id),
        }
    }

    /// Whether the record has enough data to be worth showing: some contact
    /// detail and some order detail.
    pub fn has_valid_data(&self) -> bool {
        let has_contact = !self.client_name.trim().is_empty()
            || !self.phone.trim().is_empty()
            || !self.address.trim().is_empty();
        let has_order = !self.products.is_empty() || !self.total_value.trim().is_empty();

        has_contact && has_order
    }

    /// Names of the fields that must still be filled before submission.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.client_name.trim().is_empty() {
            missing.push("clientName");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        if self.products.is_empty() {
            missing.push("products");
        }
        if self.total_value.trim().is_empty() {
            missing.push("totalValue");
        }
        if self.order_id.trim().is_empty() {
            missing.push("orderId");
        }

        missing
    }

    /// Check that every field is filled and no product entry is blank.
    pub fn ensure_complete(&self) -> Result<(), RecordError> {
        if let Some(field) = self.missing_fields().into_iter().next() {
            return Err(RecordError::MissingField(field));
        }

        if let Some(index) = self.products.iter().position(|p| p.trim().is_empty()) {
            return Err(RecordError::BlankProduct(index + 1));
        }

        Ok(())
    }

    /// Total value as a decimal number.
    pub fn total_amount(&self) -> Option<Decimal> {
        parse_brl_amount(&self.total_value)
    }

    /// Price label used by the order board, e.g. `R$ 1234.56`.
    pub fn price_label(&self) -> String {
        let amount = self.total_amount().unwrap_or(Decimal::ZERO);
        format!("R$ {:.2}", amount)
    }
}

fn or_prior(value: String, prior: &str) -> String {
    if value.is_empty() {
        prior.to_string()
    } else {
        value
    }
}

/// Parse a Brazilian-formatted amount (`1.234,56`, `10,00`, `R$ 7,5`).
///
/// Dots are thousand separators and the comma is the decimal separator.
pub fn parse_brl_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = cleaned.replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).ok()
}
