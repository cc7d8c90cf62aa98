//! Product line extraction from the itemized quote table.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use tracing::debug;

use super::keywords::PRODUCT_TABLE_ANCHOR;
use super::patterns::{PRODUCT_ROW, QUANTITY};
use super::FieldExtractor;

/// A product with its ordered quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLine {
    pub name: String,
    pub quantity: Decimal,
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x)", self.name, self.quantity)
    }
}

/// Product table extractor.
pub struct ProductExtractor {
    quantity_lookahead: usize,
}

impl ProductExtractor {
    pub fn new() -> Self {
        Self { quantity_lookahead: 3 }
    }

    /// Set how many lines after a product row are searched for its quantity.
    pub fn with_quantity_lookahead(mut self, lookahead: usize) -> Self {
        self.quantity_lookahead = lookahead;
        self
    }

    fn find_quantity(&self, lines: &[&str], row: usize) -> Option<Decimal> {
        let end = (row + 1 + self.quantity_lookahead).min(lines.len());
        lines[row + 1..end]
            .iter()
            .find_map(|line| parse_quantity(line.trim()))
    }
}

impl Default for ProductExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ProductExtractor {
    type Output = Vec<ProductLine>;

    fn extract(&self, lines: &[&str]) -> Option<Self::Output> {
        // Keyed by name: a repeated product keeps its first position and
        // takes the latest quantity.
        let mut products: IndexMap<String, Decimal> = IndexMap::new();
        let mut in_table = false;

        for (i, raw) in lines.iter().enumerate() {
            let line = raw.trim();

            if line.contains(PRODUCT_TABLE_ANCHOR) {
                in_table = true;
                continue;
            }

            if !in_table {
                continue;
            }

            let Some(caps) = PRODUCT_ROW.captures(line) else {
                continue;
            };

            let name = caps[1].trim();
            if name.is_empty() {
                continue;
            }

            let quantity = self.find_quantity(lines, i).unwrap_or(Decimal::ONE);
            debug!("Product row on line {}: {} x{}", i, name, quantity);
            products.insert(name.to_string(), quantity);
        }

        if products.is_empty() {
            return None;
        }

        Some(
            products
                .into_iter()
                .map(|(name, quantity)| ProductLine { name, quantity })
                .collect(),
        )
    }
}

/// Extract the product list as `"<name> (<qty>x)"` entries.
pub fn extract_products(lines: &[&str]) -> Vec<String> {
    ProductExtractor::new()
        .extract(lines)
        .unwrap_or_default()
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Parse a quantity line (`2`, `1,5`, `0,250`). Zero is not a quantity.
fn parse_quantity(line: &str) -> Option<Decimal> {
    let caps = QUANTITY.captures(line)?;
    let quantity = Decimal::from_str(&caps[1].replace(',', ".")).ok()?;

    if quantity > Decimal::ZERO {
        Some(quantity.normalize())
    } else {
        None
    }
}
