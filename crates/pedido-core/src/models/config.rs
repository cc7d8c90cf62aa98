//! Configuration structures for receipt extraction.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PedidoError, Result};

/// Main configuration for the pedido tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PedidoConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration for the CLI.
    pub output: OutputConfig,
}

/// Scan windows and thresholds used by the field detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines inspected after the "Nome do Cliente" label.
    pub name_lookahead: usize,

    /// Lines inspected after the "Endereço de entrega" label.
    pub address_lookahead: usize,

    /// Lines inspected after a product row for its quantity.
    pub quantity_lookahead: usize,

    /// An anchored address candidate must be longer than this.
    pub min_anchored_address_len: usize,

    /// An unanchored address line must be at least this long.
    pub min_fallback_address_len: usize,

    /// An address complement line must be longer than this.
    pub min_complement_len: usize,

    /// Which currency match after "Total Geral" is the grand total (0-based).
    pub total_match_index: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            name_lookahead: 5,
            address_lookahead: 3,
            quantity_lookahead: 3,
            min_anchored_address_len: 10,
            min_fallback_address_len: 20,
            min_complement_len: 3,
            total_match_index: 2,
        }
    }
}

/// CLI output defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (`json`, `text` or `csv`).
    pub format: String,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: true,
        }
    }
}

impl PedidoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| PedidoError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
