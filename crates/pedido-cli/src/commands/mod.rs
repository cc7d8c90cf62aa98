//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::debug;

use pedido_core::models::config::PedidoConfig;
use pedido_core::{OcrResult, OrderRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Location of the configuration file when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pedido")
        .join("config.json")
}

/// Load the configuration named on the command line. Without `--config`
/// the file at the default location is used when it exists.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PedidoConfig> {
    match config_path {
        Some(path) => Ok(PedidoConfig::from_file(Path::new(path))?),
        None => load_or_default(&default_config_path()),
    }
}

/// Load `config_path`, or the defaults when no file is there.
pub fn load_or_default(config_path: &Path) -> anyhow::Result<PedidoConfig> {
    if config_path.exists() {
        debug!("Loading configuration from {}", config_path.display());
        Ok(PedidoConfig::from_file(config_path)?)
    } else {
        Ok(PedidoConfig::default())
    }
}

/// Output format from the command line, falling back to the configured one.
pub fn resolve_format(
    requested: Option<OutputFormat>,
    config: &PedidoConfig,
) -> anyhow::Result<OutputFormat> {
    match requested {
        Some(format) => Ok(format),
        None => OutputFormat::from_str(&config.output.format, true).map_err(|_| {
            anyhow::anyhow!("Unknown output format in config: {}", config.output.format)
        }),
    }
}

/// Read one image's OCR output: `.txt` holds recognized text, `.json` holds
/// a read-result response.
pub fn read_ocr_file(path: &Path) -> anyhow::Result<OcrResult> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let content = fs::read_to_string(path)?;

    let ocr_result = match extension.as_str() {
        "txt" | "text" => OcrResult::from_text(content),
        "json" => OcrResult::from_read_result_json(&content)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    debug!(
        "Read {} lines from {}",
        ocr_result.text.lines().count(),
        path.display()
    );

    Ok(ocr_result)
}

pub fn format_record(
    record: &OrderRecord,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &OrderRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "order_id",
        "client_name",
        "phone",
        "address",
        "products",
        "total_value",
    ])?;

    wtr.write_record([
        &record.order_id,
        &record.client_name,
        &record.phone,
        &record.address,
        &record.products.join("; "),
        &record.total_value,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &OrderRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Order: {}\n", or_dash(&record.order_id)));
    output.push_str(&format!("Client: {}\n", or_dash(&record.client_name)));
    output.push_str(&format!("Phone: {}\n", or_dash(&record.phone)));
    output.push_str(&format!("Address: {}\n", or_dash(&record.address)));
    output.push('\n');

    output.push_str("Products:\n");
    if record.products.is_empty() {
        output.push_str("  -\n");
    }
    for product in &record.products {
        output.push_str(&format!("  - {}\n", product));
    }
    output.push('\n');

    if record.total_value.is_empty() {
        output.push_str("Total: -\n");
    } else {
        output.push_str(&format!(
            "Total: {} ({})\n",
            record.total_value,
            record.price_label()
        ));
    }

    output
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> OrderRecord {
        OrderRecord {
            client_name: "Maria Silva".to_string(),
            phone: String::new(),
            address: "Rua das Flores, 123".to_string(),
            products: vec!["Dipirona 500mg (2x)".to_string(), "Losartana 50mg (1x)".to_string()],
            total_value: "1.234,56".to_string(),
            order_id: "4822".to_string(),
        }
    }

    #[test]
    fn test_format_text() {
        let text = format_record(&record(), OutputFormat::Text, true).unwrap();
        assert!(text.contains("Order: 4822\n"));
        assert!(text.contains("Phone: -\n"));
        assert!(text.contains("  - Losartana 50mg (1x)\n"));
        assert!(text.contains("Total: 1.234,56 (R$ 1234.56)\n"));
    }

    #[test]
    fn test_format_csv_quotes_fields() {
        let csv = format_record(&record(), OutputFormat::Csv, true).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("order_id,client_name,phone,address,products,total_value")
        );
        assert_eq!(
            lines.next(),
            Some("4822,Maria Silva,,\"Rua das Flores, 123\",Dipirona 500mg (2x); Losartana 50mg (1x),\"1.234,56\"")
        );
    }

    #[test]
    fn test_compact_json() {
        let json = format_record(&record(), OutputFormat::Json, false).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"orderId\":\"4822\""));
    }

    #[test]
    fn test_resolve_format_from_config() {
        let mut config = PedidoConfig::default();
        config.output.format = "TEXT".to_string();
        assert_eq!(resolve_format(None, &config).unwrap(), OutputFormat::Text);
        assert_eq!(
            resolve_format(Some(OutputFormat::Csv), &config).unwrap(),
            OutputFormat::Csv
        );

        config.output.format = "xml".to_string();
        assert!(resolve_format(None, &config).is_err());
    }
}
