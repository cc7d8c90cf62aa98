//! Extract command - build one order from the images of a receipt.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use pedido_core::{OrderRecord, OrderSession, ReceiptParser};

use super::{OutputFormat, format_record, load_config, read_ocr_file, resolve_format};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// OCR output of each image, in upload order (.txt text or .json read result)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Record accumulated from earlier images (JSON)
    #[arg(long)]
    prior: Option<PathBuf>,

    /// Assign the order id instead of detecting it from the receipt
    #[arg(long)]
    order_id: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Show the fields each image did not provide
    #[arg(long)]
    show_warnings: bool,

    /// Fail unless every field of the order was found
    #[arg(long)]
    require_complete: bool,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let format = resolve_format(args.format, &config)?;

    for input in &args.inputs {
        if !input.exists() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
    }

    let mut session =
        OrderSession::new().with_parser(ReceiptParser::with_config(config.extraction.clone()));

    if let Some(prior_path) = &args.prior {
        let content = fs::read_to_string(prior_path)?;
        let prior: OrderRecord = serde_json::from_str(&content)?;
        debug!("Continuing from record in {}", prior_path.display());
        session = session.with_record(prior);
    }

    if let Some(order_id) = &args.order_id {
        session = session.with_order_id(order_id.clone());
    }

    let pb = ProgressBar::new(args.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    for input in &args.inputs {
        pb.set_message(format!("{}", input.display()));
        info!("Processing file: {}", input.display());

        let ocr_result = match read_ocr_file(input)?.require_text() {
            Ok(ocr_result) => ocr_result,
            Err(e) => {
                warn!("Skipping {}: {}", input.display(), e);
                pb.inc(1);
                continue;
            }
        };

        let result = session.ingest_ocr(&ocr_result);

        if args.show_warnings {
            for warning in &result.warnings {
                pb.suspend(|| {
                    eprintln!(
                        "{} {}: {}",
                        style("⚠").yellow(),
                        input.display(),
                        warning
                    )
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let images = session.images_processed();
    let record = session.into_record();

    if args.require_complete {
        let missing = record.missing_fields();
        if !missing.is_empty() {
            anyhow::bail!("Order is incomplete, missing: {}", missing.join(", "));
        }
        record.ensure_complete()?;
    }

    let output = format_record(&record, format, config.output.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!(
        "Merged {} images in {:?}",
        images,
        start.elapsed()
    );

    Ok(())
}
