//! Scan command - OCR a single card image, preview the fields, optionally save.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use bizcard_core::{BizCardError, CardScanner, ClassificationResult, ClassifyError};

use super::output::{format_record, OutputFormat};
use super::{load_engine, save_entry, CliContext};

/// Image extensions accepted by `scan` and `batch`.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "tiff", "tif", "bmp"];

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Card image
    #[arg(required = true)]
    input: PathBuf,

    /// Save the extracted card to the database
    #[arg(long)]
    save: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Also print fragments that matched no field
    #[arg(long)]
    show_discarded: bool,
}

pub fn run(args: ScanArgs, ctx: &CliContext) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = ctx.load_config()?;

    check_image_path(&args.input)?;
    info!("Scanning card: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Loading OCR models...");
    pb.set_position(10);
    let engine = load_engine(args.model_dir.as_deref(), &config)?;
    let scanner = CardScanner::from_config(engine, &config);

    pb.set_message("Reading card...");
    pb.set_position(40);
    let bytes = fs::read(&args.input)?;
    let scanned = scanner.scan_bytes(&bytes).map_err(describe_scan_error)?;

    pb.finish_and_clear();

    report_classification(&scanned.classification, args.show_discarded);

    let output = format_record(&scanned.classification.record, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.save {
        let store = ctx.open_store(&config)?;
        save_entry(&store, &scanned.into_entry())?;
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Reject paths that do not exist or are not a supported image type.
pub fn check_image_path(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        anyhow::bail!("Unsupported file format: {}", extension);
    }

    Ok(())
}

/// Turn pipeline errors into messages for the user.
pub fn describe_scan_error(err: BizCardError) -> anyhow::Error {
    match err {
        BizCardError::Classify(ClassifyError::TooFewFragments { found }) => anyhow::anyhow!(
            "No usable text found on the card ({} line(s) recognized, need name and designation)",
            found
        ),
        BizCardError::Classify(ClassifyError::LowPositionalConfidence { index, score }) => {
            anyhow::anyhow!(
                "{} line recognized with confidence {:.2}; retake the photo or lower extraction.min_positional_confidence",
                if index == 0 { "Name" } else { "Designation" },
                score
            )
        }
        other => other.into(),
    }
}

/// Print warnings (and optionally discarded fragments) to stderr.
pub fn report_classification(classification: &ClassificationResult, show_discarded: bool) {
    for warning in &classification.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    if show_discarded && !classification.discarded.is_empty() {
        eprintln!("{}", style("Unclassified lines:").dim());
        for fragment in &classification.discarded {
            eprintln!("  - {}", fragment);
        }
    }
}
