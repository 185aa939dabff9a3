//! Batch command - scan multiple card images.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use bizcard_core::models::card::{ExtractedRecord, FieldKey};
use bizcard_core::{CardScanner, PureOcrEngine};
use bizcard_store::CardStore;

use super::output::{format_record, OutputFormat};
use super::scan::{describe_scan_error, IMAGE_EXTENSIONS};
use super::{load_engine, CliContext};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching card images
    #[arg(required = true)]
    input: String,

    /// Save every extracted card to the database
    #[arg(long)]
    save: bool,

    /// Output directory for per-card results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each card
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Outcome of scanning a single image.
struct ScanOutcome {
    path: PathBuf,
    record: Option<ExtractedRecord>,
    saved: bool,
    error: Option<String>,
    processing_time_ms: u64,
}

pub fn run(args: BatchArgs, ctx: &CliContext) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = ctx.load_config()?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} card images to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let engine = load_engine(args.model_dir.as_deref(), &config)?;
    let scanner = CardScanner::from_config(engine, &config);
    let store = if args.save {
        Some(ctx.open_store(&config)?)
    } else {
        None
    };

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cards")?
            .progress_chars("=>-"),
    );

    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = scan_single_file(&path, &scanner, store.as_ref());
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok((record, saved)) => outcomes.push(ScanOutcome {
                path,
                record: Some(record),
                saved,
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to scan {}: {}", path.display(), error_msg);
                    outcomes.push(ScanOutcome {
                        path,
                        record: None,
                        saved: false,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to scan {}: {}", path.display(), error_msg);
                    overall_pb.abandon();
                    anyhow::bail!("Scanning {} failed: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    for outcome in &outcomes {
        if let (Some(record), Some(output_dir)) = (&outcome.record, &args.output_dir) {
            let output_name = outcome
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("card");

            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));
            fs::write(&output_path, format_record(record, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let succeeded = outcomes.iter().filter(|o| o.record.is_some()).count();
    let saved = outcomes.iter().filter(|o| o.saved).count();
    let failed: Vec<_> = outcomes.iter().filter(|o| o.error.is_some()).collect();

    eprintln!();
    eprintln!(
        "{} Processed {} cards in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} extracted, {} saved, {} failed",
        style(succeeded).green(),
        style(saved).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for outcome in &failed {
            eprintln!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn scan_single_file(
    path: &Path,
    scanner: &CardScanner<PureOcrEngine>,
    store: Option<&CardStore>,
) -> anyhow::Result<(ExtractedRecord, bool)> {
    let bytes = fs::read(path)?;
    let scanned = scanner.scan_bytes(&bytes).map_err(describe_scan_error)?;

    for warning in &scanned.classification.warnings {
        warn!("{}: {}", path.display(), warning);
    }

    let record = scanned.classification.record.clone();
    let saved = match store {
        Some(store) => {
            store.insert(&scanned.into_entry())?;
            true
        }
        None => false,
    };

    Ok((record, saved))
}

fn write_summary(path: &Path, outcomes: &[ScanOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(FieldKey::ALL.iter().map(|key| key.column()));
    header.extend(["saved", "processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let mut row = vec![filename.to_string()];
        match &outcome.record {
            Some(record) => {
                row.push("success".to_string());
                row.extend(record.iter().map(|(_, value)| value.to_string()));
            }
            None => {
                row.push("error".to_string());
                row.extend(FieldKey::ALL.iter().map(|_| String::new()));
            }
        }
        row.push(outcome.saved.to_string());
        row.push(outcome.processing_time_ms.to_string());
        row.push(outcome.error.clone().unwrap_or_default());

        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
