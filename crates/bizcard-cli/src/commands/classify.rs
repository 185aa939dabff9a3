//! Classify command - label text fragments without running OCR.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use bizcard_core::{CardClassifier, CardEntry, ImagePreprocessor, OcrResult};

use super::output::{format_record, OutputFormat};
use super::scan::report_classification;
use super::{save_entry, CliContext};

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// File with one text fragment per line, in reading order ("-" for stdin)
    #[arg(default_value = "-")]
    input: String,

    /// Save the classified card to the database
    #[arg(long)]
    save: bool,

    /// Card image stored alongside the record
    #[arg(long, requires = "save")]
    image: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Also print fragments that matched no field
    #[arg(long)]
    show_discarded: bool,
}

pub fn run(args: ClassifyArgs, ctx: &CliContext) -> anyhow::Result<()> {
    let config = ctx.load_config()?;

    let text = if args.input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(&args.input)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", args.input, e))?
    };

    let lines: Vec<&str> = text.lines().collect();
    let usable = lines
        .iter()
        .filter(|line| !config.extraction.skip_blank_fragments || !line.trim().is_empty())
        .count();

    if usable < 2 {
        anyhow::bail!(
            "No usable text found ({} line(s), need at least name and designation)",
            usable
        );
    }

    info!("Classifying {} fragments", usable);

    let classifier = CardClassifier::from_config(&config.extraction);
    let classification = classifier.classify_ocr(&OcrResult::from_fragments(lines))?;

    report_classification(&classification, args.show_discarded);
    println!("{}", format_record(&classification.record, args.format)?);

    if args.save {
        let image = match &args.image {
            Some(path) => {
                let preprocessor = ImagePreprocessor::new();
                let bytes = fs::read(path)
                    .map_err(|e| anyhow::anyhow!("Failed to read image {}: {}", path.display(), e))?;
                preprocessor.encode_png(&preprocessor.decode(&bytes)?)?
            }
            None => {
                warn!("No --image given, saving card without an image");
                Vec::new()
            }
        };

        let store = ctx.open_store(&config)?;
        save_entry(&store, &CardEntry::new(classification.record, image))?;
    }

    Ok(())
}
