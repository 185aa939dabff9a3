//! CLI application for business card OCR and card record management.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, classify, config, records, scan, CliContext};

/// Business card OCR - Extract contact fields from card photos and keep them in a local database
#[derive(Parser)]
#[command(name = "bizcard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the card database
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a card image, preview the extracted fields and optionally save them
    Scan(scan::ScanArgs),

    /// Scan multiple card images
    Batch(batch::BatchArgs),

    /// Classify text fragments given one per line, skipping OCR
    Classify(classify::ClassifyArgs),

    /// List all saved cards
    List(records::ListArgs),

    /// List the distinct names of saved cards
    Names,

    /// List the designations saved for a name
    Designations(records::DesignationsArgs),

    /// Show the saved cards for a name
    Show(records::ShowArgs),

    /// Edit the card saved under a name
    Modify(records::ModifyArgs),

    /// Delete saved cards
    Delete(records::DeleteArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let ctx = CliContext::new(cli.config, cli.db);

    match cli.command {
        Commands::Scan(args) => scan::run(args, &ctx),
        Commands::Batch(args) => batch::run(args, &ctx),
        Commands::Classify(args) => classify::run(args, &ctx),
        Commands::List(args) => records::list(args, &ctx),
        Commands::Names => records::names(&ctx),
        Commands::Designations(args) => records::designations(args, &ctx),
        Commands::Show(args) => records::show(args, &ctx),
        Commands::Modify(args) => records::modify(args, &ctx),
        Commands::Delete(args) => records::delete(args, &ctx),
        Commands::Config(args) => config::run(args, &ctx),
    }
}
