//! Commands working on saved cards: list, names, designations, show,
//! modify and delete.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use bizcard_core::models::card::{ExtractedRecord, FieldKey};

use super::output::{format_records, OutputFormat};
use super::CliContext;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Arguments for the designations command.
#[derive(Args)]
pub struct DesignationsArgs {
    /// Card name
    name: String,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Card name
    name: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the stored image of the first matching card to this file
    #[arg(long)]
    image_out: Option<PathBuf>,
}

/// Arguments for the modify command.
#[derive(Args)]
pub struct ModifyArgs {
    /// Name of the card to edit
    name: String,

    /// Field to change, e.g. --set email=jane@acme.com
    #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
    changes: Vec<String>,
}

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Card name
    name: String,

    /// Designation of the cards to delete
    #[arg(required_unless_present = "all")]
    designation: Option<String>,

    /// Delete every card with this name regardless of designation
    #[arg(long, conflicts_with = "designation")]
    all: bool,
}

pub fn list(args: ListArgs, ctx: &CliContext) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config)?;

    let cards = store.select_all()?;
    if cards.is_empty() && args.format == OutputFormat::Text {
        eprintln!("{} No saved cards.", style("ℹ").blue());
        return Ok(());
    }

    let records: Vec<&ExtractedRecord> = cards.iter().map(|c| &c.record).collect();
    println!("{}", format_records(&records, args.format)?);

    Ok(())
}

pub fn names(ctx: &CliContext) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config)?;

    for name in store.select_distinct_names()? {
        println!("{}", name);
    }

    Ok(())
}

pub fn designations(args: DesignationsArgs, ctx: &CliContext) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config)?;

    for designation in store.select_designations_for_name(&args.name)? {
        println!("{}", designation);
    }

    Ok(())
}

pub fn show(args: ShowArgs, ctx: &CliContext) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config)?;

    let cards = store.select_by_name(&args.name)?;
    if cards.is_empty() {
        anyhow::bail!("No card named {:?}", args.name);
    }

    let records: Vec<&ExtractedRecord> = cards.iter().map(|c| &c.record).collect();
    println!("{}", format_records(&records, args.format)?);

    if let Some(image_out) = &args.image_out {
        let image = &cards[0].image;
        if image.is_empty() {
            anyhow::bail!("Card {:?} has no stored image", args.name);
        }
        fs::write(image_out, image)?;
        eprintln!(
            "{} Image written to {}",
            style("✓").green(),
            image_out.display()
        );
    }

    Ok(())
}

pub fn modify(args: ModifyArgs, ctx: &CliContext) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config)?;

    let mut cards = store.select_by_name(&args.name)?;
    if cards.is_empty() {
        anyhow::bail!("No card named {:?}", args.name);
    }
    if cards.len() > 1 {
        eprintln!(
            "{} {} cards are named {:?}; all of them will be replaced by the edited first one",
            style("⚠").yellow(),
            cards.len(),
            args.name
        );
    }

    let mut entry = cards.swap_remove(0);
    for change in &args.changes {
        let (key, value) = parse_change(change)?;
        entry.record.set(key, value);
    }

    let replaced = store.replace_by_name(&args.name, &entry)?;
    info!("Replaced {} row(s) for {:?}", replaced, args.name);

    println!("{}", format_records(&[&entry.record], OutputFormat::Text)?);
    eprintln!(
        "{} Updated {} card(s) named {:?}",
        style("✓").green(),
        replaced,
        args.name
    );

    Ok(())
}

pub fn delete(args: DeleteArgs, ctx: &CliContext) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let store = ctx.open_store(&config)?;

    let removed = match &args.designation {
        Some(designation) => store.delete_by_name_and_designation(&args.name, designation)?,
        None => store.delete_by_name(&args.name)?,
    };

    if removed == 0 {
        eprintln!("{} No matching cards found.", style("ℹ").blue());
    } else {
        println!("Deleted {} card(s)", removed);
    }

    Ok(())
}

/// Parse a `KEY=VALUE` edit. The value may itself contain `=`.
fn parse_change(change: &str) -> anyhow::Result<(FieldKey, String)> {
    let (key, value) = change
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Expected KEY=VALUE, got {:?}", change))?;

    let key: FieldKey = key.parse()?;
    Ok((key, value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_change() {
        let (key, value) = parse_change("company name=ACME CORP").unwrap();
        assert_eq!(key, FieldKey::CompanyName);
        assert_eq!(value, "ACME CORP");

        let (key, value) = parse_change("website=https://acme.com/?a=b").unwrap();
        assert_eq!(key, FieldKey::Website);
        assert_eq!(value, "https://acme.com/?a=b");
    }

    #[test]
    fn test_parse_change_rejects_bad_input() {
        assert!(parse_change("email").is_err());
        assert!(parse_change("fax=123").is_err());
    }
}
