//! Rendering card records as JSON, CSV or plain text.

use bizcard_core::models::card::{ExtractedRecord, FieldKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Render a single record. JSON output is an object rather than an array.
pub fn format_record(record: &ExtractedRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(&[record]),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

/// Render several records.
pub fn format_records(records: &[&ExtractedRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(records
            .iter()
            .map(|record| format_text(record))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn format_csv(records: &[&ExtractedRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(FieldKey::ALL.iter().map(|key| key.label()))?;

    for record in records {
        wtr.write_record(record.iter().map(|(_, value)| value))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ExtractedRecord) -> String {
    let width = FieldKey::ALL
        .iter()
        .map(|key| key.label().len())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for (key, value) in record.iter() {
        output.push_str(&format!("{:<width$}  {}\n", key.label(), value, width = width));
    }
    output
}
