//! Rendering transaction records as JSON, CSV, or text.

use landrec_core::transaction::rules::format_rupee_amount;
use landrec_core::{Field, PersistedTransaction, TransactionRecord};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per transaction
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

/// Render freshly parsed records.
pub fn format_records(records: &[TransactionRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records.iter().map(|r| (None, r)), false),
        OutputFormat::Text => Ok(format_text(records.iter().enumerate().map(|(i, r)| {
            (format!("Transaction {}", i + 1), r)
        }))),
    }
}

/// Render saved records together with their ids.
pub fn format_persisted(records: &[PersistedTransaction], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records.iter().map(|p| (Some(p.id), &p.record)), true),
        OutputFormat::Text => Ok(format_text(records.iter().map(|p| {
            (
                format!("Transaction #{} (saved {} by {})", p.id, p.created_at.format("%Y-%m-%d %H:%M"), p.created_by),
                &p.record,
            )
        }))),
    }
}

fn format_csv<'a>(
    rows: impl Iterator<Item = (Option<u64>, &'a TransactionRecord)>,
    with_id: bool,
) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = Vec::with_capacity(Field::ALL.len() + 1);
    if with_id {
        header.push("id");
    }
    header.extend(Field::ALL.iter().map(|f| f.name()));
    wtr.write_record(&header)?;

    for (id, record) in rows {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        if with_id {
            row.push(id.map(|id| id.to_string()).unwrap_or_default());
        }
        row.extend(Field::ALL.iter().map(|f| record.display_value(*f).unwrap_or_default()));
        wtr.write_record(&row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text<'a>(blocks: impl Iterator<Item = (String, &'a TransactionRecord)>) -> String {
    let mut output = String::new();

    for (title, record) in blocks {
        output.push_str(&title);
        output.push('\n');

        for field in Field::ALL {
            let value = match field {
                Field::ConsiderationValue => record.consideration_value.map(|v| format!("Rs. {}", format_rupee_amount(v))),
                Field::MarketValue => record.market_value.map(|v| format!("Rs. {}", format_rupee_amount(v))),
                _ => record.display_value(field),
            };
            if let Some(value) = value {
                output.push_str(&format!("  {:<20} {}\n", field_label(field), value.replace('\n', " ")));
            }
        }

        let missing = record.missing_fields();
        if !missing.is_empty() {
            output.push_str(&format!("  ({} fields not found)\n", missing.len()));
        }
        output.push('\n');
    }

    output
}

fn field_label(field: Field) -> String {
    let name = field.name().replace('_', " ");
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}
