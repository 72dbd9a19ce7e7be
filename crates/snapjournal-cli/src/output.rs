//! Output formatting helpers.

use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use snapjournal::{PhotoRecord, PhotoRef};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// A listing row. Inline payloads are summarized rather than printed.
#[derive(Debug, Serialize)]
pub struct PhotoSummary {
    pub id: String,
    pub title: String,
    pub timestamp: i64,
    pub taken: Option<String>,
    pub storage: String,
    pub display: String,
}

impl PhotoSummary {
    pub fn from_record(record: &PhotoRecord) -> Self {
        let taken = DateTime::<Utc>::from_timestamp_millis(record.timestamp)
            .map(|dt| dt.to_rfc3339());

        Self {
            id: record.id.to_string(),
            title: record.title.clone(),
            timestamp: record.timestamp,
            taken,
            storage: describe(&record.storage()),
            display: describe(&PhotoRef::parse(record.display_handle())),
        }
    }
}

fn describe(handle: &PhotoRef) -> String {
    match handle {
        PhotoRef::Inline(image) => format!("inline:{}", image.mime()),
        other => other.as_str().to_string(),
    }
}
