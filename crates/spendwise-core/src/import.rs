//! Expense file loading
//!
//! Reads expense records from JSON or CSV files into the same loosely typed
//! payload the HTTP API accepts, so both paths share one parser.
//!
//! CSV files need a header row. The `date`, `category` and `amount` columns
//! are matched case-insensitively; other columns are ignored. Empty cells are
//! treated as missing fields.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::Result;

/// Columns copied from CSV rows into the record payload
const RECORD_COLUMNS: &[&str] = &["date", "category", "amount"];

/// Supported expense file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Csv,
}

impl RecordFormat {
    /// Detect the format from a file extension (defaults to JSON)
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => RecordFormat::Csv,
            _ => RecordFormat::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordFormat::Json => "json",
            RecordFormat::Csv => "csv",
        }
    }
}

/// Read a payload in the given format
pub fn read_payload<R: Read>(reader: R, format: RecordFormat) -> Result<Value> {
    match format {
        RecordFormat::Json => Ok(serde_json::from_reader(reader)?),
        RecordFormat::Csv => read_csv_payload(reader),
    }
}

/// Load a payload from a file, detecting the format from its extension
pub fn load_payload(path: &Path) -> Result<Value> {
    let format = RecordFormat::from_path(path);
    let file = File::open(path)?;
    let payload = read_payload(BufReader::new(file), format)?;

    tracing::debug!(
        path = %path.display(),
        format = format.as_str(),
        records = payload.as_array().map(Vec::len).unwrap_or(0),
        "Loaded expense file"
    );

    Ok(payload)
}

fn read_csv_payload<R: Read>(reader: R) -> Result<Value> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    // Map each wanted column to its index in the header row
    let headers = rdr.headers()?.clone();
    let columns: Vec<(&str, usize)> = RECORD_COLUMNS
        .iter()
        .filter_map(|name| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .map(|idx| (*name, idx))
        })
        .collect();

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let mut obj = Map::new();
        for (name, idx) in &columns {
            if let Some(cell) = row.get(*idx).filter(|c| !c.is_empty()) {
                obj.insert((*name).to_string(), Value::String(cell.to_string()));
            }
        }
        records.push(Value::Object(obj));
    }

    Ok(Value::Array(records))
}
