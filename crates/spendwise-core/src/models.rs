//! Expense record model and tolerant parsing from loosely typed JSON

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Naive datetime layouts accepted in addition to RFC 3339. Interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Monetary amount as supplied by a record
///
/// A non-numeric amount is kept as `Invalid`. It fails the analysis only once
/// its record lands inside the analysis window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    /// No amount given; contributes nothing to sums
    Missing,
    Value(f64),
    /// Present but not a finite number, with the reason
    Invalid(String),
}

impl Amount {
    /// The numeric value, or `InvalidAmount` for a non-numeric amount
    pub fn resolve(&self) -> Result<Option<f64>> {
        match self {
            Amount::Missing => Ok(None),
            Amount::Value(v) => Ok(Some(*v)),
            Amount::Invalid(reason) => Err(Error::InvalidAmount(reason.clone())),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Value(value)
    }
}

/// A parsed expense record
///
/// Every field is tolerant: a record with an unparsable date is kept (and later
/// excluded from the analysis window), a record without a category still counts
/// toward totals, and a record without an amount contributes nothing to sums.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRecord {
    /// Parsed timestamp, `None` when missing or unparsable
    pub date: Option<DateTime<Utc>>,
    /// Free-text category, case preserved
    pub category: Option<String>,
    pub amount: Amount,
}

impl ExpenseRecord {
    /// Create a fully populated record
    pub fn new(date: DateTime<Utc>, category: impl Into<String>, amount: f64) -> Self {
        Self {
            date: Some(date),
            category: Some(category.into()),
            amount: Amount::Value(amount),
        }
    }

    /// Parse a record from a JSON object
    ///
    /// `index` is the record's position in the payload, used in error messages.
    /// Extra keys are ignored. Only a value that is not an object fails here; a
    /// non-numeric amount is carried as [`Amount::Invalid`].
    pub fn from_json(index: usize, value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            Error::InvalidRecord(format!(
                "record {} must be an object, got {}",
                index,
                json_type_name(value)
            ))
        })?;

        let date = obj.get("date").and_then(Value::as_str).and_then(parse_date);
        let category = obj
            .get("category")
            .and_then(Value::as_str)
            .map(str::to_string);
        let amount = parse_amount(index, obj.get("amount"));

        Ok(Self {
            date,
            category,
            amount,
        })
    }

    /// Whether the record has a valid date on or after `start`
    pub fn is_on_or_after(&self, start: DateTime<Utc>) -> bool {
        self.date.is_some_and(|d| d >= start)
    }
}

/// Parse a JSON payload into expense records
///
/// `null` is treated as an empty payload. Anything other than an array or
/// `null` is rejected.
pub fn parse_records(payload: &Value) -> Result<Vec<ExpenseRecord>> {
    match payload {
        Value::Null => Ok(vec![]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| ExpenseRecord::from_json(i, v))
            .collect(),
        other => Err(Error::InvalidPayload(format!(
            "expected an array of expense records, got {}",
            json_type_name(other)
        ))),
    }
}

/// Parse a date string, returning `None` for anything unrecognized
///
/// Accepts RFC 3339 timestamps, naive ISO datetimes (as UTC) and plain
/// `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(ndt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

fn parse_amount(index: usize, value: Option<&Value>) -> Amount {
    let amount = match value {
        None | Some(Value::Null) => return Amount::Missing,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(other) => {
            return Amount::Invalid(format!(
                "record {}: expected a number, got {}",
                index,
                json_type_name(other)
            ))
        }
    };

    match amount {
        Some(v) if v.is_finite() => Amount::Value(v),
        _ => Amount::Invalid(format!(
            "record {}: {} is not a number",
            index,
            value.map(Value::to_string).unwrap_or_default()
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
