//! Spendwise Core Library
//!
//! Shared functionality for the Spendwise budgeting tips service:
//! - Tolerant parsing of loosely typed expense records
//! - JSON and CSV expense file loading
//! - Rule-based suggestion engine over a trailing 30-day window
//! - Structured spending summary for the same window

pub mod error;
pub mod import;
pub mod insights;
pub mod models;

pub use error::{Error, Result};
pub use import::{load_payload, read_payload, RecordFormat};
pub use insights::{CategoryTotal, ExpenseAnalyzer, RuleKind, SpendingSummary};
pub use models::{parse_date, parse_records, Amount, ExpenseRecord};

/// Analyze records against the window ending now
///
/// Always returns between one and five suggestions.
pub fn analyze(records: &[ExpenseRecord]) -> Vec<String> {
    ExpenseAnalyzer::new().analyze(records)
}
