//! Core types for the suggestion rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency symbol embedded in suggestion text
pub const CURRENCY_SYMBOL: &str = "₹";

/// The checks run by the analyzer, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Highest-spending category
    TopCategory,
    /// Average spend per window day
    DailyAverage,
    /// How many distinct days had spending
    SpendingFrequency,
    /// Transactions well above the mean
    LargeTransactions,
    /// Number of distinct categories
    CategoryDiversity,
    /// Weekend spend compared to weekday spend
    WeekendSpending,
    /// Most recent week compared to the one before
    WeeklyTrend,
    /// Potential savings from a 10% cut
    SavingsOpportunity,
    /// Keyword-based advice for the top categories
    CategoryAdvice,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::TopCategory => "top_category",
            RuleKind::DailyAverage => "daily_average",
            RuleKind::SpendingFrequency => "spending_frequency",
            RuleKind::LargeTransactions => "large_transactions",
            RuleKind::CategoryDiversity => "category_diversity",
            RuleKind::WeekendSpending => "weekend_spending",
            RuleKind::WeeklyTrend => "weekly_trend",
            RuleKind::SavingsOpportunity => "savings_opportunity",
            RuleKind::CategoryAdvice => "category_advice",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Total spend for one category over the analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    /// Number of records in this category
    pub count: usize,
}

/// Structured statistics for the analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// Records in the input
    pub total_records: usize,
    /// Records dated inside the window
    pub recent_records: usize,
    /// Records whose date was missing or unparsable
    pub skipped_records: usize,
    pub total_spent: f64,
    pub daily_average: f64,
    pub spending_days: usize,
    pub unique_categories: usize,
    pub weekend_spent: f64,
    pub weekday_spent: f64,
    /// Category totals, highest first
    pub categories: Vec<CategoryTotal>,
}

/// Round to the nearest whole amount, ties to even
///
/// Stays an `f64`: casting to an integer would clamp totals beyond `i64`.
/// Adding `0.0` turns a negative zero into zero.
pub fn round_amount(value: f64) -> f64 {
    value.round_ties_even() + 0.0
}

/// Format an amount for display, e.g. "₹ 700"
pub fn format_amount(value: f64) -> String {
    format!("{} {:.0}", CURRENCY_SYMBOL, round_amount(value))
}
