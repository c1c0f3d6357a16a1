//! Expense Analyzer - builds the analysis window and runs the rule battery

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde_json::Value;

use crate::models::{parse_records, ExpenseRecord};
use crate::Result;

use super::types::{CategoryTotal, RuleKind, SpendingSummary};
use super::{
    CategoryAdviceRule, CategoryDiversityRule, DailyAverageRule, LargeTransactionsRule,
    SavingsOpportunityRule, SpendingFrequencyRule, TopCategoryRule, WeekendSpendingRule,
    WeeklyTrendRule,
};

/// Length of the trailing analysis window
pub const ANALYSIS_WINDOW_DAYS: i64 = 30;

/// Maximum number of suggestions returned
pub const MAX_SUGGESTIONS: usize = 5;

/// The fallback message is added when at most this many rules fired
const FALLBACK_THRESHOLD: usize = 3;

pub const NO_DATA_MESSAGE: &str = "No expense data available for analysis";
pub const NO_RECENT_MESSAGE: &str = "No recent expenses found in the last 30 days";
pub const FALLBACK_MESSAGE: &str =
    "Excellent financial management! You're doing a great job keeping your expenses under control.";

/// An expense that falls inside the analysis window
#[derive(Debug, Clone, Copy)]
pub struct RecentExpense<'a> {
    pub date: DateTime<Utc>,
    pub category: Option<&'a str>,
    pub amount: Option<f64>,
}

/// Window statistics shared by all rules
pub struct AnalysisContext<'a> {
    /// Instant the window ends at
    pub now: DateTime<Utc>,
    /// Inclusive lower bound of the window
    pub window_start: DateTime<Utc>,
    /// Records with a valid date inside the window, in input order
    pub recent: Vec<RecentExpense<'a>>,
    /// Category totals over `recent`, highest first
    pub category_totals: Vec<CategoryTotal>,
}

impl<'a> AnalysisContext<'a> {
    /// Build the context for the window ending at `now`
    ///
    /// Amounts are resolved only for records inside the window, so a
    /// non-numeric amount on an old or undated record is never an error.
    pub fn new(records: &'a [ExpenseRecord], now: DateTime<Utc>) -> Result<Self> {
        let window_start = now - Duration::days(ANALYSIS_WINDOW_DAYS);

        let mut recent = Vec::new();
        for record in records.iter().filter(|r| r.is_on_or_after(window_start)) {
            let Some(date) = record.date else {
                continue;
            };
            recent.push(RecentExpense {
                date,
                category: record.category.as_deref(),
                amount: record.amount.resolve()?,
            });
        }

        let category_totals = build_category_totals(&recent);

        Ok(Self {
            now,
            window_start,
            recent,
            category_totals,
        })
    }

    /// Sum of all amounts in the window
    pub fn total_spent(&self) -> f64 {
        self.recent.iter().filter_map(|e| e.amount).sum()
    }

    /// Mean of the amounts present in the window
    pub fn mean_amount(&self) -> Option<f64> {
        let amounts: Vec<f64> = self.recent.iter().filter_map(|e| e.amount).collect();
        if amounts.is_empty() {
            None
        } else {
            Some(amounts.iter().sum::<f64>() / amounts.len() as f64)
        }
    }

    /// Total spend divided by the fixed window length
    pub fn daily_average(&self) -> f64 {
        self.total_spent() / ANALYSIS_WINDOW_DAYS as f64
    }

    /// Number of distinct calendar dates with at least one record
    pub fn spending_days(&self) -> usize {
        self.recent
            .iter()
            .map(|e| e.date.date_naive())
            .collect::<HashSet<NaiveDate>>()
            .len()
    }

    /// Number of distinct categories in the window
    pub fn unique_categories(&self) -> usize {
        self.recent
            .iter()
            .filter_map(|e| e.category)
            .collect::<HashSet<&str>>()
            .len()
    }

    /// Spend split into (weekend, weekday)
    pub fn weekend_weekday_split(&self) -> (f64, f64) {
        self.recent
            .iter()
            .fold((0.0, 0.0), |(weekend, weekday), e| {
                let amount = e.amount.unwrap_or(0.0);
                match e.date.weekday() {
                    Weekday::Sat | Weekday::Sun => (weekend + amount, weekday),
                    _ => (weekend, weekday + amount),
                }
            })
    }

    /// Spend per ISO week, keyed by (ISO year, ISO week) so weeks sort
    /// chronologically across a year boundary
    pub fn weekly_totals(&self) -> BTreeMap<(i32, u32), f64> {
        let mut totals = BTreeMap::new();
        for e in &self.recent {
            let week = e.date.iso_week();
            *totals.entry((week.year(), week.week())).or_insert(0.0) += e.amount.unwrap_or(0.0);
        }
        totals
    }

    /// The `n` highest-spending categories
    pub fn top_categories(&self, n: usize) -> &[CategoryTotal] {
        &self.category_totals[..n.min(self.category_totals.len())]
    }
}

fn build_category_totals(recent: &[RecentExpense<'_>]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for e in recent {
        let Some(category) = e.category else {
            continue;
        };
        let idx = *index.entry(category).or_insert_with(|| {
            totals.push(CategoryTotal {
                category: category.to_string(),
                total: 0.0,
                count: 0,
            });
            totals.len() - 1
        });
        totals[idx].total += e.amount.unwrap_or(0.0);
        totals[idx].count += 1;
    }

    // Stable sort keeps first-seen order for ties
    totals.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    totals
}

/// A single check in the suggestion battery
pub trait Rule: Send + Sync {
    /// Which check this is
    fn kind(&self) -> RuleKind;

    /// Evaluate against the window, returning zero or more suggestions
    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<String>>;
}

/// Turns expense records into a short, ordered list of budgeting tips
pub struct ExpenseAnalyzer {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for ExpenseAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseAnalyzer {
    /// Create an analyzer with the built-in rules in their fixed order
    pub fn new() -> Self {
        let mut analyzer = Self { rules: vec![] };

        analyzer.register(Box::new(TopCategoryRule));
        analyzer.register(Box::new(DailyAverageRule));
        analyzer.register(Box::new(SpendingFrequencyRule));
        analyzer.register(Box::new(LargeTransactionsRule));
        analyzer.register(Box::new(CategoryDiversityRule));
        analyzer.register(Box::new(WeekendSpendingRule));
        analyzer.register(Box::new(WeeklyTrendRule));
        analyzer.register(Box::new(SavingsOpportunityRule));
        analyzer.register(Box::new(CategoryAdviceRule));

        analyzer
    }

    /// Register a rule; rules run in registration order
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Get the registered rule kinds in evaluation order
    pub fn rule_kinds(&self) -> Vec<RuleKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }

    /// Analyze records against the window ending now
    pub fn analyze(&self, records: &[ExpenseRecord]) -> Vec<String> {
        self.analyze_at(records, Utc::now())
    }

    /// Analyze records against the window ending at `now`
    ///
    /// Never fails: an analysis error becomes a single descriptive message.
    pub fn analyze_at(&self, records: &[ExpenseRecord], now: DateTime<Utc>) -> Vec<String> {
        self.try_analyze_at(records, now)
            .unwrap_or_else(failure_message)
    }

    /// Parse a JSON payload and analyze it against the window ending now
    pub fn analyze_json(&self, payload: &Value) -> Vec<String> {
        self.analyze_json_at(payload, Utc::now())
    }

    /// Parse a JSON payload and analyze it against the window ending at `now`
    ///
    /// Parse failures are reported the same way as analysis failures.
    pub fn analyze_json_at(&self, payload: &Value, now: DateTime<Utc>) -> Vec<String> {
        parse_records(payload)
            .and_then(|records| self.try_analyze_at(&records, now))
            .unwrap_or_else(failure_message)
    }

    /// Run the full pipeline, surfacing failures as errors
    pub fn try_analyze_at(
        &self,
        records: &[ExpenseRecord],
        now: DateTime<Utc>,
    ) -> Result<Vec<String>> {
        if records.is_empty() {
            return Ok(vec![NO_DATA_MESSAGE.to_string()]);
        }

        let ctx = AnalysisContext::new(records, now)?;
        if ctx.recent.is_empty() {
            tracing::debug!(
                records = records.len(),
                window_start = %ctx.window_start,
                "No records inside analysis window"
            );
            return Ok(vec![NO_RECENT_MESSAGE.to_string()]);
        }

        let mut suggestions = Vec::new();
        for rule in &self.rules {
            let messages = rule.evaluate(&ctx)?;
            tracing::debug!(
                rule = rule.kind().as_str(),
                count = messages.len(),
                "Rule evaluated"
            );
            suggestions.extend(messages);
        }

        if suggestions.len() <= FALLBACK_THRESHOLD {
            suggestions.push(FALLBACK_MESSAGE.to_string());
        }
        suggestions.truncate(MAX_SUGGESTIONS);

        tracing::debug!(
            records = records.len(),
            recent = ctx.recent.len(),
            suggestions = suggestions.len(),
            "Expense analysis complete"
        );
        Ok(suggestions)
    }

    /// Structured window statistics for records against the window ending at `now`
    pub fn summarize_at(
        &self,
        records: &[ExpenseRecord],
        now: DateTime<Utc>,
    ) -> Result<SpendingSummary> {
        let ctx = AnalysisContext::new(records, now)?;
        let (weekend_spent, weekday_spent) = ctx.weekend_weekday_split();

        Ok(SpendingSummary {
            window_start: ctx.window_start,
            window_end: ctx.now,
            total_records: records.len(),
            recent_records: ctx.recent.len(),
            skipped_records: records.iter().filter(|r| r.date.is_none()).count(),
            total_spent: ctx.total_spent(),
            daily_average: ctx.daily_average(),
            spending_days: ctx.spending_days(),
            unique_categories: ctx.unique_categories(),
            weekend_spent,
            weekday_spent,
            categories: ctx.category_totals,
        })
    }

    /// Parse a JSON payload and summarize it against the window ending now
    pub fn summarize_json(&self, payload: &Value) -> Result<SpendingSummary> {
        self.summarize_json_at(payload, Utc::now())
    }

    /// Parse a JSON payload and summarize it against the window ending at `now`
    pub fn summarize_json_at(&self, payload: &Value, now: DateTime<Utc>) -> Result<SpendingSummary> {
        let records = parse_records(payload)?;
        self.summarize_at(&records, now)
    }
}

fn failure_message(err: crate::Error) -> Vec<String> {
    tracing::warn!(error = %err, "Expense analysis failed");
    vec![format!("Error analyzing expenses: {}", err)]
}
