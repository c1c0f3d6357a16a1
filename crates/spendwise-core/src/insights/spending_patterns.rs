//! Spending Pattern Rules
//!
//! Conditional checks on the shape of spending in the window: outsized
//! transactions, category sprawl, weekend-heavy spending and the week-over-week
//! trend.

use crate::error::Result;

use super::engine::{AnalysisContext, Rule};
use super::types::RuleKind;

/// A transaction above this multiple of the mean counts as large
const LARGE_TRANSACTION_FACTOR: f64 = 2.0;

/// More distinct categories than this triggers the diversity tip
const MAX_CATEGORIES: usize = 8;

/// Weekend spend above this multiple of weekday spend triggers the weekend tip
const WEEKEND_FACTOR: f64 = 1.5;

/// The weekly trend needs at least this many records in the window
const MIN_RECORDS_FOR_TREND: usize = 7;

/// Counts transactions well above the average
pub struct LargeTransactionsRule;

impl Rule for LargeTransactionsRule {
    fn kind(&self) -> RuleKind {
        RuleKind::LargeTransactions
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<String>> {
        let Some(mean) = ctx.mean_amount() else {
            return Ok(vec![]);
        };

        let threshold = mean * LARGE_TRANSACTION_FACTOR;
        let large = ctx
            .recent
            .iter()
            .filter(|e| e.amount.is_some_and(|a| a > threshold))
            .count();

        if large == 0 {
            return Ok(vec![]);
        }

        Ok(vec![format!(
            "You have {} large transactions. Review if these were necessary or could be reduced.",
            large
        )])
    }
}

pub struct CategoryDiversityRule;

impl Rule for CategoryDiversityRule {
    fn kind(&self) -> RuleKind {
        RuleKind::CategoryDiversity
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<String>> {
        if ctx.unique_categories() > MAX_CATEGORIES {
            return Ok(vec!["You're spending across many categories. Consider consolidating similar expenses to better track your spending.".to_string()]);
        }
        Ok(vec![])
    }
}

pub struct WeekendSpendingRule;

impl Rule for WeekendSpendingRule {
    fn kind(&self) -> RuleKind {
        RuleKind::WeekendSpending
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<String>> {
        let (weekend, weekday) = ctx.weekend_weekday_split();
        if weekend > weekday * WEEKEND_FACTOR {
            return Ok(vec!["Your weekend spending is significantly higher than weekday spending. Consider planning weekend activities with a budget in mind.".to_string()]);
        }
        Ok(vec![])
    }
}

/// Compares the most recent ISO week with the one before it
pub struct WeeklyTrendRule;

impl Rule for WeeklyTrendRule {
    fn kind(&self) -> RuleKind {
        RuleKind::WeeklyTrend
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<String>> {
        if ctx.recent.len() < MIN_RECORDS_FOR_TREND {
            return Ok(vec![]);
        }

        let weekly = ctx.weekly_totals();
        let mut latest_first = weekly.values().rev();
        let (Some(last), Some(previous)) = (latest_first.next(), latest_first.next()) else {
            return Ok(vec![]);
        };

        let trend = last - previous;
        tracing::debug!(last, previous, trend, "Weekly trend");

        let message = if trend > 0.0 {
            "Your spending has increased in the recent week. Review your recent purchases to identify any unnecessary expenses."
        } else {
            "Great! Your spending has decreased in the recent week. Keep up the good work!"
        };
        Ok(vec![message.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseRecord;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        // Friday, ISO week 24
        Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap()
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_large_transactions_counted() {
        let records = vec![
            ExpenseRecord::new(now(), "Food", 10.0),
            ExpenseRecord::new(now(), "Food", 10.0),
            ExpenseRecord::new(now(), "Food", 10.0),
            ExpenseRecord::new(now(), "Travel", 200.0),
        ];
        let ctx = AnalysisContext::new(&records, now()).unwrap();
        let messages = LargeTransactionsRule.evaluate(&ctx).unwrap();

        assert_eq!(
            messages,
            vec!["You have 1 large transactions. Review if these were necessary or could be reduced."]
        );
    }

    #[test]
    fn test_equal_amounts_have_no_large_transactions() {
        let records = vec![
            ExpenseRecord::new(now(), "Food", 10.0),
            ExpenseRecord::new(now(), "Rent", 10.0),
        ];
        let ctx = AnalysisContext::new(&records, now()).unwrap();
        assert!(LargeTransactionsRule.evaluate(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_category_diversity_threshold() {
        let make = |n: usize| -> Vec<ExpenseRecord> {
            (0..n)
                .map(|i| ExpenseRecord::new(now(), format!("Category {}", i), 5.0))
                .collect()
        };

        let eight = make(8);
        let ctx = AnalysisContext::new(&eight, now()).unwrap();
        assert!(CategoryDiversityRule.evaluate(&ctx).unwrap().is_empty());

        let nine = make(9);
        let ctx = AnalysisContext::new(&nine, now()).unwrap();
        assert_eq!(CategoryDiversityRule.evaluate(&ctx).unwrap().len(), 1);
    }

    #[test]
    fn test_weekend_spending() {
        // 8th and 9th are Sat/Sun, 10th is Monday
        let heavy_weekend = vec![
            ExpenseRecord::new(at(8), "Fun", 100.0),
            ExpenseRecord::new(at(9), "Fun", 60.0),
            ExpenseRecord::new(at(10), "Food", 100.0),
        ];
        let ctx = AnalysisContext::new(&heavy_weekend, now()).unwrap();
        assert_eq!(WeekendSpendingRule.evaluate(&ctx).unwrap().len(), 1);

        let balanced = vec![
            ExpenseRecord::new(at(8), "Fun", 150.0),
            ExpenseRecord::new(at(10), "Food", 100.0),
        ];
        let ctx = AnalysisContext::new(&balanced, now()).unwrap();
        assert!(WeekendSpendingRule.evaluate(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_weekly_trend_needs_seven_records() {
        let records: Vec<ExpenseRecord> = (0..6)
            .map(|d| ExpenseRecord::new(now() - Duration::days(d * 3), "Food", 10.0))
            .collect();
        let ctx = AnalysisContext::new(&records, now()).unwrap();
        assert!(WeeklyTrendRule.evaluate(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_weekly_trend_increase_and_decrease() {
        // Week 23: June 3..=7, week 24: June 10..=14
        let mut increasing: Vec<ExpenseRecord> = (3..=6)
            .map(|d| ExpenseRecord::new(at(d), "Food", 10.0))
            .collect();
        increasing.extend((10..=13).map(|d| ExpenseRecord::new(at(d), "Food", 20.0)));

        let ctx = AnalysisContext::new(&increasing, now()).unwrap();
        let messages = WeeklyTrendRule.evaluate(&ctx).unwrap();
        assert!(messages[0].starts_with("Your spending has increased"));

        let mut flat: Vec<ExpenseRecord> = (3..=6)
            .map(|d| ExpenseRecord::new(at(d), "Food", 10.0))
            .collect();
        flat.extend((10..=13).map(|d| ExpenseRecord::new(at(d), "Food", 10.0)));

        let ctx = AnalysisContext::new(&flat, now()).unwrap();
        let messages = WeeklyTrendRule.evaluate(&ctx).unwrap();
        assert!(messages[0].starts_with("Great! Your spending has decreased"));
    }

    #[test]
    fn test_weekly_trend_single_week_is_silent() {
        let records: Vec<ExpenseRecord> = (10..=14)
            .flat_map(|d| {
                vec![
                    ExpenseRecord::new(at(d), "Food", 10.0),
                    ExpenseRecord::new(at(d), "Rent", 10.0),
                ]
            })
            .collect();
        let ctx = AnalysisContext::new(&records, now()).unwrap();
        assert!(WeeklyTrendRule.evaluate(&ctx).unwrap().is_empty());
    }
}
