//! Spending Summary Rules
//!
//! Always-on headline suggestions plus the spending frequency check:
//! - Top category by total spend
//! - Daily average over the window
//! - Purchase frequency (very frequent or pleasantly infrequent)

use crate::error::{Error, Result};

use super::engine::{AnalysisContext, Rule};
use super::types::{format_amount, RuleKind};

/// More distinct spending days than this is "almost every day"
const FREQUENT_DAYS: usize = 25;

/// Fewer distinct spending days than this is "infrequent"
const INFREQUENT_DAYS: usize = 10;

/// Names the highest-spending category
pub struct TopCategoryRule;

impl Rule for TopCategoryRule {
    fn kind(&self) -> RuleKind {
        RuleKind::TopCategory
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<String>> {
        let top = ctx.category_totals.first().ok_or(Error::NoCategories)?;

        Ok(vec![format!(
            "Your highest spending category is '{}' with {} in the last 30 days. Consider setting a budget for this category.",
            top.category,
            format_amount(top.total)
        )])
    }
}

/// Reports total spend divided by the window length
pub struct DailyAverageRule;

impl Rule for DailyAverageRule {
    fn kind(&self) -> RuleKind {
        RuleKind::DailyAverage
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<String>> {
        Ok(vec![format!(
            "Your daily average spending is {}. Aim to keep this under your daily budget target.",
            format_amount(ctx.daily_average())
        )])
    }
}

/// Comments on how many days had spending
pub struct SpendingFrequencyRule;

impl Rule for SpendingFrequencyRule {
    fn kind(&self) -> RuleKind {
        RuleKind::SpendingFrequency
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<String>> {
        let days = ctx.spending_days();

        let message = if days > FREQUENT_DAYS {
            Some("You're making purchases almost every day. Consider consolidating purchases to reduce impulse buying.")
        } else if days < INFREQUENT_DAYS {
            Some("Good job! You're not making frequent small purchases, which helps control spending.")
        } else {
            None
        };

        Ok(message.map(str::to_string).into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, ExpenseRecord};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap()
    }

    fn daily_records(days: i64) -> Vec<ExpenseRecord> {
        (0..days)
            .map(|d| ExpenseRecord::new(now() - Duration::days(d), "Food", 10.0))
            .collect()
    }

    #[test]
    fn test_top_category_message() {
        let records = vec![
            ExpenseRecord::new(now(), "Food", 500.0),
            ExpenseRecord::new(now(), "Food", 200.0),
            ExpenseRecord::new(now(), "Rent", 300.0),
        ];
        let ctx = AnalysisContext::new(&records, now()).unwrap();
        let messages = TopCategoryRule.evaluate(&ctx).unwrap();

        assert_eq!(
            messages,
            vec!["Your highest spending category is 'Food' with ₹ 700 in the last 30 days. Consider setting a budget for this category."]
        );
    }

    #[test]
    fn test_top_category_requires_categories() {
        let records = vec![ExpenseRecord {
            date: Some(now()),
            category: None,
            amount: Amount::Value(10.0),
        }];
        let ctx = AnalysisContext::new(&records, now()).unwrap();

        assert!(matches!(
            TopCategoryRule.evaluate(&ctx),
            Err(Error::NoCategories)
        ));
    }

    #[test]
    fn test_daily_average_divides_by_window() {
        let records = vec![ExpenseRecord::new(now(), "Food", 700.0)];
        let ctx = AnalysisContext::new(&records, now()).unwrap();
        let messages = DailyAverageRule.evaluate(&ctx).unwrap();

        assert!(messages[0].contains("₹ 23."));
    }

    #[test]
    fn test_frequency_thresholds() {
        let infrequent = daily_records(9);
        let ctx = AnalysisContext::new(&infrequent, now()).unwrap();
        let messages = SpendingFrequencyRule.evaluate(&ctx).unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Good job!"));

        for days in [10, 25] {
            let records = daily_records(days);
            let ctx = AnalysisContext::new(&records, now()).unwrap();
            assert!(SpendingFrequencyRule.evaluate(&ctx).unwrap().is_empty());
        }

        let frequent = daily_records(26);
        let ctx = AnalysisContext::new(&frequent, now()).unwrap();
        let messages = SpendingFrequencyRule.evaluate(&ctx).unwrap();
        assert!(messages[0].contains("almost every day"));
    }
}
