//! Savings Opportunity Rules
//!
//! Identifies concrete ways to spend less:
//! - A 10% cut across the board once monthly spend passes a floor
//! - Tailored advice for food, shopping and transport among the top categories

use crate::error::Result;

use super::engine::{AnalysisContext, Rule};
use super::types::{format_amount, RuleKind};

/// Window spend above this triggers the savings estimate
const SAVINGS_FLOOR: f64 = 1000.0;

/// Fraction of spend suggested as savings
const SAVINGS_RATE: f64 = 0.1;

/// Only this many top categories receive tailored advice
const ADVICE_CATEGORY_COUNT: usize = 3;

/// A keyword group with its spend threshold and advice text
struct AdviceGroup {
    keywords: &'static [&'static str],
    threshold: f64,
    advice: fn(&str, f64) -> String,
}

/// Checked in order; a category only receives advice from the first group it
/// belongs to
const ADVICE_GROUPS: &[AdviceGroup] = &[
    AdviceGroup {
        keywords: &["food", "dining", "restaurant"],
        threshold: 300.0,
        advice: food_advice,
    },
    AdviceGroup {
        keywords: &["shopping", "clothing", "electronics"],
        threshold: 200.0,
        advice: shopping_advice,
    },
    AdviceGroup {
        keywords: &["transport", "gas", "uber"],
        threshold: 150.0,
        advice: transport_advice,
    },
];

fn food_advice(category: &str, total: f64) -> String {
    format!(
        "Your '{}' spending is high at {}. Consider cooking more meals at home to save money.",
        category,
        format_amount(total)
    )
}

fn shopping_advice(category: &str, total: f64) -> String {
    format!(
        "Your '{}' spending is {}. Wait 24 hours before making non-essential purchases to avoid impulse buying.",
        category,
        format_amount(total)
    )
}

fn transport_advice(category: &str, total: f64) -> String {
    format!(
        "Your '{}' spending is {}. Consider carpooling or using public transportation to reduce costs.",
        category,
        format_amount(total)
    )
}

/// Estimates savings from a 10% reduction
pub struct SavingsOpportunityRule;

impl Rule for SavingsOpportunityRule {
    fn kind(&self) -> RuleKind {
        RuleKind::SavingsOpportunity
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<String>> {
        let total = ctx.total_spent();
        if total <= SAVINGS_FLOOR {
            return Ok(vec![]);
        }

        Ok(vec![format!(
            "By reducing your spending by just 10%, you could save {} this month.",
            format_amount(total * SAVINGS_RATE)
        )])
    }
}

/// Tailored advice for well-known categories among the top spenders
pub struct CategoryAdviceRule;

impl Rule for CategoryAdviceRule {
    fn kind(&self) -> RuleKind {
        RuleKind::CategoryAdvice
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<String>> {
        let mut messages = Vec::new();

        for entry in ctx.top_categories(ADVICE_CATEGORY_COUNT) {
            let name = entry.category.to_lowercase();
            let group = ADVICE_GROUPS
                .iter()
                .find(|g| g.keywords.contains(&name.as_str()));

            if let Some(group) = group {
                if entry.total > group.threshold {
                    messages.push((group.advice)(&entry.category, entry.total));
                }
            }
        }

        Ok(messages)
    }
}
