//! Suggestion Engine - Rule-Based Budgeting Tips
//!
//! The engine turns a batch of expense records into a short, ordered list of
//! budgeting tips. It filters records to a trailing 30-day window, computes a
//! few summary statistics once, and runs a fixed battery of independent rules
//! against them. Output order is the priority signal.
//!
//! ## Rules
//!
//! - **Spending Summary** - Top category, daily average, purchase frequency
//! - **Spending Patterns** - Large transactions, category sprawl, weekend
//!   spending, week-over-week trend
//! - **Savings Opportunity** - 10% savings estimate, category-specific advice
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendwise_core::insights::ExpenseAnalyzer;
//!
//! let analyzer = ExpenseAnalyzer::new();
//! let tips = analyzer.analyze_json(&payload);
//! ```

pub mod engine;
pub mod savings_opportunity;
pub mod spending_patterns;
pub mod spending_summary;
pub mod types;

pub use engine::{
    AnalysisContext, ExpenseAnalyzer, RecentExpense, Rule, ANALYSIS_WINDOW_DAYS, FALLBACK_MESSAGE,
    MAX_SUGGESTIONS, NO_DATA_MESSAGE, NO_RECENT_MESSAGE,
};
pub use savings_opportunity::{CategoryAdviceRule, SavingsOpportunityRule};
pub use spending_patterns::{
    CategoryDiversityRule, LargeTransactionsRule, WeekendSpendingRule, WeeklyTrendRule,
};
pub use spending_summary::{DailyAverageRule, SpendingFrequencyRule, TopCategoryRule};
pub use types::{format_amount, round_amount, CategoryTotal, RuleKind, SpendingSummary};
