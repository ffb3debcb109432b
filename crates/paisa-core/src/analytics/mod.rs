//! Spending analytics
//!
//! Pure reducers over ledger slices. Handlers load an owner's records and
//! hand them in; nothing here touches the database, so every computation
//! is trivially testable and an empty ledger always produces a zeroed
//! result instead of an error.
//!
//! ## Reducers
//!
//! - **summary** - Dashboard totals and subscription cost
//! - **trends** - Daily spending trend
//! - **budget** - Budget consumption status
//! - **duplicates** - Same-day duplicate charge detection
//! - **behaviour** - Time-of-day and weekday spending patterns
//! - **merchants** - Merchant classification and per-merchant stats
//! - **badges** - Achievement eligibility rules
//! - **goals** - Savings goal projections
//! - **weekly** - Seven-day report
//! - **category** - Month-by-month insight for one category
//! - **recommendations** - Rule-based lifestyle suggestions

pub mod badges;
pub mod behaviour;
pub mod budget;
pub mod category;
pub mod duplicates;
pub mod goals;
pub mod merchants;
pub mod recommendations;
pub mod summary;
pub mod trends;
pub mod weekly;

pub use badges::{eligible_badges, BadgeSpec};
pub use behaviour::{behaviour_report, BehaviourAlert, BehaviourPatterns, BehaviourReport};
pub use budget::{budget_status, BudgetState, BudgetStatus};
pub use category::{category_insights, CategoryInsights, MonthAmount};
pub use duplicates::{find_duplicates, DuplicateCluster};
pub use goals::{goal_projection, GoalProjection};
pub use merchants::{classify_merchant, merchant_insights, MerchantSummary, MerchantTransaction};
pub use recommendations::{lifestyle_recommendations, Recommendation};
pub use summary::{dashboard_summary, subscription_cost, DashboardSummary, SubscriptionCost};
pub use trends::{daily_trend, DailySpend};
pub use weekly::{weekly_report, WeeklyReport};
