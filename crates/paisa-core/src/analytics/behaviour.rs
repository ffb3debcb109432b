//! Behavioural spending patterns
//!
//! Looks at when money leaves, not where. Hours come from each
//! timestamp's own offset, so a purchase logged at 23:30 IST counts as
//! late night regardless of the server's clock. Late night spans 22:00
//! through 04:59.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Timelike, Weekday};
use serde::Serialize;

use crate::models::Expense;

/// Aggregated timing patterns
#[derive(Debug, Clone, Default, Serialize)]
pub struct BehaviourPatterns {
    /// Total spent per weekday name, only days that appear
    pub weekday_spending: BTreeMap<String, f64>,
    pub late_night_orders: usize,
    pub weekend_spending: f64,
}

/// A nudge derived from the patterns
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BehaviourAlert {
    HighSpendingDay { day: String, message: String },
    LateNightOrdering { count: usize, message: String },
}

/// Patterns plus the alerts they trigger
#[derive(Debug, Clone, Serialize)]
pub struct BehaviourReport {
    pub patterns: BehaviourPatterns,
    pub alerts: Vec<BehaviourAlert>,
}

pub(crate) fn is_late_night(hour: u32) -> bool {
    hour >= 22 || hour <= 4
}

/// Reduce expenses to timing patterns and alerts. Expenses whose
/// timestamp does not parse are skipped.
pub fn behaviour_report(expenses: &[Expense]) -> BehaviourReport {
    let mut patterns = BehaviourPatterns::default();

    for expense in expenses {
        let Ok(date) = DateTime::parse_from_rfc3339(&expense.date) else {
            continue;
        };

        let weekday = date.format("%A").to_string();
        *patterns.weekday_spending.entry(weekday).or_insert(0.0) += expense.amount;

        if is_late_night(date.hour()) {
            patterns.late_night_orders += 1;
        }

        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            patterns.weekend_spending += expense.amount;
        }
    }

    let mut alerts = Vec::new();

    if !patterns.weekday_spending.is_empty() {
        let mean: f64 = patterns.weekday_spending.values().sum::<f64>()
            / patterns.weekday_spending.len() as f64;

        for (day, &amount) in &patterns.weekday_spending {
            if amount > mean * 1.5 {
                alerts.push(BehaviourAlert::HighSpendingDay {
                    day: day.clone(),
                    message: format!("You tend to overspend on {}s. Be mindful today!", day),
                });
            }
        }
    }

    if patterns.late_night_orders > 5 {
        alerts.push(BehaviourAlert::LateNightOrdering {
            count: patterns.late_night_orders,
            message: format!(
                "You've made {} late-night purchases. Consider setting a reminder!",
                patterns.late_night_orders
            ),
        });
    }

    BehaviourReport { patterns, alerts }
}
