//! Daily spending trend
//!
//! Buckets expenses by calendar day (the `YYYY-MM-DD` prefix of the
//! stored timestamp) and keeps the trailing window.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Expense;

/// One day's total spending
#[derive(Debug, Clone, Serialize)]
pub struct DailySpend {
    pub date: String,
    pub amount: f64,
}

/// Per-day spending totals, oldest first, limited to the trailing `days`
/// entries. Days without spending do not appear.
pub fn daily_trend(expenses: &[Expense], days: usize) -> Vec<DailySpend> {
    let mut buckets: BTreeMap<&str, f64> = BTreeMap::new();
    for expense in expenses {
        let day = expense.date.get(..10).unwrap_or(expense.date.as_str());
        *buckets.entry(day).or_insert(0.0) += expense.amount;
    }

    let mut trend: Vec<DailySpend> = buckets
        .into_iter()
        .map(|(date, amount)| DailySpend {
            date: date.to_string(),
            amount,
        })
        .collect();

    if trend.len() > days {
        trend.drain(..trend.len() - days);
    }
    trend
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CURRENCY;

    fn expense_on(date: &str, amount: f64) -> Expense {
        Expense {
            id: "e".to_string(),
            owner_id: "alice".to_string(),
            amount,
            category: "Food".to_string(),
            description: String::new(),
            merchant: None,
            date: date.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            is_regret: false,
        }
    }

    #[test]
    fn test_daily_trend_buckets_and_sorts() {
        // Inserted out of order on purpose
        let expenses = vec![
            expense_on("2025-01-12T20:00:00+00:00", 50.0),
            expense_on("2025-01-10T09:00:00+00:00", 100.0),
            expense_on("2025-01-12T08:00:00+00:00", 30.0),
            expense_on("2025-01-11T12:00:00+00:00", 70.0),
        ];

        let trend = daily_trend(&expenses, 30);
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].date, "2025-01-10");
        assert_eq!(trend[0].amount, 100.0);
        assert_eq!(trend[1].date, "2025-01-11");
        assert_eq!(trend[2].date, "2025-01-12");
        assert_eq!(trend[2].amount, 80.0);
    }

    #[test]
    fn test_daily_trend_trailing_window() {
        let expenses = vec![
            expense_on("2025-01-01T12:00:00+00:00", 10.0),
            expense_on("2025-01-02T12:00:00+00:00", 20.0),
            expense_on("2025-01-03T12:00:00+00:00", 30.0),
        ];

        let trend = daily_trend(&expenses, 2);
        assert_eq!(trend.len(), 2);
        // The oldest day fell out of the window
        assert_eq!(trend[0].date, "2025-01-02");
        assert_eq!(trend[1].date, "2025-01-03");
    }

    #[test]
    fn test_daily_trend_empty() {
        assert!(daily_trend(&[], 30).is_empty());
    }
}
