//! Seven-day spending report

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Expense, Income};

/// Name and amount of the week's heaviest category
#[derive(Debug, Clone, Serialize)]
pub struct TopCategory {
    pub name: String,
    pub amount: f64,
}

/// One week of activity, reduced
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    /// First day covered, as `YYYY-MM-DD`
    pub week_start: String,
    pub week_end: String,
    pub total_spending: f64,
    pub total_income: f64,
    pub savings: f64,
    pub top_category: TopCategory,
    pub biggest_purchase: Option<Expense>,
    pub transaction_count: usize,
    /// Next week's goal: spend a fifth less
    pub next_week_target: f64,
    pub category_breakdown: BTreeMap<String, f64>,
}

/// Reduce a week's expenses and income to the report. The caller slices
/// the ledger to the seven-day window and supplies its bounds.
pub fn weekly_report(
    expenses: &[Expense],
    income: &[Income],
    week_start: &str,
    week_end: &str,
) -> WeeklyReport {
    let total_spending: f64 = expenses.iter().map(|e| e.amount).sum();
    let total_income: f64 = income.iter().map(|i| i.amount).sum();

    let mut category_breakdown: BTreeMap<String, f64> = BTreeMap::new();
    for expense in expenses {
        *category_breakdown.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }

    let top_category = category_breakdown
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(name, &amount)| TopCategory {
            name: name.clone(),
            amount,
        })
        .unwrap_or(TopCategory {
            name: "None".to_string(),
            amount: 0.0,
        });

    let biggest_purchase = expenses
        .iter()
        .max_by(|a, b| {
            a.amount
                .partial_cmp(&b.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .cloned();

    WeeklyReport {
        week_start: week_start.to_string(),
        week_end: week_end.to_string(),
        total_spending,
        total_income,
        savings: total_income - total_spending,
        top_category,
        biggest_purchase,
        transaction_count: expenses.len(),
        next_week_target: total_spending * 0.8,
        category_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CURRENCY;

    fn expense(id: &str, amount: f64, category: &str) -> Expense {
        Expense {
            id: id.to_string(),
            owner_id: "alice".to_string(),
            amount,
            category: category.to_string(),
            description: String::new(),
            merchant: None,
            date: "2025-01-10T12:00:00+00:00".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            is_regret: false,
        }
    }

    #[test]
    fn test_weekly_report() {
        let expenses = vec![
            expense("a", 500.0, "Food"),
            expense("b", 300.0, "Food"),
            expense("c", 700.0, "Shopping"),
        ];
        let income = vec![Income {
            id: "i".to_string(),
            owner_id: "alice".to_string(),
            amount: 5000.0,
            source: "Salary".to_string(),
            description: String::new(),
            date: "2025-01-08T00:00:00+00:00".to_string(),
        }];

        let report = weekly_report(&expenses, &income, "2025-01-05", "2025-01-12");
        assert_eq!(report.total_spending, 1500.0);
        assert_eq!(report.total_income, 5000.0);
        assert_eq!(report.savings, 3500.0);
        // Food (800) beats Shopping (700)
        assert_eq!(report.top_category.name, "Food");
        assert_eq!(report.top_category.amount, 800.0);
        assert_eq!(report.biggest_purchase.as_ref().map(|e| e.id.as_str()), Some("c"));
        assert_eq!(report.transaction_count, 3);
        assert_eq!(report.next_week_target, 1200.0);
        assert_eq!(report.week_start, "2025-01-05");
    }

    #[test]
    fn test_weekly_report_empty_week() {
        let report = weekly_report(&[], &[], "2025-01-05", "2025-01-12");
        assert_eq!(report.total_spending, 0.0);
        assert_eq!(report.top_category.name, "None");
        assert_eq!(report.top_category.amount, 0.0);
        assert!(report.biggest_purchase.is_none());
        assert_eq!(report.next_week_target, 0.0);
    }
}
