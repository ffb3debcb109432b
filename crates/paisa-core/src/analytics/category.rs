//! Month-by-month insight for a single category

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Expense;

/// One month's total for the category
#[derive(Debug, Clone, Serialize)]
pub struct MonthAmount {
    pub month: String,
    pub amount: f64,
}

/// The category's history, bucketed by calendar month
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInsights {
    pub category: String,
    pub total_spent: f64,
    pub total_transactions: usize,
    pub average_per_month: f64,
    pub average_per_transaction: f64,
    /// Cheapest month on record
    pub best_month: MonthAmount,
    /// Most expensive month on record
    pub worst_month: MonthAmount,
    pub monthly_trend: Vec<MonthAmount>,
    pub suggestion: String,
}

/// Reduce one category's expenses to its monthly history. Returns None
/// when the category has no expenses at all.
pub fn category_insights(category: &str, expenses: &[Expense]) -> Option<CategoryInsights> {
    if expenses.is_empty() {
        return None;
    }

    let mut monthly: BTreeMap<&str, f64> = BTreeMap::new();
    for expense in expenses {
        let month = expense.date.get(..7).unwrap_or(expense.date.as_str());
        *monthly.entry(month).or_insert(0.0) += expense.amount;
    }

    let total_spent: f64 = expenses.iter().map(|e| e.amount).sum();
    let average_per_month = total_spent / monthly.len() as f64;

    let best = monthly
        .iter()
        .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))?;
    let worst = monthly
        .iter()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))?;

    let best_month = MonthAmount {
        month: best.0.to_string(),
        amount: *best.1,
    };
    let worst_month = MonthAmount {
        month: worst.0.to_string(),
        amount: *worst.1,
    };

    let monthly_trend = monthly
        .iter()
        .map(|(month, &amount)| MonthAmount {
            month: month.to_string(),
            amount,
        })
        .collect();

    Some(CategoryInsights {
        category: category.to_string(),
        total_spent,
        total_transactions: expenses.len(),
        average_per_month,
        average_per_transaction: total_spent / expenses.len() as f64,
        best_month,
        worst_month,
        monthly_trend,
        suggestion: format!(
            "Try to keep {} spending below ₹{:.2}/month",
            category,
            average_per_month * 0.9
        ),
    })
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
    fn test_category_insights() {
        let expenses = vec![
            expense_on("2025-01-05T12:00:00+00:00", 1000.0),
            expense_on("2025-01-20T12:00:00+00:00", 500.0),
            expense_on("2025-02-10T12:00:00+00:00", 600.0),
        ];

        let insights = category_insights("Food", &expenses).unwrap();
        assert_eq!(insights.total_spent, 2100.0);
        assert_eq!(insights.total_transactions, 3);
        assert_eq!(insights.average_per_month, 1050.0);
        assert_eq!(insights.average_per_transaction, 700.0);
        assert_eq!(insights.best_month.month, "2025-02");
        assert_eq!(insights.best_month.amount, 600.0);
        assert_eq!(insights.worst_month.month, "2025-01");
        assert_eq!(insights.worst_month.amount, 1500.0);
        // Trend is chronological
        assert_eq!(insights.monthly_trend.len(), 2);
        assert_eq!(insights.monthly_trend[0].month, "2025-01");
        assert!(insights.suggestion.contains("945.00"));
    }

    #[test]
    fn test_no_data_yields_none() {
        assert!(category_insights("Food", &[]).is_none());
    }
}
