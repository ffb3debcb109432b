//! Budget consumption
//!
//! Spent-so-far is always derived from the month's expenses at read time;
//! the stored budget row only carries the limit.

use serde::Serialize;

use crate::models::{Budget, Expense};

/// How far into the budget the owner is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetState {
    Safe,
    Warning,
    Exceeded,
}

/// Budget consumption for one category and month
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub status: BudgetState,
    pub percentage: f64,
    pub current_spent: f64,
    pub limit: f64,
    pub remaining: f64,
    pub message: String,
}

/// Evaluate a budget against the month's expenses for its category.
/// Warning starts at 80% of the limit, exceeded at 100%.
pub fn budget_status(budget: &Budget, month_expenses: &[Expense]) -> BudgetStatus {
    let current_spent: f64 = month_expenses.iter().map(|e| e.amount).sum();
    let percentage = current_spent / budget.monthly_limit * 100.0;

    let (status, message) = if percentage >= 100.0 {
        (
            BudgetState::Exceeded,
            format!(
                "Budget exceeded! You've spent {:.1}% of your limit.",
                percentage
            ),
        )
    } else if percentage >= 80.0 {
        (
            BudgetState::Warning,
            format!("Warning! You've used {:.1}% of your budget.", percentage),
        )
    } else {
        (
            BudgetState::Safe,
            format!("You've used {:.1}% of your budget.", percentage),
        )
    };

    BudgetStatus {
        status,
        percentage,
        current_spent,
        limit: budget.monthly_limit,
        remaining: budget.monthly_limit - current_spent,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CURRENCY;

    fn budget(limit: f64) -> Budget {
        Budget {
            id: "b".to_string(),
            owner_id: "alice".to_string(),
            category: "Food".to_string(),
            monthly_limit: limit,
            month: "2025-01".to_string(),
        }
    }

    fn spent(amount: f64) -> Vec<Expense> {
        vec![Expense {
            id: "e".to_string(),
            owner_id: "alice".to_string(),
            amount,
            category: "Food".to_string(),
            description: String::new(),
            merchant: None,
            date: "2025-01-10T12:00:00+00:00".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            is_regret: false,
        }]
    }

    #[test]
    fn test_budget_state_boundaries() {
        let b = budget(100.0);

        // Just below the warning threshold stays safe
        let status = budget_status(&b, &spent(79.99));
        assert_eq!(status.status, BudgetState::Safe);

        // Exactly 80% is a warning
        let status = budget_status(&b, &spent(80.0));
        assert_eq!(status.status, BudgetState::Warning);

        let status = budget_status(&b, &spent(99.99));
        assert_eq!(status.status, BudgetState::Warning);

        // Exactly 100% is exceeded
        let status = budget_status(&b, &spent(100.0));
        assert_eq!(status.status, BudgetState::Exceeded);

        let status = budget_status(&b, &spent(150.0));
        assert_eq!(status.status, BudgetState::Exceeded);
        assert_eq!(status.remaining, -50.0);
    }

    #[test]
    fn test_budget_status_numbers() {
        let status = budget_status(&budget(8000.0), &spent(2000.0));
        assert_eq!(status.percentage, 25.0);
        assert_eq!(status.current_spent, 2000.0);
        assert_eq!(status.limit, 8000.0);
        assert_eq!(status.remaining, 6000.0);
        assert!(status.message.contains("25.0%"));
    }

    #[test]
    fn test_budget_status_no_spending() {
        let status = budget_status(&budget(5000.0), &[]);
        assert_eq!(status.status, BudgetState::Safe);
        assert_eq!(status.percentage, 0.0);
        assert_eq!(status.remaining, 5000.0);
    }
}
