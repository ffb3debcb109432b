//! Dashboard totals
//!
//! The headline numbers: lifetime totals, savings rate, category split,
//! monthly subscription burn and the regret tally.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{BillingCycle, Expense, Income, Subscription};

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_expenses: f64,
    pub total_income: f64,
    pub total_savings: f64,
    /// Share of income kept, zero when there is no income
    pub savings_percentage: f64,
    pub category_breakdown: BTreeMap<String, f64>,
    pub monthly_subscription_cost: f64,
    pub total_regret_amount: f64,
    pub regret_count: usize,
}

/// Normalized subscription burn
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionCost {
    pub monthly_total: f64,
    pub yearly_total: f64,
}

/// Monthly cost of the active subscriptions, with yearly plans spread
/// across twelve months.
pub fn subscription_cost(subscriptions: &[Subscription]) -> SubscriptionCost {
    let monthly_total: f64 = subscriptions
        .iter()
        .filter(|s| s.is_active)
        .map(|s| match s.billing_cycle {
            BillingCycle::Monthly => s.amount,
            BillingCycle::Yearly => s.amount / 12.0,
        })
        .sum();

    SubscriptionCost {
        monthly_total,
        yearly_total: monthly_total * 12.0,
    }
}

/// Reduce an owner's full ledger to the dashboard numbers.
pub fn dashboard_summary(
    expenses: &[Expense],
    income: &[Income],
    subscriptions: &[Subscription],
) -> DashboardSummary {
    let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();
    let total_income: f64 = income.iter().map(|i| i.amount).sum();
    let total_savings = total_income - total_expenses;

    let mut category_breakdown: BTreeMap<String, f64> = BTreeMap::new();
    for expense in expenses {
        *category_breakdown.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }

    let savings_percentage = if total_income > 0.0 {
        total_savings / total_income * 100.0
    } else {
        0.0
    };

    let regrets: Vec<&Expense> = expenses.iter().filter(|e| e.is_regret).collect();

    DashboardSummary {
        total_expenses,
        total_income,
        total_savings,
        savings_percentage,
        category_breakdown,
        monthly_subscription_cost: subscription_cost(subscriptions).monthly_total,
        total_regret_amount: regrets.iter().map(|e| e.amount).sum(),
        regret_count: regrets.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CURRENCY;

    fn expense(amount: f64, category: &str, is_regret: bool) -> Expense {
        Expense {
            id: "e".to_string(),
            owner_id: "alice".to_string(),
            amount,
            category: category.to_string(),
            description: String::new(),
            merchant: None,
            date: "2025-01-10T12:00:00+00:00".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            is_regret,
        }
    }

    fn income(amount: f64) -> Income {
        Income {
            id: "i".to_string(),
            owner_id: "alice".to_string(),
            amount,
            source: "Salary".to_string(),
            description: String::new(),
            date: "2025-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn subscription(amount: f64, cycle: BillingCycle, active: bool) -> Subscription {
        Subscription {
            id: "s".to_string(),
            owner_id: "alice".to_string(),
            name: "Sub".to_string(),
            amount,
            billing_cycle: cycle,
            next_billing_date: "2025-02-01T00:00:00+00:00".to_string(),
            category: "Entertainment".to_string(),
            is_active: active,
        }
    }

    #[test]
    fn test_dashboard_summary() {
        let expenses = vec![
            expense(300.0, "Food", false),
            expense(200.0, "Food", true),
            expense(500.0, "Travel", false),
        ];
        let income = vec![income(2000.0)];
        let subs = vec![
            subscription(100.0, BillingCycle::Monthly, true),
            subscription(1200.0, BillingCycle::Yearly, true),
            subscription(999.0, BillingCycle::Monthly, false),
        ];

        let summary = dashboard_summary(&expenses, &income, &subs);
        assert_eq!(summary.total_expenses, 1000.0);
        assert_eq!(summary.total_income, 2000.0);
        assert_eq!(summary.total_savings, 1000.0);
        assert_eq!(summary.savings_percentage, 50.0);
        assert_eq!(summary.category_breakdown["Food"], 500.0);
        assert_eq!(summary.category_breakdown["Travel"], 500.0);
        // Yearly plan spread across twelve months, inactive one ignored
        assert_eq!(summary.monthly_subscription_cost, 200.0);
        assert_eq!(summary.total_regret_amount, 200.0);
        assert_eq!(summary.regret_count, 1);
    }

    #[test]
    fn test_dashboard_summary_empty_ledger() {
        let summary = dashboard_summary(&[], &[], &[]);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_savings, 0.0);
        // No income means 0%, never a division error
        assert_eq!(summary.savings_percentage, 0.0);
        assert!(summary.category_breakdown.is_empty());
        assert_eq!(summary.regret_count, 0);
    }

    #[test]
    fn test_subscription_cost() {
        let subs = vec![
            subscription(649.0, BillingCycle::Monthly, true),
            subscription(1499.0, BillingCycle::Yearly, true),
        ];
        let cost = subscription_cost(&subs);
        assert!((cost.monthly_total - (649.0 + 1499.0 / 12.0)).abs() < 1e-9);
        assert!((cost.yearly_total - cost.monthly_total * 12.0).abs() < 1e-9);
    }
}
