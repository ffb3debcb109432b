//! Achievement rules
//!
//! Each rule is checked against the full ledger; awarding (and the
//! once-per-owner guarantee) is the storage layer's job.

use crate::models::{Expense, Income};

/// A badge the owner currently qualifies for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Every badge the ledger currently qualifies for, in rule order.
/// Already-earned badges are filtered out by the caller at award time.
pub fn eligible_badges(expenses: &[Expense], income: &[Income]) -> Vec<BadgeSpec> {
    let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();
    let total_income: f64 = income.iter().map(|i| i.amount).sum();
    let savings = total_income - total_expenses;

    let mut eligible = Vec::new();

    if !expenses.is_empty() {
        eligible.push(BadgeSpec {
            name: "First Step",
            description: "Added your first expense!",
            icon: "🎯",
        });
    }

    if savings >= 10000.0 {
        eligible.push(BadgeSpec {
            name: "₹10K Saver",
            description: "Saved ₹10,000!",
            icon: "💰",
        });
    }

    let non_regret_count = expenses.iter().filter(|e| !e.is_regret).count();
    if non_regret_count >= 5 {
        eligible.push(BadgeSpec {
            name: "Smart Spender",
            description: "5 days without regret purchases!",
            icon: "🧠",
        });
    }

    if expenses.len() >= 30 {
        eligible.push(BadgeSpec {
            name: "Consistency King",
            description: "Tracked 30+ expenses!",
            icon: "👑",
        });
    }

    if total_income > 0.0 && savings / total_income * 100.0 >= 30.0 {
        eligible.push(BadgeSpec {
            name: "Super Saver",
            description: "Achieved 30%+ savings rate!",
            icon: "⭐",
        });
    }

    eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CURRENCY;

    fn expense(amount: f64, is_regret: bool) -> Expense {
        Expense {
            id: "e".to_string(),
            owner_id: "alice".to_string(),
            amount,
            category: "Food".to_string(),
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

    fn names(specs: &[BadgeSpec]) -> Vec<&'static str> {
        specs.iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_no_data_no_badges() {
        assert!(eligible_badges(&[], &[]).is_empty());
    }

    #[test]
    fn test_first_step_on_single_expense() {
        let badges = eligible_badges(&[expense(100.0, false)], &[]);
        assert!(names(&badges).contains(&"First Step"));
    }

    #[test]
    fn test_saver_badges_need_the_thresholds() {
        // savings 9999: no saver badge
        let badges = eligible_badges(&[expense(1.0, false)], &[income(10000.0)]);
        assert!(!names(&badges).contains(&"₹10K Saver"));

        // savings exactly 10000 qualifies
        let badges = eligible_badges(&[expense(0.0, false)], &[income(10000.0)]);
        assert!(names(&badges).contains(&"₹10K Saver"));
    }

    #[test]
    fn test_smart_spender_counts_non_regret() {
        let mut expenses: Vec<Expense> = (0..4).map(|_| expense(50.0, false)).collect();
        expenses.push(expense(50.0, true));
        // Only four non-regret entries
        let badges = eligible_badges(&expenses, &[]);
        assert!(!names(&badges).contains(&"Smart Spender"));

        expenses.push(expense(50.0, false));
        let badges = eligible_badges(&expenses, &[]);
        assert!(names(&badges).contains(&"Smart Spender"));
    }

    #[test]
    fn test_consistency_king_at_thirty() {
        let expenses: Vec<Expense> = (0..30).map(|_| expense(10.0, false)).collect();
        let badges = eligible_badges(&expenses, &[]);
        assert!(names(&badges).contains(&"Consistency King"));
    }

    #[test]
    fn test_super_saver_rate() {
        // 700 spent of 1000 earned: 30% exactly
        let badges = eligible_badges(&[expense(700.0, false)], &[income(1000.0)]);
        assert!(names(&badges).contains(&"Super Saver"));

        let badges = eligible_badges(&[expense(701.0, false)], &[income(1000.0)]);
        assert!(!names(&badges).contains(&"Super Saver"));

        // No income never divides by zero
        let badges = eligible_badges(&[], &[]);
        assert!(!names(&badges).contains(&"Super Saver"));
    }
}
