//! Duplicate charge detection
//!
//! Two expenses are considered duplicates when they share the exact
//! amount, the category and the calendar day. Each cluster reports one
//! original (the earliest entry encountered) and every expense joins at
//! most one cluster.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::Expense;

/// One group of suspected duplicate charges
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateCluster {
    pub original: Expense,
    pub duplicates: Vec<Expense>,
}

fn same_day(a: &Expense, b: &Expense) -> bool {
    a.date.get(..10) == b.date.get(..10)
}

/// Walk the expenses in order and cluster suspected duplicates.
pub fn find_duplicates(expenses: &[Expense]) -> Vec<DuplicateCluster> {
    let mut clusters = Vec::new();
    let mut claimed: HashSet<&str> = HashSet::new();

    for (i, candidate) in expenses.iter().enumerate() {
        if claimed.contains(candidate.id.as_str()) {
            continue;
        }

        let mut matches = Vec::new();
        for (j, other) in expenses.iter().enumerate() {
            if i == j || claimed.contains(other.id.as_str()) {
                continue;
            }
            if candidate.amount == other.amount
                && candidate.category == other.category
                && same_day(candidate, other)
            {
                matches.push(j);
            }
        }

        if !matches.is_empty() {
            claimed.insert(candidate.id.as_str());
            for &j in &matches {
                claimed.insert(expenses[j].id.as_str());
            }
            clusters.push(DuplicateCluster {
                original: candidate.clone(),
                duplicates: matches.iter().map(|&j| expenses[j].clone()).collect(),
            });
        }
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CURRENCY;

    fn expense(id: &str, amount: f64, category: &str, date: &str) -> Expense {
        Expense {
            id: id.to_string(),
            owner_id: "alice".to_string(),
            amount,
            category: category.to_string(),
            description: String::new(),
            merchant: None,
            date: date.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            is_regret: false,
        }
    }

    #[test]
    fn test_cluster_of_three_reports_once() {
        let expenses = vec![
            expense("a", 450.0, "Food", "2025-01-10T12:00:00+00:00"),
            expense("b", 450.0, "Food", "2025-01-10T12:05:00+00:00"),
            expense("c", 450.0, "Food", "2025-01-10T18:00:00+00:00"),
            expense("d", 100.0, "Travel", "2025-01-10T08:00:00+00:00"),
        ];

        let clusters = find_duplicates(&expenses);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].original.id, "a");
        assert_eq!(clusters[0].duplicates.len(), 2);
        // No member gets reported as its own cluster
        assert!(clusters.iter().all(|c| c.original.id != "b"));
    }

    #[test]
    fn test_different_day_is_not_a_duplicate() {
        let expenses = vec![
            expense("a", 450.0, "Food", "2025-01-10T12:00:00+00:00"),
            expense("b", 450.0, "Food", "2025-01-11T12:00:00+00:00"),
        ];
        assert!(find_duplicates(&expenses).is_empty());
    }

    #[test]
    fn test_amount_must_match_exactly() {
        let expenses = vec![
            expense("a", 450.0, "Food", "2025-01-10T12:00:00+00:00"),
            expense("b", 450.01, "Food", "2025-01-10T12:05:00+00:00"),
        ];
        assert!(find_duplicates(&expenses).is_empty());
    }

    #[test]
    fn test_two_independent_clusters() {
        let expenses = vec![
            expense("a", 450.0, "Food", "2025-01-10T12:00:00+00:00"),
            expense("b", 450.0, "Food", "2025-01-10T13:00:00+00:00"),
            expense("c", 99.0, "Travel", "2025-01-12T09:00:00+00:00"),
            expense("d", 99.0, "Travel", "2025-01-12T09:01:00+00:00"),
        ];

        let clusters = find_duplicates(&expenses);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].original.id, "a");
        assert_eq!(clusters[1].original.id, "c");
    }

    #[test]
    fn test_empty_input() {
        assert!(find_duplicates(&[]).is_empty());
    }
}
