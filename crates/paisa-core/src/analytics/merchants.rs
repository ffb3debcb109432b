//! Merchant classification and per-merchant spending
//!
//! Expenses are matched against a fixed keyword table (case-insensitive
//! substring over merchant and description, first hit wins). Anything
//! unmatched lands in "Others".

use serde::Serialize;

use crate::models::Expense;

/// Known merchants and the substrings that identify them. Order matters:
/// the first matching row claims the expense.
const MERCHANT_KEYWORDS: &[(&str, &[&str])] = &[
    ("Zomato", &["zomato"]),
    ("Swiggy", &["swiggy"]),
    ("Amazon", &["amazon", "amzn"]),
    ("Flipkart", &["flipkart"]),
    ("Uber", &["uber"]),
    ("Ola", &["ola"]),
    ("Netflix", &["netflix"]),
    ("Prime Video", &["prime", "amazon video"]),
    ("Spotify", &["spotify"]),
    ("Starbucks", &["starbucks"]),
    ("McDonald's", &["mcdonalds", "mcd", "mcdonald"]),
    ("BigBasket", &["bigbasket"]),
    ("Blinkit", &["blinkit", "grofers"]),
];

/// A single charge inside a merchant summary
#[derive(Debug, Clone, Serialize)]
pub struct MerchantTransaction {
    pub amount: f64,
    pub date: String,
    pub description: String,
}

/// Spending at one recognized merchant
#[derive(Debug, Clone, Serialize)]
pub struct MerchantSummary {
    pub merchant: String,
    pub total_spent: f64,
    pub transaction_count: usize,
    pub average_transaction: f64,
    /// The ten most recent charges, oldest first
    pub transactions: Vec<MerchantTransaction>,
}

/// Classify one expense by its merchant and description text.
pub fn classify_merchant(expense: &Expense) -> &'static str {
    let text = format!(
        "{} {}",
        expense.merchant.as_deref().unwrap_or(""),
        expense.description
    )
    .to_lowercase();

    for (name, keywords) in MERCHANT_KEYWORDS {
        if keywords.iter().any(|kw| text.contains(kw)) {
            return name;
        }
    }
    "Others"
}

/// Group expenses by recognized merchant, sorted by total spent.
pub fn merchant_insights(expenses: &[Expense]) -> Vec<MerchantSummary> {
    // First-seen order while accumulating; the table is small enough for
    // a linear scan per expense
    let mut summaries: Vec<MerchantSummary> = Vec::new();

    for expense in expenses {
        let name = classify_merchant(expense);
        let idx = match summaries.iter().position(|s| s.merchant == name) {
            Some(idx) => idx,
            None => {
                summaries.push(MerchantSummary {
                    merchant: name.to_string(),
                    total_spent: 0.0,
                    transaction_count: 0,
                    average_transaction: 0.0,
                    transactions: Vec::new(),
                });
                summaries.len() - 1
            }
        };

        let summary = &mut summaries[idx];
        summary.total_spent += expense.amount;
        summary.transaction_count += 1;
        summary.transactions.push(MerchantTransaction {
            amount: expense.amount,
            date: expense.date.clone(),
            description: expense.description.clone(),
        });
    }

    for summary in &mut summaries {
        summary.average_transaction = summary.total_spent / summary.transaction_count as f64;
        if summary.transactions.len() > 10 {
            summary.transactions.drain(..summary.transactions.len() - 10);
        }
    }

    summaries.sort_by(|a, b| {
        b.total_spent
            .partial_cmp(&a.total_spent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CURRENCY;

    fn expense(merchant: Option<&str>, description: &str, amount: f64) -> Expense {
        Expense {
            id: "e".to_string(),
            owner_id: "alice".to_string(),
            amount,
            category: "Food".to_string(),
            description: description.to_string(),
            merchant: merchant.map(|m| m.to_string()),
            date: "2025-01-10T12:00:00+00:00".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            is_regret: false,
        }
    }

    #[test]
    fn test_classify_by_merchant_field() {
        assert_eq!(
            classify_merchant(&expense(Some("Zomato"), "dinner", 450.0)),
            "Zomato"
        );
        assert_eq!(
            classify_merchant(&expense(Some("AMZN Marketplace"), "", 1200.0)),
            "Amazon"
        );
    }

    #[test]
    fn test_classify_by_description() {
        assert_eq!(
            classify_merchant(&expense(None, "Swiggy late night order", 300.0)),
            "Swiggy"
        );
        assert_eq!(classify_merchant(&expense(None, "chai stall", 20.0)), "Others");
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(
            classify_merchant(&expense(Some("NETFLIX.COM"), "", 649.0)),
            "Netflix"
        );
    }

    #[test]
    fn test_first_table_row_wins() {
        // "amazon video" also matches the Amazon row, which comes first
        assert_eq!(
            classify_merchant(&expense(None, "amazon video subscription", 179.0)),
            "Amazon"
        );
    }

    #[test]
    fn test_merchant_insights_totals_and_order() {
        let expenses = vec![
            expense(Some("Zomato"), "dinner", 450.0),
            expense(Some("Uber"), "ride", 220.0),
            expense(Some("Zomato"), "lunch", 350.0),
        ];

        let insights = merchant_insights(&expenses);
        assert_eq!(insights.len(), 2);
        // Sorted by total spent, largest first
        assert_eq!(insights[0].merchant, "Zomato");
        assert_eq!(insights[0].total_spent, 800.0);
        assert_eq!(insights[0].transaction_count, 2);
        assert_eq!(insights[0].average_transaction, 400.0);
        assert_eq!(insights[1].merchant, "Uber");
    }

    #[test]
    fn test_merchant_insights_keeps_last_ten() {
        let expenses: Vec<Expense> = (0..15)
            .map(|i| expense(Some("Swiggy"), &format!("order {}", i), 100.0))
            .collect();

        let insights = merchant_insights(&expenses);
        assert_eq!(insights[0].transaction_count, 15);
        assert_eq!(insights[0].transactions.len(), 10);
        // The oldest five fell off
        assert_eq!(insights[0].transactions[0].description, "order 5");
        assert_eq!(insights[0].transactions[9].description, "order 14");
    }

    #[test]
    fn test_merchant_insights_empty() {
        assert!(merchant_insights(&[]).is_empty());
    }
}
