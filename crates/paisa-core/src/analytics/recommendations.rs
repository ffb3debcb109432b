//! Rule-based lifestyle suggestions
//!
//! Three fixed rules: heavy food delivery use, an expensive subscription
//! stack, and high transport spend. Savings estimates are flat fractions
//! of the observed spending.

use serde::Serialize;

use crate::finance::round2;
use crate::models::{Expense, Subscription};

use super::summary::subscription_cost;

const FOOD_DELIVERY_KEYWORDS: &[&str] = &["zomato", "swiggy", "food", "delivery"];

/// One actionable suggestion
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub potential_savings: f64,
    pub category: String,
    pub priority: &'static str,
}

fn is_food_delivery(expense: &Expense) -> bool {
    let text = format!(
        "{}{}",
        expense.merchant.as_deref().unwrap_or(""),
        expense.description
    )
    .to_lowercase();
    FOOD_DELIVERY_KEYWORDS.iter().any(|kw| text.contains(kw))
}

/// Evaluate the recommendation rules against the ledger.
pub fn lifestyle_recommendations(
    expenses: &[Expense],
    subscriptions: &[Subscription],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let delivery: Vec<&Expense> = expenses.iter().filter(|e| is_food_delivery(e)).collect();
    if delivery.len() > 4 {
        let total: f64 = delivery.iter().map(|e| e.amount).sum();
        recommendations.push(Recommendation {
            title: "Reduce Food Delivery".to_string(),
            description: format!(
                "You've ordered food {} times. Cooking at home just once a week could save you!",
                delivery.len()
            ),
            potential_savings: round2(total * 0.5),
            category: "Food".to_string(),
            priority: "high",
        });
    }

    let monthly_subs = subscription_cost(subscriptions).monthly_total;
    if monthly_subs > 1000.0 {
        recommendations.push(Recommendation {
            title: "Review Subscriptions".to_string(),
            description: format!(
                "You're spending ₹{:.2}/month on subscriptions. Cancel unused ones!",
                monthly_subs
            ),
            potential_savings: monthly_subs * 0.3,
            category: "Subscriptions".to_string(),
            priority: "medium",
        });
    }

    let transport: Vec<&Expense> = expenses
        .iter()
        .filter(|e| e.category == "Transport")
        .collect();
    if transport.len() > 10 {
        let total: f64 = transport.iter().map(|e| e.amount).sum();
        if total > 3000.0 {
            recommendations.push(Recommendation {
                title: "Consider Public Transport".to_string(),
                description: format!(
                    "Spending ₹{:.2}/month on transport. Public transport could save you money!",
                    total
                ),
                potential_savings: total * 0.4,
                category: "Transport".to_string(),
                priority: "medium",
            });
        }
    }

    recommendations
}
