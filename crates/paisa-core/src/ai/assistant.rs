//! High-level assistant operations
//!
//! Wraps an `AiClient` with the prompt construction, reply parsing and
//! local pattern analysis each operation needs. Handlers load the ledger
//! slices and pass them in; the assistant never touches the database.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Timelike, Weekday};
use serde::Serialize;
use tracing::warn;

use crate::analytics::behaviour::is_late_night;
use crate::error::{Error, Result};
use crate::models::{Expense, Goal, Income, Subscription};

use super::types::{ParsedReceipt, ParsedVoiceExpense};
use super::{parsing, prompts, AiBackend, AiClient};

/// Categorization result, falling back to "Other" when the model reply
/// could not be decoded
#[derive(Debug, Clone, Serialize)]
pub struct CategorizeOutcome {
    pub category: String,
    pub merchant: Option<String>,
    pub notes: String,
    pub extraction_failed: bool,
}

impl CategorizeOutcome {
    fn fallback() -> Self {
        Self {
            category: "Other".to_string(),
            merchant: None,
            notes: String::new(),
            extraction_failed: true,
        }
    }
}

/// Locally computed spending habit buckets
#[derive(Debug, Clone, Serialize)]
pub struct HabitPatterns {
    pub late_night_count: usize,
    pub weekend_count: usize,
    pub impulsive_count: usize,
}

/// Habit correction plan plus the pattern counts it was derived from
#[derive(Debug, Clone, Serialize)]
pub struct HabitAnalysis {
    pub analysis: String,
    pub patterns: HabitPatterns,
}

/// Emotional spending prediction plus the local hourly statistics
#[derive(Debug, Clone, Serialize)]
pub struct EmotionalAnalysis {
    pub prediction: String,
    /// Hours of day whose total spend exceeds 1.5x the hourly mean
    pub emotional_hours: Vec<u32>,
    /// "high" above 5 such hours, "medium" above 2, otherwise "low"
    pub risk_level: String,
}

/// Assistant operations over a configured AI client
#[derive(Clone)]
pub struct Assistant {
    client: AiClient,
}

impl Assistant {
    pub fn new(client: AiClient) -> Self {
        Self { client }
    }

    /// Build from the environment, `None` when no backend is configured
    pub fn from_env() -> Option<Self> {
        AiClient::from_env().map(Self::new)
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn host(&self) -> &str {
        self.client.host()
    }

    pub async fn health_check(&self) -> bool {
        self.client.health_check().await
    }

    /// Extract a structured expense from a voice transcript
    pub async fn parse_voice_expense(&self, voice_text: &str) -> Result<ParsedVoiceExpense> {
        let prompt = prompts::voice_expense(voice_text);
        let reply = self.client.generate(&prompt, prompts::VOICE_SYSTEM).await?;
        parsing::parse_voice_expense(&reply)
    }

    /// Extract merchant, total and line items from a receipt image
    pub async fn scan_receipt(&self, image_data: &[u8]) -> Result<ParsedReceipt> {
        let prompt = prompts::receipt_scan();
        let reply = self
            .client
            .generate_with_image(&prompt, prompts::RECEIPT_SYSTEM, image_data)
            .await?;
        parsing::parse_receipt(&reply)
    }

    /// Suggest a category for a described expense
    ///
    /// An undecodable reply degrades to the "Other" category instead of
    /// erroring; transport failures still propagate.
    pub async fn categorize(&self, description: &str, amount: f64) -> Result<CategorizeOutcome> {
        let prompt = prompts::categorize(description, amount);
        let reply = self
            .client
            .generate(&prompt, prompts::CATEGORIZE_SYSTEM)
            .await?;

        match parsing::parse_category_suggestion(&reply) {
            Ok(suggestion) => Ok(CategorizeOutcome {
                category: suggestion.category,
                merchant: suggestion.merchant,
                notes: suggestion.notes,
                extraction_failed: false,
            }),
            Err(Error::MalformedResponse(reason)) => {
                warn!("Categorization fell back to default: {}", reason);
                Ok(CategorizeOutcome::fallback())
            }
            Err(e) => Err(e),
        }
    }

    /// Answer a free-form question grounded in the user's ledger totals
    pub async fn chat(
        &self,
        message: &str,
        expenses: &[Expense],
        income: &[Income],
        subscriptions: &[Subscription],
        goals: &[Goal],
        language: &str,
    ) -> Result<String> {
        let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();
        let total_income: f64 = income.iter().map(|i| i.amount).sum();
        let active_subscriptions = subscriptions.iter().filter(|s| s.is_active).count();

        let prompt = prompts::advisor_chat(
            message,
            total_income,
            total_expenses,
            active_subscriptions,
            goals.len(),
            language,
        );
        self.client.generate(&prompt, prompts::CHAT_SYSTEM).await
    }

    /// Narrate the user's finances as a short story
    pub async fn financial_story(&self, expenses: &[Expense], income: &[Income]) -> Result<String> {
        let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();
        let total_income: f64 = income.iter().map(|i| i.amount).sum();

        let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
        for expense in expenses {
            *by_category.entry(expense.category.as_str()).or_insert(0.0) += expense.amount;
        }
        let top_category = by_category
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal))
            .map(|(category, _)| *category)
            .unwrap_or("Unknown");

        let prompt =
            prompts::financial_story(total_income, total_expenses, top_category, expenses.len());
        self.client.generate(&prompt, prompts::STORY_SYSTEM).await
    }

    /// Bucket spending into habit patterns and ask for a correction plan
    ///
    /// Impulsive means over 500 in Food or Shopping. Entries with
    /// unparseable timestamps are skipped.
    pub async fn habit_analysis(&self, expenses: &[Expense]) -> Result<HabitAnalysis> {
        let mut late_night = (0usize, 0.0f64);
        let mut weekend = (0usize, 0.0f64);
        let mut impulsive = (0usize, 0.0f64);

        for expense in expenses {
            let Ok(date) = DateTime::parse_from_rfc3339(&expense.date) else {
                continue;
            };

            if is_late_night(date.hour()) {
                late_night.0 += 1;
                late_night.1 += expense.amount;
            }
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                weekend.0 += 1;
                weekend.1 += expense.amount;
            }
            if expense.amount > 500.0 && matches!(expense.category.as_str(), "Food" | "Shopping") {
                impulsive.0 += 1;
                impulsive.1 += expense.amount;
            }
        }

        let prompt = prompts::habit_correction(late_night, weekend, impulsive);
        let analysis = self.client.generate(&prompt, prompts::HABIT_SYSTEM).await?;

        Ok(HabitAnalysis {
            analysis,
            patterns: HabitPatterns {
                late_night_count: late_night.0,
                weekend_count: weekend.0,
                impulsive_count: impulsive.0,
            },
        })
    }

    /// Find hours with outsized spending and ask for a prediction
    pub async fn emotional_analysis(&self, expenses: &[Expense]) -> Result<EmotionalAnalysis> {
        let mut hourly_spending: BTreeMap<u32, f64> = BTreeMap::new();
        for expense in expenses {
            let Ok(date) = DateTime::parse_from_rfc3339(&expense.date) else {
                continue;
            };
            *hourly_spending.entry(date.hour()).or_insert(0.0) += expense.amount;
        }

        let average = if hourly_spending.is_empty() {
            0.0
        } else {
            hourly_spending.values().sum::<f64>() / hourly_spending.len() as f64
        };

        let emotional_hours: Vec<u32> = hourly_spending
            .iter()
            .filter(|(_, amount)| **amount > average * 1.5)
            .map(|(hour, _)| *hour)
            .collect();

        let risk_level = if emotional_hours.len() > 5 {
            "high"
        } else if emotional_hours.len() > 2 {
            "medium"
        } else {
            "low"
        };

        let prompt = prompts::emotional_spending(expenses.len(), &emotional_hours, average);
        let prediction = self
            .client
            .generate(&prompt, prompts::EMOTIONAL_SYSTEM)
            .await?;

        Ok(EmotionalAnalysis {
            prediction,
            emotional_hours,
            risk_level: risk_level.to_string(),
        })
    }

    /// Draft a script for talking a recurring bill down
    pub async fn negotiation_script(&self, bill_type: &str, current_amount: f64) -> Result<String> {
        let prompt = prompts::negotiation_script(bill_type, current_amount);
        self.client.generate(&prompt, prompts::DEFAULT_SYSTEM).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockBackend;

    fn assistant_with_reply(reply: &str) -> Assistant {
        Assistant::new(AiClient::Mock(MockBackend::with_reply(reply)))
    }

    fn expense(amount: f64, category: &str, date: &str) -> Expense {
        Expense {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: "u1".to_string(),
            amount,
            category: category.to_string(),
            description: String::new(),
            merchant: None,
            date: date.to_string(),
            currency: "INR".to_string(),
            is_regret: false,
        }
    }

    #[tokio::test]
    async fn test_voice_expense_extraction() {
        let assistant = assistant_with_reply(
            r#"{"amount": 12, "category": "Food", "description": "Chai", "merchant": null}"#,
        );
        let parsed = assistant
            .parse_voice_expense("Add chai 12 rupees")
            .await
            .unwrap();
        assert_eq!(parsed.amount, 12.0);
        assert_eq!(parsed.category, "Food");
    }

    #[tokio::test]
    async fn test_voice_expense_rejects_prose_reply() {
        let assistant = assistant_with_reply("I heard you bought some chai.");
        let err = assistant
            .parse_voice_expense("Add chai 12 rupees")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_receipt_scan() {
        let assistant = assistant_with_reply(
            r#"{"merchant": "Big Bazaar", "total": 845.5, "category": "Shopping", "items": [{"name": "Rice", "price": 400}]}"#,
        );
        let receipt = assistant.scan_receipt(&[0u8; 8]).await.unwrap();
        assert_eq!(receipt.merchant, "Big Bazaar");
        assert_eq!(receipt.items.len(), 1);
    }

    #[tokio::test]
    async fn test_categorize_success() {
        let assistant = assistant_with_reply(
            r#"{"category": "Entertainment", "merchant": "Netflix", "notes": "Streaming"}"#,
        );
        let outcome = assistant.categorize("netflix monthly", 649.0).await.unwrap();
        assert_eq!(outcome.category, "Entertainment");
        assert!(!outcome.extraction_failed);
    }

    #[tokio::test]
    async fn test_categorize_falls_back_on_prose() {
        let assistant = Assistant::new(AiClient::mock());
        let outcome = assistant.categorize("mystery spend", 100.0).await.unwrap();
        assert_eq!(outcome.category, "Other");
        assert!(outcome.merchant.is_none());
        assert!(outcome.extraction_failed);
    }

    #[tokio::test]
    async fn test_habit_patterns() {
        let assistant = Assistant::new(AiClient::mock());
        let expenses = vec![
            // 2025-01-11 is a Saturday
            expense(650.0, "Food", "2025-01-11T23:30:00+00:00"),
            expense(120.0, "Transport", "2025-01-13T09:00:00+00:00"),
            expense(800.0, "Shopping", "2025-01-14T15:00:00+00:00"),
            expense(90.0, "Food", "not-a-date"),
        ];

        let result = assistant.habit_analysis(&expenses).await.unwrap();
        assert_eq!(result.patterns.late_night_count, 1);
        assert_eq!(result.patterns.weekend_count, 1);
        assert_eq!(result.patterns.impulsive_count, 2);
        assert!(!result.analysis.is_empty());
    }

    #[tokio::test]
    async fn test_emotional_hours_and_risk() {
        let assistant = Assistant::new(AiClient::mock());

        // One hour dwarfs the others: 900 against a mean of (900+50+50)/3
        let expenses = vec![
            expense(900.0, "Shopping", "2025-01-10T22:15:00+00:00"),
            expense(50.0, "Food", "2025-01-10T09:00:00+00:00"),
            expense(50.0, "Food", "2025-01-10T13:00:00+00:00"),
        ];

        let result = assistant.emotional_analysis(&expenses).await.unwrap();
        assert_eq!(result.emotional_hours, vec![22]);
        assert_eq!(result.risk_level, "low");
    }

    #[tokio::test]
    async fn test_emotional_risk_empty_ledger() {
        let assistant = Assistant::new(AiClient::mock());
        let result = assistant.emotional_analysis(&[]).await.unwrap();
        assert!(result.emotional_hours.is_empty());
        assert_eq!(result.risk_level, "low");
    }

    #[tokio::test]
    async fn test_negotiation_script() {
        let assistant = assistant_with_reply("Hello, I would like to discuss my plan.");
        let script = assistant.negotiation_script("internet", 1199.0).await.unwrap();
        assert!(script.contains("discuss my plan"));
    }
}
