//! Structured responses decoded from assistant replies

use serde::{Deserialize, Serialize};

/// Expense details extracted from a voice transcript
///
/// The model is asked for this exact shape; `merchant` is frequently null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedVoiceExpense {
    pub amount: f64,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub merchant: Option<String>,
}

/// Receipt details extracted from an image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedReceipt {
    pub merchant: String,
    pub total: f64,
    pub category: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub items: Vec<ParsedReceiptItem>,
}

/// Single line item on a receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedReceiptItem {
    pub name: String,
    pub price: f64,
}

/// Category guess for a described expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub category: String,
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub notes: String,
}
