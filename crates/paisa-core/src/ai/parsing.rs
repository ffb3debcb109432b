//! JSON extraction helpers for assistant replies
//!
//! Models often wrap their JSON payload in markdown code fences or
//! surrounding prose. These helpers locate the outermost JSON object
//! and decode it into a typed struct.

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

use super::types::{CategorySuggestion, ParsedReceipt, ParsedVoiceExpense};

/// Extract the outermost JSON object from an assistant reply
///
/// Ignores code fences and any text before or after the object.
pub fn extract_json(response: &str) -> Result<&str> {
    let response = response.trim();

    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => Ok(&response[s..=e]),
        _ => Err(Error::MalformedResponse(format!(
            "No JSON found in assistant reply | Raw: {}",
            truncate(response)
        ))),
    }
}

fn decode<T: DeserializeOwned>(response: &str) -> Result<T> {
    let json_str = extract_json(response)?;
    serde_json::from_str(json_str).map_err(|e| {
        Error::MalformedResponse(format!(
            "Invalid JSON from assistant: {} | Raw: {}",
            e,
            truncate(json_str)
        ))
    })
}

// Truncate long replies for error messages
fn truncate(text: &str) -> String {
    if text.len() > 200 {
        let cut = text
            .char_indices()
            .take_while(|(i, _)| *i <= 200)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        format!("{}...", &text[..cut])
    } else {
        text.to_string()
    }
}

/// Parse a voice expense extraction reply
pub fn parse_voice_expense(response: &str) -> Result<ParsedVoiceExpense> {
    let parsed: ParsedVoiceExpense = decode(response)?;

    if !parsed.amount.is_finite() || parsed.amount <= 0.0 {
        return Err(Error::MalformedResponse(format!(
            "Voice expense amount is not usable: {}",
            parsed.amount
        )));
    }

    Ok(parsed)
}

/// Parse a receipt analysis reply
pub fn parse_receipt(response: &str) -> Result<ParsedReceipt> {
    let parsed: ParsedReceipt = decode(response)?;

    if !parsed.total.is_finite() || parsed.total <= 0.0 {
        return Err(Error::MalformedResponse(format!(
            "Receipt total is not usable: {}",
            parsed.total
        )));
    }

    Ok(parsed)
}

/// Parse a categorization reply
pub fn parse_category_suggestion(response: &str) -> Result<CategorySuggestion> {
    decode(response)
}
