//! Prompt builders for the assistant operations
//!
//! Extraction prompts spell out the exact JSON shape the caller decodes;
//! narrative prompts embed locally computed figures so the model never
//! has to do arithmetic.

pub const DEFAULT_SYSTEM: &str = "You are a helpful financial assistant.";
pub const VOICE_SYSTEM: &str =
    "You are a JSON extraction assistant. Always return valid JSON only.";
pub const RECEIPT_SYSTEM: &str = "You are a receipt analysis assistant. Return valid JSON only.";
pub const CATEGORIZE_SYSTEM: &str =
    "You are an expense categorization assistant. Return only valid JSON.";
pub const CHAT_SYSTEM: &str = "You are a friendly, knowledgeable financial advisor.";
pub const STORY_SYSTEM: &str =
    "You are a creative financial storyteller who makes finance fun and engaging.";
pub const HABIT_SYSTEM: &str =
    "You are a behavioral psychologist specializing in financial habits.";
pub const EMOTIONAL_SYSTEM: &str =
    "You are a financial psychologist analyzing emotional spending behaviors.";

/// Full language name for the preference codes the UI offers
pub fn language_name(code: &str) -> &'static str {
    match code {
        "hi" => "Hindi",
        "te" => "Telugu",
        "ta" => "Tamil",
        "kn" => "Kannada",
        _ => "English",
    }
}

pub fn voice_expense(voice_text: &str) -> String {
    format!(
        r#"Extract expense information from this voice input: "{voice_text}"

Return ONLY a valid JSON object with these fields:
{{
    "amount": <number>,
    "category": "<category like Food, Transport, Shopping, etc>",
    "description": "<short description>",
    "merchant": "<merchant name if mentioned, otherwise null>"
}}

Example input: "Add chai 12 rupees"
Example output: {{"amount": 12, "category": "Food", "description": "Chai", "merchant": null}}"#
    )
}

pub fn receipt_scan() -> String {
    r#"Analyze this receipt image and extract:
1. Items purchased (name and price)
2. Total amount
3. Merchant/Store name
4. Category (Food, Shopping, Healthcare, etc.)
5. Date (if visible)

Return as JSON:
{
    "merchant": "store name",
    "total": <total amount>,
    "category": "category",
    "date": "date or null",
    "items": [{"name": "item", "price": price}]
}"#
    .to_string()
}

pub fn categorize(description: &str, amount: f64) -> String {
    format!(
        r#"Categorize this expense:
Description: "{description}"
Amount: {amount}

Return ONLY a JSON with:
{{
    "category": "<one of: Food, Transport, Shopping, Entertainment, Healthcare, Bills, Other>",
    "merchant": "<guess merchant name or null>",
    "notes": "<brief note about the expense>"
}}"#
    )
}

pub fn advisor_chat(
    message: &str,
    total_income: f64,
    total_expenses: f64,
    active_subscriptions: usize,
    active_goals: usize,
    language: &str,
) -> String {
    let language_instruction = if language != "en" {
        format!(
            "IMPORTANT: Respond ONLY in {} language.\n\n",
            language_name(language)
        )
    } else {
        String::new()
    };

    format!(
        r#"{language_instruction}You are a personal financial AI advisor. Here's the user's financial data:

Total Income: ₹{total_income}
Total Expenses: ₹{total_expenses}
Savings: ₹{savings}
Active Subscriptions: {active_subscriptions}
Active Goals: {active_goals}

User Question: {message}

Provide helpful, personalized financial advice based on this data."#,
        savings = total_income - total_expenses,
    )
}

pub fn financial_story(
    total_income: f64,
    total_expenses: f64,
    top_category: &str,
    transaction_count: usize,
) -> String {
    format!(
        r#"Create an engaging, story-style financial summary for this user:

Total Income: ₹{total_income}
Total Expenses: ₹{total_expenses}
Savings: ₹{savings}
Top Spending Category: {top_category}
Number of Transactions: {transaction_count}

Write it as:
1. A short narrative (2-3 paragraphs)
2. Use storytelling elements (metaphors, journey language)
3. Make it motivational and insightful
4. Add emojis for engagement
5. End with actionable advice

Style: Friendly, witty, encouraging"#,
        savings = total_income - total_expenses,
    )
}

pub fn habit_correction(
    late_night: (usize, f64),
    weekend: (usize, f64),
    impulsive: (usize, f64),
) -> String {
    format!(
        r#"Analyze these spending habits and provide habit correction recommendations:

Late Night Purchases: {} transactions, ₹{}
Weekend Purchases: {} transactions, ₹{}
Potentially Impulsive: {} transactions, ₹{}

Provide:
1. Top 3 habits to break
2. Specific challenges (e.g., "No late-night food orders this week")
3. Psychological triggers identified
4. Replacement behaviors
5. Expected savings if habits are corrected

Format as actionable JSON with clear recommendations."#,
        late_night.0, late_night.1, weekend.0, weekend.1, impulsive.0, impulsive.1,
    )
}

pub fn emotional_spending(
    transaction_count: usize,
    emotional_hours: &[u32],
    average_hourly_spend: f64,
) -> String {
    format!(
        r#"Analyze emotional spending patterns:

Total Transactions: {transaction_count}
High-spending hours: {emotional_hours:?}
Average hourly spend: ₹{average_hourly_spend:.2}

Identify:
1. Emotional triggers (stress, boredom, happiness, sadness)
2. Time-based patterns
3. Likely emotional states during spending
4. Predictive warnings for future
5. Coping strategies

Provide psychological insights and preventive measures."#
    )
}

pub fn negotiation_script(bill_type: &str, current_amount: f64) -> String {
    format!(
        r#"Generate a negotiation script for a {bill_type} bill that costs ₹{current_amount} per month.

Include:
1. Opening statement
2. Key talking points
3. Alternative cheaper plans to ask about
4. Expected savings estimate
5. Closing statement

Make it polite but firm."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_prompt_embeds_input() {
        let prompt = voice_expense("Add chai 12 rupees");
        assert!(prompt.contains("Add chai 12 rupees"));
        assert!(prompt.contains("Return ONLY a valid JSON object"));
    }

    #[test]
    fn test_chat_prompt_language_instruction() {
        let hindi = advisor_chat("How do I save?", 50000.0, 20000.0, 2, 1, "hi");
        assert!(hindi.starts_with("IMPORTANT: Respond ONLY in Hindi language."));

        let english = advisor_chat("How do I save?", 50000.0, 20000.0, 2, 1, "en");
        assert!(english.starts_with("You are a personal financial AI advisor"));
    }

    #[test]
    fn test_chat_prompt_computes_savings() {
        let prompt = advisor_chat("hi", 50000.0, 20000.0, 0, 0, "en");
        assert!(prompt.contains("Savings: ₹30000"));
    }

    #[test]
    fn test_language_name_fallback() {
        assert_eq!(language_name("te"), "Telugu");
        assert_eq!(language_name("fr"), "English");
    }

    #[test]
    fn test_emotional_prompt_hours() {
        let prompt = emotional_spending(42, &[13, 22, 23], 310.5);
        assert!(prompt.contains("High-spending hours: [13, 22, 23]"));
        assert!(prompt.contains("₹310.50"));
    }
}
