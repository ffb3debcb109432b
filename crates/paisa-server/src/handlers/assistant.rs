//! AI assistant handlers
//!
//! Everything here needs a configured AI backend; without one the
//! endpoints answer 503. Transport failures surface as 503 and replies
//! the extraction layer cannot decode as 502, except auto-categorize
//! which degrades to its default category instead.

use std::sync::Arc;

use axum::{extract::State, Json};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use paisa_core::ai::{Assistant, CategorizeOutcome, EmotionalAnalysis, HabitAnalysis, ParsedReceipt};
use paisa_core::models::{Expense, NewExpense, DEFAULT_CURRENCY};

fn require_assistant(state: &AppState) -> Result<&Assistant, AppError> {
    state
        .assistant
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable("Assistant not configured"))
}

/// Request body for voice expense capture
#[derive(Debug, Deserialize)]
pub struct VoiceExpenseRequest {
    pub owner_id: String,
    pub voice_text: String,
}

#[derive(Serialize)]
pub struct VoiceExpenseResponse {
    pub success: bool,
    pub expense: Expense,
}

/// POST /api/expenses/voice - Parse a voice transcript and record the
/// expense it describes
pub async fn create_expense_from_voice(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VoiceExpenseRequest>,
) -> Result<Json<VoiceExpenseResponse>, AppError> {
    let assistant = require_assistant(&state)?;

    let parsed = assistant.parse_voice_expense(&req.voice_text).await?;
    let expense = state.db.insert_expense(&NewExpense {
        owner_id: req.owner_id,
        amount: parsed.amount,
        category: parsed.category,
        description: parsed.description,
        merchant: parsed.merchant,
        date: None,
        currency: DEFAULT_CURRENCY.to_string(),
        is_regret: false,
    })?;

    Ok(Json(VoiceExpenseResponse {
        success: true,
        expense,
    }))
}

/// Request body for receipt scanning
#[derive(Debug, Deserialize)]
pub struct ScanReceiptRequest {
    pub owner_id: String,
    /// Base64-encoded receipt image
    pub image_base64: String,
}

#[derive(Serialize)]
pub struct ScanReceiptResponse {
    pub success: bool,
    pub receipt_data: ParsedReceipt,
    pub expense: Expense,
}

/// POST /api/expenses/scan-receipt - Extract a receipt image's contents
/// and record the purchase
pub async fn scan_receipt(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScanReceiptRequest>,
) -> Result<Json<ScanReceiptResponse>, AppError> {
    let assistant = require_assistant(&state)?;

    let image_data = STANDARD
        .decode(req.image_base64.as_bytes())
        .map_err(|_| AppError::bad_request("Invalid base64 image data"))?;

    let receipt = assistant.scan_receipt(&image_data).await?;
    let expense = state.db.insert_expense(&NewExpense {
        owner_id: req.owner_id,
        amount: receipt.total,
        category: receipt.category.clone(),
        description: format!("Receipt from {}", receipt.merchant),
        merchant: Some(receipt.merchant.clone()),
        date: None,
        currency: DEFAULT_CURRENCY.to_string(),
        is_regret: false,
    })?;

    Ok(Json(ScanReceiptResponse {
        success: true,
        receipt_data: receipt,
        expense,
    }))
}

/// Request body for category suggestion
#[derive(Debug, Deserialize)]
pub struct AutoCategorizeRequest {
    pub description: String,
    pub amount: f64,
}

/// POST /api/expenses/auto-categorize - Suggest a category for a
/// described expense. Undecodable model output degrades to "Other" with
/// `extraction_failed` set instead of erroring.
pub async fn auto_categorize_expense(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AutoCategorizeRequest>,
) -> Result<Json<CategorizeOutcome>, AppError> {
    let assistant = require_assistant(&state)?;

    let outcome = assistant.categorize(&req.description, req.amount).await?;
    Ok(Json(outcome))
}

/// Request body for advisor chat
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub owner_id: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/assistant/chat - Financial advisor chat grounded in the
/// owner's ledger, replying in their preferred language
pub async fn assistant_chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let assistant = require_assistant(&state)?;

    let preferences = state.db.get_preferences(&req.owner_id)?;
    let expenses = state.db.all_expenses(&req.owner_id)?;
    let income = state.db.all_income(&req.owner_id)?;
    let subscriptions = state.db.list_subscriptions(&req.owner_id)?;
    let goals = state.db.list_goals(&req.owner_id)?;

    let response = assistant
        .chat(
            &req.message,
            &expenses,
            &income,
            &subscriptions,
            &goals,
            &preferences.language,
        )
        .await?;

    Ok(Json(ChatResponse { response }))
}

/// Request body naming the owner an assistant analysis runs for
#[derive(Debug, Deserialize)]
pub struct OwnerRequest {
    pub owner_id: String,
}

#[derive(Serialize)]
pub struct StoryResponse {
    pub story: String,
}

/// POST /api/assistant/story - Narrate the owner's finances as a short
/// story
pub async fn assistant_story(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OwnerRequest>,
) -> Result<Json<StoryResponse>, AppError> {
    let assistant = require_assistant(&state)?;

    let expenses = state.db.all_expenses(&req.owner_id)?;
    let income = state.db.all_income(&req.owner_id)?;

    let story = assistant.financial_story(&expenses, &income).await?;
    Ok(Json(StoryResponse { story }))
}

/// POST /api/assistant/habits - Bucket spending into habit patterns and
/// ask for a correction plan
pub async fn assistant_habits(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OwnerRequest>,
) -> Result<Json<HabitAnalysis>, AppError> {
    let assistant = require_assistant(&state)?;

    let expenses = state.db.all_expenses(&req.owner_id)?;
    let analysis = assistant.habit_analysis(&expenses).await?;

    Ok(Json(analysis))
}

/// POST /api/assistant/emotional-spending - Find hours with outsized
/// spending and ask for a prediction
pub async fn assistant_emotional_spending(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OwnerRequest>,
) -> Result<Json<EmotionalAnalysis>, AppError> {
    let assistant = require_assistant(&state)?;

    let expenses = state.db.all_expenses(&req.owner_id)?;
    let analysis = assistant.emotional_analysis(&expenses).await?;

    Ok(Json(analysis))
}

/// Request body for the bill negotiation script
#[derive(Debug, Deserialize)]
pub struct NegotiationScriptRequest {
    pub bill_type: String,
    pub current_amount: f64,
}

#[derive(Serialize)]
pub struct NegotiationScriptResponse {
    pub script: String,
    pub bill_type: String,
}

/// POST /api/assistant/negotiation-script - Draft a script for talking a
/// recurring bill down
pub async fn assistant_negotiation_script(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NegotiationScriptRequest>,
) -> Result<Json<NegotiationScriptResponse>, AppError> {
    let assistant = require_assistant(&state)?;

    let script = assistant
        .negotiation_script(&req.bill_type, req.current_amount)
        .await?;

    Ok(Json(NegotiationScriptResponse {
        script,
        bill_type: req.bill_type,
    }))
}

#[derive(Serialize)]
pub struct AssistantHealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// GET /api/assistant/health - Whether an AI backend is configured and
/// responding
pub async fn assistant_health(
    State(state): State<Arc<AppState>>,
) -> Json<AssistantHealthResponse> {
    match &state.assistant {
        Some(assistant) => {
            let status = if assistant.health_check().await {
                "ok"
            } else {
                "unreachable"
            };
            Json(AssistantHealthResponse {
                status,
                model: Some(assistant.model().to_string()),
            })
        }
        None => Json(AssistantHealthResponse {
            status: "not_configured",
            model: None,
        }),
    }
}
