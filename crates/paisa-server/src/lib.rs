//! Paisa Web Server
//!
//! Axum-based REST API for the Paisa personal finance tracker.
//!
//! Every route lives under `/api`. Reads identify the owner with an
//! `owner_id` query parameter and creates carry it in the body; there is
//! no implicit default owner. Assistant-backed routes answer 503 when no
//! AI backend is configured.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use paisa_core::ai::Assistant;
use paisa_core::db::Database;

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read configuration from the environment. `PAISA_CORS_ORIGINS` is a
    /// comma-separated origin list.
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var("PAISA_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self { allowed_origins }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    /// AI assistant, `None` when no backend is configured
    pub assistant: Option<Assistant>,
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// GET /api/health - Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Create the application router
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let assistant = Assistant::from_env();
    match &assistant {
        Some(assistant) => {
            info!(
                "Assistant configured: {} (model: {})",
                assistant.host(),
                assistant.model()
            );
        }
        None => {
            info!("ℹ️  Assistant not configured (set AI_BACKEND to enable assistant features)");
        }
    }

    create_router_with_assistant(db, static_dir, config, assistant)
}

/// Create the application router with an explicit assistant (for testing)
pub fn create_router_with_assistant(
    db: Database,
    static_dir: Option<&str>,
    config: ServerConfig,
    assistant: Option<Assistant>,
) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        assistant,
    });

    let api_routes = Router::new()
        // Health
        .route("/health", get(health))
        // Expenses
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route("/expenses/search", get(handlers::search_expenses))
        .route("/expenses/duplicates", get(handlers::detect_duplicates))
        .route("/expenses/voice", post(handlers::create_expense_from_voice))
        .route("/expenses/scan-receipt", post(handlers::scan_receipt))
        .route(
            "/expenses/auto-categorize",
            post(handlers::auto_categorize_expense),
        )
        .route(
            "/expenses/:id",
            put(handlers::update_expense).delete(handlers::delete_expense),
        )
        // Income
        .route(
            "/income",
            get(handlers::list_income).post(handlers::create_income),
        )
        // Subscriptions
        .route(
            "/subscriptions",
            get(handlers::list_subscriptions).post(handlers::create_subscription),
        )
        .route("/subscriptions/total", get(handlers::subscription_total))
        .route("/subscriptions/:id", delete(handlers::delete_subscription))
        // Debts
        .route("/debts", get(handlers::list_debts).post(handlers::create_debt))
        .route("/debts/:id/status", put(handlers::update_debt_status))
        .route("/debts/:id", delete(handlers::delete_debt))
        // Budgets
        .route(
            "/budgets",
            get(handlers::list_budgets).post(handlers::create_budget),
        )
        .route(
            "/budgets/:category/status",
            get(handlers::get_budget_status),
        )
        // Recurring transactions
        .route(
            "/recurring",
            get(handlers::list_recurring).post(handlers::create_recurring),
        )
        .route("/recurring/process", post(handlers::process_recurring))
        // Goals
        .route("/goals", get(handlers::list_goals).post(handlers::create_goal))
        .route("/goals/:id", put(handlers::update_goal))
        .route("/goals/:id/projection", get(handlers::get_goal_projection))
        // Badges
        .route("/badges", get(handlers::list_badges))
        .route("/badges/check", post(handlers::check_badges))
        // Analytics
        .route("/analytics/dashboard", get(handlers::get_dashboard))
        .route("/analytics/trends", get(handlers::get_trends))
        .route("/analytics/behaviour", get(handlers::get_behaviour))
        .route("/analytics/merchants", get(handlers::get_merchants))
        .route(
            "/analytics/categories/:category",
            get(handlers::get_category_insights),
        )
        // Reports
        .route("/reports/weekly", get(handlers::get_weekly_report))
        // Recommendations
        .route("/recommendations", get(handlers::get_recommendations))
        // Preferences
        .route(
            "/preferences",
            get(handlers::get_preferences).post(handlers::save_preferences),
        )
        // Price watches
        .route(
            "/price-watches",
            get(handlers::list_price_watches).post(handlers::create_price_watch),
        )
        .route("/price-watches/:id/price", put(handlers::update_price))
        // Assistant
        .route("/assistant/chat", post(handlers::assistant_chat))
        .route("/assistant/story", post(handlers::assistant_story))
        .route("/assistant/habits", post(handlers::assistant_habits))
        .route(
            "/assistant/emotional-spending",
            post(handlers::assistant_emotional_spending),
        )
        .route(
            "/assistant/negotiation-script",
            post(handlers::assistant_negotiation_script),
        )
        .route("/assistant/health", get(handlers::assistant_health));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        // Allow specified origins
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
    };

    // Security headers
    // CSP: restrict scripts to same-origin, allow inline styles, allow blob: for images
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' blob: data:; font-src 'self'; connect-src 'self'; frame-ancestors 'none'"
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(db, host, port, static_dir, ServerConfig::from_env()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    check_assistant_connection().await;

    let app = create_router(db, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log assistant backend connection status
async fn check_assistant_connection() {
    match Assistant::from_env() {
        Some(assistant) => {
            if assistant.health_check().await {
                info!(
                    "✅ Assistant backend connected: {} (model: {})",
                    assistant.host(),
                    assistant.model()
                );
            } else {
                warn!(
                    "⚠️  Assistant backend configured but not responding: {} (model: {})",
                    assistant.host(),
                    assistant.model()
                );
            }
        }
        None => {
            info!("ℹ️  Assistant not configured (set AI_BACKEND to enable assistant features)");
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn service_unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<paisa_core::Error> for AppError {
    fn from(err: paisa_core::Error) -> Self {
        use paisa_core::Error;

        let status = match &err {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            Error::Database(_) | Error::Pool(_) | Error::Io(_) | Error::Json(_) => {
                return Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    // Return generic message to client
                    message: "An internal error occurred".to_string(),
                    // Keep full error for logging
                    internal: Some(err.into()),
                };
            }
        };

        Self {
            status,
            message: err.to_string(),
            internal: None,
        }
    }
}
