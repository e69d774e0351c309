//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`. Middleware: permissive CORS (the chat
//! UI runs on another origin) and request tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Streaming chat relay
        .route("/chat/stream", post(handlers::chat::stream_chat))
        // Conversation bootstrap
        .route(
            "/conversations",
            post(handlers::conversation::create_conversation),
        )
        // EMI calculator
        .route("/loan/quote", post(handlers::loan::quote_loan))
        // Sanction letter
        .route("/sanction", post(handlers::sanction::generate_sanction))
        // Customer insights
        .route("/profile", get(handlers::profile::get_profile));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
