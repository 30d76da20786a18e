//! JSON HTTP endpoint for the portfolio page.
//!
//! The static site posts the visitor's question and renders the returned
//! answer verbatim.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/chat` | Answer a question |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! ```json
//! POST /chat  { "question": "What languages does he speak?" }
//! 200         { "answer": "Hector is multilingual…", "origin": "canned" }
//! ```
//!
//! `/chat` answers `200` for every well-formed request; failures inside the
//! pipeline surface as an `apology` answer, not an HTTP error.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the page can be served
//! from a different host than the API.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::models::Answer;
use crate::responder::{build_responder, Responder};

#[derive(Clone)]
struct AppState {
    responder: Arc<dyn Responder>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// Build the router around an existing responder.
pub fn router(responder: Arc<dyn Responder>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(handle_chat))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(AppState { responder })
}

/// Start the server on `[server].bind` and run until the process exits.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let responder = build_responder(config).await?;
    let app = router(responder);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "chat server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<Answer> {
    let answer = state.responder.answer(&request.question).await;
    tracing::info!(origin = answer.origin.as_str(), "answered question");
    Json(answer)
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
