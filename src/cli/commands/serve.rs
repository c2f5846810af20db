//! HTTP API server.
//!
//! Provides the question-answering endpoint used by the browser extension.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::TubeQaError;
use crate::orchestrator::Orchestrator;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, warn};

/// Shared application state.
struct AppState {
    orchestrator: Arc<Orchestrator>,
}

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    let spinner = Output::spinner("Loading embedding model...");
    let orchestrator = Orchestrator::new(&settings);
    spinner.finish_and_clear();
    let orchestrator = Arc::new(orchestrator?);

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("tubeqa API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Ask", "POST /ask");
    println!();
    Output::kv("Transcript languages", &settings.transcript.languages.join(", "));
    Output::kv("Model", &settings.llm.model);
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, router(orchestrator)).await?;

    Ok(())
}

/// Build the API router around an orchestrator.
pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    let state = Arc::new(AppState { orchestrator });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct AskRequest {
    video_id: String,
    question: String,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Status and client-facing message for a failed question.
///
/// Only transcript problems are described to the client; anything else is reported
/// generically.
fn status_for(err: &TubeQaError) -> (StatusCode, String) {
    match err {
        TubeQaError::Transcript(e) if e.is_not_found() => (StatusCode::NOT_FOUND, e.to_string()),
        TubeQaError::Transcript(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        ),
    }
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ask(State(state): State<Arc<AppState>>, Json(req): Json<AskRequest>) -> impl IntoResponse {
    let orchestrator = state.orchestrator.clone();
    let video_id = req.video_id.clone();

    let result = tokio::spawn(async move { orchestrator.ask(&req.video_id, &req.question).await })
        .await
        .map_err(TubeQaError::from)
        .and_then(|answer| answer);

    match result {
        Ok(answer) => Json(AskResponse { answer }).into_response(),
        Err(e) => {
            let (status, message) = status_for(&e);
            if matches!(e, TubeQaError::Transcript(_)) {
                warn!("Transcript unavailable for {}: {}", video_id, e);
            } else {
                error!("Failed to answer question about {}: {}", video_id, e);
            }
            (status, Json(ErrorResponse { error: message })).into_response()
        }
    }
}
