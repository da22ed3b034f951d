//! REST endpoints for intake sessions.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{Error, SessionError};
use crate::session::{TurnAnswer, TurnOrchestrator};

/// Shared state for session routes.
#[derive(Clone)]
pub struct RouteState {
    pub orchestrator: Arc<TurnOrchestrator>,
}

#[derive(Deserialize)]
struct StartSessionRequest {
    subject_id: String,
    /// Optional known context, as a path → value object.
    #[serde(default, deserialize_with = "crate::llm::boundary::deserialize_updates")]
    seed_context: Vec<(String, serde_json::Value)>,
}

/// POST /api/sessions — start a session and get the first question.
async fn start_session(
    State(state): State<RouteState>,
    Json(body): Json<StartSessionRequest>,
) -> Response {
    let seed = if body.seed_context.is_empty() {
        None
    } else {
        Some(body.seed_context)
    };
    match state.orchestrator.start_session(&body.subject_id, seed).await {
        Ok(question) => (StatusCode::CREATED, Json(question)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/sessions/{id}/turns — process an answer, get the next question.
async fn process_turn(
    State(state): State<RouteState>,
    Path(id): Path<Uuid>,
    Json(answer): Json<TurnAnswer>,
) -> Response {
    match state.orchestrator.process_turn(id, answer).await {
        Ok(question) => Json(question).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/sessions/{id}/complete — terminal; returns the final summary.
async fn complete_session(State(state): State<RouteState>, Path(id): Path<Uuid>) -> Response {
    match state.orchestrator.complete_session(id).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/sessions/{id} — current session state.
async fn get_session(State(state): State<RouteState>, Path(id): Path<Uuid>) -> Response {
    match state.orchestrator.get_session(id).await {
        Ok(session) => Json(session).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(error: Error) -> Response {
    let status = match &error {
        Error::Session(SessionError::NotFound { .. }) => StatusCode::NOT_FOUND,
        Error::Session(SessionError::InvalidState { .. }) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %error, "Request failed");
    }
    (
        status,
        Json(serde_json::json!({"error": error.to_string()})),
    )
        .into_response()
}

/// Build the session REST routes.
pub fn session_routes(state: RouteState) -> Router {
    Router::new()
        .route("/api/sessions", post(start_session))
        .route("/api/sessions/{id}", get(get_session))
        .route("/api/sessions/{id}/turns", post(process_turn))
        .route("/api/sessions/{id}/complete", post(complete_session))
        .with_state(state)
}
