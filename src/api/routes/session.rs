//! Session control endpoints.
//!
//! Handlers enqueue commands for the session machine and read the shared
//! status handle; they own no session state themselves.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::api::error::{ApiError, ApiResult};
use crate::session::{format_elapsed, FileIntake, SessionStatusHandle};

/// Commands forwarded to the session machine's command loop.
#[derive(Debug)]
pub enum ApiCommand {
    Start,
    Stop,
    Reset,
    ProcessFile(FileIntake),
}

/// Shared state for session routes.
#[derive(Clone)]
pub struct SessionApiState {
    pub tx: mpsc::Sender<ApiCommand>,
    pub status: SessionStatusHandle,
}

/// Request body for the file intake endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct ProcessFileRequest {
    pub path: PathBuf,
    pub media_type: Option<String>,
}

pub fn router(state: SessionApiState) -> Router {
    Router::new()
        .route("/session/start", post(start_session))
        .route("/session/stop", post(stop_session))
        .route("/session/reset", post(reset_session))
        .route("/session/file", post(process_file))
        .route("/session/status", get(session_status))
        .route("/session/notes", get(session_notes))
        .with_state(state)
}

async fn send_command(
    state: &SessionApiState,
    command: ApiCommand,
) -> ApiResult<()> {
    state.tx.send(command).await.map_err(|e| {
        error!("Failed to enqueue session command: {}", e);
        ApiError::internal("session machine unavailable")
    })
}

async fn start_session(State(state): State<SessionApiState>) -> ApiResult<Json<Value>> {
    info!("Session start command received via API");
    send_command(&state, ApiCommand::Start).await?;

    // Give the machine a moment to process before reporting.
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    let status = state.status.get().await;
    Ok(Json(json!({
        "success": true,
        "phase": status.phase.as_str(),
        "last_error": status.last_error,
    })))
}

async fn stop_session(State(state): State<SessionApiState>) -> ApiResult<Json<Value>> {
    info!("Session stop command received via API");
    send_command(&state, ApiCommand::Stop).await?;

    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    let status = state.status.get().await;
    Ok(Json(json!({
        "success": true,
        "phase": status.phase.as_str(),
        "elapsed": status.elapsed().map(format_elapsed),
    })))
}

async fn reset_session(State(state): State<SessionApiState>) -> ApiResult<Json<Value>> {
    info!("Session reset command received via API");
    send_command(&state, ApiCommand::Reset).await?;

    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    let status = state.status.get().await;
    Ok(Json(json!({
        "success": true,
        "phase": status.phase.as_str(),
    })))
}

async fn process_file(
    State(state): State<SessionApiState>,
    Json(request): Json<ProcessFileRequest>,
) -> ApiResult<Json<Value>> {
    info!("File intake received via API: {:?}", request.path);

    let mut intake = FileIntake::from_path(request.path);
    if let Some(media_type) = request.media_type {
        intake = intake.with_declared_type(media_type);
    }

    send_command(&state, ApiCommand::ProcessFile(intake)).await?;

    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    let status = state.status.get().await;
    Ok(Json(json!({
        "success": true,
        "phase": status.phase.as_str(),
        "last_error": status.last_error,
    })))
}

async fn session_status(State(state): State<SessionApiState>) -> Json<Value> {
    let status = state.status.get().await;

    Json(json!({
        "phase": status.phase.as_str(),
        "elapsed": status.elapsed().map(format_elapsed),
        "elapsed_seconds": status.elapsed().map(|e| e.as_secs()),
        "last_error": status.last_error,
        "has_notes": status.notes.is_some(),
    }))
}

async fn session_notes(State(state): State<SessionApiState>) -> ApiResult<Json<Value>> {
    let status = state.status.get().await;

    match status.notes {
        Some(notes) => Ok(Json(json!({ "success": true, "notes": notes }))),
        None => Err(ApiError::not_found("no completed meeting notes")),
    }
}
