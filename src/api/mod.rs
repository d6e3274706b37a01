//! REST API server for meetnotes.
//!
//! Provides HTTP endpoints for session control (start, stop, reset, file
//! intake) and for reading session status and completed notes.

pub mod error;
pub mod routes;

use crate::config::Config;
use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tracing::info;

pub use routes::session::{ApiCommand, ProcessFileRequest, SessionApiState};

pub struct ApiServer {
    port: u16,
    session_state: SessionApiState,
}

impl ApiServer {
    pub fn new(
        tx: tokio::sync::mpsc::Sender<ApiCommand>,
        status: crate::session::SessionStatusHandle,
        config: &Config,
    ) -> Self {
        Self {
            port: config.api.port,
            session_state: SessionApiState { tx, status },
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = Router::new()
            .route("/", get(status))
            .route("/version", get(version))
            .merge(routes::session::router(self.session_state))
            .layer(ServiceBuilder::new());

        let listener = tokio::net::TcpListener::bind(&format!("127.0.0.1:{}", self.port)).await?;

        info!("API server listening on http://127.0.0.1:{}", self.port);
        info!("Endpoints:");
        info!("  GET  /                 - Service info");
        info!("  GET  /version          - Version info");
        info!("  POST /session/start    - Start recording");
        info!("  POST /session/stop     - Stop recording and upload");
        info!("  POST /session/reset    - Reset a finished session");
        info!("  POST /session/file     - Upload a pre-recorded file");
        info!("  GET  /session/status   - Session phase and elapsed time");
        info!("  GET  /session/notes    - Completed meeting notes");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn status() -> Json<Value> {
    Json(json!({
        "service": "meetnotes",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "meetnotes"
    }))
}
