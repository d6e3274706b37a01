//! Recording session lifecycle orchestrator.
//!
//! Owns the idle → recording → stopping → uploading → completed/failed
//! drive. All dependencies are injected via constructor — no concrete
//! types hardcoded. The machine is driven from a single task; the capture
//! device is released before any upload starts.

use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::capture::{CaptureDevice, Chunk};
use crate::error::SessionError;
use crate::notes::NotesService;
use crate::presenter::Presenter;

use super::payload::{FileIntake, Payload};
use super::status::{SessionPhase, SessionStatusHandle};

/// Outcome of a stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Nothing was recording; state and chunks are unchanged.
    NotRecording,
    /// Recording finished and the upload ran to a terminal phase.
    Uploaded,
}

pub struct RecordingSession {
    device: Box<dyn CaptureDevice>,
    notes_service: Arc<dyn NotesService>,
    presenter: Arc<dyn Presenter>,
    status: SessionStatusHandle,
    chunks: Vec<Chunk>,
}

impl RecordingSession {
    pub fn new(
        device: Box<dyn CaptureDevice>,
        notes_service: Arc<dyn NotesService>,
        presenter: Arc<dyn Presenter>,
        status: SessionStatusHandle,
    ) -> Self {
        Self {
            device,
            notes_service,
            presenter,
            status,
            chunks: Vec::new(),
        }
    }

    pub fn status(&self) -> SessionStatusHandle {
        self.status.clone()
    }

    /// Begin a recording. Only valid from Idle; any other phase is
    /// rejected before the device is touched, so a second acquisition can
    /// never happen.
    pub async fn start(&mut self) -> Result<()> {
        let state = self.status.get().await;
        if state.phase != SessionPhase::Idle {
            bail!(
                "cannot start recording while {} — reset first",
                state.phase.as_str()
            );
        }

        if let Err(e) = self.device.acquire() {
            let err = SessionError::from(e);
            warn!("Capture acquisition failed: {err}");
            self.status.reject(err.to_string()).await;
            self.presenter.session_failed(&err).await;
            return Err(err.into());
        }

        self.status.begin_recording().await;
        self.presenter.phase_changed(SessionPhase::Recording).await;
        info!("Recording started");
        Ok(())
    }

    /// Stop the recording and run the payload through upload. A no-op
    /// outside Recording.
    pub async fn stop(&mut self) -> Result<StopOutcome> {
        let state = self.status.get().await;
        if state.phase != SessionPhase::Recording {
            debug!("stop() ignored while {}", state.phase.as_str());
            return Ok(StopOutcome::NotRecording);
        }

        self.status.set_phase(SessionPhase::Stopping).await;
        self.presenter.phase_changed(SessionPhase::Stopping).await;

        self.chunks.extend(self.device.drain());

        match self.device.finalize() {
            Ok(remaining) => self.chunks.extend(remaining),
            Err(e) => {
                let err = SessionError::from(e);
                warn!("Capture finalization failed: {err}");
                self.status.fail(err.to_string()).await;
                self.presenter.session_failed(&err).await;
                self.presenter.phase_changed(SessionPhase::Failed).await;
                self.chunks.clear();
                return Err(err.into());
            }
        }

        let started_ms = state
            .started_at
            .map(|t| t.timestamp_millis())
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

        let payload = Payload::from_chunks(
            std::mem::take(&mut self.chunks),
            started_ms,
            self.device.extension(),
            self.device.media_type(),
        );

        info!(
            "Recording stopped, {} bytes assembled as {}",
            payload.bytes.len(),
            payload.filename
        );

        self.run_upload(payload).await;
        Ok(StopOutcome::Uploaded)
    }

    /// Process a pre-recorded file, bypassing capture. The file enters at
    /// the upload boundary; a validation failure leaves the session in
    /// Idle and never reaches Uploading.
    pub async fn process_file(&mut self, intake: FileIntake) -> Result<()> {
        let state = self.status.get().await;
        if state.phase != SessionPhase::Idle {
            bail!(
                "cannot process a file while {} — reset first",
                state.phase.as_str()
            );
        }

        let payload = match intake.into_payload() {
            Ok(payload) => payload,
            Err(err) => {
                warn!("File rejected: {err}");
                self.status.reject(err.to_string()).await;
                self.presenter.session_failed(&err).await;
                return Err(err.into());
            }
        };

        info!(
            "Processing file {} ({} bytes)",
            payload.filename,
            payload.bytes.len()
        );

        self.run_upload(payload).await;
        Ok(())
    }

    /// Return to Idle from a terminal phase, clearing chunks, notes, and
    /// errors. A no-op from Idle; rejected while a recording or upload is
    /// in flight.
    pub async fn reset(&mut self) -> Result<()> {
        let state = self.status.get().await;
        match state.phase {
            SessionPhase::Idle => Ok(()),
            SessionPhase::Completed | SessionPhase::Failed => {
                self.chunks.clear();
                self.status.reset().await;
                self.presenter.phase_changed(SessionPhase::Idle).await;
                info!("Session reset");
                Ok(())
            }
            phase => bail!("cannot reset while {}", phase.as_str()),
        }
    }

    /// Exactly one upload per session: drive the payload to a terminal
    /// phase. No retry; the recovery path is an explicit reset.
    async fn run_upload(&mut self, payload: Payload) {
        self.status.set_phase(SessionPhase::Uploading).await;
        self.presenter.phase_changed(SessionPhase::Uploading).await;

        match self.notes_service.upload(&payload).await {
            Ok(notes) => {
                self.presenter.notes_ready(&notes).await;
                self.status.complete(notes).await;
                self.presenter.phase_changed(SessionPhase::Completed).await;
                info!("Session completed");
            }
            Err(err) => {
                warn!("Upload failed: {err}");
                self.status.fail(err.to_string()).await;
                self.presenter.session_failed(&err).await;
                self.presenter.phase_changed(SessionPhase::Failed).await;
            }
        }
    }
}
