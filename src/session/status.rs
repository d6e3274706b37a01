//! Session status types and shared state handle.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::notes::MeetingNotes;

/// Phase of the recording-and-upload lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Recording,
    Stopping,
    Uploading,
    Completed,
    Failed,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Stopping => "stopping",
            Self::Uploading => "uploading",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Completed and Failed admit no transitions except an explicit reset.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Current session state, readable by the tick loop and API handlers.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_error: Option<String>,
    pub notes: Option<MeetingNotes>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            started_at: None,
            last_error: None,
            notes: None,
        }
    }
}

impl SessionState {
    /// Time since recording started.
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|started| {
            let elapsed = chrono::Utc::now() - started;
            Duration::from_secs(elapsed.num_seconds().max(0) as u64)
        })
    }
}

/// Render an elapsed duration as `MM:SS`. Minutes roll over naturally past
/// 60 with no cap.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Thread-safe handle sharing session state between the machine, the tick
/// loop, and API handlers.
#[derive(Clone, Default)]
pub struct SessionStatusHandle {
    inner: Arc<Mutex<SessionState>>,
}

impl SessionStatusHandle {
    pub async fn get(&self) -> SessionState {
        self.inner.lock().await.clone()
    }

    pub async fn begin_recording(&self) {
        let mut state = self.inner.lock().await;
        state.phase = SessionPhase::Recording;
        state.started_at = Some(chrono::Utc::now());
        state.last_error = None;
        state.notes = None;
    }

    pub async fn set_phase(&self, phase: SessionPhase) {
        let mut state = self.inner.lock().await;
        state.phase = phase;
    }

    pub async fn complete(&self, notes: MeetingNotes) {
        let mut state = self.inner.lock().await;
        state.notes = Some(notes);
        state.phase = SessionPhase::Completed;
    }

    pub async fn fail(&self, error: String) {
        let mut state = self.inner.lock().await;
        state.last_error = Some(error);
        state.phase = SessionPhase::Failed;
    }

    /// Record an error without leaving Idle (capture/validation class).
    pub async fn reject(&self, error: String) {
        let mut state = self.inner.lock().await;
        state.last_error = Some(error);
    }

    pub async fn reset(&self) {
        let mut state = self.inner.lock().await;
        *state = SessionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_notes() -> MeetingNotes {
        MeetingNotes {
            summary: "S".to_string(),
            transcript: "T".to_string(),
            action_items: vec![],
            participants: vec![],
            key_decisions: None,
        }
    }

    #[test]
    fn test_phase_as_str() {
        assert_eq!(SessionPhase::Idle.as_str(), "idle");
        assert_eq!(SessionPhase::Recording.as_str(), "recording");
        assert_eq!(SessionPhase::Stopping.as_str(), "stopping");
        assert_eq!(SessionPhase::Uploading.as_str(), "uploading");
        assert_eq!(SessionPhase::Completed.as_str(), "completed");
        assert_eq!(SessionPhase::Failed.as_str(), "failed");
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&SessionPhase::Uploading).unwrap();
        assert_eq!(json, "\"uploading\"");

        let parsed: SessionPhase = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(parsed, SessionPhase::Failed);
    }

    #[test]
    fn test_terminal_phases() {
        assert!(SessionPhase::Completed.is_terminal());
        assert!(SessionPhase::Failed.is_terminal());
        assert!(!SessionPhase::Idle.is_terminal());
        assert!(!SessionPhase::Uploading.is_terminal());
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(5)), "00:05");
        assert_eq!(format_elapsed(Duration::from_secs(125)), "02:05");
        assert_eq!(format_elapsed(Duration::from_secs(59 * 60 + 59)), "59:59");
        // No cap: minutes keep counting past the hour.
        assert_eq!(format_elapsed(Duration::from_secs(75 * 60 + 30)), "75:30");
    }

    #[test]
    fn test_state_default() {
        let state = SessionState::default();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.started_at.is_none());
        assert!(state.last_error.is_none());
        assert!(state.notes.is_none());
    }

    #[tokio::test]
    async fn test_begin_recording_stamps_start() {
        let handle = SessionStatusHandle::default();
        handle.begin_recording().await;

        let state = handle.get().await;
        assert_eq!(state.phase, SessionPhase::Recording);
        assert!(state.started_at.is_some());
        assert!(state.elapsed().is_some());
    }

    #[tokio::test]
    async fn test_complete_stores_notes() {
        let handle = SessionStatusHandle::default();
        handle.complete(sample_notes()).await;

        let state = handle.get().await;
        assert_eq!(state.phase, SessionPhase::Completed);
        assert_eq!(state.notes.unwrap().summary, "S");
    }

    #[tokio::test]
    async fn test_fail_stores_error() {
        let handle = SessionStatusHandle::default();
        handle.fail("connection refused".to_string()).await;

        let state = handle.get().await;
        assert_eq!(state.phase, SessionPhase::Failed);
        assert_eq!(state.last_error.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn test_reject_keeps_phase() {
        let handle = SessionStatusHandle::default();
        handle.reject("bad file".to_string()).await;

        let state = handle.get().await;
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.last_error.as_deref(), Some("bad file"));
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let handle = SessionStatusHandle::default();
        handle.begin_recording().await;
        handle.fail("boom".to_string()).await;
        handle.reset().await;

        let state = handle.get().await;
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.started_at.is_none());
        assert!(state.last_error.is_none());
        assert!(state.notes.is_none());
    }
}
