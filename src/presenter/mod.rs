//! Presenter abstraction for lifecycle and result display.
//!
//! The session machine pushes events here instead of touching any display
//! surface itself. Presenter failures are the presenter's problem; the
//! machine never propagates them.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{error, info};

use crate::error::SessionError;
use crate::notes::{export, MeetingNotes};
use crate::session::status::{format_elapsed, SessionPhase};

/// Receives session lifecycle events and result data.
#[async_trait]
pub trait Presenter: Send + Sync {
    async fn phase_changed(&self, phase: SessionPhase);

    /// Periodic observation while recording; carries elapsed time only.
    async fn tick(&self, elapsed: Duration);

    async fn notes_ready(&self, notes: &MeetingNotes);

    async fn session_failed(&self, error: &SessionError);
}

/// Presenter that renders to the service log and stdout.
#[derive(Default)]
pub struct ConsolePresenter;

#[async_trait]
impl Presenter for ConsolePresenter {
    async fn phase_changed(&self, phase: SessionPhase) {
        info!("Session is {}", phase.as_str());
    }

    async fn tick(&self, elapsed: Duration) {
        info!("Recording {}", format_elapsed(elapsed));
    }

    async fn notes_ready(&self, notes: &MeetingNotes) {
        println!("{}", export::render(notes));
    }

    async fn session_failed(&self, error: &SessionError) {
        error!("Session failed: {error}");
    }
}
