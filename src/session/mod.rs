//! Recording session: state machine, status handle, payload assembly.

pub mod machine;
pub mod payload;
pub mod status;

pub use machine::{RecordingSession, StopOutcome};
pub use payload::{FileIntake, Payload, MAX_FILE_BYTES};
pub use status::{format_elapsed, SessionPhase, SessionState, SessionStatusHandle};
