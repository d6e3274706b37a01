//! Session-boundary error taxonomy.
//!
//! Every failure the session can hit falls into one of four recoverable
//! classes. Capture and Validation errors leave the session in Idle;
//! Transport and ResponseFormat errors produce the terminal Failed phase,
//! cleared by an explicit reset. None of them is fatal to the service.

use thiserror::Error;

/// Failures while acquiring or running the capture hardware.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture permission denied: {0}")]
    PermissionDenied(String),

    #[error("no capture device available: {0}")]
    Unavailable(String),

    #[error("capture stream failed: {0}")]
    Stream(String),
}

/// Errors surfaced by session operations, classified per recovery path.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("invalid audio file: {0}")]
    Validation(String),

    #[error("upload failed: {0}")]
    Transport(String),

    #[error("unexpected notes response: {0}")]
    ResponseFormat(String),
}

impl SessionError {
    /// Whether this error leaves the session re-enterable from Idle
    /// without a reset.
    pub fn is_recoverable_in_place(&self) -> bool {
        matches!(self, Self::Capture(_) | Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_errors_recover_in_place() {
        let err = SessionError::from(CaptureError::PermissionDenied("mic".to_string()));
        assert!(err.is_recoverable_in_place());

        let err = SessionError::Validation("too large".to_string());
        assert!(err.is_recoverable_in_place());
    }

    #[test]
    fn test_upload_errors_are_terminal() {
        assert!(!SessionError::Transport("connection refused".to_string())
            .is_recoverable_in_place());
        assert!(!SessionError::ResponseFormat("missing summary".to_string())
            .is_recoverable_in_place());
    }

    #[test]
    fn test_capture_error_message_passthrough() {
        let err = SessionError::from(CaptureError::Unavailable("no input device".to_string()));
        assert_eq!(err.to_string(), "no capture device available: no input device");
    }
}
