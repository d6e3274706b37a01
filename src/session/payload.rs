//! Payload assembly and audio file intake.
//!
//! A payload is either the concatenation of captured chunks or a
//! user-selected file. File intake enforces the type allow-set and the
//! size cap before anything touches the network.

use std::path::{Path, PathBuf};

use crate::capture::Chunk;
use crate::error::SessionError;

/// Largest accepted file: 25 MiB.
pub const MAX_FILE_BYTES: u64 = 25 * 1024 * 1024;

/// Declared media types accepted for uploaded files.
const ALLOWED_MEDIA_TYPES: [&str; 5] = [
    "audio/mpeg",
    "audio/wav",
    "audio/mp4",
    "audio/webm",
    "audio/m4a",
];

/// Extensions accepted as a fallback when the declared type mismatches.
const ALLOWED_EXTENSIONS: [&str; 4] = ["mp3", "wav", "m4a", "webm"];

/// A named binary blob ready for upload.
#[derive(Debug, Clone)]
pub struct Payload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub media_type: String,
}

impl Payload {
    /// Concatenate captured chunks, in arrival order, into one payload
    /// named after the session's start timestamp.
    pub fn from_chunks(
        chunks: Vec<Chunk>,
        started_at_ms: i64,
        extension: &str,
        media_type: &str,
    ) -> Self {
        let mut bytes = Vec::with_capacity(chunks.iter().map(Vec::len).sum());
        for chunk in chunks {
            bytes.extend_from_slice(&chunk);
        }

        Self {
            bytes,
            filename: format!("recording-{started_at_ms}.{extension}"),
            media_type: media_type.to_string(),
        }
    }
}

/// A user-selected audio file awaiting validation.
#[derive(Debug, Clone)]
pub struct FileIntake {
    pub path: PathBuf,
    pub declared_type: Option<String>,
}

impl FileIntake {
    /// Intake with the media type guessed from the file extension, the
    /// way a file picker reports it.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let declared_type = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(media_type_for_extension)
            .map(str::to_string);
        Self {
            path,
            declared_type,
        }
    }

    pub fn with_declared_type(mut self, media_type: impl Into<String>) -> Self {
        self.declared_type = Some(media_type.into());
        self
    }

    /// Validate and read the file into an upload payload. The session
    /// stays in Idle when this fails.
    pub fn into_payload(self) -> Result<Payload, SessionError> {
        let filename = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                SessionError::Validation(format!("not a file path: {:?}", self.path))
            })?;

        let size = std::fs::metadata(&self.path)
            .map_err(|e| SessionError::Validation(format!("cannot read {filename}: {e}")))?
            .len();

        validate_candidate(self.declared_type.as_deref(), &filename, size)?;

        let bytes = std::fs::read(&self.path)
            .map_err(|e| SessionError::Validation(format!("cannot read {filename}: {e}")))?;

        let media_type = self
            .declared_type
            .unwrap_or_else(|| "application/octet-stream".to_string());

        Ok(Payload {
            bytes,
            filename,
            media_type,
        })
    }
}

/// Check a candidate file against the allow-set and size cap.
///
/// The declared type and the extension are alternatives: either passing
/// admits the file. Browsers misreport audio MIME types often enough that
/// a matching extension overrides a bad declared type.
pub fn validate_candidate(
    declared_type: Option<&str>,
    filename: &str,
    size: u64,
) -> Result<(), SessionError> {
    let type_ok = declared_type
        .map(|t| ALLOWED_MEDIA_TYPES.contains(&t))
        .unwrap_or(false);

    let extension_ok = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.iter().any(|allowed| *allowed == e)
        })
        .unwrap_or(false);

    if !type_ok && !extension_ok {
        return Err(SessionError::Validation(format!(
            "{filename}: not a supported audio file (MP3, WAV, M4A, WebM)"
        )));
    }

    if size > MAX_FILE_BYTES {
        return Err(SessionError::Validation(format!(
            "{filename}: {size} bytes exceeds the 25 MiB limit"
        )));
    }

    Ok(())
}

/// Media type for a known audio extension.
pub fn media_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "m4a" => Some("audio/m4a"),
        "mp4" => Some("audio/mp4"),
        "webm" => Some("audio/webm"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_concatenate_in_arrival_order() {
        let chunks = vec![vec![1u8, 2], vec![3], vec![], vec![4, 5, 6]];
        let payload = Payload::from_chunks(chunks, 1700000000000, "wav", "audio/wav");
        assert_eq!(payload.bytes, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(payload.filename, "recording-1700000000000.wav");
        assert_eq!(payload.media_type, "audio/wav");
    }

    #[test]
    fn test_declared_type_alone_admits() {
        assert!(validate_candidate(Some("audio/mpeg"), "capture.bin", 1024).is_ok());
    }

    #[test]
    fn test_extension_fallback_admits_unknown_type() {
        assert!(validate_candidate(None, "clip.mp3", 1024).is_ok());
        assert!(validate_candidate(Some(""), "clip.mp3", 1024).is_ok());
    }

    #[test]
    fn test_extension_overrides_mismatched_type() {
        assert!(validate_candidate(Some("text/plain"), "clip.mp3", 1024).is_ok());
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(validate_candidate(None, "CLIP.MP3", 1024).is_ok());
    }

    #[test]
    fn test_unsupported_file_rejected() {
        let err = validate_candidate(Some("text/plain"), "notes.txt", 1024).unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
    }

    #[test]
    fn test_exactly_25_mib_accepted() {
        assert!(validate_candidate(None, "clip.wav", MAX_FILE_BYTES).is_ok());
    }

    #[test]
    fn test_26_mib_rejected_regardless_of_type() {
        let size = 26 * 1024 * 1024;
        let err = validate_candidate(Some("audio/wav"), "clip.wav", size).unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
    }

    #[test]
    fn test_intake_guesses_type_from_extension() {
        let intake = FileIntake::from_path("/tmp/standup.m4a");
        assert_eq!(intake.declared_type.as_deref(), Some("audio/m4a"));
    }

    #[test]
    fn test_intake_missing_file_is_validation_error() {
        let err = FileIntake::from_path("/nonexistent/clip.mp3")
            .into_payload()
            .unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
    }

    #[test]
    fn test_intake_reads_small_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp3");
        std::fs::write(&path, b"mp3-bytes").unwrap();

        let payload = FileIntake::from_path(&path).into_payload().unwrap();
        assert_eq!(payload.bytes, b"mp3-bytes");
        assert_eq!(payload.filename, "clip.mp3");
        assert_eq!(payload.media_type, "audio/mpeg");
    }

    #[test]
    fn test_intake_oversize_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.wav");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_FILE_BYTES + 1).unwrap();

        let err = FileIntake::from_path(&path).into_payload().unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
    }
}
