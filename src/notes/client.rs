//! HTTP client for the remote notes service.
//!
//! One POST of the audio payload to `{base_url}/upload-audio`, multipart
//! with a single binary `file` field. The remote side transcribes and
//! summarizes; a typical payload takes on the order of a minute or two, so
//! no client-side timeout is applied.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, info};

use super::model::MeetingNotes;
use crate::error::SessionError;
use crate::session::payload::Payload;

/// Trait for submitting a finished payload and getting parsed notes back.
#[async_trait]
pub trait NotesService: Send + Sync {
    async fn upload(&self, payload: &Payload) -> Result<MeetingNotes, SessionError>;
}

/// Client for the notes service's upload endpoint.
pub struct HttpNotesClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotesClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn upload_url(&self) -> String {
        format!("{}/upload-audio", self.base_url)
    }
}

#[async_trait]
impl NotesService for HttpNotesClient {
    async fn upload(&self, payload: &Payload) -> Result<MeetingNotes, SessionError> {
        info!(
            "Uploading {} ({} bytes) to {}",
            payload.filename,
            payload.bytes.len(),
            self.upload_url()
        );

        let part = Part::bytes(payload.bytes.clone())
            .file_name(payload.filename.clone())
            .mime_str(&payload.media_type)
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!("Notes service returned {}: {}", status, body);
            return Err(SessionError::Transport(format!(
                "notes service returned {status}: {body}"
            )));
        }

        debug!("Notes service response: {} bytes", body.len());

        let notes: MeetingNotes = serde_json::from_str(&body)
            .map_err(|e| SessionError::ResponseFormat(e.to_string()))?;

        info!(
            "Notes received: {} chars transcript, {} action items",
            notes.transcript.len(),
            notes.action_items.len()
        );

        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_url_strips_trailing_slash() {
        let client = HttpNotesClient::new("http://localhost:8000/");
        assert_eq!(client.upload_url(), "http://localhost:8000/upload-audio");
    }

    #[test]
    fn test_upload_url_plain_base() {
        let client = HttpNotesClient::new("http://notes.local:9090");
        assert_eq!(client.upload_url(), "http://notes.local:9090/upload-audio");
    }
}
