//! Structured meeting notes returned by the remote service.

use serde::{Deserialize, Serialize};

/// Parsed result of a processed meeting.
///
/// `summary` and `transcript` are required; the list fields tolerate being
/// absent. `key_decisions` keeps the absent/null case distinct from an
/// empty list so the export can render it differently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingNotes {
    pub summary: String,
    pub transcript: String,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub key_decisions: Option<Vec<String>>,
}
