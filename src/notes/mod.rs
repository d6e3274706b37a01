//! Meeting notes: result model, upload client, text export.

pub mod client;
pub mod export;
pub mod model;

pub use client::{HttpNotesClient, NotesService};
pub use model::MeetingNotes;
