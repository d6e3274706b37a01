//! Plain-text export of completed meeting notes.

use chrono::Utc;

use super::model::MeetingNotes;

/// Render notes into the fixed-section export document.
///
/// Absent key decisions render the literal `None`; an empty list renders
/// an empty section, matching how the lists behave elsewhere.
pub fn render(notes: &MeetingNotes) -> String {
    let bullets = |items: &[String]| -> String {
        items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let key_decisions = match &notes.key_decisions {
        Some(decisions) => bullets(decisions),
        None => "None".to_string(),
    };

    format!(
        "MEETNOTES - MEETING NOTES\n\
         =========================\n\
         \n\
         SUMMARY:\n\
         {}\n\
         \n\
         ACTION ITEMS:\n\
         {}\n\
         \n\
         PARTICIPANTS:\n\
         {}\n\
         \n\
         KEY DECISIONS:\n\
         {}\n\
         \n\
         FULL TRANSCRIPT:\n\
         {}\n",
        notes.summary,
        bullets(&notes.action_items),
        bullets(&notes.participants),
        key_decisions,
        notes.transcript,
    )
}

/// File name for an export produced now: `meeting-notes-<epoch-ms>.txt`.
pub fn export_filename() -> String {
    format!("meeting-notes-{}.txt", Utc::now().timestamp_millis())
}
