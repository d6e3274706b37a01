//! CLI handler for processing a pre-recorded audio file.
//!
//! Validates the file, uploads it to the notes service, and writes the
//! text export. This is the file-intake path without the service running.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::args::ProcessCliArgs;
use crate::config::Config;
use crate::notes::{export, HttpNotesClient, NotesService};
use crate::session::FileIntake;

/// Handle the process CLI command.
pub async fn handle_process_command(args: ProcessCliArgs) -> Result<()> {
    let config = Config::load()?;
    let base_url = args
        .base_url
        .unwrap_or_else(|| config.service.base_url.clone());

    let mut intake = FileIntake::from_path(&args.file);
    if let Some(media_type) = args.media_type {
        intake = intake.with_declared_type(media_type);
    }

    let payload = intake.into_payload()?;

    let pb = if args.no_progress {
        None
    } else {
        let pb = create_progress_bar();
        pb.set_message(format!("Uploading {}...", payload.filename));
        Some(pb)
    };

    let client = HttpNotesClient::new(&base_url);
    let result = client.upload(&payload).await;

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    let notes = result.context("Notes service request failed")?;

    let output_path = match args.output {
        Some(path) => path,
        None => {
            let dir = config.export.resolve_dir()?;
            std::fs::create_dir_all(&dir).context("Failed to create exports directory")?;
            dir.join(export::export_filename())
        }
    };

    write_export(&output_path, &notes)?;
    eprintln!("Notes saved to: {}", output_path.display());

    println!("{}", export::render(&notes));

    Ok(())
}

fn write_export(path: &PathBuf, notes: &crate::notes::MeetingNotes) -> Result<()> {
    std::fs::write(path, export::render(notes)).context("Failed to write notes export")
}

fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
