use crate::api::{ApiCommand, ApiServer};
use crate::capture::MicCaptureDevice;
use crate::config::Config;
use crate::notes::HttpNotesClient;
use crate::presenter::{ConsolePresenter, Presenter};
use crate::session::{RecordingSession, SessionPhase, SessionStatusHandle, StopOutcome};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

pub async fn run_service() -> Result<()> {
    info!("Starting meetnotes service");

    let config = Config::load()?;

    let (tx, mut rx) = mpsc::channel::<ApiCommand>(10);

    let device = Box::new(MicCaptureDevice::new(config.capture.sample_rate));
    let notes_client = Arc::new(HttpNotesClient::new(&config.service.base_url));
    let presenter: Arc<dyn Presenter> = Arc::new(ConsolePresenter);

    let status_handle = SessionStatusHandle::default();
    let mut session = RecordingSession::new(
        device,
        notes_client,
        presenter.clone(),
        status_handle.clone(),
    );

    let api_server = ApiServer::new(tx, status_handle.clone(), &config);
    tokio::spawn(async move {
        if let Err(e) = api_server.start().await {
            error!("API server failed: {}", e);
        }
    });

    spawn_tick_loop(status_handle, presenter);

    info!("meetnotes is ready!");
    info!(
        "Start a recording with: curl -X POST http://127.0.0.1:{}/session/start",
        config.api.port
    );

    // The capture device is not Send, so the machine stays on this task
    // and commands arrive over the channel.
    while let Some(command) = rx.recv().await {
        match command {
            ApiCommand::Start => {
                if let Err(e) = session.start().await {
                    error!("Failed to start recording: {}", e);
                }
            }
            ApiCommand::Stop => match session.stop().await {
                Ok(StopOutcome::Uploaded) => info!("Recording processed"),
                Ok(StopOutcome::NotRecording) => info!("No recording in progress"),
                Err(e) => error!("Failed to stop recording: {}", e),
            },
            ApiCommand::Reset => {
                if let Err(e) = session.reset().await {
                    error!("Failed to reset session: {}", e);
                }
            }
            ApiCommand::ProcessFile(intake) => {
                if let Err(e) = session.process_file(intake).await {
                    error!("Failed to process file: {}", e);
                }
            }
        }
    }

    Ok(())
}

/// Report elapsed recording time to the presenter once a second. The tick
/// is an observation only; it never drives a transition.
fn spawn_tick_loop(status: SessionStatusHandle, presenter: Arc<dyn Presenter>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            let state = status.get().await;
            if state.phase == SessionPhase::Recording {
                if let Some(elapsed) = state.elapsed() {
                    presenter.tick(elapsed).await;
                }
            }
        }
    });
}
