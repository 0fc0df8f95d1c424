//! Main app runner for one-shot mode

use std::env;
use std::path::Path;
use std::process::ExitCode;

use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::application::{AnalysisSession, AnalyzeCallbacks, SessionError};
use crate::domain::analysis::MediaFile;
use crate::domain::config::AppConfig;
use crate::domain::recording::Duration;
use crate::infrastructure::{CpalRecorder, HttpEmotionAnalyzer, XdgConfigStore};

use super::args::{AnalyzeOptions, ServiceOptions};
use super::config_cmd::validate_config_value;
use super::presenter::Presenter;
use super::signals::{wait_recording_window, RecordingStop};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the configured endpoint
pub const ENDPOINT_ENV: &str = "MOODREEL_ENDPOINT";

/// Session type used by the CLI
pub type CliSession = AnalysisSession<HttpEmotionAnalyzer, CpalRecorder>;

/// Run a single analysis and print the results
pub async fn run_oneshot(options: AnalyzeOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let mut session = match create_session(&options.service) {
        Ok(session) => session,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Some(text) = options.text.as_deref() {
        session.set_text(text);
    }

    if let Some(path) = options.image.as_deref() {
        if let Err(code) = attach_image(&mut session, &presenter, path).await {
            return ExitCode::from(code);
        }
    }

    if let Some(path) = options.audio.as_deref() {
        if let Err(code) = attach_audio(&mut session, &presenter, path).await {
            return ExitCode::from(code);
        }
    }

    if options.record {
        if let Err(e) = record_for(&mut session, &mut presenter, options.service.record_duration).await
        {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    }

    let callbacks = analyze_callbacks(&mut presenter);
    let results = session.analyze(callbacks).await.map(|view| view.clone());

    match results {
        Ok(view) => {
            presenter.stop_spinner();
            presenter.results(&view);
        }
        Err(e) => {
            presenter.stop_spinner();
            presenter.error(&e.to_string());
            return ExitCode::from(exit_code_for(&e));
        }
    }

    if let Some(number) = options.open {
        match session.open_detail(number) {
            Ok(item) => {
                presenter.output("");
                presenter.detail(&item);
            }
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

pub fn create_session(service: &ServiceOptions) -> Result<CliSession, String> {
    let analyzer = HttpEmotionAnalyzer::new(&service.endpoint, service.timeout.as_std())
        .map_err(|e| format!("Failed to create HTTP client: {}", e))?;
    debug!(url = analyzer.url(), timeout = %service.timeout, "analysis client ready");
    Ok(AnalysisSession::new(analyzer, CpalRecorder::new()))
}

/// Spinner-driven loading callbacks
pub fn analyze_callbacks(presenter: &mut Presenter) -> AnalyzeCallbacks {
    presenter.start_spinner("Preparing request...");
    let start_bar = presenter.spinner_handle();
    let end_bar = presenter.spinner_handle();

    AnalyzeCallbacks {
        on_loading_start: Some(Box::new(move || {
            if let Some(bar) = &start_bar {
                bar.set_message("Analyzing emotions...");
            }
        })),
        on_loading_end: Some(Box::new(move |succeeded| {
            if let Some(bar) = &end_bar {
                bar.set_message(if succeeded {
                    "Analysis complete"
                } else {
                    "Service unavailable, using sample results"
                });
            }
        })),
    }
}

/// Exit code for a failed session operation
pub fn exit_code_for(err: &SessionError) -> u8 {
    match err {
        SessionError::Capture(_) => EXIT_USAGE_ERROR,
        _ => EXIT_ERROR,
    }
}

/// Read a file from disk, declaring its MIME type from the extension
pub async fn read_media_file(path: &Path) -> Result<MediaFile, String> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    Ok(MediaFile::from_path_bytes(path, data))
}

async fn attach_image(
    session: &mut CliSession,
    presenter: &Presenter,
    path: &Path,
) -> Result<(), u8> {
    let file = read_media_file(path).await.map_err(|e| {
        presenter.error(&e);
        EXIT_ERROR
    })?;
    match session.select_image(file) {
        Ok(preview) => {
            presenter.preview(&preview);
            Ok(())
        }
        Err(e) => {
            presenter.error(&e.to_string());
            Err(exit_code_for(&e))
        }
    }
}

async fn attach_audio(
    session: &mut CliSession,
    presenter: &Presenter,
    path: &Path,
) -> Result<(), u8> {
    let file = read_media_file(path).await.map_err(|e| {
        presenter.error(&e);
        EXIT_ERROR
    })?;
    match session.select_audio(file) {
        Ok(preview) => {
            presenter.preview(&preview);
            Ok(())
        }
        Err(e) => {
            presenter.error(&e.to_string());
            Err(exit_code_for(&e))
        }
    }
}

/// Record from the microphone until the duration runs out or Ctrl-C
async fn record_for(
    session: &mut CliSession,
    presenter: &mut Presenter,
    duration: Duration,
) -> Result<(), SessionError> {
    session.start_recording().await?;

    presenter.start_spinner("Recording...");
    let stop = wait_recording_window(duration, |elapsed, total| {
        presenter.update_recording_progress(elapsed, total)
    })
    .await;
    debug!(?stop, "recording window closed");

    match session.stop_recording().await {
        Ok(preview) => {
            let how = match stop {
                RecordingStop::Elapsed => "Recording complete",
                RecordingStop::Interrupted => "Recording stopped",
            };
            presenter.spinner_success(&format!("{} ({})", how, preview.size));
            Ok(())
        }
        Err(e) => {
            presenter.spinner_fail("Recording failed");
            Err(e)
        }
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, path = %store.path().display(), "ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    let env_config = AppConfig {
        endpoint: env::var(ENDPOINT_ENV).ok().filter(|s| !s.trim().is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Validate merged config into connection settings
pub fn service_options(config: &AppConfig) -> Result<ServiceOptions, String> {
    if let Some(endpoint) = config.endpoint.as_deref() {
        validate_config_value("endpoint", endpoint).map_err(|e| e.to_string())?;
    }

    let timeout = parse_duration("timeout", config.timeout.as_deref(), Duration::default_timeout())?;
    let record_duration = parse_duration(
        "duration",
        config.record_duration.as_deref(),
        Duration::default_record(),
    )?;

    Ok(ServiceOptions {
        endpoint: config.endpoint_or_default().to_string(),
        timeout,
        record_duration,
    })
}

fn parse_duration(name: &str, value: Option<&str>, default: Duration) -> Result<Duration, String> {
    match value {
        Some(s) => s
            .parse::<Duration>()
            .map_err(|e| format!("Invalid {}: {}", name, e)),
        None => Ok(default),
    }
}
