//! Interactive session: a line-oriented REPL over one analysis session

use std::path::PathBuf;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::{SessionError, ToggleOutcome};
use crate::domain::recording::RecorderState;

use super::app::{analyze_callbacks, create_session, read_media_file, CliSession, EXIT_ERROR, EXIT_SUCCESS};
use super::args::ServiceOptions;
use super::presenter::Presenter;
use super::render;

const PROMPT: &str = "moodreel> ";

const HELP: &str = "\
Commands:
  text <message>   set the text to analyze (empty clears it)
  image <path>     attach a face image
  audio <path>     attach a voice recording file
  record           start recording; run again to stop
  analyze          submit the current input
  open <n>         show details of recommendation n
  close            close the details view
  dismiss          dismiss the current error
  reset            clear all inputs and results
  status           show the current input and view state
  help             show this help
  quit             leave the session";

/// One parsed REPL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Text(String),
    Image(PathBuf),
    Audio(PathBuf),
    Record,
    Analyze,
    Open(usize),
    Close,
    Dismiss,
    Reset,
    Status,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse a line. `Ok(None)` for blank input.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let path_arg = |name: &str| {
            if rest.is_empty() {
                Err(format!("Usage: {} <path>", name))
            } else {
                Ok(PathBuf::from(rest))
            }
        };

        let command = match word.to_lowercase().as_str() {
            "text" => Self::Text(rest.to_string()),
            "image" => Self::Image(path_arg("image")?),
            "audio" => Self::Audio(path_arg("audio")?),
            "record" => Self::Record,
            "analyze" => Self::Analyze,
            "open" => Self::Open(
                rest.parse()
                    .map_err(|_| "Usage: open <n> (a recommendation number)".to_string())?,
            ),
            "close" => Self::Close,
            "dismiss" => Self::Dismiss,
            "reset" => Self::Reset,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
        };

        Ok(Some(command))
    }
}

/// Run the interactive session until `quit` or end of input
pub async fn run_session(service: ServiceOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let mut session = match create_session(&service) {
        Ok(session) => session,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.info(&format!(
        "Connected to {} (type 'help' for commands)",
        service.endpoint
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        presenter.prompt(PROMPT);

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                presenter.error(&format!("Failed to read input: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        };

        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                presenter.warn(&e);
                continue;
            }
        };

        if command == SessionCommand::Quit {
            break;
        }

        if let Err(e) = handle_command(&mut session, &mut presenter, command).await {
            if !matches!(e, SessionError::Busy) {
                presenter.error(&e.to_string());
            }
        }
    }

    if session.recorder_state() == RecorderState::Recording {
        let _ = session.stop_recording().await;
    }

    ExitCode::from(EXIT_SUCCESS)
}

async fn handle_command(
    session: &mut CliSession,
    presenter: &mut Presenter,
    command: SessionCommand,
) -> Result<(), SessionError> {
    match command {
        SessionCommand::Text(text) => {
            session.set_text(text);
        }
        SessionCommand::Image(path) => match read_media_file(&path).await {
            Ok(file) => presenter.preview(&session.select_image(file)?),
            Err(e) => presenter.error(&e),
        },
        SessionCommand::Audio(path) => match read_media_file(&path).await {
            Ok(file) => presenter.preview(&session.select_audio(file)?),
            Err(e) => presenter.error(&e),
        },
        SessionCommand::Record => match session.toggle_recording().await? {
            ToggleOutcome::Started => {
                presenter.info("Recording... type 'record' again to stop");
            }
            ToggleOutcome::Stopped(preview) => {
                presenter.success("Recording complete");
                presenter.preview(&preview);
            }
        },
        SessionCommand::Analyze => {
            let callbacks = analyze_callbacks(presenter);
            let result = session.analyze(callbacks).await.map(|view| view.clone());
            presenter.stop_spinner();
            presenter.results(&result?);
        }
        SessionCommand::Open(number) => {
            let item = session.open_detail(number)?;
            presenter.detail(&item);
        }
        SessionCommand::Close => session.close_detail(),
        SessionCommand::Dismiss => session.dismiss_toast(),
        SessionCommand::Reset => {
            session.reset();
            presenter.success("Cleared all inputs and results");
        }
        SessionCommand::Status => show_status(session, presenter),
        SessionCommand::Help => presenter.output(HELP),
        SessionCommand::Quit => {}
    }

    Ok(())
}

fn show_status(session: &mut CliSession, presenter: &Presenter) {
    presenter.key_value("view", session.view().section().as_str());
    presenter.key_value("recorder", session.recorder_state().as_str());

    let text = session.input().text().trim();
    presenter.key_value("text", if text.is_empty() { "(none)" } else { text });

    let previews = session.input().previews();
    if previews.is_empty() {
        presenter.key_value("files", "(none)");
    }
    for preview in &previews {
        presenter.key_value("file", &render::preview_line(preview));
    }

    if let Some(item) = session.view().detail() {
        presenter.key_value("details", &item.title);
    }
    if let Some(toast) = session.toast() {
        presenter.key_value("error", &toast.message);
    }
}
