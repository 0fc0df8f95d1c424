//! MoodReel CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodreel::cli::{
    app::{load_merged_config, run_oneshot, service_options, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{AnalyzeOptions, Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    session_app::run_session,
};
use moodreel::domain::config::AppConfig;
use moodreel::infrastructure::XdgConfigStore;

fn init_logging() {
    // Diagnostics go to stderr so results on stdout stay clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodreel=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    let interactive = match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Session) => true,
        None => false,
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        endpoint: cli.endpoint.clone(),
        timeout: cli.timeout.clone(),
        record_duration: cli.duration.clone(),
    };

    let config = load_merged_config(cli_config).await;

    let service = match service_options(&config) {
        Ok(service) => service,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    if interactive {
        return run_session(service).await;
    }

    let options = AnalyzeOptions {
        service,
        text: cli.text,
        image: cli.image,
        audio: cli.audio,
        record: cli.record,
        open: cli.open,
    };

    run_oneshot(options).await
}
