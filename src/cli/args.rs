//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::recording::Duration;

/// MoodReel - multi-modal emotion analysis with movie recommendations
#[derive(Parser, Debug)]
#[command(name = "moodreel")]
#[command(version)]
#[command(about = "Analyze emotion from text, a face image and voice, then get movie picks")]
#[command(long_about = None)]
pub struct Cli {
    /// Text to analyze
    #[arg(short = 't', long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Face image file (jpg, png, gif, webp, bmp)
    #[arg(short = 'i', long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Voice audio file (wav, mp3, ogg, flac, webm, m4a)
    #[arg(short = 'a', long, value_name = "PATH")]
    pub audio: Option<PathBuf>,

    /// Record voice from the microphone (replaces --audio)
    #[arg(short = 'r', long)]
    pub record: bool,

    /// Recording duration (e.g., 10s, 1m, 2m30s)
    #[arg(short = 'd', long, value_name = "TIME", requires = "record")]
    pub duration: Option<String>,

    /// Analysis service base URL
    #[arg(short = 'e', long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout (e.g., 30s, 1m)
    #[arg(long, value_name = "TIME")]
    pub timeout: Option<String>,

    /// Show details of recommendation N after the results
    #[arg(short = 'o', long, value_name = "N")]
    pub open: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Start an interactive analysis session
    Session,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Connection settings shared by one-shot and session modes
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub endpoint: String,
    pub timeout: Duration,
    pub record_duration: Duration,
}

/// Parsed one-shot options
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub service: ServiceOptions,
    pub text: Option<String>,
    pub image: Option<PathBuf>,
    pub audio: Option<PathBuf>,
    pub record: bool,
    pub open: Option<usize>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["endpoint", "timeout", "record_duration"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["moodreel"]);
        assert!(cli.text.is_none());
        assert!(cli.image.is_none());
        assert!(cli.audio.is_none());
        assert!(!cli.record);
        assert!(cli.duration.is_none());
        assert!(cli.endpoint.is_none());
        assert!(cli.open.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_inputs() {
        let cli = Cli::parse_from([
            "moodreel",
            "-t",
            "feeling great",
            "-i",
            "me.jpg",
            "-a",
            "voice.wav",
        ]);
        assert_eq!(cli.text.as_deref(), Some("feeling great"));
        assert_eq!(cli.image, Some(PathBuf::from("me.jpg")));
        assert_eq!(cli.audio, Some(PathBuf::from("voice.wav")));
    }

    #[test]
    fn cli_parses_record_with_duration() {
        let cli = Cli::parse_from(["moodreel", "-r", "-d", "5s"]);
        assert!(cli.record);
        assert_eq!(cli.duration.as_deref(), Some("5s"));
    }

    #[test]
    fn duration_requires_record() {
        assert!(Cli::try_parse_from(["moodreel", "-d", "5s"]).is_err());
    }

    #[test]
    fn cli_parses_service_flags() {
        let cli = Cli::parse_from([
            "moodreel",
            "-e",
            "http://10.0.0.5:5000",
            "--timeout",
            "1m",
            "-o",
            "2",
        ]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://10.0.0.5:5000"));
        assert_eq!(cli.timeout.as_deref(), Some("1m"));
        assert_eq!(cli.open, Some(2));
    }

    #[test]
    fn cli_parses_session() {
        let cli = Cli::parse_from(["moodreel", "session"]);
        assert!(matches!(cli.command, Some(Commands::Session)));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["moodreel", "config", "set", "timeout", "45s"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "timeout");
            assert_eq!(value, "45s");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("endpoint"));
        assert!(is_valid_config_key("timeout"));
        assert!(is_valid_config_key("record_duration"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
