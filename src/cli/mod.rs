//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the one-shot and interactive session runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod render;
pub mod session_app;
pub mod signals;

// Re-export commonly used types
pub use app::{run_oneshot, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{AnalyzeOptions, Cli, Commands, ConfigAction, ServiceOptions};
pub use presenter::Presenter;
pub use session_app::run_session;
