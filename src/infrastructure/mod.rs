//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: the HTTP
//! analysis client, cpal microphone capture and the XDG config file.

pub mod analysis;
pub mod config;
pub mod recording;

// Re-export adapters
pub use analysis::HttpEmotionAnalyzer;
pub use config::XdgConfigStore;
pub use recording::CpalRecorder;
