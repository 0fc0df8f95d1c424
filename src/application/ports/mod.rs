//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod analyzer;
pub mod config;
pub mod recorder;

// Re-export common types
pub use analyzer::{AnalysisError, EmotionAnalyzer, ServiceReply};
pub use config::ConfigStore;
pub use recorder::{AudioCapture, RecordingError, RECORDING_FILE_NAME, RECORDING_MIME_TYPE};
