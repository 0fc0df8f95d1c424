//! Microphone capture port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::MediaFile;

/// File name given to a finished microphone recording
pub const RECORDING_FILE_NAME: &str = "recorded_audio.flac";

/// MIME type of a finished microphone recording
pub const RECORDING_MIME_TYPE: &str = "audio/flac";

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Microphone access denied or unavailable: {0}")]
    DeviceAccess(String),

    #[error("No audio input device available")]
    NoAudioDevice,

    #[error("No recording in progress")]
    NotRecording,

    #[error("No audio data captured")]
    Empty,

    #[error("Failed to encode recording: {0}")]
    Encoding(String),
}

/// Port for an exclusive, signal-controlled microphone session
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Acquire the input device and begin accumulating audio
    async fn start(&self) -> Result<(), RecordingError>;

    /// Release the device and return the recording as a single audio file
    async fn stop(&self) -> Result<MediaFile, RecordingError>;

    fn is_recording(&self) -> bool;
}
