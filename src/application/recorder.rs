//! Recorder toggle: one microphone session at a time

use crate::domain::analysis::MediaPreview;
use crate::domain::recording::RecorderState;

use super::capture::InputCapture;
use super::ports::{AudioCapture, RecordingError};

/// What a toggle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    Stopped(MediaPreview),
}

/// Owns the capture device adapter and the idle/recording state.
///
/// State machine:
///   IDLE -> RECORDING (start)
///   RECORDING -> IDLE (stop; recording installed as the audio selection)
///   RECORDING -> RECORDING (start again is a no-op)
pub struct RecorderController<A: AudioCapture> {
    device: A,
    state: RecorderState,
}

impl<A: AudioCapture> RecorderController<A> {
    pub fn new(device: A) -> Self {
        Self {
            device,
            state: RecorderState::Idle,
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// Begin a session. Does nothing if one is already active.
    pub async fn start(&mut self) -> Result<(), RecordingError> {
        if self.is_recording() {
            return Ok(());
        }
        self.device.start().await?;
        self.state = RecorderState::Recording;
        Ok(())
    }

    /// End the session and install the recording as the current audio input,
    /// replacing any manual selection.
    pub async fn stop(&mut self, input: &mut InputCapture) -> Result<MediaPreview, RecordingError> {
        if !self.is_recording() {
            return Err(RecordingError::NotRecording);
        }
        // The device is released by stop() whether or not encoding succeeds
        self.state = RecorderState::Idle;
        let file = self.device.stop().await?;
        input
            .select_audio(file)
            .map_err(|e| RecordingError::Encoding(e.to_string()))
    }

    pub async fn toggle(&mut self, input: &mut InputCapture) -> Result<ToggleOutcome, RecordingError> {
        match self.state {
            RecorderState::Idle => {
                self.start().await?;
                Ok(ToggleOutcome::Started)
            }
            RecorderState::Recording => self.stop(input).await.map(ToggleOutcome::Stopped),
        }
    }
}
