//! Recorder state machine and the transient recording session

use std::fmt;

/// Recorder toggle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
}

impl RecorderState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
        }
    }
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accumulated PCM fragments of one microphone session.
///
/// Owned by the capture adapter while recording; consumed by `into_samples`
/// when the recording stops.
#[derive(Debug, Default)]
pub struct RecordingSession {
    chunks: Vec<Vec<i16>>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Append one fragment delivered by the device callback
    pub fn push_chunk(&mut self, chunk: Vec<i16>) {
        if !chunk.is_empty() {
            self.chunks.push(chunk);
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn sample_count(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Concatenate all fragments in arrival order
    pub fn into_samples(self) -> Vec<i16> {
        let mut samples = Vec::with_capacity(self.sample_count());
        for chunk in self.chunks {
            samples.extend(chunk);
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        assert_eq!(RecorderState::default(), RecorderState::Idle);
        assert_eq!(RecorderState::Recording.to_string(), "recording");
    }

    #[test]
    fn session_concatenates_in_order() {
        let mut session = RecordingSession::new();
        session.push_chunk(vec![1, 2]);
        session.push_chunk(vec![3]);
        session.push_chunk(vec![4, 5, 6]);

        assert_eq!(session.chunk_count(), 3);
        assert_eq!(session.sample_count(), 6);
        assert_eq!(session.into_samples(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn empty_chunks_are_ignored() {
        let mut session = RecordingSession::new();
        session.push_chunk(Vec::new());
        assert!(session.is_empty());
        assert!(session.into_samples().is_empty());
    }
}
