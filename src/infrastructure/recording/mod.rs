//! Microphone recording adapters
//!
//! Audio is captured with cpal and handed over as a FLAC file.

mod clip;
mod cpal_recorder;

pub use clip::{RecordingClip, CLIP_SAMPLE_RATE};
pub use cpal_recorder::CpalRecorder;
