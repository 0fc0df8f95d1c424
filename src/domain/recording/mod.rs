//! Recording domain module

mod duration;
mod session;

pub use duration::{Duration, DEFAULT_RECORD_SECS, DEFAULT_TIMEOUT_SECS};
pub use session::{RecorderState, RecordingSession};
