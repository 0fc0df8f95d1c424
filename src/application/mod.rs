//! Application layer - Use cases and port interfaces
//!
//! Contains the core operations (capture, record, submit, session
//! orchestration) and trait definitions for external system interactions.

pub mod analyze;
pub mod capture;
pub mod ports;
pub mod recorder;
pub mod session;

// Re-export use cases
pub use analyze::AnalyzeUseCase;
pub use capture::InputCapture;
pub use recorder::{RecorderController, ToggleOutcome};
pub use session::{AnalysisSession, AnalyzeCallbacks, SessionError, GENERIC_ERROR_MESSAGE};
