//! Domain layer - Core business logic
//!
//! Contains value objects, state machines, and domain errors.
//! This layer has no dependencies on external systems.

pub mod analysis;
pub mod config;
pub mod error;
pub mod recording;
pub mod view;

// Re-export common types
pub use analysis::{
    AnalysisOutcome, AnalysisRequest, FusionResult, MediaFile, MediaKind, Modality,
    ModalityResult, ProvidedModalities, RecommendedItem,
};
pub use config::AppConfig;
pub use error::*;
pub use recording::{Duration, RecorderState, RecordingSession};
pub use view::{ViewSection, ViewState};
