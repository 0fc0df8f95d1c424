//! Analysis outcome and the deterministic offline fallback

use super::emotion::{FusionResult, ModalityResult, NEUTRAL};
use super::recommendation::{fallback_recommendations, RecommendedItem};
use super::request::ProvidedModalities;

/// Fallback final confidence
pub const FALLBACK_CONFIDENCE: f64 = 0.75;

/// Fallback per-modality confidences
pub const FALLBACK_TEXT_CONFIDENCE: f64 = 0.8;
pub const FALLBACK_FACE_CONFIDENCE: f64 = 0.7;
pub const FALLBACK_AUDIO_CONFIDENCE: f64 = 0.6;

const FALLBACK_EMOTION: &str = "happy";

/// Result of one analysis attempt, real or synthesized
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub succeeded: bool,
    pub session_id: Option<String>,
    pub fusion: FusionResult,
    pub recommendations: Vec<RecommendedItem>,
}

impl AnalysisOutcome {
    /// Outcome built from a service reply.
    ///
    /// An empty recommendation list is replaced with the fallback entries.
    pub fn from_service(
        session_id: Option<String>,
        fusion: FusionResult,
        recommendations: Vec<RecommendedItem>,
    ) -> Self {
        let recommendations = if recommendations.is_empty() {
            fallback_recommendations()
        } else {
            recommendations
        };

        Self {
            succeeded: true,
            session_id,
            fusion,
            recommendations,
        }
    }

    /// Locally synthesized outcome for when the service cannot be used.
    ///
    /// Populates only the modalities the user supplied.
    pub fn fallback(provided: ProvidedModalities) -> Self {
        let placeholder =
            |supplied: bool, confidence: f64| supplied.then(|| ModalityResult::new(FALLBACK_EMOTION, confidence));

        let final_emotion = if provided.text { FALLBACK_EMOTION } else { NEUTRAL };

        Self {
            succeeded: false,
            session_id: None,
            fusion: FusionResult {
                final_emotion: final_emotion.to_string(),
                final_confidence: FALLBACK_CONFIDENCE,
                text: placeholder(provided.text, FALLBACK_TEXT_CONFIDENCE),
                face: placeholder(provided.image, FALLBACK_FACE_CONFIDENCE),
                audio: placeholder(provided.audio, FALLBACK_AUDIO_CONFIDENCE),
            },
            recommendations: fallback_recommendations(),
        }
    }
}
