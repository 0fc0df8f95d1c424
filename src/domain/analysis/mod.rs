//! Analysis domain module

mod emotion;
mod media;
mod outcome;
mod recommendation;
mod request;

pub use emotion::{
    confidence_percent, emotion_emoji, FusionResult, Modality, ModalityResult, NEUTRAL,
};
pub use media::{mime_type_for_path, MediaFile, MediaKind, MediaPreview, OCTET_STREAM};
pub use outcome::{AnalysisOutcome, FALLBACK_CONFIDENCE};
pub use recommendation::{
    fallback_catalog, fallback_recommendations, DisplayValue, RecommendedItem,
    FALLBACK_RECOMMENDATION_COUNT, PLACEHOLDER_THUMBNAIL, UNTITLED,
};
pub use request::{AnalysisRequest, ProvidedModalities};
pub(crate) use request::check_kind;
