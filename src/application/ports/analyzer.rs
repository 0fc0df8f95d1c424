//! Emotion analysis service port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::{AnalysisRequest, FusionResult, RecommendedItem};

/// Failures talking to the analysis service. All of them are recovered by
/// substituting the offline fallback.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Failed to parse service response: {0}")]
    Parse(String),
}

/// A service reply, already normalized into canonical shapes
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReply {
    pub session_id: Option<String>,
    pub fusion: FusionResult,
    pub recommendations: Vec<RecommendedItem>,
}

/// Port for the remote emotion analysis service
#[async_trait]
pub trait EmotionAnalyzer: Send + Sync {
    /// Submit one request. Exactly one attempt, no retries.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<ServiceReply, AnalysisError>;
}
