//! Submit use case: one service attempt, fallback on any failure

use tracing::{debug, warn};

use crate::domain::analysis::{AnalysisOutcome, AnalysisRequest};

use super::ports::EmotionAnalyzer;

pub struct AnalyzeUseCase<A: EmotionAnalyzer> {
    analyzer: A,
}

impl<A: EmotionAnalyzer> AnalyzeUseCase<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    /// Submit the request once. Never fails: transport, status and parse
    /// errors all degrade to the offline fallback outcome.
    pub async fn submit(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        match self.analyzer.analyze(request).await {
            Ok(reply) => {
                debug!(
                    session_id = reply.session_id.as_deref().unwrap_or("-"),
                    final_emotion = %reply.fusion.final_emotion,
                    recommendations = reply.recommendations.len(),
                    "analysis service replied"
                );
                AnalysisOutcome::from_service(reply.session_id, reply.fusion, reply.recommendations)
            }
            Err(e) => {
                warn!(error = %e, "analysis service unavailable, using offline fallback");
                AnalysisOutcome::fallback(request.provided())
            }
        }
    }
}
