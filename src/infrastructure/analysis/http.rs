//! HTTP emotion analyzer adapter

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;

use crate::application::ports::{AnalysisError, EmotionAnalyzer, ServiceReply};
use crate::domain::analysis::{AnalysisRequest, MediaFile};

use super::normalize::normalize_reply;

/// Path of the analysis endpoint, relative to the service base URL
const ANALYZE_PATH: &str = "/analyze_emotion";

/// Talks to the analysis service over multipart POST
pub struct HttpEmotionAnalyzer {
    url: String,
    client: reqwest::Client,
}

impl HttpEmotionAnalyzer {
    /// Create an analyzer for the service at `endpoint` (base URL, no path)
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        Ok(Self {
            url: Self::analyze_url(endpoint),
            client,
        })
    }

    fn analyze_url(endpoint: &str) -> String {
        format!("{}{}", endpoint.trim_end_matches('/'), ANALYZE_PATH)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn file_part(file: &MediaFile) -> Result<Part, AnalysisError> {
        Part::bytes(file.data().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .map_err(|e| AnalysisError::Transport(format!("invalid mime type: {}", e)))
    }

    /// Multipart body with only the parts the request carries
    fn build_form(request: &AnalysisRequest) -> Result<Form, AnalysisError> {
        let mut form = Form::new();

        if let Some(text) = request.text() {
            form = form.text("text", text.to_string());
        }
        if let Some(image) = request.image() {
            form = form.part("image", Self::file_part(image)?);
        }
        if let Some(audio) = request.audio() {
            form = form.part("audio", Self::file_part(audio)?);
        }

        Ok(form)
    }

    /// Parse a 2xx body. The reply is rendered even when it carries
    /// `success: false`; only unparseable JSON is a failure.
    fn parse_body(body: &[u8]) -> Result<ServiceReply, AnalysisError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| AnalysisError::Parse(e.to_string()))?;

        if value.get("success").and_then(Value::as_bool) == Some(false) {
            tracing::debug!(
                error = value.get("error").and_then(serde_json::Value::as_str).unwrap_or("-"),
                "service flagged the reply as unsuccessful"
            );
        }

        normalize_reply(&value)
    }
}

#[async_trait]
impl EmotionAnalyzer for HttpEmotionAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<ServiceReply, AnalysisError> {
        let form = Self::build_form(request)?;

        tracing::debug!(url = %self.url, provided = ?request.provided(), "submitting analysis request");

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AnalysisError::Server {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        Self::parse_body(&body)
    }
}
