//! Analysis session: capture -> submit -> results, with toasts for every failure

use std::time::Instant;

use thiserror::Error;

use crate::domain::analysis::{MediaFile, MediaPreview, RecommendedItem};
use crate::domain::error::CaptureError;
use crate::domain::recording::RecorderState;
use crate::domain::view::{ErrorToast, ResultsView, ViewError, ViewState};

use super::analyze::AnalyzeUseCase;
use super::capture::InputCapture;
use super::ports::{AudioCapture, EmotionAnalyzer, RecordingError};
use super::recorder::{RecorderController, ToggleOutcome};

/// Toast text for failures with no more specific message
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong during analysis. Please try again.";

/// Errors surfaced by session operations. Each one has already been shown as a
/// toast (except `Busy`, which is silently ignored) when it is returned.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Recording(#[from] RecordingError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error("An analysis is already in progress")]
    Busy,

    #[error("Unexpected error during analysis: {0}")]
    Unexpected(String),
}

/// Hooks around the loading phase of an analysis
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct AnalyzeCallbacks {
    /// Called after the view enters LOADING, before the request is sent
    pub on_loading_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called once the request settles (service reply or fallback)
    pub on_loading_end: Option<Box<dyn Fn(bool) + Send + Sync>>,
}

/// One interactive session. Owns every piece of mutable UI state so that event
/// handlers get it by reference instead of through globals.
pub struct AnalysisSession<A: EmotionAnalyzer, R: AudioCapture> {
    input: InputCapture,
    recorder: RecorderController<R>,
    analyze: AnalyzeUseCase<A>,
    view: ViewState,
}

impl<A: EmotionAnalyzer, R: AudioCapture> AnalysisSession<A, R> {
    pub fn new(analyzer: A, device: R) -> Self {
        Self {
            input: InputCapture::new(),
            recorder: RecorderController::new(device),
            analyze: AnalyzeUseCase::new(analyzer),
            view: ViewState::new(),
        }
    }

    pub fn input(&self) -> &InputCapture {
        &self.input
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn recorder_state(&self) -> RecorderState {
        self.recorder.state()
    }

    fn fail(&mut self, err: SessionError) -> SessionError {
        let message = match &err {
            SessionError::Unexpected(_) => GENERIC_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        };
        self.view.show_toast(message, Instant::now());
        err
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.set_text(text);
    }

    pub fn select_image(&mut self, file: MediaFile) -> Result<MediaPreview, SessionError> {
        match self.input.select_image(file) {
            Ok(preview) => Ok(preview),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    pub fn select_audio(&mut self, file: MediaFile) -> Result<MediaPreview, SessionError> {
        match self.input.select_audio(file) {
            Ok(preview) => Ok(preview),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    pub async fn start_recording(&mut self) -> Result<(), SessionError> {
        match self.recorder.start().await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    pub async fn stop_recording(&mut self) -> Result<MediaPreview, SessionError> {
        match self.recorder.stop(&mut self.input).await {
            Ok(preview) => Ok(preview),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    pub async fn toggle_recording(&mut self) -> Result<ToggleOutcome, SessionError> {
        match self.recorder.toggle(&mut self.input).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Run one analysis over the current input.
    ///
    /// Ignored while another analysis is loading. Input errors leave the view
    /// IDLE with a toast. Service failures are absorbed by the fallback, so a
    /// valid request always ends in RESULTS.
    pub async fn analyze(&mut self, callbacks: AnalyzeCallbacks) -> Result<&ResultsView, SessionError> {
        if self.view.is_loading() {
            return Err(SessionError::Busy);
        }

        let request = match self.input.build_request() {
            Ok(request) => request,
            Err(e) => {
                self.view.hide_all();
                return Err(self.fail(e.into()));
            }
        };
        let provided = request.provided();

        if let Err(e) = self.view.begin_loading() {
            self.view.hide_all();
            return Err(self.fail(SessionError::Unexpected(e.to_string())));
        }
        if let Some(ref cb) = callbacks.on_loading_start {
            cb();
        }

        let outcome = self.analyze.submit(&request).await;

        if let Some(ref cb) = callbacks.on_loading_end {
            cb(outcome.succeeded);
        }

        if let Err(e) = self.view.show_results(outcome, provided) {
            self.view.hide_all();
            return Err(self.fail(SessionError::Unexpected(e.to_string())));
        }

        match self.view.results() {
            Some(results) => Ok(results),
            None => Err(SessionError::Unexpected("results missing after analysis".into())),
        }
    }

    /// Open the detail view for card `number` (1-based)
    pub fn open_detail(&mut self, number: usize) -> Result<RecommendedItem, SessionError> {
        match self.view.open_detail(number) {
            Ok(item) => Ok(item.clone()),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    pub fn close_detail(&mut self) {
        self.view.close_detail();
    }

    pub fn dismiss_toast(&mut self) {
        self.view.dismiss_toast();
    }

    /// Currently visible toast, honoring the auto-dismiss timeout
    pub fn toast(&mut self) -> Option<&ErrorToast> {
        self.view.visible_toast(Instant::now())
    }

    /// Clear every input and preview and hide all result sections
    pub fn reset(&mut self) {
        self.input.clear();
        self.view.hide_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{AnalysisError, ServiceReply};
    use crate::domain::analysis::{AnalysisRequest, FusionResult, ModalityResult};
    use crate::domain::view::{visible_rows, final_banner, ViewSection};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Unreachable {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl EmotionAnalyzer for Unreachable {
        async fn analyze(&self, _request: &AnalysisRequest) -> Result<ServiceReply, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AnalysisError::Transport("connection refused".into()))
        }
    }

    struct Verbose;

    #[async_trait]
    impl EmotionAnalyzer for Verbose {
        async fn analyze(&self, _request: &AnalysisRequest) -> Result<ServiceReply, AnalysisError> {
            Ok(ServiceReply {
                session_id: Some("abc".into()),
                fusion: FusionResult {
                    final_emotion: "angry".into(),
                    final_confidence: 0.61,
                    text: Some(ModalityResult::new("angry", 0.7)),
                    face: Some(ModalityResult::new("sad", 0.5)),
                    audio: Some(ModalityResult::new("fear", 0.4)),
                },
                recommendations: Vec::new(),
            })
        }
    }

    struct DeniedMic;

    #[async_trait]
    impl AudioCapture for DeniedMic {
        async fn start(&self) -> Result<(), RecordingError> {
            Err(RecordingError::DeviceAccess("permission denied".into()))
        }

        async fn stop(&self) -> Result<MediaFile, RecordingError> {
            Err(RecordingError::NotRecording)
        }

        fn is_recording(&self) -> bool {
            false
        }
    }

    fn offline_session() -> (AnalysisSession<Unreachable, DeniedMic>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let session = AnalysisSession::new(
            Unreachable {
                calls: Arc::clone(&calls),
            },
            DeniedMic,
        );
        (session, calls)
    }

    #[tokio::test]
    async fn happy_text_offline_scenario() {
        let (mut session, _) = offline_session();
        session.set_text("I am so happy today");

        let results = session.analyze(AnalyzeCallbacks::default()).await.unwrap();
        let outcome = &results.outcome;

        assert!(!outcome.succeeded);
        assert_eq!(outcome.fusion.final_emotion, "happy");
        assert_eq!(outcome.fusion.final_confidence, 0.75);
        assert_eq!(outcome.fusion.text, Some(ModalityResult::new("happy", 0.8)));
        assert!(outcome.fusion.face.is_none());
        assert!(outcome.fusion.audio.is_none());
        assert_eq!(outcome.recommendations.len(), 4);

        let rows = visible_rows(&outcome.fusion, results.provided);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "text");
        assert_eq!(rows[0].percent, 80);

        let banner = final_banner(&outcome.fusion);
        assert_eq!(banner.emotion, "HAPPY");
        assert_eq!(banner.percent, 75);

        assert_eq!(session.view().section(), ViewSection::Results);
    }

    #[tokio::test]
    async fn empty_input_blocks_submission_with_toast() {
        let (mut session, calls) = offline_session();

        let err = session.analyze(AnalyzeCallbacks::default()).await.unwrap_err();

        assert!(matches!(err, SessionError::Capture(CaptureError::EmptyInput)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.view().section(), ViewSection::Idle);
        assert!(session.toast().is_some());
    }

    #[tokio::test]
    async fn loading_callbacks_fire_around_submission() {
        let (mut session, _) = offline_session();
        session.set_text("hi");

        let started = Arc::new(AtomicUsize::new(0));
        let ended = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&started);
        let e = Arc::clone(&ended);
        let callbacks = AnalyzeCallbacks {
            on_loading_start: Some(Box::new(move || {
                s.fetch_add(1, Ordering::SeqCst);
            })),
            on_loading_end: Some(Box::new(move |succeeded| {
                assert!(!succeeded);
                e.fetch_add(1, Ordering::SeqCst);
            })),
        };

        session.analyze(callbacks).await.unwrap();
        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert_eq!(ended.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unrequested_service_modalities_are_hidden() {
        let mut session = AnalysisSession::new(Verbose, DeniedMic);
        session
            .select_image(MediaFile::new("me.png", "image/png", vec![1]))
            .unwrap();

        let results = session.analyze(AnalyzeCallbacks::default()).await.unwrap();
        assert!(results.outcome.succeeded);
        // service sent no items, fallback list stands in
        assert_eq!(results.outcome.recommendations.len(), 4);

        let rows = visible_rows(&results.outcome.fusion, results.provided);
        let labels: Vec<_> = rows.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["face"]);
    }

    #[tokio::test]
    async fn wrong_media_type_shows_toast_and_clears() {
        let (mut session, _) = offline_session();
        let err = session
            .select_audio(MediaFile::new("face.png", "image/png", vec![1]))
            .unwrap_err();

        assert!(matches!(err, SessionError::Capture(CaptureError::InvalidMediaType { .. })));
        assert!(session.input().audio().is_none());
        assert!(session.toast().is_some());
    }

    #[tokio::test]
    async fn denied_microphone_reverts_to_idle_with_toast() {
        let (mut session, _) = offline_session();
        let err = session.toggle_recording().await.unwrap_err();

        assert!(matches!(err, SessionError::Recording(RecordingError::DeviceAccess(_))));
        assert_eq!(session.recorder_state(), RecorderState::Idle);
        assert!(session.toast().is_some());
    }

    #[tokio::test]
    async fn reset_clears_inputs_and_results() {
        let (mut session, _) = offline_session();
        session.set_text("hello");
        session
            .select_image(MediaFile::new("me.png", "image/png", vec![1]))
            .unwrap();
        session.analyze(AnalyzeCallbacks::default()).await.unwrap();
        session.open_detail(1).unwrap();

        session.reset();

        assert_eq!(session.input().text(), "");
        assert!(session.input().previews().is_empty());
        assert_eq!(session.view().section(), ViewSection::Idle);
        assert!(session.view().results().is_none());
        assert!(session.view().detail().is_none());
    }

    #[tokio::test]
    async fn resubmission_after_results_works() {
        let (mut session, calls) = offline_session();
        session.set_text("again");
        session.analyze(AnalyzeCallbacks::default()).await.unwrap();
        session.analyze(AnalyzeCallbacks::default()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn detail_view_reads_normalized_item() {
        let (mut session, _) = offline_session();
        session.set_text("hello");
        session.analyze(AnalyzeCallbacks::default()).await.unwrap();

        let item = session.open_detail(3).unwrap();
        assert_eq!(item.title, "Pulp Fiction");
        assert!(session.open_detail(9).is_err());
        session.close_detail();
        assert!(session.view().detail().is_none());
    }
}
