//! Input capture: the user's current text, image and audio selections

use crate::domain::analysis::{
    check_kind, AnalysisRequest, MediaFile, MediaKind, MediaPreview, ProvidedModalities,
};
use crate::domain::error::CaptureError;

/// Current, not yet submitted, user input.
#[derive(Debug, Default)]
pub struct InputCapture {
    text: String,
    image: Option<MediaFile>,
    audio: Option<MediaFile>,
}

impl InputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Select an image. A file that is not `image/*` clears the selection.
    pub fn select_image(&mut self, file: MediaFile) -> Result<MediaPreview, CaptureError> {
        Self::select(&mut self.image, file, MediaKind::Image)
    }

    /// Select an audio file. A file that is not `audio/*` clears the selection.
    pub fn select_audio(&mut self, file: MediaFile) -> Result<MediaPreview, CaptureError> {
        Self::select(&mut self.audio, file, MediaKind::Audio)
    }

    fn select(
        slot: &mut Option<MediaFile>,
        file: MediaFile,
        kind: MediaKind,
    ) -> Result<MediaPreview, CaptureError> {
        *slot = None;
        check_kind(&file, kind)?;
        let preview = file.preview(kind);
        *slot = Some(file);
        Ok(preview)
    }

    pub fn image(&self) -> Option<&MediaFile> {
        self.image.as_ref()
    }

    pub fn audio(&self) -> Option<&MediaFile> {
        self.audio.as_ref()
    }

    /// Previews of the current selections, image first
    pub fn previews(&self) -> Vec<MediaPreview> {
        let image = self.image.as_ref().map(|f| f.preview(MediaKind::Image));
        let audio = self.audio.as_ref().map(|f| f.preview(MediaKind::Audio));
        image.into_iter().chain(audio).collect()
    }

    pub fn provided(&self) -> ProvidedModalities {
        ProvidedModalities {
            text: !self.text.trim().is_empty(),
            image: self.image.is_some(),
            audio: self.audio.is_some(),
        }
    }

    /// Snapshot the current input as a validated request
    pub fn build_request(&self) -> Result<AnalysisRequest, CaptureError> {
        AnalysisRequest::new(Some(self.text.as_str()), self.image.clone(), self.audio.clone())
    }

    /// Drop all text, selections and previews
    pub fn clear(&mut self) {
        self.text.clear();
        self.image = None;
        self.audio = None;
    }
}
