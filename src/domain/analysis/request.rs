//! Analysis request value object

use crate::domain::error::CaptureError;

use super::media::{MediaFile, MediaKind};

/// Which modalities the user actually supplied. Drives result visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvidedModalities {
    pub text: bool,
    pub image: bool,
    pub audio: bool,
}

impl ProvidedModalities {
    pub fn any(&self) -> bool {
        self.text || self.image || self.audio
    }
}

/// Validated input for one analysis attempt. At least one field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    text: Option<String>,
    image: Option<MediaFile>,
    audio: Option<MediaFile>,
}

impl AnalysisRequest {
    /// Build a request, trimming text and checking media kinds.
    ///
    /// Blank text counts as absent. Fails with `EmptyInput` when nothing is left.
    pub fn new(
        text: Option<&str>,
        image: Option<MediaFile>,
        audio: Option<MediaFile>,
    ) -> Result<Self, CaptureError> {
        let text = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        if let Some(ref file) = image {
            check_kind(file, MediaKind::Image)?;
        }
        if let Some(ref file) = audio {
            check_kind(file, MediaKind::Audio)?;
        }

        if text.is_none() && image.is_none() && audio.is_none() {
            return Err(CaptureError::EmptyInput);
        }

        Ok(Self { text, image, audio })
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn image(&self) -> Option<&MediaFile> {
        self.image.as_ref()
    }

    pub fn audio(&self) -> Option<&MediaFile> {
        self.audio.as_ref()
    }

    pub fn provided(&self) -> ProvidedModalities {
        ProvidedModalities {
            text: self.text.is_some(),
            image: self.image.is_some(),
            audio: self.audio.is_some(),
        }
    }
}

pub(crate) fn check_kind(file: &MediaFile, kind: MediaKind) -> Result<(), CaptureError> {
    if file.is_kind(kind) {
        Ok(())
    } else {
        Err(CaptureError::InvalidMediaType {
            expected: kind,
            actual: file.mime_type().to_string(),
            name: file.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> MediaFile {
        MediaFile::new("face.png", "image/png", vec![1])
    }

    fn audio() -> MediaFile {
        MediaFile::new("voice.wav", "audio/wav", vec![2])
    }

    #[test]
    fn all_absent_is_rejected() {
        assert_eq!(
            AnalysisRequest::new(None, None, None),
            Err(CaptureError::EmptyInput)
        );
    }

    #[test]
    fn blank_text_counts_as_absent() {
        assert_eq!(
            AnalysisRequest::new(Some("   \n\t"), None, None),
            Err(CaptureError::EmptyInput)
        );
    }

    #[test]
    fn any_single_modality_is_enough() {
        assert!(AnalysisRequest::new(Some("hi"), None, None).is_ok());
        assert!(AnalysisRequest::new(None, Some(image()), None).is_ok());
        assert!(AnalysisRequest::new(None, None, Some(audio())).is_ok());
    }

    #[test]
    fn text_is_trimmed() {
        let request = AnalysisRequest::new(Some("  I am so happy today  "), None, None).unwrap();
        assert_eq!(request.text(), Some("I am so happy today"));
    }

    #[test]
    fn provided_flags_follow_fields() {
        let request = AnalysisRequest::new(Some("x"), None, Some(audio())).unwrap();
        let provided = request.provided();
        assert!(provided.text);
        assert!(!provided.image);
        assert!(provided.audio);
        assert!(provided.any());
        assert!(!ProvidedModalities::default().any());
    }

    #[test]
    fn mismatched_media_is_rejected() {
        let wrong = MediaFile::new("voice.wav", "audio/wav", vec![]);
        let err = AnalysisRequest::new(Some("x"), Some(wrong), None).unwrap_err();
        assert!(matches!(
            err,
            CaptureError::InvalidMediaType {
                expected: MediaKind::Image,
                ..
            }
        ));
    }
}
