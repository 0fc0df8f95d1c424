//! Emotion results: per-modality confidences and the fused outcome

use std::fmt;

/// Label used when the service omits an emotion
pub const NEUTRAL: &str = "neutral";

/// Per-modality result channels, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Text,
    Face,
    Audio,
}

impl Modality {
    /// Fixed render order
    pub const ALL: [Modality; 3] = [Modality::Text, Modality::Face, Modality::Audio];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Face => "face",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Convert a [0,1] confidence into a whole percentage clamped to [0,100]
pub fn confidence_percent(confidence: f64) -> u8 {
    if !confidence.is_finite() {
        return 0;
    }
    (confidence * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Emoji for an emotion label, neutral face for anything unknown
pub fn emotion_emoji(emotion: &str) -> &'static str {
    match emotion.to_ascii_lowercase().as_str() {
        "happy" => "😊",
        "sad" => "😢",
        "angry" => "😠",
        "fear" => "😨",
        "neutral" => "😐",
        "surprise" => "😲",
        "romantic" => "💕",
        _ => "😐",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalityResult {
    pub emotion: String,
    pub confidence: f64,
}

impl ModalityResult {
    pub fn new(emotion: impl Into<String>, confidence: f64) -> Self {
        Self {
            emotion: emotion.into(),
            confidence,
        }
    }

    pub fn percent(&self) -> u8 {
        confidence_percent(self.confidence)
    }
}

/// Canonical fused result. Service field aliases never reach this type.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionResult {
    pub final_emotion: String,
    pub final_confidence: f64,
    pub text: Option<ModalityResult>,
    pub face: Option<ModalityResult>,
    pub audio: Option<ModalityResult>,
}

impl FusionResult {
    pub fn get(&self, modality: Modality) -> Option<&ModalityResult> {
        match modality {
            Modality::Text => self.text.as_ref(),
            Modality::Face => self.face.as_ref(),
            Modality::Audio => self.audio.as_ref(),
        }
    }

    pub fn final_percent(&self) -> u8 {
        confidence_percent(self.final_confidence)
    }
}

impl Default for FusionResult {
    fn default() -> Self {
        Self {
            final_emotion: NEUTRAL.to_string(),
            final_confidence: 0.0,
            text: None,
            face: None,
            audio: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(confidence_percent(0.754), 75);
        assert_eq!(confidence_percent(0.758), 76);
        assert_eq!(confidence_percent(1.7), 100);
        assert_eq!(confidence_percent(-0.2), 0);
        assert_eq!(confidence_percent(f64::NAN), 0);
    }

    #[test]
    fn emoji_lookup_defaults_to_neutral() {
        assert_eq!(emotion_emoji("happy"), "😊");
        assert_eq!(emotion_emoji("Romantic"), "💕");
        assert_eq!(emotion_emoji("bored"), "😐");
    }

    #[test]
    fn get_by_modality() {
        let fusion = FusionResult {
            face: Some(ModalityResult::new("sad", 0.4)),
            ..Default::default()
        };
        assert!(fusion.get(Modality::Text).is_none());
        assert_eq!(fusion.get(Modality::Face).map(|r| r.percent()), Some(40));
    }

    #[test]
    fn modality_order_is_text_face_audio() {
        let labels: Vec<_> = Modality::ALL.iter().map(|m| m.as_str()).collect();
        assert_eq!(labels, vec!["text", "face", "audio"]);
    }
}
