//! Result visibility policy

use crate::domain::analysis::{
    confidence_percent, emotion_emoji, FusionResult, Modality, ProvidedModalities,
};

/// Label of the synthetic row shown when no modality row qualifies
pub const FINAL_ROW_LABEL: &str = "final";

/// Final-emotion banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalBanner {
    pub emotion: String,
    pub percent: u8,
}

/// One confidence row of the individual analysis panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalityRow {
    pub label: &'static str,
    pub emotion: String,
    pub emoji: &'static str,
    pub percent: u8,
}

pub fn final_banner(fusion: &FusionResult) -> FinalBanner {
    FinalBanner {
        emotion: fusion.final_emotion.to_uppercase(),
        percent: fusion.final_percent(),
    }
}

fn was_provided(provided: ProvidedModalities, modality: Modality) -> bool {
    match modality {
        Modality::Text => provided.text,
        Modality::Face => provided.image,
        Modality::Audio => provided.audio,
    }
}

/// Rows to render, in text/face/audio order.
///
/// A modality is shown only when the user supplied it and the result carries it.
/// Entries the user did not ask for are dropped even when the service returned
/// them. If nothing qualifies, a single `final` row stands in.
pub fn visible_rows(fusion: &FusionResult, provided: ProvidedModalities) -> Vec<ModalityRow> {
    let mut rows: Vec<ModalityRow> = Modality::ALL
        .iter()
        .filter(|m| was_provided(provided, **m))
        .filter_map(|m| {
            fusion.get(*m).map(|result| ModalityRow {
                label: m.as_str(),
                emotion: result.emotion.clone(),
                emoji: emotion_emoji(&result.emotion),
                percent: result.percent(),
            })
        })
        .collect();

    if rows.is_empty() {
        rows.push(ModalityRow {
            label: FINAL_ROW_LABEL,
            emotion: fusion.final_emotion.clone(),
            emoji: emotion_emoji(&fusion.final_emotion),
            percent: confidence_percent(fusion.final_confidence),
        });
    }

    rows
}
