//! Service response normalization
//!
//! The analysis service is loose about field names (`final_emotion` vs
//! `finalEmotion`, `face` vs `face_result`, `poster` vs `thumbnail`, ...). This is
//! the only place those aliases are resolved; everything past it sees the
//! canonical domain types.

use serde_json::{Map, Value};

use crate::application::ports::{AnalysisError, ServiceReply};
use crate::domain::analysis::{
    DisplayValue, FusionResult, ModalityResult, RecommendedItem, NEUTRAL, PLACEHOLDER_THUMBNAIL,
    UNTITLED,
};

const SESSION_ID: &[&str] = &["session_id", "sessionId"];
const EMOTION_ANALYSIS: &[&str] = &["emotion_analysis", "emotionAnalysis"];
const RECOMMENDATIONS: &[&str] = &["recommendations"];

const FINAL_EMOTION: &[&str] = &["final_emotion", "finalEmotion"];
const FINAL_CONFIDENCE: &[&str] = &["final_confidence", "finalConfidence"];
const TEXT: &[&str] = &["text", "text_result", "textResult"];
const FACE: &[&str] = &["face", "face_result", "faceResult"];
const AUDIO: &[&str] = &["audio", "audio_result", "audioResult"];

const ITEM_ID: &[&str] = &["id"];
const ITEM_THUMBNAIL: &[&str] = &["thumbnail", "poster", "image"];
const ITEM_TITLE: &[&str] = &["title", "name"];
const ITEM_GENRE: &[&str] = &["genre", "genres", "genre_names"];
const ITEM_RATING: &[&str] = &["rating", "vote_average"];
const ITEM_YEAR: &[&str] = &["year", "release_year"];
const ITEM_DESCRIPTION: &[&str] = &["description"];

/// Whether a value carries information (null, "", 0, false and empty lists don't)
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
    }
}

/// First informative value among `keys`, in order
fn first<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| obj.get(*k)).find(|v| is_truthy(v))
}

/// First non-null value among `keys`; explicit zeros and empty strings count
fn present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| obj.get(*k)).find(|v| !v.is_null())
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_list_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let names: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(o) => o.get("name").and_then(as_text),
                    other => as_text(other),
                })
                .filter(|s| !s.is_empty())
                .collect();
            Some(names.join(", "))
        }
        other => as_text(other),
    }
}

fn as_display(value: &Value) -> DisplayValue {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(DisplayValue::Number)
            .unwrap_or_else(|| DisplayValue::Text(n.to_string())),
        Value::String(s) => DisplayValue::Text(s.clone()),
        _ => DisplayValue::empty(),
    }
}

fn normalize_modality(value: Option<&Value>) -> Option<ModalityResult> {
    let obj = value?.as_object()?;
    let emotion = first(obj, &["emotion"])
        .and_then(Value::as_str)
        .unwrap_or(NEUTRAL);
    let confidence = first(obj, &["confidence"])
        .and_then(as_number)
        .unwrap_or(0.0);
    Some(ModalityResult::new(emotion, confidence))
}

/// Canonical fusion result from the service's `emotion_analysis` object
pub fn normalize_fusion(value: Option<&Value>) -> FusionResult {
    let Some(obj) = value.and_then(Value::as_object) else {
        return FusionResult::default();
    };

    FusionResult {
        final_emotion: first(obj, FINAL_EMOTION)
            .and_then(Value::as_str)
            .unwrap_or(NEUTRAL)
            .to_string(),
        final_confidence: present(obj, FINAL_CONFIDENCE)
            .and_then(as_number)
            .unwrap_or(0.0),
        text: normalize_modality(first(obj, TEXT)),
        face: normalize_modality(first(obj, FACE)),
        audio: normalize_modality(first(obj, AUDIO)),
    }
}

/// Canonical recommendation item with every field defaulted
pub fn normalize_item(value: &Value) -> RecommendedItem {
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);

    RecommendedItem {
        id: first(obj, ITEM_ID)
            .and_then(as_number)
            .map(|n| n as i64)
            .unwrap_or(0),
        title: first(obj, ITEM_TITLE)
            .and_then(as_text)
            .unwrap_or_else(|| UNTITLED.to_string()),
        genre: first(obj, ITEM_GENRE)
            .and_then(as_list_text)
            .unwrap_or_default(),
        rating: first(obj, ITEM_RATING).map(as_display).unwrap_or_default(),
        year: first(obj, ITEM_YEAR).map(as_display).unwrap_or_default(),
        thumbnail_url: first(obj, ITEM_THUMBNAIL)
            .and_then(as_text)
            .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string()),
        description: first(obj, ITEM_DESCRIPTION).and_then(as_text),
    }
}

/// Normalize a whole `/analyze_emotion` reply body
pub fn normalize_reply(body: &Value) -> Result<ServiceReply, AnalysisError> {
    let obj = body
        .as_object()
        .ok_or_else(|| AnalysisError::Parse("expected a JSON object".to_string()))?;

    let recommendations = first(obj, RECOMMENDATIONS)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_item).collect())
        .unwrap_or_default();

    Ok(ServiceReply {
        session_id: first(obj, SESSION_ID).and_then(as_text),
        fusion: normalize_fusion(first(obj, EMOTION_ANALYSIS)),
        recommendations,
    })
}
