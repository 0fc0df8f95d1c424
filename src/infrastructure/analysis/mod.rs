//! Emotion analysis service adapters

mod http;
pub mod normalize;

pub use http::HttpEmotionAnalyzer;
