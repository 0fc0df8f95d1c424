//! Recommended movie items and the built-in fallback catalog

use std::fmt;

/// Thumbnail used when an item carries none
pub const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/300x450?text=No+Image";

/// Title used when an item carries none
pub const UNTITLED: &str = "Untitled";

/// Number of catalog entries used as fallback recommendations
pub const FALLBACK_RECOMMENDATION_COUNT: usize = 4;

/// A field the service may send as either a string or a number
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    Text(String),
    Number(f64),
}

impl DisplayValue {
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl Default for DisplayValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for DisplayValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for DisplayValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// One normalized recommendation card
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedItem {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub rating: DisplayValue,
    pub year: DisplayValue,
    pub thumbnail_url: String,
    pub description: Option<String>,
}

impl Default for RecommendedItem {
    fn default() -> Self {
        Self {
            id: 0,
            title: UNTITLED.to_string(),
            genre: String::new(),
            rating: DisplayValue::empty(),
            year: DisplayValue::empty(),
            thumbnail_url: PLACEHOLDER_THUMBNAIL.to_string(),
            description: None,
        }
    }
}

fn catalog_item(id: i64, title: &str, genre: &str, rating: f64, year: f64, color: &str) -> RecommendedItem {
    RecommendedItem {
        id,
        title: title.to_string(),
        genre: genre.to_string(),
        rating: DisplayValue::Number(rating),
        year: DisplayValue::Number(year),
        thumbnail_url: format!(
            "https://via.placeholder.com/300x450/{}/eee?text=Movie+{}",
            color, id
        ),
        description: None,
    }
}

/// The built-in placeholder catalog, used only when the service cannot answer
pub fn fallback_catalog() -> Vec<RecommendedItem> {
    vec![
        catalog_item(1, "The Shawshank Redemption", "Drama", 9.3, 1994.0, "1a1a2e"),
        catalog_item(2, "The Dark Knight", "Action", 9.0, 2008.0, "16213e"),
        catalog_item(3, "Pulp Fiction", "Crime", 8.9, 1994.0, "0f3460"),
        catalog_item(4, "Forrest Gump", "Drama", 8.8, 1994.0, "533483"),
        catalog_item(5, "Inception", "Sci-Fi", 8.8, 2010.0, "2c3e50"),
        catalog_item(6, "The Godfather", "Crime", 9.2, 1972.0, "8b4513"),
    ]
}

/// First entries of the catalog shown in place of service recommendations
pub fn fallback_recommendations() -> Vec<RecommendedItem> {
    fallback_catalog()
        .into_iter()
        .take(FALLBACK_RECOMMENDATION_COUNT)
        .collect()
}
