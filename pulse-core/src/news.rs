//! News data structures

use serde::{Deserialize, Serialize};

/// Image shown for headlines that arrive without one
pub const NEWS_IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/150";

/// A business headline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Publisher name (e.g., "Reuters")
    pub source: String,
    pub title: String,
    pub url: String,
    #[serde(default = "default_image_url")]
    pub image_url: String,
    /// ISO-8601 publication time, as reported upstream
    pub published_at: String,
}

fn default_image_url() -> String {
    NEWS_IMAGE_PLACEHOLDER.to_string()
}

impl NewsItem {
    /// Create an item, substituting the placeholder for a missing or blank image
    pub fn new(
        source: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        image_url: Option<String>,
        published_at: impl Into<String>,
    ) -> Self {
        let image_url = image_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(default_image_url);

        Self {
            source: source.into(),
            title: title.into(),
            url: url.into(),
            image_url,
            published_at: published_at.into(),
        }
    }
}
