//! The cached home page aggregate: featured article plus headlines

use serde::{Deserialize, Serialize};

use crate::news::NewsItem;

/// Image used whenever no stock photo could be found
pub const ARTICLE_IMAGE_PLACEHOLDER: &str =
    "https://images.pexels.com/photos/730547/pexels-photo-730547.jpeg";

/// Number of words kept in an article summary
pub const SUMMARY_WORDS: usize = 30;

/// The daily generated market commentary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedArticle {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image_url: String,
}

impl FeaturedArticle {
    /// Derive title and summary from a topic and its body text
    ///
    /// The title keeps the topic up to its first parenthesis; the summary is the
    /// first [`SUMMARY_WORDS`] words of `content` followed by an ellipsis.
    pub fn compose(topic: &str, content: String, image_url: String) -> Self {
        Self {
            title: title_for(topic),
            summary: summarize(&content),
            content,
            image_url,
        }
    }

    /// Shown until the first article has been generated
    pub fn placeholder() -> Self {
        Self {
            title: "Welcome to CryptoPulse AI".to_string(),
            summary: "Real-time cryptocurrency dashboard with AI insights".to_string(),
            content: "Your dashboard is loading...".to_string(),
            image_url: ARTICLE_IMAGE_PLACEHOLDER.to_string(),
        }
    }

    /// All four fields carry text
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.summary, &self.content, &self.image_url]
            .iter()
            .all(|f| !f.trim().is_empty())
    }
}

/// Article title for a topic
pub fn title_for(topic: &str) -> String {
    let subject = topic.split('(').next().unwrap_or(topic).trim();
    format!("Market Analysis: {}", subject)
}

/// First [`SUMMARY_WORDS`] whitespace-delimited words plus an ellipsis
pub fn summarize(content: &str) -> String {
    let words: Vec<&str> = content.split_whitespace().take(SUMMARY_WORDS).collect();
    format!("{}...", words.join(" "))
}

/// Everything the home page renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub featured_article: FeaturedArticle,
    pub news_articles: Vec<NewsItem>,
}

impl Snapshot {
    /// Initial state before any refresh has completed
    pub fn placeholder() -> Self {
        Self {
            featured_article: FeaturedArticle::placeholder(),
            news_articles: Vec::new(),
        }
    }

    /// Copy with the headline list replaced
    pub fn with_news(&self, news_articles: Vec<NewsItem>) -> Self {
        Self {
            featured_article: self.featured_article.clone(),
            news_articles,
        }
    }

    /// Copy with the featured article replaced
    pub fn with_featured_article(&self, featured_article: FeaturedArticle) -> Self {
        Self {
            featured_article,
            news_articles: self.news_articles.clone(),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::placeholder()
    }
}
