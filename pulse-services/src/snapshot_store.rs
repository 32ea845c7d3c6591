//! JSON file persistence for the home page snapshot

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use pulse_core::{FeaturedArticle, NewsItem, Snapshot};

const FEATURED_ARTICLE_KEY: &str = "featured_article";
const NEWS_ARTICLES_KEY: &str = "news_articles";

/// Errors from snapshot persistence
#[derive(Debug, thiserror::Error)]
pub enum SnapshotStoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whole-document store for a [`Snapshot`]
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Read the persisted snapshot
    ///
    /// Never fails: a missing or unreadable file, invalid JSON, or a key that
    /// is absent or incomplete falls back to placeholder content for that key.
    pub async fn load(&self) -> Snapshot {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No snapshot at {}, starting from placeholder", self.path.display());
                return Snapshot::placeholder();
            }
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return Snapshot::placeholder();
            }
        };

        let document: Value = match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(e) => {
                warn!("Corrupt snapshot at {}: {}", self.path.display(), e);
                return Snapshot::placeholder();
            }
        };

        let snapshot = parse_document(&document);
        debug!(
            "Loaded snapshot from {} ({} news articles)",
            self.path.display(),
            snapshot.news_articles.len()
        );
        snapshot
    }

    /// Overwrite the file with `snapshot`, via a temporary file and rename
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotStoreError> {
        let body = serde_json::to_vec_pretty(snapshot)?;
        let temp = self.temp_path();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| SnapshotStoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&temp, body)
            .await
            .map_err(|source| SnapshotStoreError::Io {
                path: temp.clone(),
                source,
            })?;

        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|source| SnapshotStoreError::Io {
                path: self.path.clone(),
                source,
            })?;

        debug!("Persisted snapshot to {}", self.path.display());
        Ok(())
    }
}

/// Decode each top-level key independently
fn parse_document(document: &Value) -> Snapshot {
    let featured_article = document
        .get(FEATURED_ARTICLE_KEY)
        .cloned()
        .and_then(|v| serde_json::from_value::<FeaturedArticle>(v).ok())
        .filter(FeaturedArticle::is_complete)
        .unwrap_or_else(|| {
            warn!("Persisted featured article missing or incomplete, using placeholder");
            FeaturedArticle::placeholder()
        });

    let news_articles = document
        .get(NEWS_ARTICLES_KEY)
        .cloned()
        .and_then(|v| serde_json::from_value::<Vec<NewsItem>>(v).ok())
        .unwrap_or_else(|| {
            warn!("Persisted news list missing or invalid, starting empty");
            Vec::new()
        });

    Snapshot {
        featured_article,
        news_articles,
    }
}
