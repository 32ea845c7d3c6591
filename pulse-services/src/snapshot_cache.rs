//! Snapshot Cache
//!
//! Holds the latest home page [`Snapshot`]. Readers take an `Arc` clone of the
//! current value and never wait on a writer; writers are serialized, compute
//! the full replacement, persist it and then swap it in.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info};

use pulse_core::{FeaturedArticle, NewsItem, Snapshot};

use crate::snapshot_store::SnapshotStore;

/// When each part of the snapshot was last replaced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    pub last_news_refresh: Option<DateTime<Utc>>,
    pub last_article_refresh: Option<DateTime<Utc>>,
}

/// Process-wide snapshot holder
pub struct SnapshotCache {
    current: RwLock<Arc<Snapshot>>,
    status: RwLock<CacheStatus>,
    /// Serializes writers; held across persist + swap
    write_lock: Mutex<()>,
    store: Option<SnapshotStore>,
}

impl SnapshotCache {
    /// Load the persisted snapshot (or the placeholder) and persist future updates
    pub async fn load(store: SnapshotStore) -> Self {
        let snapshot = store.load().await;
        Self::build(snapshot, Some(store))
    }

    /// Cache without a backing file
    pub fn in_memory(snapshot: Snapshot) -> Self {
        Self::build(snapshot, None)
    }

    fn build(snapshot: Snapshot, store: Option<SnapshotStore>) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            status: RwLock::new(CacheStatus::default()),
            write_lock: Mutex::new(()),
            store,
        }
    }

    /// The latest complete snapshot
    pub fn current(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    pub fn status(&self) -> CacheStatus {
        *self.status.read()
    }

    /// Replace the headline list, keeping the featured article
    pub async fn replace_news(&self, news_articles: Vec<NewsItem>) {
        let count = news_articles.len();
        self.update(|snapshot| snapshot.with_news(news_articles)).await;
        self.status.write().last_news_refresh = Some(Utc::now());
        info!("Snapshot news replaced ({} articles)", count);
    }

    /// Replace the featured article, keeping the headlines
    pub async fn replace_featured_article(&self, article: FeaturedArticle) {
        let title = article.title.clone();
        self.update(|snapshot| snapshot.with_featured_article(article))
            .await;
        self.status.write().last_article_refresh = Some(Utc::now());
        info!("Snapshot featured article replaced: {}", title);
    }

    async fn update<F>(&self, apply: F)
    where
        F: FnOnce(&Snapshot) -> Snapshot,
    {
        let _guard = self.write_lock.lock().await;

        let next = Arc::new(apply(&self.current()));

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&next).await {
                error!("Failed to persist snapshot: {}", e);
            }
        }

        *self.current.write() = next;
    }
}
