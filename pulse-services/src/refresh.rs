//! Background refresh jobs that keep the snapshot current

use std::sync::Arc;

use tracing::{info, instrument, warn};

use pulse_core::{NewsItem, NewsQuery};
use pulse_providers::{Chain, ProviderSet};

use crate::article_service::ArticleService;
use crate::fallback::first_success;
use crate::snapshot_cache::SnapshotCache;

/// The news and featured article jobs, sharing one cache
pub struct RefreshJobs {
    news_chain: Chain<NewsQuery, NewsItem>,
    articles: ArticleService,
    cache: Arc<SnapshotCache>,
}

impl RefreshJobs {
    pub fn new(
        news_chain: Chain<NewsQuery, NewsItem>,
        articles: ArticleService,
        cache: Arc<SnapshotCache>,
    ) -> Self {
        Self {
            news_chain,
            articles,
            cache,
        }
    }

    pub fn from_providers(providers: &ProviderSet, cache: Arc<SnapshotCache>) -> Self {
        Self::new(
            providers.news_chain(),
            ArticleService::from_providers(providers),
            cache,
        )
    }

    pub fn cache(&self) -> &Arc<SnapshotCache> {
        &self.cache
    }

    /// Fetch headlines and swap them into the cache
    ///
    /// On failure the cached headlines are left untouched. Returns whether
    /// the cache was updated.
    #[instrument(skip(self))]
    pub async fn refresh_news(&self) -> bool {
        match first_success(&self.news_chain, &NewsQuery::default()).await {
            Ok(sourced) => {
                self.cache.replace_news(sourced.records).await;
                true
            }
            Err(failures) => {
                let reasons: Vec<String> = failures.iter().map(|e| e.to_string()).collect();
                warn!(
                    "News refresh failed, keeping {} cached article(s): [{}]",
                    self.cache.current().news_articles.len(),
                    reasons.join("; ")
                );
                false
            }
        }
    }

    /// Compose a new featured article and swap it into the cache
    #[instrument(skip(self))]
    pub async fn refresh_featured_article(&self) {
        let article = self.articles.compose_article().await;
        self.cache.replace_featured_article(article).await;
    }

    /// Run both jobs once, concurrently
    pub async fn run_startup(&self) {
        info!("Running startup refresh");
        let (news_updated, _) =
            tokio::join!(self.refresh_news(), self.refresh_featured_article());
        info!("Startup refresh complete (news updated: {})", news_updated);
    }
}
