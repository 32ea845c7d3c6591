//! NewsAPI client for business headlines

use std::time::Duration;

use async_trait::async_trait;
use pulse_core::{AdapterError, AdapterResult, NewsItem, NewsQuery, ProviderId};
use reqwest::Client;
use tracing::{info, instrument, warn};

use crate::adapter::Adapter;
use crate::config::{ConfigError, ProviderConfig};
use crate::http::{build_client, decode, fetch_raw};
use crate::types::{NewsApiArticle, NewsApiResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Title NewsAPI substitutes for withdrawn articles
const REMOVED_MARKER: &str = "[Removed]";

/// NewsAPI client
#[derive(Clone)]
pub struct NewsApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl NewsApiClient {
    /// Create a new NewsAPI client
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            http: build_client(REQUEST_TIMEOUT)?,
            base_url: config.news_api_url.clone(),
            api_key: config.news_api_key.clone(),
        })
    }

    /// Check if the client is configured (has an API key)
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

fn article_to_item(article: NewsApiArticle) -> Option<NewsItem> {
    let title = article.title.filter(|t| !t.trim().is_empty() && t != REMOVED_MARKER)?;
    let url = article.url.filter(|u| !u.trim().is_empty())?;
    let published_at = article.published_at.filter(|p| !p.trim().is_empty())?;

    Some(NewsItem::new(
        article.source.name.unwrap_or_else(|| "Unknown".to_string()),
        title,
        url,
        article.url_to_image,
        published_at,
    ))
}

fn envelope_error(response: NewsApiResponse) -> AdapterError {
    let message = response
        .message
        .or(response.code)
        .unwrap_or_else(|| format!("status {}", response.status));
    AdapterError::api(ProviderId::NewsApi, message)
}

/// Convert a `/top-headlines` response, keeping publish order
pub fn normalize_headlines(response: NewsApiResponse) -> AdapterResult<Vec<NewsItem>> {
    if response.status != "ok" {
        return Err(envelope_error(response));
    }

    Ok(response
        .articles
        .into_iter()
        .filter_map(article_to_item)
        .collect())
}

#[async_trait]
impl Adapter<NewsQuery, NewsItem> for NewsApiClient {
    fn id(&self) -> ProviderId {
        ProviderId::NewsApi
    }

    #[instrument(skip(self), fields(provider = "newsapi"))]
    async fn fetch(&self, query: &NewsQuery) -> AdapterResult<Vec<NewsItem>> {
        let Some(api_key) = &self.api_key else {
            return Err(AdapterError::missing_credential(ProviderId::NewsApi, "NEWS_API_KEY"));
        };

        let page_size = query.page_size.to_string();
        let request = self
            .http
            .get(format!("{}/top-headlines", self.base_url))
            .header("X-Api-Key", api_key)
            .query(&[
                ("category", query.category.as_str()),
                ("language", query.language.as_str()),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
            ]);

        let (status, body) = fetch_raw(ProviderId::NewsApi, request).await?;
        if !status.is_success() {
            // Rejections carry a JSON envelope naming the cause
            return Err(match decode::<NewsApiResponse>(ProviderId::NewsApi, &body) {
                Ok(envelope) if envelope.message.is_some() || envelope.code.is_some() => {
                    envelope_error(envelope)
                }
                _ => AdapterError::status(ProviderId::NewsApi, status.as_u16()),
            });
        }

        let response: NewsApiResponse = decode(ProviderId::NewsApi, &body)?;
        let total = response.articles.len();
        let items = normalize_headlines(response)?;

        if items.len() < total {
            warn!("[NewsAPI] Dropped {} incomplete articles", total - items.len());
        }
        info!("[NewsAPI] Fetched {} headlines", items.len());
        Ok(items)
    }
}
