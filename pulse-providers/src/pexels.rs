//! Pexels API client for stock photos

use std::time::Duration;

use async_trait::async_trait;
use pulse_core::{AdapterError, AdapterResult, ImageHit, ImageQuery, ProviderId};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::adapter::Adapter;
use crate::config::{ConfigError, ProviderConfig};
use crate::http::{build_client, get_json};
use crate::types::{PexelsPhoto, PexelsSearchResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Pexels API client
#[derive(Clone)]
pub struct PexelsClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PexelsClient {
    /// Create a new Pexels client
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            http: build_client(REQUEST_TIMEOUT)?,
            base_url: config.pexels_url.clone(),
            api_key: config.pexels_api_key.clone(),
        })
    }

    /// Check if the client is configured (has an API key)
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Largest rendition offered for a photo
fn largest_rendition(photo: PexelsPhoto) -> Option<String> {
    let src = photo.src;
    [src.large2x, src.original, src.large]
        .into_iter()
        .flatten()
        .find(|url| !url.trim().is_empty())
}

/// Convert a search response; an empty photo list is a valid, empty result
pub fn normalize_photos(response: PexelsSearchResponse) -> Vec<ImageHit> {
    response
        .photos
        .into_iter()
        .filter_map(largest_rendition)
        .map(|url| ImageHit { url })
        .collect()
}

#[async_trait]
impl Adapter<ImageQuery, ImageHit> for PexelsClient {
    fn id(&self) -> ProviderId {
        ProviderId::Pexels
    }

    #[instrument(skip(self), fields(provider = "pexels"))]
    async fn fetch(&self, query: &ImageQuery) -> AdapterResult<Vec<ImageHit>> {
        let Some(api_key) = &self.api_key else {
            return Err(AdapterError::missing_credential(ProviderId::Pexels, "PEXELS_API_KEY"));
        };

        let per_page = query.per_page.to_string();
        let request = self
            .http
            .get(format!("{}/search", self.base_url))
            .header("Authorization", api_key)
            .query(&[("query", query.term.as_str()), ("per_page", per_page.as_str())]);

        let response: PexelsSearchResponse = get_json(ProviderId::Pexels, request).await?;
        let hits = normalize_photos(response);
        debug!("[Pexels] {} photo(s) for '{}'", hits.len(), query.term);
        Ok(hits)
    }
}
