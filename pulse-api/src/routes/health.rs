//! Health check endpoints

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use pulse_core::ProviderId;
use pulse_providers::CredentialStatus;
use pulse_services::ProviderCheck;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    news_articles: usize,
    featured_title: String,
    last_news_refresh: Option<DateTime<Utc>>,
    last_article_refresh: Option<DateTime<Utc>>,
    credentials: CredentialStatus,
}

/// A keyed provider, reported by credential presence only
#[derive(Debug, Serialize)]
struct KeyedProvider {
    provider: ProviderId,
    configured: bool,
}

#[derive(Debug, Serialize)]
struct ProvidersResponse {
    providers: Vec<ProviderCheck>,
    available: usize,
    keyed: Vec<KeyedProvider>,
    configured: usize,
}

/// Health check handler
///
/// Reports `healthy` once both refresh jobs have succeeded at least once.
/// Degraded data is still served, so the status code is always 200.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.cache.current();
    let status = state.cache.status();

    let healthy = status.last_news_refresh.is_some() && status.last_article_refresh.is_some();

    Json(HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        news_articles: snapshot.news_articles.len(),
        featured_title: snapshot.featured_article.title.clone(),
        last_news_refresh: status.last_news_refresh,
        last_article_refresh: status.last_article_refresh,
        credentials: state.credentials,
    })
}

/// Call every market and chart provider directly; keyed providers are not called
async fn provider_check(State(state): State<AppState>) -> Json<ProvidersResponse> {
    let providers = state.market_service.check_providers().await;
    let available = providers.iter().filter(|p| p.ok).count();

    let keyed: Vec<KeyedProvider> = state
        .credentials
        .by_provider()
        .into_iter()
        .map(|(provider, configured)| KeyedProvider {
            provider,
            configured,
        })
        .collect();
    let configured = keyed.iter().filter(|k| k.configured).count();

    Json(ProvidersResponse {
        providers,
        available,
        keyed,
        configured,
    })
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/providers", get(provider_check))
}
