//! API route definitions

mod health;
mod markets;
mod snapshot;

use axum::{
    http::{header, HeaderName, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub use markets::DATA_SOURCE_HEADER;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(markets::routes())
        .merge(snapshot::routes())
        .merge(health::routes())
}

/// Full application: API under `/api`, request tracing and CORS
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([HeaderName::from_static(DATA_SOURCE_HEADER)]);

    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use pulse_core::{Candle, MarketTicker, NewsItem, Snapshot, KNOWN_ASSETS};
    use pulse_providers::CredentialStatus;
    use pulse_services::{MarketDataService, SnapshotCache};

    /// State with no providers, so every market query degrades to synthetic data
    fn offline_state() -> AppState {
        AppState {
            market_service: Arc::new(MarketDataService::new(Vec::new(), Vec::new())),
            cache: Arc::new(SnapshotCache::in_memory(Snapshot::placeholder())),
            credentials: CredentialStatus {
                news: false,
                text_generation: false,
                images: false,
            },
        }
    }

    async fn get(state: AppState, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = app(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let source = response
            .headers()
            .get(DATA_SOURCE_HEADER)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, source, body.to_vec())
    }

    #[tokio::test]
    async fn test_market_data_never_empty() {
        let (status, source, body) = get(offline_state(), "/api/market-data").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(source.as_deref(), Some("synthetic"));

        let tickers: Vec<MarketTicker> = serde_json::from_slice(&body).unwrap();
        assert_eq!(tickers.len(), KNOWN_ASSETS.len());
        assert!(tickers.iter().all(MarketTicker::is_well_formed));

        let raw: Value = serde_json::from_slice(&body).unwrap();
        assert!(raw[0]["lastPrice"].is_string());
        assert!(raw[0]["quoteVolume"].is_string());
    }

    #[tokio::test]
    async fn test_kline_data_ordered_and_contained() {
        let (status, source, body) = get(offline_state(), "/api/kline-data/ethusdt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(source.as_deref(), Some("synthetic"));

        let candles: Vec<Candle> = serde_json::from_slice(&body).unwrap();
        assert_eq!(candles.len(), 100);
        assert!(candles.windows(2).all(|w| w[0].time < w[1].time));
        for c in &candles {
            assert!(c.low <= c.open.min(c.close));
            assert!(c.high >= c.open.max(c.close));
        }
    }

    #[tokio::test]
    async fn test_snapshot_placeholder() {
        let (status, _, body) = get(offline_state(), "/api/snapshot").await;
        assert_eq!(status, StatusCode::OK);

        let snapshot: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            snapshot["featured_article"]["title"],
            "Welcome to CryptoPulse AI"
        );
        assert_eq!(snapshot["news_articles"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_health_reports_degraded_then_healthy() {
        let state = offline_state();

        let (status, _, body) = get(state.clone(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        let health: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(health["status"], "degraded");
        assert_eq!(health["credentials"]["news"], false);

        state
            .cache
            .replace_news(vec![NewsItem::new(
                "Reuters",
                "Headline",
                "https://example.com",
                None,
                "2024-05-01T12:00:00Z",
            )])
            .await;
        state
            .cache
            .replace_featured_article(pulse_core::FeaturedArticle::compose(
                "BTC (3.10% move)",
                "Generated body".to_string(),
                "https://example.com/btc.jpg".to_string(),
            ))
            .await;

        let (_, _, body) = get(state, "/api/health").await;
        let health: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["news_articles"], 1);
        assert_eq!(health["featured_title"], "Market Analysis: BTC");
    }

    #[tokio::test]
    async fn test_liveness_and_provider_report() {
        let (status, _, body) = get(offline_state(), "/api/health/live").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");

        let (status, _, body) = get(offline_state(), "/api/health/providers").await;
        assert_eq!(status, StatusCode::OK);
        let report: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(report["providers"], serde_json::json!([]));
        assert_eq!(report["available"], 0);
        assert_eq!(report["configured"], 0);
        assert_eq!(
            report["keyed"],
            serde_json::json!([
                {"provider": "newsapi", "configured": false},
                {"provider": "textgen", "configured": false},
                {"provider": "pexels", "configured": false},
            ])
        );
    }

    #[tokio::test]
    async fn test_provider_report_lists_configured_keys() {
        let mut state = offline_state();
        state.credentials.news = true;
        state.credentials.images = true;

        let (_, _, body) = get(state, "/api/health/providers").await;
        let report: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(report["configured"], 2);
        assert_eq!(report["keyed"][0]["configured"], true);
        assert_eq!(report["keyed"][1]["configured"], false);
        assert_eq!(report["keyed"][2]["configured"], true);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _, _) = get(offline_state(), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
