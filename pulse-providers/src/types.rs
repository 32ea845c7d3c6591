//! Typed schemas for upstream responses
//!
//! Fields a provider may omit are `Option`s or carry a serde default, so a
//! response is rejected as malformed only when its overall shape is wrong.

use serde::Deserialize;

// ============================================================================
// CoinGecko Types
// ============================================================================

/// Row of `/coins/markets`
#[derive(Debug, Deserialize)]
pub struct CoinGeckoMarket {
    /// Native ticker, lowercase (e.g., "btc")
    pub symbol: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}

/// Row of `/coins/{id}/ohlc`: `[time_ms, open, high, low, close]`
#[derive(Debug, Deserialize)]
pub struct CoinGeckoOhlc(pub f64, pub f64, pub f64, pub f64, pub f64);

// ============================================================================
// Binance Types
// ============================================================================

/// Row of `/api/v3/ticker/24hr`; numbers arrive as strings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceTicker24h {
    pub symbol: String,
    #[serde(default)]
    pub last_price: String,
    #[serde(default)]
    pub price_change_percent: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub quote_volume: String,
    #[serde(default)]
    pub weighted_avg_price: String,
}

/// Row of `/api/v3/klines`: a mixed array of numbers and numeric strings
pub type BinanceKline = Vec<serde_json::Value>;

// ============================================================================
// NewsAPI Types
// ============================================================================

/// `/v2/top-headlines` envelope
#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiArticle {
    #[serde(default)]
    pub source: NewsApiSource,
    pub title: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsApiSource {
    pub name: Option<String>,
}

// ============================================================================
// Pexels Types
// ============================================================================

/// `/v1/search` envelope
#[derive(Debug, Deserialize)]
pub struct PexelsSearchResponse {
    #[serde(default)]
    pub photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
pub struct PexelsPhoto {
    pub src: PexelsPhotoSrc,
}

/// Renditions offered for a photo
#[derive(Debug, Deserialize)]
pub struct PexelsPhotoSrc {
    pub original: Option<String>,
    pub large2x: Option<String>,
    pub large: Option<String>,
}
