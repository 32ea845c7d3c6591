//! CoinGecko API client
//!
//! Market-cap ranked listings and OHLC history. Free tier, no key required;
//! a demo key is sent when configured.

use std::time::Duration;

use async_trait::async_trait;
use pulse_core::{
    find_asset, normalize_candles, AdapterError, AdapterResult, Candle, CandleQuery, MarketQuery,
    MarketTicker, ProviderId,
};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info, instrument};

use crate::adapter::Adapter;
use crate::config::{ConfigError, ProviderConfig};
use crate::http::{build_client, get_json};
use crate::types::{CoinGeckoMarket, CoinGeckoOhlc};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// CoinGecko API client
#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    /// Create a new CoinGecko client
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            http: build_client(REQUEST_TIMEOUT)?,
            base_url: config.coingecko_url.clone(),
            api_key: config.coingecko_api_key.clone(),
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.http.get(format!("{}{}", self.base_url, path));
        match &self.api_key {
            Some(key) => request.header("x-cg-demo-api-key", key),
            None => request,
        }
    }
}

/// CoinGecko coin id for a short ticker
///
/// Known tickers use the lookup table; anything else is passed through
/// lowercased as a best guess.
pub fn coin_id_for(ticker: &str) -> String {
    find_asset(ticker)
        .map(|a| a.coingecko_id.to_string())
        .unwrap_or_else(|| ticker.to_lowercase())
}

/// Convert `/coins/markets` rows, keeping provider order
pub fn normalize_markets(rows: Vec<CoinGeckoMarket>, limit: usize) -> Vec<MarketTicker> {
    rows.into_iter()
        .filter_map(|row| {
            let price = row.current_price?;
            MarketTicker::from_values(
                MarketTicker::symbol_for(&row.symbol),
                price,
                row.price_change_percentage_24h.unwrap_or(0.0),
                row.total_volume.unwrap_or(0.0),
                row.market_cap.unwrap_or(0.0),
                price,
            )
        })
        .take(limit)
        .collect()
}

/// Convert `/coins/{id}/ohlc` rows
pub fn normalize_ohlc(rows: Vec<CoinGeckoOhlc>) -> Vec<Candle> {
    let candles = rows
        .into_iter()
        .map(|CoinGeckoOhlc(time_ms, open, high, low, close)| {
            Candle::from_millis(time_ms as i64, open, high, low, close)
        })
        .collect();
    normalize_candles(candles)
}

#[async_trait]
impl Adapter<MarketQuery, MarketTicker> for CoinGeckoClient {
    fn id(&self) -> ProviderId {
        ProviderId::CoinGecko
    }

    #[instrument(skip(self), fields(provider = "coingecko"))]
    async fn fetch(&self, query: &MarketQuery) -> AdapterResult<Vec<MarketTicker>> {
        let per_page = query.limit.clamp(1, 250).to_string();
        let request = self.get("/coins/markets").query(&[
            ("vs_currency", "usd"),
            ("order", "market_cap_desc"),
            ("per_page", per_page.as_str()),
            ("page", "1"),
            ("sparkline", "false"),
            ("price_change_percentage", "24h"),
        ]);

        let rows: Vec<CoinGeckoMarket> = get_json(ProviderId::CoinGecko, request).await?;
        debug!("[CoinGecko] Received {} market rows", rows.len());

        let tickers = normalize_markets(rows, query.limit);
        info!("[CoinGecko] Normalized {} tickers", tickers.len());
        Ok(tickers)
    }
}

#[async_trait]
impl Adapter<CandleQuery, Candle> for CoinGeckoClient {
    fn id(&self) -> ProviderId {
        ProviderId::CoinGecko
    }

    #[instrument(skip(self), fields(provider = "coingecko", ticker = %query.ticker))]
    async fn fetch(&self, query: &CandleQuery) -> AdapterResult<Vec<Candle>> {
        if query.ticker.is_empty() {
            return Err(AdapterError::invalid_query(ProviderId::CoinGecko, "empty ticker"));
        }

        let coin_id = coin_id_for(&query.ticker);
        let days = query.days.to_string();
        let request = self
            .get(&format!("/coins/{}/ohlc", coin_id))
            .query(&[("vs_currency", "usd"), ("days", days.as_str())]);

        let rows: Vec<CoinGeckoOhlc> = get_json(ProviderId::CoinGecko, request).await?;
        let candles = normalize_ohlc(rows);
        info!("[CoinGecko] {} candles for {}", candles.len(), coin_id);
        Ok(candles)
    }
}
