//! Binance public REST client
//!
//! 24h tickers (volume ranked listing and top movers) and daily klines.
//! Public market data endpoints, no key required.

use std::cmp::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use pulse_core::{
    normalize_candles, AdapterError, AdapterResult, Candle, CandleQuery, MarketQuery, MarketTicker,
    ProviderId, TopMoversQuery, QUOTE_ASSET,
};
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::adapter::Adapter;
use crate::config::{ConfigError, ProviderConfig};
use crate::http::{build_client, decode, fetch_body, parse_decimal};
use crate::types::{BinanceKline, BinanceTicker24h};

/// The market table is served on request, so its fallback step is kept short
const TICKER_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Binance REST client
#[derive(Clone)]
pub struct BinanceClient {
    http: Client,
    base_url: String,
}

/// A 24h ticker with its numbers parsed
#[derive(Debug, Clone)]
struct ParsedTicker {
    symbol: String,
    last_price: f64,
    price_change_percent: f64,
    volume: f64,
    quote_volume: f64,
    weighted_avg_price: f64,
}

impl ParsedTicker {
    fn parse(raw: BinanceTicker24h) -> Option<Self> {
        Some(Self {
            last_price: parse_decimal(&raw.last_price)?,
            price_change_percent: parse_decimal(&raw.price_change_percent)?,
            volume: parse_decimal(&raw.volume)?,
            quote_volume: parse_decimal(&raw.quote_volume)?,
            weighted_avg_price: parse_decimal(&raw.weighted_avg_price)?,
            symbol: raw.symbol,
        })
    }

    fn into_ticker(self) -> Option<MarketTicker> {
        MarketTicker::from_values(
            self.symbol,
            self.last_price,
            self.price_change_percent,
            self.volume,
            self.quote_volume,
            self.weighted_avg_price,
        )
    }
}

impl BinanceClient {
    /// Create a new Binance client
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            http: build_client(DEFAULT_TIMEOUT)?,
            base_url: config.binance_url.clone(),
        })
    }

    /// Fetch every 24h ticker on the exchange
    async fn fetch_tickers_24h(&self, timeout: Duration) -> AdapterResult<Vec<BinanceTicker24h>> {
        let request = self
            .http
            .get(format!("{}/ticker/24hr", self.base_url))
            .timeout(timeout);

        let body = fetch_body(ProviderId::Binance, request).await?;
        let rows: Vec<BinanceTicker24h> = decode(ProviderId::Binance, &body)?;
        debug!("[Binance] Received {} 24h tickers", rows.len());
        Ok(rows)
    }
}

/// USDT pairs with parseable numbers
fn usdt_pairs(rows: Vec<BinanceTicker24h>) -> Vec<ParsedTicker> {
    rows.into_iter()
        .filter(|r| r.symbol.ends_with(QUOTE_ASSET) && r.symbol.len() > QUOTE_ASSET.len())
        .filter_map(ParsedTicker::parse)
        .collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// USDT pairs ranked by quote volume, highest first
pub fn rank_by_quote_volume(rows: Vec<BinanceTicker24h>, limit: usize) -> Vec<MarketTicker> {
    let mut pairs = usdt_pairs(rows);
    pairs.sort_by(|a, b| descending(a.quote_volume, b.quote_volume));
    pairs
        .into_iter()
        .filter_map(ParsedTicker::into_ticker)
        .take(limit)
        .collect()
}

/// USDT pairs ranked by 24h percentage change, biggest gainer first
pub fn rank_by_price_change(rows: Vec<BinanceTicker24h>, limit: usize) -> Vec<MarketTicker> {
    let mut pairs = usdt_pairs(rows);
    pairs.sort_by(|a, b| descending(a.price_change_percent, b.price_change_percent));
    pairs
        .into_iter()
        .filter_map(ParsedTicker::into_ticker)
        .take(limit)
        .collect()
}

/// Convert kline rows (`[open_time_ms, "open", "high", "low", "close", ...]`)
///
/// Returns `None` if any row does not have that shape.
pub fn normalize_klines(rows: Vec<BinanceKline>) -> Option<Vec<Candle>> {
    let price = |v: &serde_json::Value| match v {
        serde_json::Value::String(s) => parse_decimal(s),
        other => other.as_f64(),
    };

    let candles = rows
        .iter()
        .map(|row| {
            if row.len() < 5 {
                return None;
            }
            Some(Candle::from_millis(
                row[0].as_i64()?,
                price(&row[1])?,
                price(&row[2])?,
                price(&row[3])?,
                price(&row[4])?,
            ))
        })
        .collect::<Option<Vec<_>>>()?;

    Some(normalize_candles(candles))
}

#[async_trait]
impl Adapter<MarketQuery, MarketTicker> for BinanceClient {
    fn id(&self) -> ProviderId {
        ProviderId::Binance
    }

    #[instrument(skip(self), fields(provider = "binance"))]
    async fn fetch(&self, query: &MarketQuery) -> AdapterResult<Vec<MarketTicker>> {
        let rows = self.fetch_tickers_24h(TICKER_TIMEOUT).await?;
        let tickers = rank_by_quote_volume(rows, query.limit);
        info!("[Binance] {} USDT pairs by quote volume", tickers.len());
        Ok(tickers)
    }
}

#[async_trait]
impl Adapter<TopMoversQuery, MarketTicker> for BinanceClient {
    fn id(&self) -> ProviderId {
        ProviderId::Binance
    }

    #[instrument(skip(self), fields(provider = "binance"))]
    async fn fetch(&self, query: &TopMoversQuery) -> AdapterResult<Vec<MarketTicker>> {
        let rows = self.fetch_tickers_24h(DEFAULT_TIMEOUT).await?;
        Ok(rank_by_price_change(rows, query.limit))
    }
}

#[async_trait]
impl Adapter<CandleQuery, Candle> for BinanceClient {
    fn id(&self) -> ProviderId {
        ProviderId::Binance
    }

    #[instrument(skip(self), fields(provider = "binance", ticker = %query.ticker))]
    async fn fetch(&self, query: &CandleQuery) -> AdapterResult<Vec<Candle>> {
        if query.ticker.is_empty() {
            return Err(AdapterError::invalid_query(ProviderId::Binance, "empty ticker"));
        }

        let symbol = query.pair_symbol();
        let limit = query.days.to_string();
        let request = self.http.get(format!("{}/klines", self.base_url)).query(&[
            ("symbol", symbol.as_str()),
            ("interval", "1d"),
            ("limit", limit.as_str()),
        ]);

        let body = fetch_body(ProviderId::Binance, request).await?;
        let rows: Vec<BinanceKline> = decode(ProviderId::Binance, &body)?;
        let candles = normalize_klines(rows)
            .ok_or_else(|| AdapterError::malformed(ProviderId::Binance, "unexpected kline row"))?;

        info!("[Binance] {} candles for {}", candles.len(), symbol);
        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub_server::{Reply, StubServer};
    use pulse_core::FailureReason;
    use std::time::Instant;

    fn client_for(base_url: &str) -> BinanceClient {
        BinanceClient::new(&ProviderConfig {
            binance_url: base_url.to_string(),
            ..ProviderConfig::default()
        })
        .unwrap()
    }

    const TICKERS: &str = r#"[
        {"symbol":"BTCUSDT","lastPrice":"67000.01000000","priceChangePercent":"1.500",
         "volume":"20000.5","quoteVolume":"1340000000.9","weightedAvgPrice":"66900.00000000"},
        {"symbol":"PEPEUSDT","lastPrice":"0.00001234","priceChangePercent":"25.120",
         "volume":"900000000000","quoteVolume":"11000000","weightedAvgPrice":"0.00001200"},
        {"symbol":"ETHBTC","lastPrice":"0.05","priceChangePercent":"90.0",
         "volume":"1","quoteVolume":"9999999999999","weightedAvgPrice":"0.05"},
        {"symbol":"ETHUSDT","lastPrice":"3500.5","priceChangePercent":"-2.25",
         "volume":"400000","quoteVolume":"1400000000","weightedAvgPrice":"3490.1"},
        {"symbol":"BADUSDT","lastPrice":"n/a","priceChangePercent":"500",
         "volume":"1","quoteVolume":"1","weightedAvgPrice":"1"}
    ]"#;

    fn rows() -> Vec<BinanceTicker24h> {
        serde_json::from_str(TICKERS).unwrap()
    }

    #[test]
    fn test_rank_by_quote_volume() {
        let tickers = rank_by_quote_volume(rows(), 100);
        let symbols: Vec<_> = tickers.iter().map(|t| t.symbol.as_str()).collect();

        assert_eq!(symbols, vec!["ETHUSDT", "BTCUSDT", "PEPEUSDT"]);
        assert_eq!(tickers[1].last_price, "67000.010000");
        assert_eq!(tickers[1].price_change_percent, "1.50");
        assert_eq!(tickers[1].quote_volume, "1340000001");
        assert!(tickers.iter().all(MarketTicker::is_well_formed));
    }

    #[test]
    fn test_rank_truncates() {
        assert_eq!(rank_by_quote_volume(rows(), 2).len(), 2);
    }

    #[test]
    fn test_rank_by_price_change() {
        let movers = rank_by_price_change(rows(), 1);
        assert_eq!(movers.len(), 1);
        assert_eq!(movers[0].symbol, "PEPEUSDT");
        assert_eq!(movers[0].price_change_percent, "25.12");
    }

    #[test]
    fn test_normalize_klines() {
        let body = r#"[
            [1699574400000,"35000.1","36000.0","34800.0","35900.2","100.5",1699660799999,"0",1,"0","0","0"],
            [1699660800000,"35900.2","37100.0","35800.0","37000.0","120.0",1699747199999,"0",1,"0","0","0"]
        ]"#;
        let rows: Vec<BinanceKline> = serde_json::from_str(body).unwrap();
        let candles = normalize_klines(rows).unwrap();

        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].time, 1_699_574_400);
        assert_eq!(candles[0].open, 35000.1);
        assert_eq!(candles[1].high, 37100.0);
        assert!(candles[0].time < candles[1].time);
    }

    #[test]
    fn test_normalize_klines_rejects_bad_row() {
        let rows: Vec<BinanceKline> = serde_json::from_str(r#"[[1699574400000,"1.0"]]"#).unwrap();
        assert!(normalize_klines(rows).is_none());
    }

    #[tokio::test]
    async fn test_market_fetch_ranks_live_response() {
        let mut server = StubServer::start(Reply::ok(TICKERS)).await;
        let client = client_for(&server.base_url);

        let tickers = Adapter::<MarketQuery, MarketTicker>::fetch(&client, &MarketQuery::default())
            .await
            .unwrap();

        assert_eq!(tickers.len(), 3);
        assert_eq!(tickers[0].symbol, "ETHUSDT");
        assert_eq!(server.received().await.target, "/ticker/24hr");
    }

    #[tokio::test]
    async fn test_market_fetch_reports_status() {
        let server = StubServer::start(Reply::status(418, r#"{"code":-1003}"#)).await;
        let client = client_for(&server.base_url);

        let err = Adapter::<MarketQuery, MarketTicker>::fetch(&client, &MarketQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.reason, FailureReason::Status(418));
    }

    #[tokio::test]
    async fn test_market_fetch_gives_up_after_ticker_timeout() {
        let server = StubServer::start(Reply::Hang).await;
        let client = client_for(&server.base_url);

        let started = Instant::now();
        let err = Adapter::<MarketQuery, MarketTicker>::fetch(&client, &MarketQuery::default())
            .await
            .unwrap_err();
        let elapsed = started.elapsed();

        assert_eq!(err.reason, FailureReason::Timeout);
        assert!(elapsed >= TICKER_TIMEOUT);
        assert!(elapsed < DEFAULT_TIMEOUT);
    }

    #[tokio::test]
    async fn test_klines_request_shape() {
        let body = r#"[[1699574400000,"35000.1","36000.0","34800.0","35900.2","100.5"]]"#;
        let mut server = StubServer::start(Reply::ok(body)).await;
        let client = client_for(&server.base_url);

        let candles = client.fetch(&CandleQuery::new("btc")).await.unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].close, 35900.2);

        let received = server.received().await;
        assert_eq!(received.target, "/klines?symbol=BTCUSDT&interval=1d&limit=100");
    }
}
