//! Market Data Service
//!
//! Answers the two on-demand queries (market table and chart history) by
//! walking the provider chains, degrading to synthetic data on total outage.

use chrono::Utc;
use serde::Serialize;
use tracing::{instrument, warn};

use pulse_core::{Candle, CandleQuery, MarketQuery, MarketTicker, ProviderId};
use pulse_providers::{Chain, ProviderSet};

use crate::fallback::{first_success, Sourced};
use crate::synthetic::{synthetic_candles, synthetic_tickers};

/// Ticker used when checking chart providers
const CHECK_TICKER: &str = "BTC";

/// Outcome of calling one adapter directly
#[derive(Debug, Clone, Serialize)]
pub struct ProviderCheck {
    pub provider: ProviderId,
    pub query: &'static str,
    pub ok: bool,
    pub records: usize,
    pub error: Option<String>,
}

impl ProviderCheck {
    fn from_result<T>(
        provider: ProviderId,
        query: &'static str,
        result: pulse_core::AdapterResult<Vec<T>>,
    ) -> Self {
        match result {
            Ok(records) => Self {
                provider,
                query,
                ok: !records.is_empty(),
                records: records.len(),
                error: None,
            },
            Err(e) => Self {
                provider,
                query,
                ok: false,
                records: 0,
                error: Some(e.reason.to_string()),
            },
        }
    }
}

/// Service for market listings and chart history
pub struct MarketDataService {
    market_chain: Chain<MarketQuery, MarketTicker>,
    candle_chain: Chain<CandleQuery, Candle>,
}

impl MarketDataService {
    pub fn new(
        market_chain: Chain<MarketQuery, MarketTicker>,
        candle_chain: Chain<CandleQuery, Candle>,
    ) -> Self {
        Self {
            market_chain,
            candle_chain,
        }
    }

    /// Wire the production chains from the provider set
    pub fn from_providers(providers: &ProviderSet) -> Self {
        Self::new(providers.market_chain(), providers.candle_chain())
    }

    /// Current market table, never empty
    ///
    /// Provider ordering is preserved as returned (market cap for CoinGecko,
    /// quote volume for Binance).
    #[instrument(skip(self))]
    pub async fn market_snapshot(&self) -> Sourced<MarketTicker> {
        match first_success(&self.market_chain, &MarketQuery::default()).await {
            Ok(sourced) => sourced,
            Err(failures) => {
                warn!(
                    "All {} market provider(s) failed, serving synthetic tickers",
                    failures.len()
                );
                Sourced::new(ProviderId::Synthetic, generate_tickers())
            }
        }
    }

    /// Daily candles for a symbol, never empty
    #[instrument(skip(self))]
    pub async fn candles(&self, symbol: &str) -> Sourced<Candle> {
        let query = CandleQuery::new(symbol);

        match first_success(&self.candle_chain, &query).await {
            Ok(sourced) => sourced,
            Err(failures) => {
                warn!(
                    "All {} chart provider(s) failed for {:?}, serving synthetic candles",
                    failures.len(),
                    query.ticker
                );
                Sourced::new(ProviderId::Synthetic, generate_candles(&query.ticker))
            }
        }
    }

    /// Call every market and chart adapter once, without fallback
    pub async fn check_providers(&self) -> Vec<ProviderCheck> {
        let mut checks = Vec::with_capacity(self.market_chain.len() + self.candle_chain.len());

        let market_query = MarketQuery::default();
        for adapter in &self.market_chain {
            let result = adapter.fetch(&market_query).await;
            checks.push(ProviderCheck::from_result(adapter.id(), "market", result));
        }

        let candle_query = CandleQuery::new(CHECK_TICKER);
        for adapter in &self.candle_chain {
            let result = adapter.fetch(&candle_query).await;
            checks.push(ProviderCheck::from_result(adapter.id(), "candles", result));
        }

        checks
    }
}

fn generate_tickers() -> Vec<MarketTicker> {
    let mut rng = rand::rng();
    synthetic_tickers(&mut rng)
}

fn generate_candles(ticker: &str) -> Vec<Candle> {
    let mut rng = rand::rng();
    synthetic_candles(ticker, Utc::now(), &mut rng)
}
