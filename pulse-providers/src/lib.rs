//! Provider adapters for the CryptoPulse dashboard
//!
//! One client per upstream source, each normalizing its responses into the
//! records defined in `pulse-core`:
//! - CoinGecko: market-cap ranked listings and OHLC history (no key required)
//! - Binance: 24h tickers, top movers and daily klines (no key required)
//! - NewsAPI: business headlines (NEWS_API_KEY)
//! - Text generation: OpenAI-compatible chat completion (AI_API_KEY)
//! - Pexels: stock photos (PEXELS_API_KEY)

pub mod adapter;
pub mod binance;
pub mod coingecko;
pub mod config;
mod http;
pub mod newsapi;
pub mod pexels;
pub mod registry;
#[cfg(test)]
mod stub_server;
pub mod textgen;
pub mod types;

pub use adapter::Adapter;
pub use binance::BinanceClient;
pub use coingecko::CoinGeckoClient;
pub use config::{ConfigError, CredentialStatus, ProviderConfig};
pub use newsapi::NewsApiClient;
pub use pexels::PexelsClient;
pub use registry::{Chain, ProviderSet};
pub use textgen::TextGenClient;
