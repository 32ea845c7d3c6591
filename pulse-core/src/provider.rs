//! Upstream data provider identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every source a record can come from, including the local generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// CoinGecko - market-cap ranked listings and OHLC history
    CoinGecko,
    /// Binance - 24h tickers and daily klines
    Binance,
    /// NewsAPI - business headlines
    NewsApi,
    /// OpenAI-compatible chat completion endpoint
    #[serde(rename = "textgen")]
    TextGeneration,
    /// Pexels - stock photography
    Pexels,
    /// Locally generated placeholder data
    Synthetic,
}

impl ProviderId {
    /// Stable identifier used in headers and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::CoinGecko => "coingecko",
            ProviderId::Binance => "binance",
            ProviderId::NewsApi => "newsapi",
            ProviderId::TextGeneration => "textgen",
            ProviderId::Pexels => "pexels",
            ProviderId::Synthetic => "synthetic",
        }
    }

    /// Get the full display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::CoinGecko => "CoinGecko",
            ProviderId::Binance => "Binance",
            ProviderId::NewsApi => "NewsAPI",
            ProviderId::TextGeneration => "Text generation",
            ProviderId::Pexels => "Pexels",
            ProviderId::Synthetic => "Synthetic",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
