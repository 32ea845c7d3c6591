//! Queries answered by provider adapters, and the small records some of them return

use serde::{Deserialize, Serialize};

use crate::market::{MAX_CANDLES, QUOTE_ASSET};

/// Ranked listing of the whole market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketQuery {
    pub limit: usize,
}

impl Default for MarketQuery {
    fn default() -> Self {
        Self { limit: 100 }
    }
}

/// Biggest 24h percentage gainers among USDT pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopMoversQuery {
    pub limit: usize,
}

impl Default for TopMoversQuery {
    fn default() -> Self {
        Self { limit: 1 }
    }
}

/// Daily history for one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleQuery {
    /// Normalized short ticker (e.g. "BTC"); may be empty if the input had no usable characters
    pub ticker: String,
    /// Days (bars) of history requested
    pub days: u32,
}

impl CandleQuery {
    /// Normalize user input: ASCII alphanumerics only, uppercased, with a
    /// trailing quote asset removed when something precedes it
    pub fn new(raw_symbol: &str) -> Self {
        let cleaned: String = raw_symbol
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_uppercase();

        let ticker = match cleaned.strip_suffix(QUOTE_ASSET) {
            Some(base) if !base.is_empty() => base.to_string(),
            _ => cleaned,
        };

        Self {
            ticker,
            days: MAX_CANDLES as u32,
        }
    }

    /// Exchange pair symbol, e.g. "BTCUSDT"
    pub fn pair_symbol(&self) -> String {
        format!("{}{}", self.ticker, QUOTE_ASSET)
    }
}

/// Top headlines listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub category: String,
    pub language: String,
    pub page_size: usize,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            category: "business".to_string(),
            language: "en".to_string(),
            page_size: 10,
        }
    }
}

/// Single-turn text generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptQuery {
    pub prompt: String,
}

/// Text returned by a generation provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedText {
    pub text: String,
}

/// Keyword image search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    pub term: String,
    pub per_page: usize,
}

impl ImageQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            per_page: 1,
        }
    }
}

/// One photo found by an image search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHit {
    /// URL of the largest rendition offered
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candle_query_normalization() {
        assert_eq!(CandleQuery::new("btc").ticker, "BTC");
        assert_eq!(CandleQuery::new(" ethusdt ").ticker, "ETH");
        assert_eq!(CandleQuery::new("USDT").ticker, "USDT");
        assert_eq!(CandleQuery::new("../etc").ticker, "ETC");
        assert_eq!(CandleQuery::new("$$").ticker, "");
    }

    #[test]
    fn test_pair_symbol() {
        let query = CandleQuery::new("sol");
        assert_eq!(query.pair_symbol(), "SOLUSDT");
        assert_eq!(query.days, 100);
    }
}
