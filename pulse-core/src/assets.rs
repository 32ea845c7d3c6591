//! Well-known assets shared by the chart lookup table and the synthetic generators

/// A listed asset with its CoinGecko id and a reference USD price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownAsset {
    /// Short ticker, e.g. "BTC"
    pub ticker: &'static str,
    /// CoinGecko coin id, e.g. "bitcoin"
    pub coingecko_id: &'static str,
    /// Anchor price for locally generated data
    pub reference_price: f64,
}

impl KnownAsset {
    const fn new(ticker: &'static str, coingecko_id: &'static str, reference_price: f64) -> Self {
        Self {
            ticker,
            coingecko_id,
            reference_price,
        }
    }
}

/// The twenty assets the dashboard knows by name, in display order
pub const KNOWN_ASSETS: [KnownAsset; 20] = [
    KnownAsset::new("BTC", "bitcoin", 45000.0),
    KnownAsset::new("ETH", "ethereum", 2800.0),
    KnownAsset::new("BNB", "binancecoin", 320.0),
    KnownAsset::new("XRP", "ripple", 0.6),
    KnownAsset::new("ADA", "cardano", 0.45),
    KnownAsset::new("SOL", "solana", 90.0),
    KnownAsset::new("DOGE", "dogecoin", 0.08),
    KnownAsset::new("DOT", "polkadot", 7.5),
    KnownAsset::new("AVAX", "avalanche-2", 25.0),
    KnownAsset::new("LTC", "litecoin", 90.0),
    KnownAsset::new("LINK", "chainlink", 15.0),
    KnownAsset::new("ATOM", "cosmos", 10.0),
    KnownAsset::new("XLM", "stellar", 0.12),
    KnownAsset::new("NEAR", "near", 5.0),
    KnownAsset::new("ALGO", "algorand", 0.25),
    KnownAsset::new("VET", "vechain", 0.025),
    KnownAsset::new("ICP", "internet-computer", 12.0),
    KnownAsset::new("FIL", "filecoin", 6.0),
    KnownAsset::new("TRX", "tron", 0.08),
    KnownAsset::new("ETC", "ethereum-classic", 20.0),
];

/// Look up a known asset by ticker (case-insensitive)
pub fn find_asset(ticker: &str) -> Option<&'static KnownAsset> {
    KNOWN_ASSETS
        .iter()
        .find(|a| a.ticker.eq_ignore_ascii_case(ticker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_asset_ignores_case() {
        assert_eq!(find_asset("btc").unwrap().coingecko_id, "bitcoin");
        assert_eq!(find_asset("AVAX").unwrap().coingecko_id, "avalanche-2");
        assert!(find_asset("PEPE").is_none());
    }

    #[test]
    fn test_tickers_unique() {
        let mut tickers: Vec<_> = KNOWN_ASSETS.iter().map(|a| a.ticker).collect();
        tickers.sort();
        tickers.dedup();
        assert_eq!(tickers.len(), KNOWN_ASSETS.len());
    }
}
