//! Market data structures: 24h tickers and OHLC candles

use serde::{Deserialize, Serialize};

/// Quote currency every ticker symbol is expressed in
pub const QUOTE_ASSET: &str = "USDT";

/// Upper bound on bars served for one chart
pub const MAX_CANDLES: usize = 100;

/// One row of the market table
///
/// Numeric fields are pre-rendered strings so every provider serializes
/// identically: prices with 6 decimals, percentages with 2, volumes as integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTicker {
    /// Trading symbol, always `<BASE>USDT`
    pub symbol: String,
    pub last_price: String,
    pub price_change_percent: String,
    pub volume: String,
    /// Quote volume; market cap when the provider ranks by it
    pub quote_volume: String,
    pub weighted_avg_price: String,
}

impl MarketTicker {
    /// Build a ticker from raw numbers, rendering each field in its canonical precision
    ///
    /// Returns `None` when any value is not finite.
    pub fn from_values(
        symbol: String,
        last_price: f64,
        price_change_percent: f64,
        volume: f64,
        quote_volume: f64,
        weighted_avg_price: f64,
    ) -> Option<Self> {
        let values = [
            last_price,
            price_change_percent,
            volume,
            quote_volume,
            weighted_avg_price,
        ];
        if values.iter().any(|v| !v.is_finite()) || !symbol.ends_with(QUOTE_ASSET) {
            return None;
        }

        Some(Self {
            symbol,
            last_price: format!("{:.6}", last_price),
            price_change_percent: format!("{:.2}", price_change_percent),
            volume: format!("{:.0}", volume),
            quote_volume: format!("{:.0}", quote_volume),
            weighted_avg_price: format!("{:.6}", weighted_avg_price),
        })
    }

    /// Canonical symbol for a native ticker: uppercased with the quote asset appended
    pub fn symbol_for(native: &str) -> String {
        format!("{}{}", native.trim().to_uppercase(), QUOTE_ASSET)
    }

    /// The symbol without its quote asset suffix
    pub fn base_asset(&self) -> &str {
        self.symbol
            .strip_suffix(QUOTE_ASSET)
            .unwrap_or(&self.symbol)
    }

    /// Check the rendering rules every served ticker must satisfy
    pub fn is_well_formed(&self) -> bool {
        self.symbol.ends_with(QUOTE_ASSET)
            && has_decimals(&self.last_price, 6)
            && has_decimals(&self.price_change_percent, 2)
            && has_decimals(&self.volume, 0)
            && has_decimals(&self.quote_volume, 0)
            && has_decimals(&self.weighted_avg_price, 6)
    }
}

/// True when `value` is an optionally signed decimal with exactly `places` fractional digits
fn has_decimals(value: &str, places: usize) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(int_part) {
        return false;
    }

    match (places, frac_part) {
        (0, None) => true,
        (0, Some(_)) => false,
        (n, Some(f)) => f.len() == n && digits(f),
        (_, None) => false,
    }
}

/// One OHLC bar; `time` is UNIX seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Build a bar from a provider's millisecond open time
    pub fn from_millis(open_time_ms: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time: open_time_ms.div_euclid(1000),
            open,
            high,
            low,
            close,
        }
    }

    /// `low <= open,close <= high` with every price finite
    pub fn is_well_formed(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        prices.iter().all(|p| p.is_finite())
            && self.low <= self.open.min(self.close)
            && self.high >= self.open.max(self.close)
    }
}

/// Bring a provider series into serving shape
///
/// Drops malformed bars, orders by time, removes duplicate timestamps and keeps
/// the most recent [`MAX_CANDLES`].
pub fn normalize_candles(mut candles: Vec<Candle>) -> Vec<Candle> {
    candles.retain(Candle::is_well_formed);
    candles.sort_by_key(|c| c.time);
    candles.dedup_by_key(|c| c.time);

    if candles.len() > MAX_CANDLES {
        candles.drain(..candles.len() - MAX_CANDLES);
    }
    candles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_rendering() {
        let ticker = MarketTicker::from_values(
            MarketTicker::symbol_for("btc"),
            67012.5,
            -1.234,
            35123.7,
            1_300_000_000.2,
            67012.5,
        )
        .unwrap();

        assert_eq!(ticker.symbol, "BTCUSDT");
        assert_eq!(ticker.last_price, "67012.500000");
        assert_eq!(ticker.price_change_percent, "-1.23");
        assert_eq!(ticker.volume, "35124");
        assert_eq!(ticker.quote_volume, "1300000000");
        assert!(ticker.is_well_formed());
        assert_eq!(ticker.base_asset(), "BTC");
    }

    #[test]
    fn test_ticker_rejects_non_finite() {
        assert!(MarketTicker::from_values("ETHUSDT".into(), f64::NAN, 0.0, 0.0, 0.0, 0.0).is_none());
        assert!(MarketTicker::from_values("ETH".into(), 1.0, 0.0, 0.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let ticker =
            MarketTicker::from_values("SOLUSDT".into(), 90.0, 2.0, 10.0, 20.0, 89.1).unwrap();
        let json = serde_json::to_value(&ticker).unwrap();
        assert_eq!(json["lastPrice"], "90.000000");
        assert_eq!(json["priceChangePercent"], "2.00");
        assert_eq!(json["weightedAvgPrice"], "89.100000");
    }

    #[test]
    fn test_has_decimals() {
        assert!(has_decimals("1.50", 2));
        assert!(has_decimals("-0.25", 2));
        assert!(has_decimals("12345", 0));
        assert!(!has_decimals("12345.0", 0));
        assert!(!has_decimals("1.5", 2));
        assert!(!has_decimals("NaN", 2));
        assert!(!has_decimals(".50", 2));
    }

    #[test]
    fn test_candle_from_millis_floors() {
        let candle = Candle::from_millis(1_700_000_000_999, 1.0, 2.0, 0.5, 1.5);
        assert_eq!(candle.time, 1_700_000_000);
    }

    #[test]
    fn test_normalize_candles() {
        let bar = |time, low, high| Candle {
            time,
            open: 10.0,
            high,
            low,
            close: 10.0,
        };
        let series = vec![
            bar(300, 9.0, 11.0),
            bar(100, 9.0, 11.0),
            bar(200, 11.0, 12.0), // low above open
            bar(100, 8.0, 12.0),
        ];

        let normalized = normalize_candles(series);
        let times: Vec<_> = normalized.iter().map(|c| c.time).collect();
        assert_eq!(times, vec![100, 300]);
    }

    #[test]
    fn test_normalize_keeps_most_recent() {
        let series: Vec<_> = (0..150)
            .map(|i| Candle {
                time: i,
                open: 1.0,
                high: 1.0,
                low: 1.0,
                close: 1.0,
            })
            .collect();

        let normalized = normalize_candles(series);
        assert_eq!(normalized.len(), MAX_CANDLES);
        assert_eq!(normalized[0].time, 50);
        assert_eq!(normalized.last().unwrap().time, 149);
    }
}
