//! Locally generated market data, served when every provider in a chain fails
//!
//! Generators take the random source as a parameter so tests can seed it.

use chrono::{DateTime, Utc};
use pulse_core::{find_asset, Candle, MarketTicker, KNOWN_ASSETS, MAX_CANDLES};
use rand::Rng;

/// Anchor price for tickers missing from the known-asset table
pub const DEFAULT_REFERENCE_PRICE: f64 = 100.0;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Maximum absolute 24h change applied to a reference price, in percent
const MAX_TICKER_CHANGE_PCT: f64 = 10.0;

/// Maximum absolute daily return in the simulated walk
const MAX_DAILY_RETURN: f64 = 0.05;

/// A market table covering every known asset
///
/// Each price is its reference price moved by a uniform change in
/// [-10%, +10%]; the weighted average sits 1% below the last price.
pub fn synthetic_tickers<R: Rng + ?Sized>(rng: &mut R) -> Vec<MarketTicker> {
    KNOWN_ASSETS
        .iter()
        .filter_map(|asset| {
            let change = rng.random_range(-MAX_TICKER_CHANGE_PCT..=MAX_TICKER_CHANGE_PCT);
            let price = asset.reference_price * (1.0 + change / 100.0);
            let volume = rng.random_range(10_000u64..=1_000_000);
            let quote_volume = rng.random_range(100_000_000u64..=1_000_000_000);

            MarketTicker::from_values(
                MarketTicker::symbol_for(asset.ticker),
                price,
                change,
                volume as f64,
                quote_volume as f64,
                price * 0.99,
            )
        })
        .collect()
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// One hundred daily bars ending on the UTC day containing `end`
///
/// The walk starts at the asset's reference price and compounds a uniform
/// daily return in [-5%, +5%]. Open and close sit within 2% of the day's
/// price; high and low are widened so they always contain both.
pub fn synthetic_candles<R: Rng + ?Sized>(
    ticker: &str,
    end: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Candle> {
    let mut price = find_asset(ticker)
        .map(|a| a.reference_price)
        .unwrap_or(DEFAULT_REFERENCE_PRICE);
    let last_day = end.timestamp().div_euclid(SECONDS_PER_DAY) * SECONDS_PER_DAY;
    let days = MAX_CANDLES as i64;

    (0..days)
        .map(|i| {
            if i > 0 {
                price *= 1.0 + rng.random_range(-MAX_DAILY_RETURN..=MAX_DAILY_RETURN);
            }

            let open = price * rng.random_range(0.98..=1.02);
            let close = price * rng.random_range(0.98..=1.02);
            let high = (price * rng.random_range(1.01..=1.05)).max(open).max(close);
            let low = (price * rng.random_range(0.95..=0.99)).min(open).min(close);

            Candle {
                time: last_day - (days - 1 - i) * SECONDS_PER_DAY,
                open: round6(open),
                high: round6(high),
                low: round6(low),
                close: round6(close),
            }
        })
        .collect()
}
