//! Core types for the CryptoPulse market dashboard
//!
//! This crate defines the normalized records every provider adapter produces,
//! the queries adapters answer, and the error type they report.

pub mod assets;
pub mod error;
pub mod market;
pub mod news;
pub mod provider;
pub mod query;
pub mod snapshot;

pub use assets::{find_asset, KnownAsset, KNOWN_ASSETS};
pub use error::{AdapterError, AdapterResult, ErrorKind, FailureReason};
pub use market::{normalize_candles, Candle, MarketTicker, MAX_CANDLES, QUOTE_ASSET};
pub use news::{NewsItem, NEWS_IMAGE_PLACEHOLDER};
pub use provider::ProviderId;
pub use query::{CandleQuery, GeneratedText, ImageHit, ImageQuery, MarketQuery, NewsQuery, PromptQuery, TopMoversQuery};
pub use snapshot::{FeaturedArticle, Snapshot, ARTICLE_IMAGE_PLACEHOLDER, SUMMARY_WORDS};
