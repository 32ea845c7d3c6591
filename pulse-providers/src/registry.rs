//! Construction of every provider client, and the fixed priority chains built from them

use std::sync::Arc;

use pulse_core::{
    Candle, CandleQuery, GeneratedText, ImageHit, ImageQuery, MarketQuery, MarketTicker, NewsItem,
    NewsQuery, PromptQuery, TopMoversQuery,
};
use tracing::info;

use crate::adapter::Adapter;
use crate::config::{ConfigError, CredentialStatus, ProviderConfig};
use crate::{BinanceClient, CoinGeckoClient, NewsApiClient, PexelsClient, TextGenClient};

/// Ordered list of adapters answering one query type
pub type Chain<Q, T> = Vec<Arc<dyn Adapter<Q, T>>>;

/// Upcast a concrete client into a chain link
fn link<Q, T, A>(adapter: &Arc<A>) -> Arc<dyn Adapter<Q, T>>
where
    Q: Send + Sync,
    T: Send,
    A: Adapter<Q, T> + 'static,
{
    adapter.clone()
}

/// All provider clients, built once at startup
#[derive(Clone)]
pub struct ProviderSet {
    coingecko: Arc<CoinGeckoClient>,
    binance: Arc<BinanceClient>,
    news: Arc<NewsApiClient>,
    text: Arc<TextGenClient>,
    images: Arc<PexelsClient>,
}

impl ProviderSet {
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let set = Self {
            coingecko: Arc::new(CoinGeckoClient::new(config)?),
            binance: Arc::new(BinanceClient::new(config)?),
            news: Arc::new(NewsApiClient::new(config)?),
            text: Arc::new(TextGenClient::new(config)),
            images: Arc::new(PexelsClient::new(config)?),
        };

        let credentials = set.credentials();
        info!(
            "Providers ready (news key: {}, text generation key: {}, image key: {})",
            credentials.news, credentials.text_generation, credentials.images
        );
        Ok(set)
    }

    /// Which keyed clients hold a credential
    pub fn credentials(&self) -> CredentialStatus {
        CredentialStatus {
            news: self.news.is_configured(),
            text_generation: self.text.is_configured(),
            images: self.images.is_configured(),
        }
    }

    /// Market snapshot: market-cap ranking first, then volume ranking
    pub fn market_chain(&self) -> Chain<MarketQuery, MarketTicker> {
        vec![link(&self.coingecko), link(&self.binance)]
    }

    /// Chart history: CoinGecko OHLC first, then Binance daily klines
    pub fn candle_chain(&self) -> Chain<CandleQuery, Candle> {
        vec![link(&self.coingecko), link(&self.binance)]
    }

    pub fn top_movers_chain(&self) -> Chain<TopMoversQuery, MarketTicker> {
        vec![link(&self.binance)]
    }

    pub fn news_chain(&self) -> Chain<NewsQuery, NewsItem> {
        vec![link(&self.news)]
    }

    pub fn text_chain(&self) -> Chain<PromptQuery, GeneratedText> {
        vec![link(&self.text)]
    }

    pub fn image_chain(&self) -> Chain<ImageQuery, ImageHit> {
        vec![link(&self.images)]
    }
}
