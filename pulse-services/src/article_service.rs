//! Article Service
//!
//! Composes the daily featured article in three stages: topic discovery,
//! content generation and illustration. Each stage has its own fallback, so
//! the pipeline always produces a complete article.

use rand::Rng;
use tracing::{info, instrument, warn};

use pulse_core::{
    FeaturedArticle, GeneratedText, ImageHit, ImageQuery, MarketTicker, PromptQuery,
    TopMoversQuery, ARTICLE_IMAGE_PLACEHOLDER,
};
use pulse_providers::{Chain, ProviderSet};

use crate::fallback::first_success;

/// Topics used when no market mover could be found
pub const FALLBACK_TOPICS: [&str; 5] = [
    "Bitcoin (BTC) market analysis",
    "Ethereum (ETH) price movement",
    "Cryptocurrency market trends",
    "DeFi ecosystem developments",
    "Altcoin season analysis",
];

/// Suffix appended to the topic's first word when searching for an image
const IMAGE_TERM_SUFFIX: &str = "cryptocurrency";

/// Prompt submitted to the text generator
pub fn prompt_for(topic: &str) -> String {
    format!(
        "Write a 500-word blog post about {}. Discuss potential factors and market sentiment. \
         Make it informative and engaging for cryptocurrency investors.",
        topic
    )
}

/// Canned article body used when text generation fails
pub fn fallback_content(topic: &str) -> String {
    format!(
        "The cryptocurrency market continues to show interesting developments with {}. \
         Market participants are closely monitoring price movements and trading volumes across \
         major digital assets. Current market conditions suggest a mix of bullish and bearish \
         sentiment, with institutional interest remaining strong. Technical analysis indicates \
         potential support and resistance levels that traders should watch. Risk management \
         remains crucial in these volatile market conditions.",
        topic
    )
}

/// Topic describing a 24h gainer, e.g. `SOL (12.50% move)`
pub fn topic_for_mover(ticker: &MarketTicker) -> String {
    format!("{} ({}% move)", ticker.base_asset(), ticker.price_change_percent)
}

/// Image search term: the topic's first word plus a fixed suffix
pub fn image_term(topic: &str) -> String {
    let first = topic.split_whitespace().next().unwrap_or_default();
    format!("{} {}", first, IMAGE_TERM_SUFFIX).trim().to_string()
}

fn random_fallback_topic() -> &'static str {
    let index = rand::rng().random_range(0..FALLBACK_TOPICS.len());
    FALLBACK_TOPICS[index]
}

/// Service that builds [`FeaturedArticle`]s from the topic, text and image chains
pub struct ArticleService {
    topic_chain: Chain<TopMoversQuery, MarketTicker>,
    text_chain: Chain<PromptQuery, GeneratedText>,
    image_chain: Chain<ImageQuery, ImageHit>,
}

impl ArticleService {
    pub fn new(
        topic_chain: Chain<TopMoversQuery, MarketTicker>,
        text_chain: Chain<PromptQuery, GeneratedText>,
        image_chain: Chain<ImageQuery, ImageHit>,
    ) -> Self {
        Self {
            topic_chain,
            text_chain,
            image_chain,
        }
    }

    pub fn from_providers(providers: &ProviderSet) -> Self {
        Self::new(
            providers.top_movers_chain(),
            providers.text_chain(),
            providers.image_chain(),
        )
    }

    /// Largest 24h gainer among USDT pairs, or a random generic topic
    pub async fn discover_topic(&self) -> String {
        let mover = first_success(&self.topic_chain, &TopMoversQuery::default())
            .await
            .ok()
            .and_then(|sourced| sourced.records.into_iter().next());

        match mover {
            Some(ticker) => topic_for_mover(&ticker),
            None => {
                let topic = random_fallback_topic();
                warn!("No market mover available, using fallback topic {:?}", topic);
                topic.to_string()
            }
        }
    }

    /// Generated article body, or the canned paragraph for `topic`
    pub async fn generate_content(&self, topic: &str) -> String {
        let query = PromptQuery {
            prompt: prompt_for(topic),
        };

        let generated = first_success(&self.text_chain, &query)
            .await
            .ok()
            .and_then(|sourced| sourced.records.into_iter().next())
            .map(|g| g.text)
            .filter(|text| !text.trim().is_empty());

        generated.unwrap_or_else(|| {
            warn!("Text generation unavailable, using fallback content");
            fallback_content(topic)
        })
    }

    /// Photo for `topic`, or the placeholder image when none is found
    pub async fn find_image(&self, topic: &str) -> String {
        let query = ImageQuery::new(image_term(topic));

        match first_success(&self.image_chain, &query).await {
            Ok(sourced) => match sourced.records.into_iter().next() {
                Some(hit) => hit.url,
                None => ARTICLE_IMAGE_PLACEHOLDER.to_string(),
            },
            Err(_) => {
                warn!("No image found for {:?}, using placeholder", query.term);
                ARTICLE_IMAGE_PLACEHOLDER.to_string()
            }
        }
    }

    /// Run all three stages and assemble the article
    #[instrument(skip(self))]
    pub async fn compose_article(&self) -> FeaturedArticle {
        let topic = self.discover_topic().await;
        info!("Featured article topic: {}", topic);

        let content = self.generate_content(&topic).await;
        let image_url = self.find_image(&topic).await;

        FeaturedArticle::compose(&topic, content, image_url)
    }
}
