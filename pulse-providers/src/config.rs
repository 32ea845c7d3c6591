//! Provider credentials and endpoints

use std::env;

use pulse_core::ProviderId;

/// Default endpoints, overridable through the environment
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const BINANCE_API_URL: &str = "https://api.binance.com/api/v3";
pub const NEWS_API_URL: &str = "https://newsapi.org/v2";
pub const PEXELS_API_URL: &str = "https://api.pexels.com/v1";
pub const AI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const AI_MODEL: &str = "gemini-2.0-flash";

/// Configuration for every upstream provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// NewsAPI key (news refresh is skipped without it)
    pub news_api_key: Option<String>,
    /// Text generation key (canned article text is used without it)
    pub ai_api_key: Option<String>,
    /// Pexels key (placeholder image is used without it)
    pub pexels_api_key: Option<String>,
    /// Optional CoinGecko demo key
    pub coingecko_api_key: Option<String>,
    /// Base URL of the OpenAI-compatible chat completion API
    pub ai_api_base: String,
    /// Model name sent with each completion request
    pub ai_model: String,
    pub coingecko_url: String,
    pub binance_url: String,
    pub news_api_url: String,
    pub pexels_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            ai_api_key: None,
            pexels_api_key: None,
            coingecko_api_key: None,
            ai_api_base: AI_API_BASE.to_string(),
            ai_model: AI_MODEL.to_string(),
            coingecko_url: COINGECKO_API_URL.to_string(),
            binance_url: BINANCE_API_URL.to_string(),
            news_api_url: NEWS_API_URL.to_string(),
            pexels_url: PEXELS_API_URL.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Load provider configuration from environment variables
    ///
    /// Reads NEWS_API_KEY, AI_API_KEY, PEXELS_API_KEY, COINGECKO_API_KEY,
    /// AI_API_BASE, AI_MODEL and the *_API_URL overrides. Empty values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let url = |key: &str, default: &str| {
            get(key)
                .unwrap_or_else(|| default.to_string())
                .trim_end_matches('/')
                .to_string()
        };

        Self {
            news_api_key: get("NEWS_API_KEY"),
            ai_api_key: get("AI_API_KEY"),
            pexels_api_key: get("PEXELS_API_KEY"),
            coingecko_api_key: get("COINGECKO_API_KEY"),
            ai_api_base: url("AI_API_BASE", AI_API_BASE),
            ai_model: get("AI_MODEL").unwrap_or_else(|| AI_MODEL.to_string()),
            coingecko_url: url("COINGECKO_API_URL", COINGECKO_API_URL),
            binance_url: url("BINANCE_API_URL", BINANCE_API_URL),
            news_api_url: url("NEWS_API_URL", NEWS_API_URL),
            pexels_url: url("PEXELS_API_URL", PEXELS_API_URL),
        }
    }
}

/// Presence of each optional credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CredentialStatus {
    pub news: bool,
    pub text_generation: bool,
    pub images: bool,
}

impl CredentialStatus {
    /// Each keyed provider with whether its credential is present
    pub fn by_provider(&self) -> [(ProviderId, bool); 3] {
        [
            (ProviderId::NewsApi, self.news),
            (ProviderId::TextGeneration, self.text_generation),
            (ProviderId::Pexels, self.images),
        ]
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
