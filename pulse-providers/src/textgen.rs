//! Single-turn text generation over an OpenAI-compatible chat completion API
//!
//! Defaults to Gemini's OpenAI-compatible endpoint; any provider speaking the
//! chat completion protocol works by setting AI_API_BASE and AI_MODEL.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use pulse_core::{AdapterError, AdapterResult, GeneratedText, PromptQuery, ProviderId};
use tracing::{debug, info, instrument};

use crate::adapter::Adapter;
use crate::config::ProviderConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Text generation client
#[derive(Debug, Clone)]
pub struct TextGenClient {
    /// `None` when no API key is configured
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl TextGenClient {
    pub fn new(config: &ProviderConfig) -> Self {
        let client = config.ai_api_key.as_ref().map(|key| {
            let openai_config = OpenAIConfig::new()
                .with_api_key(key)
                .with_api_base(&config.ai_api_base);
            Client::with_config(openai_config)
        });

        Self {
            client,
            model: config.ai_model.clone(),
        }
    }

    /// Check if the client is configured (has an API key)
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

fn map_openai_error(err: OpenAIError) -> AdapterError {
    match err {
        OpenAIError::JSONDeserialize(..) => {
            AdapterError::malformed(ProviderId::TextGeneration, err.to_string())
        }
        OpenAIError::ApiError(api) => AdapterError::api(ProviderId::TextGeneration, api.message),
        other => AdapterError::network(ProviderId::TextGeneration, other.to_string()),
    }
}

#[async_trait]
impl Adapter<PromptQuery, GeneratedText> for TextGenClient {
    fn id(&self) -> ProviderId {
        ProviderId::TextGeneration
    }

    #[instrument(skip(self, query), fields(provider = "textgen", model = %self.model))]
    async fn fetch(&self, query: &PromptQuery) -> AdapterResult<Vec<GeneratedText>> {
        let Some(client) = &self.client else {
            return Err(AdapterError::missing_credential(
                ProviderId::TextGeneration,
                "AI_API_KEY",
            ));
        };

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(query.prompt.as_str())
                .build()
                .map_err(map_openai_error)?
                .into()])
            .build()
            .map_err(map_openai_error)?;

        debug!("Submitting prompt ({} chars)", query.prompt.len());

        let response = tokio::time::timeout(REQUEST_TIMEOUT, client.chat().create(request))
            .await
            .map_err(|_| AdapterError::timeout(ProviderId::TextGeneration))?
            .map_err(map_openai_error)?;

        let texts: Vec<GeneratedText> = response
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .map(|text| GeneratedText { text })
            .collect();

        info!("Received {} completion(s)", texts.len());
        Ok(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let client = TextGenClient::new(&ProviderConfig::default());
        assert!(!client.is_configured());

        let err = client
            .fetch(&PromptQuery {
                prompt: "Write about BTC".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), pulse_core::ErrorKind::Configuration);
    }

    #[test]
    fn test_configured_with_key() {
        let client = TextGenClient::new(&ProviderConfig {
            ai_api_key: Some("key".to_string()),
            ai_model: "gpt-4o-mini".to_string(),
            ..ProviderConfig::default()
        });
        assert!(client.is_configured());
        assert_eq!(client.model, "gpt-4o-mini");
    }
}
