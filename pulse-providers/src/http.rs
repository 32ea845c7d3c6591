//! Shared request plumbing for the REST adapters

use std::time::Duration;

use pulse_core::{AdapterError, AdapterResult, ProviderId};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ConfigError;

const USER_AGENT: &str = "CryptoPulse/1.0";

/// Build the HTTP client an adapter owns
pub(crate) fn build_client(timeout: Duration) -> Result<Client, ConfigError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Translate a transport error into the adapter taxonomy
pub(crate) fn request_error(provider: ProviderId, err: reqwest::Error) -> AdapterError {
    if err.is_timeout() {
        AdapterError::timeout(provider)
    } else {
        AdapterError::network(provider, err.to_string())
    }
}

/// Send a request and return its status with the body, whatever the status
pub(crate) async fn fetch_raw(
    provider: ProviderId,
    request: RequestBuilder,
) -> AdapterResult<(StatusCode, String)> {
    let response = request
        .send()
        .await
        .map_err(|e| request_error(provider, e))?;

    let status = response.status();
    let body = response.text().await.map_err(|e| request_error(provider, e))?;
    Ok((status, body))
}

/// Send a request and return its body, failing on any non-2xx status
pub(crate) async fn fetch_body(provider: ProviderId, request: RequestBuilder) -> AdapterResult<String> {
    let (status, body) = fetch_raw(provider, request).await?;
    if !status.is_success() {
        debug!("[{}] Non-success status {}", provider, status);
        return Err(AdapterError::status(provider, status.as_u16()));
    }
    Ok(body)
}

/// Decode a response body into its typed schema
pub(crate) fn decode<T: DeserializeOwned>(provider: ProviderId, body: &str) -> AdapterResult<T> {
    serde_json::from_str(body).map_err(|e| AdapterError::malformed(provider, e.to_string()))
}

/// Send a request and decode its JSON body
pub(crate) async fn get_json<T: DeserializeOwned>(
    provider: ProviderId,
    request: RequestBuilder,
) -> AdapterResult<T> {
    let body = fetch_body(provider, request).await?;
    decode(provider, &body)
}

/// Parse a decimal string as sent by exchanges ("67012.01000000")
pub(crate) fn parse_decimal(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
