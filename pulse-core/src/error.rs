//! Error types reported at the adapter boundary

use thiserror::Error;

use crate::provider::ProviderId;

/// Why a single adapter call produced no usable records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("API error: {0}")]
    Api(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("no records returned")]
    Empty,
}

/// Coarse classification of adapter failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Timeout, connection failure or non-2xx status
    TransientNetwork,
    /// Unexpected JSON shape or missing field
    MalformedResponse,
    /// Credential absent; the network was never touched
    Configuration,
    /// The provider answered but had nothing for us
    NoData,
}

/// Tagged failure of one adapter call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{provider}: {reason}")]
pub struct AdapterError {
    pub provider: ProviderId,
    pub reason: FailureReason,
}

impl AdapterError {
    pub fn new(provider: ProviderId, reason: FailureReason) -> Self {
        Self { provider, reason }
    }

    pub fn timeout(provider: ProviderId) -> Self {
        Self::new(provider, FailureReason::Timeout)
    }

    pub fn network(provider: ProviderId, msg: impl Into<String>) -> Self {
        Self::new(provider, FailureReason::Network(msg.into()))
    }

    pub fn status(provider: ProviderId, status: u16) -> Self {
        Self::new(provider, FailureReason::Status(status))
    }

    pub fn api(provider: ProviderId, msg: impl Into<String>) -> Self {
        Self::new(provider, FailureReason::Api(msg.into()))
    }

    pub fn malformed(provider: ProviderId, msg: impl Into<String>) -> Self {
        Self::new(provider, FailureReason::Malformed(msg.into()))
    }

    pub fn missing_credential(provider: ProviderId, name: &'static str) -> Self {
        Self::new(provider, FailureReason::MissingCredential(name))
    }

    pub fn invalid_query(provider: ProviderId, msg: impl Into<String>) -> Self {
        Self::new(provider, FailureReason::InvalidQuery(msg.into()))
    }

    pub fn empty(provider: ProviderId) -> Self {
        Self::new(provider, FailureReason::Empty)
    }

    pub fn kind(&self) -> ErrorKind {
        match self.reason {
            FailureReason::Timeout
            | FailureReason::Network(_)
            | FailureReason::Status(_)
            | FailureReason::Api(_) => ErrorKind::TransientNetwork,
            FailureReason::Malformed(_) | FailureReason::InvalidQuery(_) => {
                ErrorKind::MalformedResponse
            }
            FailureReason::MissingCredential(_) => ErrorKind::Configuration,
            FailureReason::Empty => ErrorKind::NoData,
        }
    }
}

/// Result type alias for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
