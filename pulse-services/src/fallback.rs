//! First-success evaluation of an ordered adapter chain

use std::sync::Arc;

use pulse_core::{AdapterError, ProviderId};
use pulse_providers::Adapter;
use tracing::{info, warn};

/// Records from a single provider, in the order it returned them
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub provider: ProviderId,
    pub records: Vec<T>,
}

impl<T> Sourced<T> {
    pub fn new(provider: ProviderId, records: Vec<T>) -> Self {
        Self { provider, records }
    }

    pub fn is_synthetic(&self) -> bool {
        self.provider == ProviderId::Synthetic
    }
}

/// Try each adapter in order until one returns a non-empty result
///
/// Adapters run strictly one after another; a later adapter is only called
/// once the previous one has failed. Results are never merged across adapters.
/// An empty success counts as a failure. When the chain is exhausted every
/// failure is returned, in chain order.
pub async fn first_success<Q, T>(
    chain: &[Arc<dyn Adapter<Q, T>>],
    query: &Q,
) -> Result<Sourced<T>, Vec<AdapterError>>
where
    Q: Send + Sync + 'static,
    T: Send + 'static,
{
    let mut failures = Vec::with_capacity(chain.len());

    for adapter in chain {
        let provider = adapter.id();
        match adapter.fetch(query).await {
            Ok(records) if !records.is_empty() => {
                info!("{} answered with {} record(s)", provider, records.len());
                return Ok(Sourced::new(provider, records));
            }
            Ok(_) => {
                warn!("{} returned no records, trying next", provider);
                failures.push(AdapterError::empty(provider));
            }
            Err(e) => {
                warn!("{} failed ({:?}): {}, trying next", provider, e.kind(), e.reason);
                failures.push(e);
            }
        }
    }

    Err(failures)
}
