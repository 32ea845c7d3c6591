//! The contract every provider adapter fulfils

use async_trait::async_trait;
use pulse_core::{AdapterResult, ProviderId};

/// A normalizing client for one upstream source answering queries of type `Q`
///
/// Adapters make a single bounded attempt per call: no retries, no local state
/// changes. Every failure is returned as an [`pulse_core::AdapterError`] tagged
/// with [`Adapter::id`]; deciding what to try next is the caller's job.
#[async_trait]
pub trait Adapter<Q, T>: Send + Sync
where
    Q: Send + Sync,
    T: Send,
{
    /// Provider this adapter talks to
    fn id(&self) -> ProviderId;

    /// Fetch and normalize records for `query`
    async fn fetch(&self, query: &Q) -> AdapterResult<Vec<T>>;
}
