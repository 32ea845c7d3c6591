//! Scripted adapters for driving the orchestrator in tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pulse_core::{AdapterError, AdapterResult, FailureReason, ProviderId};
use pulse_providers::Adapter;

/// Adapter that always answers with the same scripted result
pub struct StubAdapter<T> {
    provider: ProviderId,
    result: Result<Vec<T>, FailureReason>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl<T: Clone + Send + Sync> StubAdapter<T> {
    pub fn ok(provider: ProviderId, records: Vec<T>) -> Arc<Self> {
        Arc::new(Self {
            provider,
            result: Ok(records),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(provider: ProviderId, reason: FailureReason) -> Arc<Self> {
        Arc::new(Self {
            provider,
            result: Err(reason),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// Same stub, answering only after `delay`
    pub fn delayed(provider: ProviderId, records: Vec<T>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            provider,
            result: Ok(records),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<Q, T> Adapter<Q, T> for StubAdapter<T>
where
    Q: Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn id(&self) -> ProviderId {
        self.provider
    }

    async fn fetch(&self, _query: &Q) -> AdapterResult<Vec<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result
            .clone()
            .map_err(|reason| AdapterError::new(self.provider, reason))
    }
}
