//! Aggregation services for the CryptoPulse dashboard
//!
//! Runs provider chains in priority order, degrades to synthetic data when
//! every provider fails, and keeps the home page snapshot fresh on a timer.

pub mod article_service;
pub mod fallback;
pub mod market_service;
pub mod refresh;
pub mod scheduler;
pub mod snapshot_cache;
pub mod snapshot_store;
pub mod synthetic;

#[cfg(test)]
mod testing;

pub use article_service::ArticleService;
pub use fallback::{first_success, Sourced};
pub use market_service::{MarketDataService, ProviderCheck};
pub use refresh::RefreshJobs;
pub use scheduler::{RefreshIntervals, SchedulerHandle};
pub use snapshot_cache::{CacheStatus, SnapshotCache};
pub use snapshot_store::{SnapshotStore, SnapshotStoreError};
