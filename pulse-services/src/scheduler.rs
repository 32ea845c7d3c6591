//! Interval scheduler for the refresh jobs

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::refresh::RefreshJobs;

/// How often each job runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshIntervals {
    pub news: Duration,
    pub article: Duration,
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            news: Duration::from_secs(60 * 60),
            article: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Running scheduler loops
pub struct SchedulerHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl SchedulerHandle {
    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|t| !t.is_finished())
    }

    /// Stop both loops; a job already in flight runs to completion
    pub fn shutdown(self) {
        for task in &self.tasks {
            task.abort();
        }
        info!("Refresh scheduler stopped");
    }
}

/// Start one loop per job
///
/// Both jobs are expected to have run once at startup, so the first run
/// happens one full interval from now.
pub fn spawn(jobs: Arc<RefreshJobs>, intervals: RefreshIntervals) -> SchedulerHandle {
    let news_jobs = jobs.clone();
    let news = spawn_loop("news refresh", intervals.news, move || {
        let jobs = news_jobs.clone();
        async move {
            jobs.refresh_news().await;
        }
    });

    let article = spawn_loop("article refresh", intervals.article, move || {
        let jobs = jobs.clone();
        async move {
            jobs.refresh_featured_article().await;
        }
    });

    info!(
        "Refresh scheduler started (news every {:?}, article every {:?})",
        intervals.news, intervals.article
    );

    SchedulerHandle {
        tasks: vec![news, article],
    }
}

fn spawn_loop<F, Fut>(name: &'static str, period: Duration, job: F) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            debug!("Running scheduled {}", name);

            // Own task so a panicking job cannot end the loop
            if let Err(e) = tokio::spawn(job()).await {
                error!("Scheduled {} failed: {}", name, e);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article_service::ArticleService;
    use crate::snapshot_cache::SnapshotCache;
    use crate::testing::StubAdapter;
    use pulse_core::{NewsItem, ProviderId, Snapshot};

    #[tokio::test(start_paused = true)]
    async fn test_jobs_run_on_interval_until_shutdown() {
        let news = StubAdapter::ok(
            ProviderId::NewsApi,
            vec![NewsItem::new("AP", "t", "https://example.com", None, "2024-01-01")],
        );
        let cache = Arc::new(SnapshotCache::in_memory(Snapshot::placeholder()));
        let jobs = Arc::new(RefreshJobs::new(
            vec![news.clone()],
            ArticleService::new(Vec::new(), Vec::new(), Vec::new()),
            cache.clone(),
        ));

        let handle = spawn(
            jobs,
            RefreshIntervals {
                news: Duration::from_secs(60),
                article: Duration::from_secs(3600),
            },
        );
        assert!(handle.is_running());

        // No immediate run
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(news.calls(), 0);

        tokio::time::sleep(Duration::from_secs(155)).await;
        assert_eq!(news.calls(), 3);
        assert!(cache.status().last_article_refresh.is_none());

        handle.shutdown();
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(news.calls(), 3);
    }
}
