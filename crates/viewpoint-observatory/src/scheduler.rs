//! Bounded-parallelism runner over the cartesian product `sites × modes`.
//! Owns no browser state itself: it drives many [`CrawlEngine`]
//! instances against one shared [`Browser`], persists each finished
//! [`Observation`] through the [`Store`], and applies the retry/backoff and
//! resume-skip policy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{error, info, instrument, warn};
use viewpoint_core::Browser;

use crate::config::CrawlerConfig;
use crate::engine::{CrawlEngine, ProgressSink};
use crate::error::SchedulerError;
use crate::models::{ConsentMode, CrawlStatus, Observation, Site, Task};
use crate::store::Store;

const RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Aggregate counters for a finished run, enough for a CLI summary without
/// re-querying the store.
#[derive(Debug, Default)]
pub struct RunReport {
    pub total_tasks: usize,
    pub skipped: usize,
    pub completed: AtomicUsize,
    pub succeeded: AtomicUsize,
    pub errored: AtomicUsize,
}

/// Drives the full `sites × modes` task set with bounded parallelism.
pub struct Scheduler {
    config: Arc<CrawlerConfig>,
    engine: Arc<CrawlEngine>,
    store: Arc<Store>,
}

impl Scheduler {
    #[must_use]
    pub fn new(config: Arc<CrawlerConfig>, engine: Arc<CrawlEngine>, store: Arc<Store>) -> Self {
        Self { config, engine, store }
    }

    /// Build the task set: cartesian product in site-then-mode order, skipping
    /// tasks with a prior `SUCCESS` observation when `resume` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if a resume lookup against the store fails.
    pub async fn build_tasks(
        &self,
        sites: &[Site],
        modes: &[ConsentMode],
        resume: bool,
    ) -> Result<(Vec<Task>, usize), SchedulerError> {
        let mut tasks = Vec::with_capacity(sites.len() * modes.len());
        let mut skipped = 0usize;
        for site in sites {
            for &mode in modes {
                if resume && self.store.has_session(&site.domain, mode).await? {
                    skipped += 1;
                    continue;
                }
                tasks.push(Task { site: site.clone(), consent_mode: mode });
            }
        }
        Ok((tasks, skipped))
    }

    /// Run every task to completion, bounded to `config.crawler.concurrency`
    /// in flight at once. Each task is retried up to `max_retries` times with
    /// a fresh browser context on a non-`SUCCESS` outcome; after every task
    /// attempt sequence, the task's semaphore slot is held for
    /// `inter_site_delay_ms` before release.
    #[instrument(skip_all, fields(tasks = tasks.len()))]
    pub async fn run(
        &self,
        browser: Arc<Browser>,
        tasks: Vec<Task>,
        run_id: Arc<str>,
        progress: Arc<dyn ProgressSink>,
    ) -> Arc<RunReport> {
        let total_tasks = tasks.len();
        let report = Arc::new(RunReport { total_tasks, ..RunReport::default() });
        let semaphore = Arc::new(Semaphore::new(self.config.crawler.concurrency.max(1)));

        let mut handles = Vec::with_capacity(tasks.len());
        for task in tasks {
            let semaphore = semaphore.clone();
            let browser = browser.clone();
            let engine = self.engine.clone();
            let store = self.store.clone();
            let config = self.config.clone();
            let run_id = run_id.clone();
            let progress = progress.clone();
            let report = report.clone();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore never closed");
                let observation =
                    run_with_retries(&engine, &browser, &task, &run_id, &config, progress.as_ref())
                        .await;

                report.completed.fetch_add(1, Ordering::Relaxed);
                match observation.status {
                    CrawlStatus::Success => {
                        report.succeeded.fetch_add(1, Ordering::Relaxed);
                    }
                    _ => {
                        report.errored.fetch_add(1, Ordering::Relaxed);
                    }
                }

                if let Err(err) = store.save_observation(&observation).await {
                    error!(
                        site = %task.site.domain,
                        mode = %task.consent_mode,
                        error = %err,
                        "failed to persist observation; continuing",
                    );
                }

                tokio::time::sleep(Duration::from_millis(config.crawler.inter_site_delay_ms)).await;
            }));
        }

        for handle in handles {
            if let Err(err) = handle.await {
                error!(error = %err, "crawl task panicked");
            }
        }

        info!(
            total = report.total_tasks,
            succeeded = report.succeeded.load(Ordering::Relaxed),
            errored = report.errored.load(Ordering::Relaxed),
            "scheduler run complete",
        );

        report
    }
}

/// Run one task, retrying up to `max_retries` times on a non-`SUCCESS`
/// outcome. Every attempt is a fresh [`CrawlEngine::run`] call, which itself
/// creates a fresh, fully-isolated browser context — there is no
/// "continue from where we were".
async fn run_with_retries(
    engine: &CrawlEngine,
    browser: &Browser,
    task: &Task,
    run_id: &str,
    config: &CrawlerConfig,
    progress: &dyn ProgressSink,
) -> Observation {
    let mut attempt = 0u32;
    loop {
        let observation = engine.run(browser, task, run_id, progress).await;
        if observation.status == CrawlStatus::Success || attempt >= config.crawler.max_retries {
            return observation;
        }
        warn!(
            site = %task.site.domain,
            mode = %task.consent_mode,
            attempt,
            status = ?observation.status,
            "task did not succeed; retrying with a fresh context",
        );
        attempt += 1;
        tokio::time::sleep(RETRY_BACKOFF).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_key_is_unique_per_site_and_mode() {
        let site = Site {
            url: "https://example.com".into(),
            domain: "example.com".into(),
            category: None,
            rank: None,
        };
        let accept = Task { site: site.clone(), consent_mode: ConsentMode::Accept };
        let reject = Task { site, consent_mode: ConsentMode::Reject };
        assert_ne!(accept.key(), reject.key());
    }
}
