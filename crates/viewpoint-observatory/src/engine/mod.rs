//! Per-task crawl state machine: drives exactly one `(Site, ConsentMode)`
//! task to completion using one freshly-created, fully-isolated browser context.
//!
//! ```text
//! INIT -> NAVIGATING -> PRE_CONSENT_SNAPSHOT -> CONSENTING
//!   -> POST_CONSENT_DWELL -> SCROLLING -> FINAL_DWELL
//!   -> COLLECTING -> PERSISTED
//! ```
//!
//! Any state may fail through to `FAILED`; the only state whose failure
//! aborts the task is `NAVIGATING` (a timeout or a hard navigation error).
//! Every other phase degrades to partial/default results rather than
//! aborting: collectors never abort a task.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};
use viewpoint_core::{Browser, BrowserContext, DocumentLoadState, NetworkError, Page, Permission, Route};

use crate::ads::capture::AdCapturer;
use crate::ads::AdDetector;
use crate::classifier::resource_weight::ResourceWeightClassifier;
use crate::classifier::TrackerDatabase;
use crate::config::CrawlerConfig;
use crate::consent::{ConsentAction, ConsentResolver};
use crate::error::EngineError;
use crate::fingerprint::FingerprintObserver;
use crate::models::{
    CookieRecord, CrawlStatus, Observation, RequestRecord, Site, Task,
};
use crate::util::{extract_hostname, extract_registered_domain, hash_cookie_value};

/// Progress notifications fired during dwell chunks. Must be safe to call
/// from many concurrent tasks.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, task_key: &str, phase: &str, detail: &str);
}

impl<F: Fn(&str, &str, &str) + Send + Sync> ProgressSink for F {
    fn on_progress(&self, task_key: &str, phase: &str, detail: &str) {
        self(task_key, phase, detail);
    }
}

/// A no-op sink for callers that don't want progress notifications.
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn on_progress(&self, _task_key: &str, _phase: &str, _detail: &str) {}
}

async fn handle_route(
    route: Route,
    requests: Arc<Mutex<Vec<RequestRecord>>>,
    tracker_db: Arc<TrackerDatabase>,
    site_domain: String,
) -> Result<(), NetworkError> {
    let url = route.request().url().to_string();

    if route.is_response_stage() {
        let status = route.response_status();
        let headers = route.response_headers();
        let response_size_bytes = headers.and_then(|hs| {
            hs.iter()
                .find(|h| h.name.eq_ignore_ascii_case("content-length"))
                .and_then(|h| h.value.parse::<u64>().ok())
        });
        let content_type = headers.and_then(|hs| {
            hs.iter()
                .find(|h| h.name.eq_ignore_ascii_case("content-type"))
                .map(|h| h.value.clone())
        });

        let mut guard = requests.lock().await;
        if let Some(record) =
            guard.iter_mut().rev().find(|r| r.url == url && r.status_code.is_none())
        {
            record.status_code = status;
            record.response_size_bytes = response_size_bytes;
            record.content_type = content_type;
            let elapsed = Utc::now().signed_duration_since(record.timestamp);
            record.timing_ms = Some(elapsed.num_milliseconds().max(0) as f64);
        }
    } else {
        let method = route.request().method().to_string();
        let resource_type = route.request().resource_type().to_string();
        let domain = extract_hostname(&url);
        let reg_domain = extract_registered_domain(&domain);
        let is_third_party = reg_domain != extract_registered_domain(&site_domain);
        let (tracker_entity, tracker_category) = tracker_db.classify(&reg_domain);

        requests.lock().await.push(RequestRecord {
            url: url.clone(),
            domain: reg_domain,
            method,
            resource_type,
            is_third_party,
            tracker_entity,
            tracker_category,
            status_code: None,
            response_size_bytes: None,
            timing_ms: None,
            timestamp: Utc::now(),
            resource_category: None,
            content_type: None,
        });
    }

    route.continue_().await
}

/// Drives one task through the full phase sequence against a freshly-created
/// browser context. Owns none of its collaborators; they are shared (via
/// `Arc`) across every task the scheduler runs.
pub struct CrawlEngine {
    config: Arc<CrawlerConfig>,
    tracker_db: Arc<TrackerDatabase>,
    consent_resolver: Arc<ConsentResolver>,
}

impl CrawlEngine {
    #[must_use]
    pub fn new(
        config: Arc<CrawlerConfig>,
        tracker_db: Arc<TrackerDatabase>,
        consent_resolver: Arc<ConsentResolver>,
    ) -> Self {
        Self { config, tracker_db, consent_resolver }
    }

    /// Run one task to completion. Never panics or propagates an error: any
    /// failure is captured into the returned [`Observation`]'s `status`/`error`
    /// fields. The browser context is destroyed on every exit path.
    #[instrument(skip_all, fields(site = %task.site.domain, mode = %task.consent_mode))]
    pub async fn run(
        &self,
        browser: &Browser,
        task: &Task,
        run_id: &str,
        progress: &dyn ProgressSink,
    ) -> Observation {
        let started_at = Utc::now();
        let task_key = task.key();

        let mut context = match self.build_context(browser).await {
            Ok(context) => context,
            Err(err) => {
                return failed_observation(
                    task,
                    started_at,
                    CrawlStatus::Error,
                    err.to_string(),
                    Vec::new(),
                );
            }
        };

        let outcome = self.run_phases(&context, task, run_id, &task_key, progress, started_at).await;

        if let Err(err) = context.close().await {
            warn!(error = %err, "failed to close browser context; swallowing");
        }

        match outcome {
            Ok(observation) => observation,
            Err(observation) => observation,
        }
    }

    async fn build_context(&self, browser: &Browser) -> Result<BrowserContext, EngineError> {
        let browser_cfg = &self.config.browser;
        let mut builder = browser
            .new_context_builder()
            .locale(browser_cfg.locale.clone())
            .timezone_id(browser_cfg.timezone.clone())
            .geolocation(browser_cfg.geolocation.latitude, browser_cfg.geolocation.longitude)
            .permissions(vec![Permission::Geolocation])
            .viewport(browser_cfg.viewport.width, browser_cfg.viewport.height);
        if let Some(user_agent) = browser_cfg.user_agent.as_ref() {
            builder = builder.user_agent(user_agent.clone());
        }

        let context = builder.build().await.map_err(|e| EngineError::Context(e.to_string()))?;

        if self.config.fingerprinting.enabled {
            self.fingerprint_observer()
                .inject_monitoring(&context)
                .await
                .map_err(|e| EngineError::Context(e.to_string()))?;
        }

        Ok(context)
    }

    fn fingerprint_observer(&self) -> FingerprintObserver<'_> {
        FingerprintObserver::new(&self.tracker_db)
    }

    /// Runs NAVIGATING through COLLECTING. `Ok` carries the finished
    /// observation; `Err` carries a partial observation for a task that
    /// aborted (currently only possible during NAVIGATING).
    #[allow(clippy::too_many_arguments)]
    async fn run_phases(
        &self,
        context: &BrowserContext,
        task: &Task,
        run_id: &str,
        task_key: &str,
        progress: &dyn ProgressSink,
        started_at: chrono::DateTime<Utc>,
    ) -> Result<Observation, Observation> {
        let requests: Arc<Mutex<Vec<RequestRecord>>> = Arc::new(Mutex::new(Vec::new()));
        let cfg = &self.config.crawler;

        let page = context.new_page().await.map_err(|e| {
            failed_observation(task, started_at, CrawlStatus::Error, e.to_string(), Vec::new())
        })?;

        page.on_dialog(|dialog| async move { dialog.dismiss().await }).await;

        {
            let requests = requests.clone();
            let tracker_db = self.tracker_db.clone();
            let site_domain = task.site.domain.clone();
            let route_result = page
                .route("**/*", move |route: Route| {
                    let requests = requests.clone();
                    let tracker_db = tracker_db.clone();
                    let site_domain = site_domain.clone();
                    async move { handle_route(route, requests, tracker_db, site_domain).await }
                })
                .await;
            if let Err(err) = route_result {
                return Err(failed_observation(
                    task,
                    started_at,
                    CrawlStatus::Error,
                    err.to_string(),
                    Vec::new(),
                ));
            }
        }

        // NAVIGATING
        progress.on_progress(task_key, "navigating", &task.site.url);
        let nav_start = std::time::Instant::now();
        let page_timeout = Duration::from_millis(cfg.page_timeout_ms);
        let nav_result = tokio::time::timeout(
            page_timeout,
            page.goto(&task.site.url).wait_until(DocumentLoadState::DomContentLoaded).goto(),
        )
        .await;
        let load_time_ms = nav_start.elapsed().as_millis() as u64;

        const BLOCKED_STATUS_CODES: [u16; 3] = [403, 429, 503];
        let status_after_nav = match nav_result {
            Ok(Ok(response)) => match response.status() {
                Some(code) if BLOCKED_STATUS_CODES.contains(&code) => {
                    Some((CrawlStatus::Blocked, format!("main document responded {code}")))
                }
                _ => None,
            },
            Ok(Err(err)) => Some((CrawlStatus::Error, err.to_string())),
            Err(_elapsed) => Some((CrawlStatus::Timeout, format!("navigation exceeded {page_timeout:?}"))),
        };

        if let Some((status, message)) = status_after_nav {
            let partial_requests = requests.lock().await.clone();
            let mut observation =
                failed_observation(task, started_at, status, message, partial_requests);
            observation.load_time_ms = Some(load_time_ms);
            return Err(observation);
        }

        // PRE_CONSENT_SNAPSHOT
        tokio::time::sleep(Duration::from_secs(2)).await;
        let pre_consent_cookies: HashSet<(String, String)> = context
            .cookies()
            .await
            .map(|cookies| cookies.into_iter().map(|c| (c.name, c.domain.unwrap_or_default())).collect())
            .unwrap_or_default();

        // CONSENTING
        let mut consent_info = None;
        let mut consent_took_action = false;
        if let Some(action) = ConsentAction::from_mode(task.consent_mode) {
            progress.on_progress(task_key, "consenting", &action.to_string());
            let timeout = Duration::from_millis(cfg.consent_timeout_ms);
            let resolver_timeout =
                tokio::time::timeout(timeout, self.consent_resolver.resolve(&page, action)).await;
            match resolver_timeout {
                Ok(info) => {
                    consent_took_action = info.action_taken;
                    consent_info = Some(info);
                }
                Err(_) => {
                    debug!("consent resolver exceeded its timeout budget");
                }
            }
        }

        // POST_CONSENT_DWELL
        if consent_took_action {
            let total = Duration::from_millis(cfg.post_consent_wait_ms);
            let chunk = Duration::from_secs(5);
            let mut waited = Duration::ZERO;
            while waited < total {
                let this_chunk = chunk.min(total - waited);
                tokio::time::sleep(this_chunk).await;
                waited += this_chunk;
                progress.on_progress(task_key, "post_consent_dwell", &format!("{waited:?}/{total:?}"));
            }
        }

        // SCROLLING
        for step in 0..cfg.n_scroll {
            let _: Result<serde_json::Value, _> =
                page.evaluate("window.scrollBy(0, window.innerHeight / 2)").await;
            tokio::time::sleep(Duration::from_millis(cfg.scroll_delay_ms)).await;
            progress.on_progress(task_key, "scrolling", &format!("step {}/{}", step + 1, cfg.n_scroll));
        }

        // FINAL_DWELL
        progress.on_progress(task_key, "final_dwell", "waiting for tardy requests");
        tokio::time::sleep(Duration::from_millis(cfg.final_dwell_ms)).await;

        // COLLECTING
        progress.on_progress(task_key, "collecting", "");
        let mut observation = self
            .collect(
                &page,
                context,
                task,
                run_id,
                started_at,
                load_time_ms,
                requests,
                pre_consent_cookies,
                consent_info,
            )
            .await;

        if cfg.screenshot {
            let screenshot_dir = self.config.resolve_path(&self.config.output.screenshot_dir);
            if std::fs::create_dir_all(&screenshot_dir).is_ok() {
                let path = screenshot_dir
                    .join(format!("{}_{}.png", task.site.domain, task.consent_mode));
                if page.screenshot().png().path(&path).capture().await.is_ok() {
                    observation.screenshot_path = Some(path.display().to_string());
                }
            }
        }

        Ok(observation)
    }

    #[allow(clippy::too_many_arguments)]
    async fn collect(
        &self,
        page: &Page,
        context: &BrowserContext,
        task: &Task,
        run_id: &str,
        started_at: chrono::DateTime<Utc>,
        load_time_ms: u64,
        requests: Arc<Mutex<Vec<RequestRecord>>>,
        pre_consent_cookies: HashSet<(String, String)>,
        consent_info: Option<crate::models::ConsentInfo>,
    ) -> Observation {
        // (a) fingerprint results
        let fingerprint_result = if self.config.fingerprinting.enabled {
            match self.fingerprint_observer().collect_results(page).await {
                Ok(result) => Some(result),
                Err(err) => {
                    debug!(error = %err, "fingerprint collection failed");
                    None
                }
            }
        } else {
            None
        };

        // (b) ad DOM scan
        let ad_detector = AdDetector::new(&self.config.ads);
        let ad_detection_result = match ad_detector.detect_ads(page).await {
            Ok(result) => Some(result),
            Err(err) => {
                debug!(error = %err, "ad detection failed");
                None
            }
        };

        // (c) ad screenshots, bounded by max_ad_captures
        let ad_capture_result = if let Some(detection) = &ad_detection_result {
            let capturer = AdCapturer::new(self.config.ad_capture.clone());
            match capturer
                .capture_ads(
                    page,
                    &detection.ads,
                    run_id,
                    &task.site.domain,
                    &task.consent_mode.to_string(),
                )
                .await
            {
                Ok(result) => Some(result),
                Err(err) => {
                    debug!(error = %err, "ad capture failed");
                    None
                }
            }
        } else {
            None
        };

        // (d) resource-weight aggregation from collected request records
        let mut request_records = requests.lock().await.clone();
        let resource_classifier = ResourceWeightClassifier::new(&self.tracker_db);
        for record in &mut request_records {
            record.resource_category = Some(resource_classifier.classify_request(record));
        }
        let resource_weight = self.config.resource_weight.enabled.then(|| {
            crate::classifier::resource_weight::ResourceWeightClassifier::aggregate(&request_records)
        });

        // (e) final cookies snapshot
        let collected_at = Utc::now();
        let cookie_records = match context.cookies().await {
            Ok(cookies) => cookies
                .into_iter()
                .map(|cookie| {
                    let domain = cookie.domain.clone().unwrap_or_default();
                    let set_before_consent = pre_consent_cookies
                        .contains(&(cookie.name.clone(), domain.clone()));
                    let is_session = cookie.expires.is_none_or(|e| e < 0.0);
                    let expires_at = cookie
                        .expires
                        .filter(|e| *e >= 0.0)
                        .and_then(|e| chrono::DateTime::<Utc>::from_timestamp(e as i64, 0));
                    let lifetime_days = expires_at
                        .map(|exp| (exp - collected_at).num_seconds() as f64 / 86_400.0);
                    let is_tracking_cookie =
                        self.tracker_db.is_tracking_cookie(&cookie.name, &domain);
                    let (tracker_entity, _) =
                        self.tracker_db.classify(domain.trim_start_matches('.'));
                    CookieRecord {
                        name: cookie.name,
                        domain,
                        value_hash: hash_cookie_value(&cookie.value),
                        path: cookie.path.unwrap_or_else(|| "/".to_string()),
                        expires_at,
                        lifetime_days,
                        is_secure: cookie.secure.unwrap_or(false),
                        is_http_only: cookie.http_only.unwrap_or(false),
                        same_site: cookie.same_site.map(|s| format!("{s:?}")),
                        is_session,
                        is_tracking_cookie,
                        tracker_entity,
                        set_before_consent,
                        timestamp: collected_at,
                    }
                })
                .collect(),
            Err(err) => {
                debug!(error = %err, "final cookie snapshot failed");
                Vec::new()
            }
        };

        let page_title = page.title().await.ok();
        let final_url = page.url().await.ok();

        Observation {
            site: task.site.clone(),
            consent_mode: task.consent_mode,
            status: CrawlStatus::Success,
            started_at,
            completed_at: collected_at,
            final_url,
            page_title,
            load_time_ms: Some(load_time_ms),
            requests: request_records,
            cookies: cookie_records,
            consent_info,
            screenshot_path: None,
            error: None,
            fingerprint_result,
            ad_detection_result,
            ad_capture_result,
            resource_weight,
        }
    }
}

/// Build an observation for a task that could not complete, carrying
/// whatever request records had been gathered before the failure.
fn failed_observation(
    task: &Task,
    started_at: chrono::DateTime<Utc>,
    status: CrawlStatus,
    error: String,
    requests: Vec<RequestRecord>,
) -> Observation {
    Observation {
        site: task.site.clone(),
        consent_mode: task.consent_mode,
        status,
        started_at,
        completed_at: Utc::now(),
        final_url: None,
        page_title: None,
        load_time_ms: None,
        requests,
        cookies: Vec::new(),
        consent_info: None,
        screenshot_path: None,
        error: Some(error),
        fingerprint_result: None,
        ad_detection_result: None,
        ad_capture_result: None,
        resource_weight: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_observation_carries_partial_requests() {
        let task = Task {
            site: Site {
                url: "https://example.com".into(),
                domain: "example.com".into(),
                category: None,
                rank: None,
            },
            consent_mode: crate::models::ConsentMode::Ignore,
        };
        let requests = vec![];
        let obs = failed_observation(&task, Utc::now(), CrawlStatus::Timeout, "timed out".into(), requests);
        assert_eq!(obs.status, CrawlStatus::Timeout);
        assert_eq!(obs.error.as_deref(), Some("timed out"));
        assert!(obs.requests.is_empty());
    }
}
