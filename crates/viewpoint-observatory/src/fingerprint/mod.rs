//! Fingerprinting detection: inject a monitoring script before any page script
//! runs, then read back which browser APIs a page probed.

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use serde::Deserialize;
use viewpoint_core::{BrowserContext, Page};

use crate::classifier::TrackerDatabase;
use crate::error::ObserverError;
use crate::models::{FingerprintEvent, FingerprintResult, FingerprintSeverity};

/// Monitoring script injected into every page of a context via
/// [`BrowserContext::add_init_script`], so it runs before any site script.
const FP_INIT_SCRIPT: &str = include_str!("script.js");

/// API names that count as "active" fingerprinting for severity classification.
const ACTIVE_APIS: [&str; 3] = ["canvas", "webgl", "audio"];

#[derive(Debug, Deserialize)]
struct RawFpEvent {
    api: String,
    method: String,
    timestamp: i64,
    stack: String,
    details: String,
}

/// Observes canvas/WebGL/audio/navigator/font/storage probing via an injected
/// monitoring script, classifying the overall severity of a session.
pub struct FingerprintObserver<'a> {
    tracker_db: &'a TrackerDatabase,
    stack_url_re: Regex,
}

impl<'a> FingerprintObserver<'a> {
    #[must_use]
    pub fn new(tracker_db: &'a TrackerDatabase) -> Self {
        Self {
            tracker_db,
            stack_url_re: Regex::new(r"https?://([^/\s:]+)").expect("static regex"),
        }
    }

    /// Install the monitoring script on a context, applying to every page it opens.
    ///
    /// # Errors
    ///
    /// Returns an error if the context rejects the init script.
    pub async fn inject_monitoring(&self, context: &BrowserContext) -> Result<(), ObserverError> {
        context
            .add_init_script(FP_INIT_SCRIPT)
            .await
            .map_err(|e| ObserverError::Page(e.to_string()))?;
        Ok(())
    }

    /// Read back `window.__fp_log` and build the aggregate result.
    ///
    /// # Errors
    ///
    /// Returns an error if the page's log cannot be evaluated.
    pub async fn collect_results(&self, page: &Page) -> Result<FingerprintResult, ObserverError> {
        let raw: Vec<RawFpEvent> = page
            .evaluate("window.__fp_log || []")
            .await
            .map_err(|e| ObserverError::Evaluation(e.to_string()))?;

        let mut events = Vec::with_capacity(raw.len());
        for entry in raw {
            let call_stack_domain = self.extract_domain_from_stack(&entry.stack);
            let tracker_entity = call_stack_domain
                .as_deref()
                .and_then(|domain| self.tracker_db.classify(domain).0);
            events.push(FingerprintEvent {
                api: entry.api,
                method: entry.method,
                timestamp: millis_to_datetime(entry.timestamp),
                call_stack_domain,
                tracker_entity,
                details: (!entry.details.is_empty()).then_some(entry.details),
            });
        }

        Ok(self.build_result(events))
    }

    fn extract_domain_from_stack(&self, stack: &str) -> Option<String> {
        let caps = self.stack_url_re.captures(stack)?;
        Some(crate::util::extract_registered_domain(&caps[1]))
    }

    fn build_result(&self, events: Vec<FingerprintEvent>) -> FingerprintResult {
        let canvas_detected = events.iter().any(|e| e.api == "canvas");
        let webgl_detected = events.iter().any(|e| e.api == "webgl");
        let audio_detected = events.iter().any(|e| e.api == "audio");
        let font_detected = events.iter().any(|e| e.api == "font");
        let navigator_detected = events.iter().any(|e| e.api == "navigator");
        let storage_detected = events.iter().any(|e| e.api == "storage");

        let unique_apis = {
            let mut apis: Vec<&str> = events.iter().map(|e| e.api.as_str()).collect();
            apis.sort_unstable();
            apis.dedup();
            apis.len()
        };
        let unique_entities = {
            let mut entities: Vec<&str> =
                events.iter().filter_map(|e| e.tracker_entity.as_deref()).collect();
            entities.sort_unstable();
            entities.dedup();
            entities.len()
        };

        let active_count = ACTIVE_APIS
            .iter()
            .filter(|api| events.iter().any(|e| &e.api == *api))
            .count();
        let severity = classify_severity(active_count, events.len());

        FingerprintResult {
            severity,
            events,
            canvas_detected,
            webgl_detected,
            audio_detected,
            font_detected,
            navigator_detected,
            storage_detected,
            unique_apis,
            unique_entities,
        }
    }
}

/// NONE: no events. PASSIVE: events exist but none touch canvas/webgl/audio.
/// ACTIVE: exactly one of canvas/webgl/audio touched. AGGRESSIVE: two or more.
fn classify_severity(active_api_count: usize, event_count: usize) -> FingerprintSeverity {
    if event_count == 0 {
        FingerprintSeverity::None
    } else if active_api_count >= 2 {
        FingerprintSeverity::Aggressive
    } else if active_api_count == 1 {
        FingerprintSeverity::Active
    } else {
        FingerprintSeverity::Passive
    }
}

fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).single().unwrap_or_else(Utc::now)
}
