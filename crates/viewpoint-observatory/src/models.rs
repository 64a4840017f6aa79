//! Core data model: sites, tasks, observations, and their child record sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The stance a crawl takes toward a consent banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentMode {
    /// Do nothing about banners.
    Ignore,
    /// Attempt to agree.
    Accept,
    /// Attempt to refuse.
    Reject,
}

impl std::fmt::Display for ConsentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ignore => "ignore",
            Self::Accept => "accept",
            Self::Reject => "reject",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ConsentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown consent mode: {other}")),
        }
    }
}

/// Terminal outcome of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    Success,
    Timeout,
    Error,
    Blocked,
}

/// Fingerprint-activity level of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintSeverity {
    None,
    Passive,
    Active,
    Aggressive,
}

impl Default for FingerprintSeverity {
    fn default() -> Self {
        Self::None
    }
}

/// Semantic class assigned to a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Content1p,
    Cdn,
    Tracker,
    Ad,
    Functional3p,
    Unknown3p,
}

impl ResourceCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Content1p => "content_1p",
            Self::Cdn => "cdn",
            Self::Tracker => "tracker",
            Self::Ad => "ad",
            Self::Functional3p => "functional_3p",
            Self::Unknown3p => "unknown_3p",
        }
    }
}

/// Identity of a crawl target. Created once per run, keyed by domain; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Canonical URL (scheme-normalized, trailing slash stripped).
    pub url: String,
    /// Registered-domain label.
    pub domain: String,
    /// Optional semantic category.
    pub category: Option<String>,
    /// Optional integer popularity rank.
    pub rank: Option<i64>,
}

/// The unit of work: `(Site, ConsentMode)`.
#[derive(Debug, Clone)]
pub struct Task {
    pub site: Site,
    pub consent_mode: ConsentMode,
}

impl Task {
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}::{}", self.site.domain, self.consent_mode)
    }
}

/// One per intercepted HTTP request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRecord {
    pub url: String,
    pub domain: String,
    pub method: String,
    pub resource_type: String,
    pub is_third_party: bool,
    pub tracker_entity: Option<String>,
    pub tracker_category: Option<String>,
    pub status_code: Option<u16>,
    pub response_size_bytes: Option<u64>,
    pub timing_ms: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub resource_category: Option<ResourceCategory>,
    pub content_type: Option<String>,
}

/// One per cookie visible at session end. `value_hash` is SHA-256 of the raw value; the
/// raw value itself is never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub domain: String,
    pub value_hash: String,
    pub path: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub lifetime_days: Option<f64>,
    pub is_secure: bool,
    pub is_http_only: bool,
    pub same_site: Option<String>,
    pub is_session: bool,
    pub is_tracking_cookie: bool,
    pub tracker_entity: Option<String>,
    pub set_before_consent: bool,
    pub timestamp: DateTime<Utc>,
}

/// What the consent resolver found and did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsentInfo {
    pub banner_detected: bool,
    pub cmp_platform: Option<String>,
    pub button_text: Option<String>,
    pub action_taken: bool,
}

/// One per observed fingerprint-relevant API call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintEvent {
    pub api: String,
    pub method: String,
    pub timestamp: DateTime<Utc>,
    pub call_stack_domain: Option<String>,
    pub tracker_entity: Option<String>,
    pub details: Option<String>,
}

/// Aggregate fingerprinting outcome for a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FingerprintResult {
    pub severity: FingerprintSeverity,
    pub events: Vec<FingerprintEvent>,
    pub canvas_detected: bool,
    pub webgl_detected: bool,
    pub audio_detected: bool,
    pub font_detected: bool,
    pub navigator_detected: bool,
    pub storage_detected: bool,
    pub unique_apis: usize,
    pub unique_entities: usize,
}

/// One per ad detected in the DOM/frame tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdElement {
    pub selector: String,
    pub tag_name: String,
    pub ad_id: Option<String>,
    pub ad_class: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub is_visible: bool,
    pub is_iframe: bool,
    pub iframe_src: Option<String>,
    pub iab_size: Option<String>,
    pub ad_network: Option<String>,
}

/// Aggregate ad-detection outcome for a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdDetectionResult {
    pub ads: Vec<AdElement>,
    pub total_ad_count: usize,
    pub visible_ad_count: usize,
    pub ad_density: f64,
    pub total_ad_area_px: i64,
    pub iab_standard_count: usize,
}

/// How an ad screenshot was obtained (or why it wasn't).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMethod {
    FrameElement,
    Element,
    CropFallback,
    Failed,
}

impl CaptureMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FrameElement => "frame_element",
            Self::Element => "element",
            Self::CropFallback => "crop_fallback",
            Self::Failed => "failed",
        }
    }
}

/// One per rendered screenshot of an ad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdCapture {
    pub ad_index: usize,
    pub screenshot_path: Option<String>,
    pub metadata_path: Option<String>,
    pub width: u32,
    pub height: u32,
    pub capture_method: CaptureMethod,
}

/// Aggregate ad-capture outcome for a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdCaptureResult {
    pub captures: Vec<AdCapture>,
    pub total_captured: usize,
    pub total_failed: usize,
}

/// Byte-level summary across all requests in a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceWeightSummary {
    pub total_bytes: u64,
    pub content_1p_bytes: u64,
    pub cdn_bytes: u64,
    pub tracker_bytes: u64,
    pub ad_bytes: u64,
    pub functional_3p_bytes: u64,
    pub unknown_3p_bytes: u64,
    pub total_requests_with_size: u64,
}

/// The complete output of one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub site: Site,
    pub consent_mode: ConsentMode,
    pub status: CrawlStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub final_url: Option<String>,
    pub page_title: Option<String>,
    pub load_time_ms: Option<u64>,
    pub requests: Vec<RequestRecord>,
    pub cookies: Vec<CookieRecord>,
    pub consent_info: Option<ConsentInfo>,
    pub screenshot_path: Option<String>,
    pub error: Option<String>,
    pub fingerprint_result: Option<FingerprintResult>,
    pub ad_detection_result: Option<AdDetectionResult>,
    pub ad_capture_result: Option<AdCaptureResult>,
    pub resource_weight: Option<ResourceWeightSummary>,
}

impl Observation {
    /// `total_cookies_set` is always derived from `cookies`, never stored independently.
    #[must_use]
    pub fn total_cookies_set(&self) -> usize {
        self.cookies.len()
    }

    /// `tracking_cookies_set` is always derived from `cookies`, never stored independently.
    #[must_use]
    pub fn tracking_cookies_set(&self) -> usize {
        self.cookies.iter().filter(|c| c.is_tracking_cookie).count()
    }

    #[must_use]
    pub fn total_requests(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub fn third_party_requests(&self) -> usize {
        self.requests.iter().filter(|r| r.is_third_party).count()
    }
}
