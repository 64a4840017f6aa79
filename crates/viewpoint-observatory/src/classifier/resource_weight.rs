//! Third-party resource weight classification and measurement.
//!
//! Classifies each network request as first-party content, CDN, tracker,
//! advertising, functional third-party, or unknown third-party. Aggregates
//! byte-level statistics to answer: how much bandwidth does tracking consume?

use super::TrackerDatabase;
use crate::models::{RequestRecord, ResourceCategory, ResourceWeightSummary};

/// Known CDN domains that serve first-party content.
const CDN_DOMAINS: &[&str] = &[
    "cdnjs.cloudflare.com",
    "fonts.googleapis.com",
    "fonts.gstatic.com",
    "cdn.jsdelivr.net",
    "unpkg.com",
    "ajax.googleapis.com",
    "maxcdn.bootstrapcdn.com",
    "stackpath.bootstrapcdn.com",
    "code.jquery.com",
];

/// CDN domain patterns (substring match).
const CDN_PATTERNS: &[&str] = &[
    "cloudfront.net",
    "akamaized.net",
    "akamai.net",
    "fastly.net",
    "azureedge.net",
    "cloudflare.com",
];

/// Functional third-party services (not tracking).
const FUNCTIONAL_3P_DOMAINS: &[&str] = &[
    "recaptcha.net",
    "hcaptcha.com",
    "stripe.com",
    "paypal.com",
    "braintreegateway.com",
    "gstatic.com",
    "twimg.com",
];

const FUNCTIONAL_3P_PATTERNS: &[&str] = &["maps.google", "maps.googleapis", "recaptcha", "hcaptcha"];

/// Ad-serving domain patterns (supplement to classifier "advertising" category).
const AD_DOMAIN_PATTERNS: &[&str] = &[
    "doubleclick.net",
    "googlesyndication.com",
    "googleadservices.com",
    "amazon-adsystem.com",
    "adnxs.com",
    "adsrvr.org",
];

/// Classifies requests into resource categories and aggregates byte totals.
pub struct ResourceWeightClassifier<'a> {
    tracker_db: &'a TrackerDatabase,
}

impl<'a> ResourceWeightClassifier<'a> {
    #[must_use]
    pub fn new(tracker_db: &'a TrackerDatabase) -> Self {
        Self { tracker_db }
    }

    /// Classify a single request into a resource category.
    #[must_use]
    pub fn classify_request(&self, record: &RequestRecord) -> ResourceCategory {
        if !record.is_third_party {
            return ResourceCategory::Content1p;
        }

        let domain = record.domain.as_str();
        let (entity, category) = self.tracker_db.classify(domain);

        if category.as_deref() == Some("advertising") {
            return ResourceCategory::Ad;
        }
        if matches!(category.as_deref(), Some("analytics" | "fingerprinting" | "social")) {
            return ResourceCategory::Tracker;
        }

        if CDN_DOMAINS.contains(&domain) || CDN_PATTERNS.iter().any(|p| domain.contains(p)) {
            return ResourceCategory::Cdn;
        }

        if FUNCTIONAL_3P_DOMAINS.contains(&domain)
            || FUNCTIONAL_3P_PATTERNS.iter().any(|p| domain.contains(p))
        {
            return ResourceCategory::Functional3p;
        }

        if AD_DOMAIN_PATTERNS.iter().any(|p| domain.contains(p)) {
            return ResourceCategory::Ad;
        }

        if entity.is_some() {
            return ResourceCategory::Tracker;
        }

        ResourceCategory::Unknown3p
    }

    /// Compute a byte-level summary across all requests.
    #[must_use]
    pub fn aggregate(requests: &[RequestRecord]) -> ResourceWeightSummary {
        let mut summary = ResourceWeightSummary::default();
        for r in requests {
            let size = r.response_size_bytes.unwrap_or(0);
            summary.total_bytes += size;
            if size > 0 {
                summary.total_requests_with_size += 1;
            }
            match r.resource_category.unwrap_or(ResourceCategory::Unknown3p) {
                ResourceCategory::Content1p => summary.content_1p_bytes += size,
                ResourceCategory::Cdn => summary.cdn_bytes += size,
                ResourceCategory::Tracker => summary.tracker_bytes += size,
                ResourceCategory::Ad => summary.ad_bytes += size,
                ResourceCategory::Functional3p => summary.functional_3p_bytes += size,
                ResourceCategory::Unknown3p => summary.unknown_3p_bytes += size,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn request(domain: &str, is_third_party: bool) -> RequestRecord {
        RequestRecord {
            url: format!("https://{domain}/resource"),
            domain: domain.to_string(),
            method: "GET".to_string(),
            resource_type: "script".to_string(),
            is_third_party,
            tracker_entity: None,
            tracker_category: None,
            status_code: Some(200),
            response_size_bytes: Some(1024),
            timing_ms: Some(42.0),
            timestamp: Utc::now(),
            resource_category: None,
            content_type: None,
        }
    }

    #[test]
    fn first_party_request_is_content_1p() {
        let db = TrackerDatabase::new();
        let classifier = ResourceWeightClassifier::new(&db);
        let r = request("example.com", false);
        assert_eq!(classifier.classify_request(&r), ResourceCategory::Content1p);
    }

    #[test]
    fn known_tracker_domain_is_tracker() {
        let db = TrackerDatabase::new();
        let classifier = ResourceWeightClassifier::new(&db);
        let r = request("google-analytics.com", true);
        assert_eq!(classifier.classify_request(&r), ResourceCategory::Tracker);
    }

    #[test]
    fn known_ad_domain_is_ad() {
        let db = TrackerDatabase::new();
        let classifier = ResourceWeightClassifier::new(&db);
        let r = request("doubleclick.net", true);
        assert_eq!(classifier.classify_request(&r), ResourceCategory::Ad);
    }

    #[test]
    fn cdn_domain_is_cdn() {
        let db = TrackerDatabase::new();
        let classifier = ResourceWeightClassifier::new(&db);
        let r = request("fonts.gstatic.com", true);
        assert_eq!(classifier.classify_request(&r), ResourceCategory::Cdn);
    }

    #[test]
    fn unknown_third_party_domain_is_unknown_3p() {
        let db = TrackerDatabase::new();
        let classifier = ResourceWeightClassifier::new(&db);
        let r = request("totally-unrelated-vendor.example", true);
        assert_eq!(classifier.classify_request(&r), ResourceCategory::Unknown3p);
    }

    #[test]
    fn aggregate_sums_bytes_by_category() {
        let mut content = request("example.com", false);
        content.response_size_bytes = Some(200_000);
        content.resource_category = Some(ResourceCategory::Content1p);

        let mut tracker = request("google-analytics.com", true);
        tracker.response_size_bytes = Some(50_000);
        tracker.resource_category = Some(ResourceCategory::Tracker);

        let mut ad = request("doubleclick.net", true);
        ad.response_size_bytes = Some(150_000);
        ad.resource_category = Some(ResourceCategory::Ad);

        let summary = ResourceWeightClassifier::aggregate(&[content, tracker, ad]);
        assert_eq!(summary.total_bytes, 400_000);
        assert_eq!(summary.content_1p_bytes, 200_000);
        assert_eq!(summary.tracker_bytes, 50_000);
        assert_eq!(summary.ad_bytes, 150_000);
        assert_eq!(summary.cdn_bytes, 0);
        assert_eq!(summary.functional_3p_bytes, 0);
        assert_eq!(summary.unknown_3p_bytes, 0);
    }
}
