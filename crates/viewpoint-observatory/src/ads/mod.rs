//! Ad element detection: CSS selector DOM scan plus frame-based iframe scan.
//!
//! Measures dimensions, matches against IAB standard sizes, and computes ad
//! density (share of the viewport occupied by ads).

pub mod capture;

use std::collections::HashSet;

use serde::Deserialize;
use viewpoint_core::Page;

use crate::config::AdsSettings;
use crate::error::ObserverError;
use crate::models::{AdDetectionResult, AdElement};

/// CSS selectors that match known ad containers and iframes.
const AD_SELECTORS: &[&str] = &[
    "ins.adsbygoogle",
    "[id^='google_ads_']",
    "[id^='div-gpt-ad']",
    "div[data-google-query-id]",
    "div[data-ad-slot]",
    "iframe[id^='google_ads_iframe']",
    "iframe[src*='doubleclick.net']",
    "iframe[src*='googlesyndication']",
    "[id*='ad-container']",
    "[id*='ad-wrapper']",
    "[id*='ad-slot']",
    "[id*='ad_container']",
    "[id*='ad_wrapper']",
    "[id*='ad_slot']",
    "[id*='advert']",
    "[id*='banner-ad']",
    "[id*='sponsor']",
    "[id*='adsense']",
    "[id*='adform']",
    "[id*='dfp']",
    "[class*='ad-container']",
    "[class*='ad-wrapper']",
    "[class*='ad-slot']",
    "[class*='ad-unit']",
    "[class*='advert']",
    "[class*='banner-ad']",
    "[class*='sponsored']",
    "[class*='commercial']",
    "[class*='reklama']",
    "[class*='inzerce']",
    "[id*='sklik']",
    "iframe[src*='sklik']",
    "iframe[src*='r2b2']",
    "iframe[src*='imedia']",
    "iframe[src*='sssp.cz']",
    "iframe[src*='ad.seznam.cz']",
    "[data-ad]",
    "[data-ad-slot]",
    "[data-ad-unit]",
    "[data-advertisement]",
    "[data-sponsor]",
    "[data-adservice]",
    "[id^='pb-slot']",
    "[class*='prebid']",
    "iframe[src*='adform']",
    "iframe[src*='amazon-adsystem']",
    "iframe[src*='criteo']",
    "iframe[src*='taboola']",
    "iframe[src*='outbrain']",
    "iframe[src*='/ads/']",
    "iframe[src*='adserver']",
];

/// IAB standard ad sizes: (width, height, name).
const IAB_STANDARD_SIZES: &[(i64, i64, &str)] = &[
    (728, 90, "leaderboard"),
    (300, 250, "medium_rectangle"),
    (160, 600, "wide_skyscraper"),
    (120, 600, "skyscraper"),
    (300, 600, "half_page"),
    (320, 50, "mobile_leaderboard"),
    (320, 100, "large_mobile_banner"),
    (970, 250, "billboard"),
    (970, 90, "large_leaderboard"),
    (300, 50, "mobile_banner"),
    (468, 60, "full_banner"),
    (234, 60, "half_banner"),
    (336, 280, "large_rectangle"),
    (250, 250, "square"),
    (180, 150, "rectangle"),
    (300, 1050, "portrait"),
    (580, 400, "netboard"),
    (480, 120, "superboard"),
];

/// `(substring, network name)` pairs checked against iframe src/id/class.
const AD_NETWORK_PATTERNS: &[(&str, &str)] = &[
    ("googlesyndication", "Google"),
    ("doubleclick", "Google"),
    ("googleadservices", "Google"),
    ("google_ads", "Google"),
    ("adform", "Adform"),
    ("sklik", "Seznam.cz"),
    ("ad.seznam", "Seznam.cz"),
    ("sssp.cz", "Seznam.cz"),
    ("imedia", "Seznam.cz"),
    ("r2b2", "R2B2"),
    ("criteo", "Criteo"),
    ("amazon-adsystem", "Amazon"),
    ("taboola", "Taboola"),
    ("outbrain", "Outbrain"),
    ("facebook.com/plugins/ad", "Meta"),
];

/// Known ad-serving domains checked against non-main frame URLs.
const AD_FRAME_DOMAINS: &[&str] = &[
    "googlesyndication",
    "doubleclick",
    "appnexus",
    "rubiconproject",
    "criteo",
    "adform",
    "amazon-adsystem",
    "taboola",
    "outbrain",
    "sklik",
    "sssp.cz",
    "r2b2",
    "imedia",
    "ad.seznam",
    "adnxs",
    "pubmatic",
    "openx",
    "smartadserver",
    "casalemedia",
    "indexexchange",
    "33across",
    "yieldmo",
    "sharethrough",
];

#[derive(Debug, Deserialize)]
struct RawAdElement {
    selector: String,
    #[serde(rename = "tagName")]
    tag_name: String,
    id: Option<String>,
    #[serde(rename = "className")]
    class_name: Option<String>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    visible: bool,
    #[serde(rename = "iframeSrc")]
    iframe_src: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Viewport {
    w: f64,
    h: f64,
}

/// Detects and measures ad elements in a page's DOM and frame tree.
pub struct AdDetector {
    min_width: f64,
    min_height: f64,
    tolerance: f64,
    enabled: bool,
}

impl AdDetector {
    #[must_use]
    pub fn new(config: &AdsSettings) -> Self {
        Self {
            min_width: config.min_width,
            min_height: config.min_height,
            tolerance: config.iab_tolerance_pct / 100.0,
            enabled: config.enabled,
        }
    }

    /// Scan the DOM for ad elements. Call after page load plus scroll dwell.
    ///
    /// # Errors
    ///
    /// Returns an error only if both the DOM scan and the viewport probe fail;
    /// a failing DOM scan alone degrades to an empty ad list.
    pub async fn detect_ads(&self, page: &Page) -> Result<AdDetectionResult, ObserverError> {
        if !self.enabled {
            return Ok(AdDetectionResult::default());
        }

        let raw_ads: Vec<RawAdElement> =
            page.evaluate(&detection_script()).await.unwrap_or_default();
        let frame_ads = self.detect_frame_ads(page).await;

        let viewport_area = page
            .evaluate::<Viewport>("(() => ({ w: window.innerWidth, h: window.innerHeight }))()")
            .await
            .map(|v| v.w * v.h)
            .unwrap_or(1920.0 * 1080.0);

        let mut ads = Vec::new();
        let mut total_area: i64 = 0;
        let mut seen_keys: HashSet<String> = HashSet::new();

        for raw in raw_ads {
            if raw.width < self.min_width || raw.height < self.min_height {
                continue;
            }
            let key = format!("{},{},{},{}", raw.x, raw.y, raw.width, raw.height);
            if !seen_keys.insert(key) {
                continue;
            }

            let is_iframe = raw.tag_name == "iframe";
            let ad_network = detect_ad_network(
                raw.iframe_src.as_deref(),
                raw.id.as_deref(),
                raw.class_name.as_deref(),
            );
            let iab_size = self.match_iab_size(raw.width, raw.height);

            let ad = AdElement {
                selector: raw.selector,
                tag_name: raw.tag_name,
                ad_id: raw.id,
                ad_class: raw.class_name,
                x: raw.x,
                y: raw.y,
                width: raw.width,
                height: raw.height,
                is_visible: raw.visible,
                is_iframe,
                iframe_src: raw.iframe_src,
                iab_size,
                ad_network,
            };
            if ad.is_visible {
                total_area += (ad.width * ad.height) as i64;
            }
            ads.push(ad);
        }

        for ad in frame_ads {
            let key = format!("{},{},{},{}", ad.x, ad.y, ad.width, ad.height);
            if !seen_keys.insert(key) {
                continue;
            }
            if ad.is_visible {
                total_area += (ad.width * ad.height) as i64;
            }
            ads.push(ad);
        }

        let visible_count = ads.iter().filter(|a| a.is_visible).count();
        let density = if viewport_area > 0.0 {
            (total_area as f64 / viewport_area * 10_000.0).round() / 10_000.0
        } else {
            0.0
        };
        let iab_count = ads.iter().filter(|a| a.iab_size.is_some()).count();

        Ok(AdDetectionResult {
            total_ad_count: ads.len(),
            visible_ad_count: visible_count,
            ad_density: density,
            total_ad_area_px: total_area,
            iab_standard_count: iab_count,
            ads,
        })
    }

    /// Detect ads by iterating a page's non-main frames, matching against
    /// known ad domains or a qualifying IAB-standard size.
    async fn detect_frame_ads(&self, page: &Page) -> Vec<AdElement> {
        let mut frame_ads = Vec::new();
        let Ok(main_frame) = page.main_frame().await else { return frame_ads };
        let Ok(frames) = page.frames().await else { return frame_ads };

        for frame in frames {
            if frame.is_detached() || frame.id() == main_frame.id() {
                continue;
            }
            let frame_url = frame.url();
            if frame_url.is_empty() || frame_url == "about:blank" {
                continue;
            }

            let frame_url_lower = frame_url.to_lowercase();
            let is_ad_domain = AD_FRAME_DOMAINS.iter().any(|d| frame_url_lower.contains(d));

            let selector = format!("iframe[src=\"{frame_url}\"]");
            let locator = page.locator(selector.clone());
            let Ok(Some(bbox)) = locator.bounding_box().await else { continue };
            let w = bbox.width;
            let h = bbox.height;
            if w < self.min_width || h < self.min_height {
                continue;
            }

            let is_iab = self.match_iab_size(w, h).is_some();
            if !is_ad_domain && !is_iab {
                continue;
            }

            let visible = locator.is_visible().await.unwrap_or(true);
            let ad_network = detect_ad_network(Some(&frame_url), None, None);
            let iab_size = self.match_iab_size(w, h);
            let truncated_src: String = frame_url.chars().take(500).collect();

            frame_ads.push(AdElement {
                selector: format!("frame:{}", &frame_url[..frame_url.len().min(100)]),
                tag_name: "iframe".to_string(),
                ad_id: None,
                ad_class: None,
                x: bbox.x,
                y: bbox.y,
                width: w,
                height: h,
                is_visible: visible,
                is_iframe: true,
                iframe_src: Some(truncated_src),
                iab_size,
                ad_network,
            });
        }
        frame_ads
    }

    fn match_iab_size(&self, w: f64, h: f64) -> Option<String> {
        if w <= 0.0 || h <= 0.0 {
            return None;
        }
        for (std_w, std_h, _name) in IAB_STANDARD_SIZES {
            let std_w = *std_w as f64;
            let std_h = *std_h as f64;
            if (w - std_w).abs() / std_w <= self.tolerance
                && (h - std_h).abs() / std_h <= self.tolerance
            {
                return Some(format!("{}x{}", *std_w as i64, *std_h as i64));
            }
        }
        None
    }
}

fn detect_ad_network(
    iframe_src: Option<&str>,
    element_id: Option<&str>,
    element_class: Option<&str>,
) -> Option<String> {
    let combined = [iframe_src, element_id, element_class]
        .into_iter()
        .flatten()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    AD_NETWORK_PATTERNS
        .iter()
        .find(|(pattern, _)| combined.contains(pattern))
        .map(|(_, network)| (*network).to_string())
}

fn detection_script() -> String {
    let selectors_json =
        serde_json::to_string(AD_SELECTORS).expect("static selector list serializes");
    format!(
        r"(() => {{
    const SELECTORS = {selectors_json};
    const seen = new Set();
    const results = [];

    function getUniqueKey(el) {{
        const rect = el.getBoundingClientRect();
        return Math.round(rect.x) + ',' + Math.round(rect.y) + ',' +
               Math.round(rect.width) + ',' + Math.round(rect.height);
    }}

    function isVisible(el) {{
        if (!el.offsetParent && el.tagName !== 'BODY' && el.tagName !== 'HTML') {{
            const style = window.getComputedStyle(el);
            if (style.position !== 'fixed' && style.position !== 'sticky') return false;
        }}
        const style = window.getComputedStyle(el);
        if (style.display === 'none') return false;
        if (style.visibility === 'hidden') return false;
        if (parseFloat(style.opacity) < 0.1) return false;
        return true;
    }}

    for (const selector of SELECTORS) {{
        try {{
            const elements = document.querySelectorAll(selector);
            for (const el of elements) {{
                const rect = el.getBoundingClientRect();
                if (rect.width <= 0 || rect.height <= 0) continue;

                const key = getUniqueKey(el);
                if (seen.has(key)) continue;
                seen.add(key);

                const visible = isVisible(el);
                const tagName = el.tagName.toLowerCase();
                let iframeSrc = null;
                if (tagName === 'iframe') {{
                    try {{ iframeSrc = el.src || el.getAttribute('src'); }} catch(e) {{}}
                }}

                results.push({{
                    selector: selector,
                    tagName: tagName,
                    id: el.id || null,
                    className: (el.className && typeof el.className === 'string')
                               ? el.className.substring(0, 200) : null,
                    x: Math.round(rect.x),
                    y: Math.round(rect.y),
                    width: Math.round(rect.width),
                    height: Math.round(rect.height),
                    visible: visible,
                    iframeSrc: iframeSrc
                }});
            }}
        }} catch(e) {{}}
    }}

    return results;
}})()"
    )
}
