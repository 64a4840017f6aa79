//! Configuration loading: a YAML document with defaults for every key.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_concurrency() -> usize {
    8
}
fn default_page_timeout_ms() -> u64 {
    45_000
}
fn default_consent_timeout_ms() -> u64 {
    15_000
}
fn default_post_consent_wait_ms() -> u64 {
    60_000
}
fn default_final_dwell_ms() -> u64 {
    15_000
}
fn default_scroll_delay_ms() -> u64 {
    1_500
}
fn default_n_scroll() -> u32 {
    4
}
fn default_inter_site_delay_ms() -> u64 {
    1_000
}
fn default_max_retries() -> u32 {
    3
}
fn default_true() -> bool {
    true
}

/// `crawler` config group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerSettings {
    pub concurrency: usize,
    pub page_timeout_ms: u64,
    pub consent_timeout_ms: u64,
    pub post_consent_wait_ms: u64,
    pub final_dwell_ms: u64,
    pub scroll_delay_ms: u64,
    pub n_scroll: u32,
    pub inter_site_delay_ms: u64,
    pub max_retries: u32,
    pub screenshot: bool,
    pub headless: bool,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            page_timeout_ms: default_page_timeout_ms(),
            consent_timeout_ms: default_consent_timeout_ms(),
            post_consent_wait_ms: default_post_consent_wait_ms(),
            final_dwell_ms: default_final_dwell_ms(),
            scroll_delay_ms: default_scroll_delay_ms(),
            n_scroll: default_n_scroll(),
            inter_site_delay_ms: default_inter_site_delay_ms(),
            max_retries: default_max_retries(),
            screenshot: false,
            headless: true,
        }
    }
}

/// Geolocation coordinates granted automatically to the browser context.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationSettings {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self { latitude: 50.0755, longitude: 14.4378 }
    }
}

/// Browser viewport size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: i32,
    pub height: i32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self { width: 1920, height: 1080 }
    }
}

/// `browser` config group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub locale: String,
    pub timezone: String,
    pub geolocation: GeolocationSettings,
    pub viewport: ViewportSettings,
    pub user_agent: Option<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            locale: "cs-CZ".to_string(),
            timezone: "Europe/Prague".to_string(),
            geolocation: GeolocationSettings::default(),
            viewport: ViewportSettings::default(),
            user_agent: None,
        }
    }
}

/// `database` config group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self { path: "data/footprint.db".to_string() }
    }
}

/// `consent_patterns` config group: ordered lowercase-substring phrase lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentPatterns {
    pub accept: Vec<String>,
    pub reject: Vec<String>,
}

impl Default for ConsentPatterns {
    fn default() -> Self {
        Self {
            accept: vec![
                "přijmout vše".to_string(),
                "souhlasím".to_string(),
                "accept all".to_string(),
                "přijmout".to_string(),
                "souhlasím se vším".to_string(),
                "povolit vše".to_string(),
                "Souhlasím".to_string(),
                "Rozumím".to_string(),
                "Přijmout a zavřít".to_string(),
                "Přijmout cookies".to_string(),
            ],
            reject: vec![
                "odmítnout vše".to_string(),
                "odmítnout".to_string(),
                "pouze nezbytné".to_string(),
                "reject all".to_string(),
                "nesouhlasím".to_string(),
                "pouze technické".to_string(),
                "jen nezbytné".to_string(),
                "Odmítnout vše".to_string(),
            ],
        }
    }
}

/// `output` config group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub export_dir: String,
    pub screenshot_dir: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            export_dir: "output/".to_string(),
            screenshot_dir: "output/screenshots/".to_string(),
        }
    }
}

/// Phase-2 module toggle shared by `fingerprinting`/`ads`/`ad_capture`/`resource_weight`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintingSettings {
    pub enabled: bool,
}

impl Default for FingerprintingSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdsSettings {
    pub enabled: bool,
    pub min_width: f64,
    pub min_height: f64,
    pub iab_tolerance_pct: f64,
}

impl Default for AdsSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            min_width: 20.0,
            min_height: 20.0,
            iab_tolerance_pct: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdCaptureSettings {
    pub enabled: bool,
    pub max_captures: usize,
    pub output_dir: String,
    pub crop_fallback: bool,
}

impl Default for AdCaptureSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            max_captures: 20,
            output_dir: "output/ad_captures/".to_string(),
            crop_fallback: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceWeightSettings {
    pub enabled: bool,
    pub measure_body_size: bool,
}

impl Default for ResourceWeightSettings {
    fn default() -> Self {
        Self { enabled: true, measure_body_size: false }
    }
}

/// The full crawler configuration, as loaded from the YAML config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    #[serde(skip)]
    pub project_root: PathBuf,
    pub crawler: CrawlerSettings,
    pub browser: BrowserSettings,
    pub database: DatabaseSettings,
    pub consent_patterns: ConsentPatterns,
    pub output: OutputSettings,
    pub sites_file: String,
    pub fingerprinting: FingerprintingSettings,
    pub ads: AdsSettings,
    pub ad_capture: AdCaptureSettings,
    pub resource_weight: ResourceWeightSettings,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            crawler: CrawlerSettings::default(),
            browser: BrowserSettings::default(),
            database: DatabaseSettings::default(),
            consent_patterns: ConsentPatterns::default(),
            output: OutputSettings::default(),
            sites_file: "data/sites/sites.csv".to_string(),
            fingerprinting: FingerprintingSettings::default(),
            ads: AdsSettings::default(),
            ad_capture: AdCaptureSettings::default(),
            resource_weight: ResourceWeightSettings::default(),
        }
    }
}

impl CrawlerConfig {
    /// Resolve a relative path against the project root (the config file's directory).
    #[must_use]
    pub fn resolve_path(&self, relative_path: &str) -> PathBuf {
        let p = Path::new(relative_path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.project_root.join(p)
        }
    }
}

/// Load configuration from a YAML file, falling back to defaults for any
/// unrecognized or missing keys. If the file does not exist, returns the
/// all-defaults configuration rooted at the file's would-be parent directory.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed as YAML.
pub fn load_config(path: impl AsRef<Path>) -> Result<CrawlerConfig, ConfigError> {
    let path = path.as_ref();
    let project_root = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();

    let mut config = if path.exists() {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&text)?
    } else {
        CrawlerConfig::default()
    };
    config.project_root = project_root;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_specified_values() {
        let config = CrawlerConfig::default();
        assert_eq!(config.crawler.concurrency, 8);
        assert_eq!(config.crawler.page_timeout_ms, 45_000);
        assert_eq!(config.crawler.consent_timeout_ms, 15_000);
        assert_eq!(config.crawler.post_consent_wait_ms, 60_000);
        assert_eq!(config.crawler.final_dwell_ms, 15_000);
        assert_eq!(config.crawler.scroll_delay_ms, 1_500);
        assert_eq!(config.crawler.inter_site_delay_ms, 1_000);
        assert_eq!(config.crawler.max_retries, 3);
        assert!(!config.crawler.screenshot);
        assert!(config.crawler.headless);
        assert_eq!(config.browser.locale, "cs-CZ");
        assert_eq!(config.browser.timezone, "Europe/Prague");
        assert!((config.browser.geolocation.latitude - 50.0755).abs() < f64::EPSILON);
        assert!((config.browser.geolocation.longitude - 14.4378).abs() < f64::EPSILON);
        assert_eq!(config.browser.viewport.width, 1920);
        assert_eq!(config.browser.viewport.height, 1080);
        assert!(config.consent_patterns.accept.contains(&"accept all".to_string()));
        assert!(config.consent_patterns.reject.contains(&"reject all".to_string()));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let config = load_config("/nonexistent/path/to/config.yaml").unwrap();
        assert_eq!(config.crawler.concurrency, 8);
        assert_eq!(config.project_root, Path::new("/nonexistent/path/to"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "crawler:\n  concurrency: 16\n  totally_unknown_key: true\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.crawler.concurrency, 16);
        // Unspecified fields still default.
        assert_eq!(config.crawler.max_retries, 3);
    }
}
