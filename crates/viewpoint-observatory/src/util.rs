//! URL normalization, registered-domain extraction, and cookie-value hashing.

use sha2::{Digest, Sha256};

/// Extract the registered domain from a URL or bare domain string.
///
/// Examples: `https://ads.google.com/page` -> `google.com`;
/// `tracker.cdn.example.co.uk` -> `example.co.uk`.
#[must_use]
pub fn extract_registered_domain(url_or_domain: &str) -> String {
    let host = extract_hostname_or_bare(url_or_domain);
    if host.is_empty() {
        return url_or_domain.to_string();
    }
    match psl::domain(host.as_bytes()) {
        Some(domain) => String::from_utf8_lossy(domain.as_bytes()).into_owned(),
        None => host,
    }
}

/// Extract the hostname from a URL, falling back to the input treated as bare host.
fn extract_hostname_or_bare(url_or_domain: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url_or_domain) {
        if let Some(host) = parsed.host_str() {
            return host.to_string();
        }
    }
    if let Ok(parsed) = url::Url::parse(&format!("https://{url_or_domain}")) {
        if let Some(host) = parsed.host_str() {
            return host.to_string();
        }
    }
    url_or_domain.to_string()
}

/// Extract the hostname from a URL, or an empty string if it cannot be parsed.
#[must_use]
pub fn extract_hostname(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

/// Whether `request_domain` is third-party relative to `page_domain`.
#[must_use]
pub fn is_third_party(request_domain: &str, page_domain: &str) -> bool {
    extract_registered_domain(request_domain) != extract_registered_domain(page_domain)
}

/// SHA-256 hex digest of a cookie value, for privacy-safe storage.
#[must_use]
pub fn hash_cookie_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Ensure a URL has a scheme and strip any trailing slash.
#[must_use]
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_registered_domain_from_url() {
        assert_eq!(
            extract_registered_domain("https://ads.google.com/page"),
            "google.com"
        );
    }

    #[test]
    fn extracts_registered_domain_with_public_suffix() {
        assert_eq!(
            extract_registered_domain("tracker.cdn.example.co.uk"),
            "example.co.uk"
        );
    }

    #[test]
    fn third_party_detection() {
        assert!(is_third_party(
            "google-analytics.com",
            "idnes.cz"
        ));
        assert!(!is_third_party("www.idnes.cz", "idnes.cz"));
    }

    #[test]
    fn normalizes_missing_scheme_and_trailing_slash() {
        assert_eq!(normalize_url("example.com/"), "https://example.com");
        assert_eq!(
            normalize_url("http://example.com/"),
            "http://example.com"
        );
    }

    #[test]
    fn cookie_value_hash_is_stable() {
        let h1 = hash_cookie_value("abc123");
        let h2 = hash_cookie_value("abc123");
        assert_eq!(h1, h2);
        assert_ne!(h1, hash_cookie_value("different"));
        assert_eq!(h1.len(), 64);
    }
}
