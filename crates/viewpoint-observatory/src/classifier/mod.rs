//! Stateless lookups: domain -> (entity, category); cookie-name -> tracking.

mod builtin;
pub mod resource_weight;

use std::collections::HashMap;
use std::path::Path;

use crate::error::ClassifierError;
use crate::util::extract_registered_domain;

pub use resource_weight::ResourceWeightClassifier;

/// Tracker classification database: combines the built-in table with optional
/// Disconnect.me-format and region-specific JSON extensions, merged into a
/// single flat map at construction (later sources override earlier).
#[derive(Debug, Clone)]
pub struct TrackerDatabase {
    lookup: HashMap<String, (String, String)>,
}

impl TrackerDatabase {
    /// Build a database from only the built-in table.
    #[must_use]
    pub fn new() -> Self {
        let lookup = builtin::BUILTIN_TRACKERS
            .iter()
            .map(|(domain, entity, category)| {
                ((*domain).to_string(), ((*entity).to_string(), (*category).to_string()))
            })
            .collect();
        Self { lookup }
    }

    /// Merge in a Disconnect.me `services.json`-format file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed as JSON.
    pub fn load_disconnect_json(&mut self, path: impl AsRef<Path>) -> Result<(), ClassifierError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ClassifierError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let data: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| ClassifierError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        let categories = data.get("categories").unwrap_or(&data);
        let mut count = 0usize;
        if let Some(categories) = categories.as_object() {
            for (category_name, entries) in categories {
                let Some(entries) = entries.as_array() else { continue };
                for entry in entries {
                    let Some(entry) = entry.as_object() else { continue };
                    for (entity_name, entity_data) in entry {
                        let Some(entity_data) = entity_data.as_object() else { continue };
                        for domain_list in entity_data.values() {
                            let Some(domain_list) = domain_list.as_array() else { continue };
                            for domain in domain_list {
                                if let Some(domain) = domain.as_str() {
                                    if domain.contains('.') {
                                        self.lookup.insert(
                                            domain.to_string(),
                                            (entity_name.clone(), category_name.to_lowercase()),
                                        );
                                        count += 1;
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        tracing::info!(count, path = %path.display(), "loaded domains from Disconnect.me file");
        Ok(())
    }

    /// Merge in a region-specific tracker JSON: `{ key: { name, category, domains: [...] } }`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed as JSON.
    pub fn load_region_json(&mut self, path: impl AsRef<Path>) -> Result<(), ClassifierError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ClassifierError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let data: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&text).map_err(|source| ClassifierError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        let mut count = 0usize;
        for (key, entry) in &data {
            let Some(entry) = entry.as_object() else { continue };
            let entity_name = entry
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or(key)
                .to_string();
            let category = entry
                .get("category")
                .and_then(|v| v.as_str())
                .unwrap_or("other")
                .to_string();
            if let Some(domains) = entry.get("domains").and_then(|v| v.as_array()) {
                for domain in domains {
                    if let Some(domain) = domain.as_str() {
                        self.lookup
                            .insert(domain.to_string(), (entity_name.clone(), category.clone()));
                        count += 1;
                    }
                }
            }
        }
        tracing::info!(count, path = %path.display(), "loaded domains from region tracker file");
        Ok(())
    }

    /// Classify a domain: (1) exact hostname hit; (2) registered-domain hit;
    /// (3) walk up stripping leading labels, stop on first match.
    #[must_use]
    pub fn classify(&self, domain: &str) -> (Option<String>, Option<String>) {
        if let Some((entity, category)) = self.lookup.get(domain) {
            return (Some(entity.clone()), Some(category.clone()));
        }

        let reg_domain = extract_registered_domain(domain);
        if let Some((entity, category)) = self.lookup.get(&reg_domain) {
            return (Some(entity.clone()), Some(category.clone()));
        }

        let parts: Vec<&str> = domain.split('.').collect();
        for i in 1..parts.len() {
            let parent = parts[i..].join(".");
            if let Some((entity, category)) = self.lookup.get(&parent) {
                return (Some(entity.clone()), Some(category.clone()));
            }
        }

        (None, None)
    }

    /// Whether a cookie is likely a tracking cookie, by name pattern or domain classification.
    #[must_use]
    pub fn is_tracking_cookie(&self, name: &str, domain: &str) -> bool {
        if is_tracking_cookie_by_name(name) {
            return true;
        }
        let (entity, _category) = self.classify(domain.trim_start_matches('.'));
        entity.is_some()
    }

    #[must_use]
    pub fn domain_count(&self) -> usize {
        self.lookup.len()
    }
}

impl Default for TrackerDatabase {
    fn default() -> Self {
        Self::new()
    }
}

fn is_tracking_cookie_by_name(name: &str) -> bool {
    let name_lower = name.to_lowercase();
    builtin::TRACKING_COOKIE_PATTERNS.iter().any(|pattern| {
        let pattern_lower = pattern.to_lowercase();
        name_lower == pattern_lower || name_lower.starts_with(&pattern_lower)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_exact_domain() {
        let db = TrackerDatabase::new();
        let (entity, category) = db.classify("google-analytics.com");
        assert_eq!(entity.as_deref(), Some("Google"));
        assert_eq!(category.as_deref(), Some("analytics"));
    }

    #[test]
    fn classifies_subdomain_by_domain_walk() {
        let db = TrackerDatabase::new();
        let (entity, _) = db.classify("stats.g.doubleclick.net");
        assert_eq!(entity.as_deref(), Some("Google"));
    }

    #[test]
    fn unknown_domain_returns_none() {
        let db = TrackerDatabase::new();
        let (entity, category) = db.classify("totally-unknown-site.example");
        assert!(entity.is_none());
        assert!(category.is_none());
    }

    #[test]
    fn domain_walk_is_consistent_for_any_subdomain() {
        // Any proper subdomain of a classified domain must resolve to the
        // same entity as the domain itself.
        let db = TrackerDatabase::new();
        let (base_entity, _) = db.classify("doubleclick.net");
        let (sub_entity, _) = db.classify("ads.x.doubleclick.net");
        assert_eq!(base_entity, sub_entity);
    }

    #[test]
    fn tracking_cookie_by_exact_name() {
        let db = TrackerDatabase::new();
        assert!(db.is_tracking_cookie("_ga", "example.com"));
        assert!(db.is_tracking_cookie("_gid", "example.com"));
    }

    #[test]
    fn tracking_cookie_by_prefix() {
        let db = TrackerDatabase::new();
        assert!(db.is_tracking_cookie("_hjSessionUser_12345", "example.com"));
    }

    #[test]
    fn tracking_cookie_by_domain_classification() {
        let db = TrackerDatabase::new();
        assert!(db.is_tracking_cookie("some_custom_cookie", ".doubleclick.net"));
    }

    #[test]
    fn non_tracking_cookie_on_unknown_domain() {
        let db = TrackerDatabase::new();
        assert!(!db.is_tracking_cookie("session_id", "example.com"));
    }
}
