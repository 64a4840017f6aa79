//! Relational persistence. One [`Store`] wraps a SQLite pool;
//! `save_observation` writes a session row plus every child record set
//! inside a single transaction, deriving the denormalized `fp_*`/`ad_*`/`rw_*`
//! counters from the collections being written rather than trusting a
//! separately-maintained counter.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use crate::error::StoreError;
use crate::models::{ConsentMode, Observation, Site};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Basic aggregate crawl statistics across all persisted sessions.
#[derive(Debug, Clone, Default)]
pub struct CrawlStats {
    pub total_sites: i64,
    pub total_sessions: i64,
    pub successful_sessions: i64,
    pub total_requests: i64,
    pub third_party_requests: i64,
    pub total_cookies: i64,
}

/// The relational store: one `crawl_sessions` row per persisted [`Observation`],
/// with child rows for requests, cookies, fingerprint events, ad elements, and
/// ad captures.
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating if absent) the SQLite database at `path`, enable WAL and
    /// foreign keys, and run pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", path.display()))
            .unwrap_or_else(|_| SqliteConnectOptions::new().filename(path))
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new().max_connections(4).connect_with(options).await?;
        MIGRATOR.run(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert a site if its domain is new, returning the existing or new row id.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn upsert_site(&self, site: &Site) -> Result<i64, StoreError> {
        if let Some(row) = sqlx::query("SELECT id FROM sites WHERE domain = ?")
            .bind(&site.domain)
            .fetch_optional(&self.pool)
            .await?
        {
            return Ok(row.get::<i64, _>("id"));
        }

        let result = sqlx::query(
            "INSERT INTO sites (url, domain, category, rank_cz) VALUES (?, ?, ?, ?)",
        )
        .bind(&site.url)
        .bind(&site.domain)
        .bind(&site.category)
        .bind(site.rank)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Whether a `SUCCESS` session already exists for `(domain, mode)` —
    /// backs the scheduler's resume-skip behavior.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn has_session(&self, domain: &str, mode: ConsentMode) -> Result<bool, StoreError> {
        let row = sqlx::query(
            "SELECT 1 FROM crawl_sessions cs \
             JOIN sites s ON cs.site_id = s.id \
             WHERE s.domain = ? AND cs.consent_mode = ? AND cs.status = 'success' \
             LIMIT 1",
        )
        .bind(domain)
        .bind(mode.to_string())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    /// Persist a complete observation (session row + every child record set)
    /// atomically in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure; the transaction is rolled back.
    pub async fn save_observation(&self, observation: &Observation) -> Result<i64, StoreError> {
        let site_id = self.upsert_site(&observation.site).await?;

        let total_requests = observation.total_requests() as i64;
        let third_party_requests = observation.third_party_requests() as i64;
        let total_cookies_set = observation.total_cookies_set() as i64;
        let tracking_cookies_set = observation.tracking_cookies_set() as i64;

        let consent = observation.consent_info.as_ref();
        let fp = observation.fingerprint_result.as_ref();
        let ad = observation.ad_detection_result.as_ref();
        let ac = observation.ad_capture_result.as_ref();
        let rw = observation.resource_weight.as_ref();

        let mut tx = self.pool.begin().await?;

        let session_result = sqlx::query(
            "INSERT INTO crawl_sessions (\
                site_id, consent_mode, started_at, completed_at, final_url, page_title, \
                load_time_ms, total_requests, third_party_requests, total_cookies_set, \
                tracking_cookies_set, consent_banner_detected, consent_cmp, \
                consent_button_text, consent_action_taken, screenshot_path, error, status, \
                fp_severity, fp_event_count, fp_canvas, fp_webgl, fp_audio, fp_font, \
                fp_navigator, fp_storage, fp_unique_apis, fp_unique_entities, \
                ad_count, ad_visible_count, ad_density, ad_total_area_px, ad_iab_standard_count, \
                ad_captures_total, ad_captures_failed, \
                rw_total_bytes, rw_content_1p_bytes, rw_cdn_bytes, rw_tracker_bytes, \
                rw_ad_bytes, rw_functional_3p_bytes, rw_unknown_3p_bytes\
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, \
                      ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, \
                      ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(site_id)
        .bind(observation.consent_mode.to_string())
        .bind(observation.started_at.to_rfc3339())
        .bind(observation.completed_at.to_rfc3339())
        .bind(&observation.final_url)
        .bind(&observation.page_title)
        .bind(observation.load_time_ms.map(|v| v as i64))
        .bind(total_requests)
        .bind(third_party_requests)
        .bind(total_cookies_set)
        .bind(tracking_cookies_set)
        .bind(consent.map(|c| c.banner_detected))
        .bind(consent.and_then(|c| c.cmp_platform.clone()))
        .bind(consent.and_then(|c| c.button_text.clone()))
        .bind(consent.map(|c| c.action_taken))
        .bind(&observation.screenshot_path)
        .bind(&observation.error)
        .bind(status_str(observation.status))
        .bind(fp.map(|f| format!("{:?}", f.severity).to_lowercase()))
        .bind(fp.map(|f| f.events.len() as i64).unwrap_or(0))
        .bind(fp.map_or(false, |f| f.canvas_detected))
        .bind(fp.map_or(false, |f| f.webgl_detected))
        .bind(fp.map_or(false, |f| f.audio_detected))
        .bind(fp.map_or(false, |f| f.font_detected))
        .bind(fp.map_or(false, |f| f.navigator_detected))
        .bind(fp.map_or(false, |f| f.storage_detected))
        .bind(fp.map(|f| f.unique_apis as i64).unwrap_or(0))
        .bind(fp.map(|f| f.unique_entities as i64).unwrap_or(0))
        .bind(ad.map(|a| a.total_ad_count as i64).unwrap_or(0))
        .bind(ad.map(|a| a.visible_ad_count as i64).unwrap_or(0))
        .bind(ad.map_or(0.0, |a| a.ad_density))
        .bind(ad.map(|a| a.total_ad_area_px).unwrap_or(0))
        .bind(ad.map(|a| a.iab_standard_count as i64).unwrap_or(0))
        .bind(ac.map(|a| a.total_captured as i64).unwrap_or(0))
        .bind(ac.map(|a| a.total_failed as i64).unwrap_or(0))
        .bind(rw.map(|r| r.total_bytes as i64).unwrap_or(0))
        .bind(rw.map(|r| r.content_1p_bytes as i64).unwrap_or(0))
        .bind(rw.map(|r| r.cdn_bytes as i64).unwrap_or(0))
        .bind(rw.map(|r| r.tracker_bytes as i64).unwrap_or(0))
        .bind(rw.map(|r| r.ad_bytes as i64).unwrap_or(0))
        .bind(rw.map(|r| r.functional_3p_bytes as i64).unwrap_or(0))
        .bind(rw.map(|r| r.unknown_3p_bytes as i64).unwrap_or(0))
        .execute(&mut *tx)
        .await?;

        let session_id = session_result.last_insert_rowid();

        for r in &observation.requests {
            sqlx::query(
                "INSERT INTO requests (\
                    session_id, url, domain, method, resource_type, is_third_party, \
                    tracker_entity, tracker_category, status_code, response_size_bytes, \
                    timing_ms, timestamp, resource_category, content_type\
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(session_id)
            .bind(&r.url)
            .bind(&r.domain)
            .bind(&r.method)
            .bind(&r.resource_type)
            .bind(r.is_third_party)
            .bind(&r.tracker_entity)
            .bind(&r.tracker_category)
            .bind(r.status_code.map(i64::from))
            .bind(r.response_size_bytes.map(|v| v as i64))
            .bind(r.timing_ms)
            .bind(r.timestamp.to_rfc3339())
            .bind(r.resource_category.map(|c| c.as_str()))
            .bind(&r.content_type)
            .execute(&mut *tx)
            .await?;
        }

        for c in &observation.cookies {
            sqlx::query(
                "INSERT INTO cookies (\
                    session_id, name, domain, value_hash, path, expires_at, lifetime_days, \
                    is_secure, is_http_only, same_site, is_session, is_tracking_cookie, \
                    tracker_entity, set_before_consent, timestamp\
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(session_id)
            .bind(&c.name)
            .bind(&c.domain)
            .bind(&c.value_hash)
            .bind(&c.path)
            .bind(c.expires_at.map(|e| e.to_rfc3339()))
            .bind(c.lifetime_days)
            .bind(c.is_secure)
            .bind(c.is_http_only)
            .bind(&c.same_site)
            .bind(c.is_session)
            .bind(c.is_tracking_cookie)
            .bind(&c.tracker_entity)
            .bind(c.set_before_consent)
            .bind(c.timestamp.to_rfc3339())
            .execute(&mut *tx)
            .await?;
        }

        if let Some(fp) = fp {
            for e in &fp.events {
                sqlx::query(
                    "INSERT INTO fingerprint_events (\
                        session_id, api, method, call_stack_domain, tracker_entity, details, timestamp\
                    ) VALUES (?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(session_id)
                .bind(&e.api)
                .bind(&e.method)
                .bind(&e.call_stack_domain)
                .bind(&e.tracker_entity)
                .bind(&e.details)
                .bind(e.timestamp.to_rfc3339())
                .execute(&mut *tx)
                .await?;
            }
        }

        if let Some(ad) = ad {
            for (i, a) in ad.ads.iter().enumerate() {
                let element_result = sqlx::query(
                    "INSERT INTO ad_elements (\
                        session_id, selector, tag_name, ad_id, ad_class, x, y, width, height, \
                        is_visible, is_iframe, iframe_src, iab_size, ad_network\
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(session_id)
                .bind(&a.selector)
                .bind(&a.tag_name)
                .bind(&a.ad_id)
                .bind(&a.ad_class)
                .bind(a.x)
                .bind(a.y)
                .bind(a.width)
                .bind(a.height)
                .bind(a.is_visible)
                .bind(a.is_iframe)
                .bind(&a.iframe_src)
                .bind(&a.iab_size)
                .bind(&a.ad_network)
                .execute(&mut *tx)
                .await?;
                let ad_element_id = element_result.last_insert_rowid();

                if let Some(cap) = ac.and_then(|ac| ac.captures.get(i)) {
                    sqlx::query(
                        "INSERT INTO ad_captures (\
                            session_id, ad_element_id, ad_index, screenshot_path, metadata_path, \
                            width, height, capture_method\
                        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                    )
                    .bind(session_id)
                    .bind(ad_element_id)
                    .bind(cap.ad_index as i64)
                    .bind(&cap.screenshot_path)
                    .bind(&cap.metadata_path)
                    .bind(i64::from(cap.width))
                    .bind(i64::from(cap.height))
                    .bind(cap.capture_method.as_str())
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(session_id)
    }

    /// Aggregate counts across the whole run.
    ///
    /// # Errors
    ///
    /// Returns an error on database failure.
    pub async fn stats(&self) -> Result<CrawlStats, StoreError> {
        let total_sites: i64 =
            sqlx::query("SELECT COUNT(*) AS c FROM sites").fetch_one(&self.pool).await?.get("c");
        let total_sessions: i64 = sqlx::query("SELECT COUNT(*) AS c FROM crawl_sessions")
            .fetch_one(&self.pool)
            .await?
            .get("c");
        let successful_sessions: i64 =
            sqlx::query("SELECT COUNT(*) AS c FROM crawl_sessions WHERE status = 'success'")
                .fetch_one(&self.pool)
                .await?
                .get("c");
        let total_requests: i64 =
            sqlx::query("SELECT COUNT(*) AS c FROM requests").fetch_one(&self.pool).await?.get("c");
        let third_party_requests: i64 =
            sqlx::query("SELECT COUNT(*) AS c FROM requests WHERE is_third_party = 1")
                .fetch_one(&self.pool)
                .await?
                .get("c");
        let total_cookies: i64 =
            sqlx::query("SELECT COUNT(*) AS c FROM cookies").fetch_one(&self.pool).await?.get("c");

        Ok(CrawlStats {
            total_sites,
            total_sessions,
            successful_sessions,
            total_requests,
            third_party_requests,
            total_cookies,
        })
    }

    /// Close the underlying connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn status_str(status: crate::models::CrawlStatus) -> &'static str {
    use crate::models::CrawlStatus;
    match status {
        CrawlStatus::Success => "success",
        CrawlStatus::Timeout => "timeout",
        CrawlStatus::Error => "error",
        CrawlStatus::Blocked => "blocked",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConsentMode, CookieRecord, CrawlStatus, RequestRecord, ResourceCategory};
    use chrono::Utc;

    fn sample_site(domain: &str) -> Site {
        Site {
            url: format!("https://{domain}"),
            domain: domain.to_string(),
            category: Some("news".to_string()),
            rank: Some(1),
        }
    }

    fn sample_observation(domain: &str, mode: ConsentMode) -> Observation {
        let now = Utc::now();
        Observation {
            site: sample_site(domain),
            consent_mode: mode,
            status: CrawlStatus::Success,
            started_at: now,
            completed_at: now,
            final_url: Some(format!("https://{domain}/")),
            page_title: Some("Title".to_string()),
            load_time_ms: Some(1200),
            requests: vec![RequestRecord {
                url: "https://google-analytics.com/g/collect".to_string(),
                domain: "google-analytics.com".to_string(),
                method: "GET".to_string(),
                resource_type: "xhr".to_string(),
                is_third_party: true,
                tracker_entity: Some("Google".to_string()),
                tracker_category: Some("analytics".to_string()),
                status_code: Some(200),
                response_size_bytes: Some(128),
                timing_ms: Some(42.0),
                timestamp: now,
                resource_category: Some(ResourceCategory::Tracker),
                content_type: Some("image/gif".to_string()),
            }],
            cookies: vec![CookieRecord {
                name: "_ga".to_string(),
                domain: format!(".{domain}"),
                value_hash: "deadbeef".to_string(),
                path: "/".to_string(),
                expires_at: None,
                lifetime_days: None,
                is_secure: true,
                is_http_only: false,
                same_site: None,
                is_session: false,
                is_tracking_cookie: true,
                tracker_entity: Some("Google".to_string()),
                set_before_consent: true,
                timestamp: now,
            }],
            consent_info: None,
            screenshot_path: None,
            error: None,
            fingerprint_result: None,
            ad_detection_result: None,
            ad_capture_result: None,
            resource_weight: None,
        }
    }

    #[tokio::test]
    async fn save_and_resume_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::connect(dir.path().join("test.db")).await.unwrap();

        let observation = sample_observation("example.cz", ConsentMode::Accept);
        let session_id = store.save_observation(&observation).await.unwrap();
        assert!(session_id > 0);

        assert!(store.has_session("example.cz", ConsentMode::Accept).await.unwrap());
        assert!(!store.has_session("example.cz", ConsentMode::Reject).await.unwrap());

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_sites, 1);
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.successful_sessions, 1);
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.third_party_requests, 1);
        assert_eq!(stats.total_cookies, 1);
    }

    #[tokio::test]
    async fn upsert_site_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::connect(dir.path().join("test.db")).await.unwrap();
        let site = sample_site("idnes.cz");
        let first = store.upsert_site(&site).await.unwrap();
        let second = store.upsert_site(&site).await.unwrap();
        assert_eq!(first, second);
    }
}
