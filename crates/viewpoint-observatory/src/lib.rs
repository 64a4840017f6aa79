//! Privacy-observatory crawler: cookie-consent interaction and
//! tracking-signal capture.
//!
//! Visits a curated list of sites with a real browser (via
//! [`viewpoint_core`]), exercises cookie-consent banners in three modes,
//! and records every observable tracking signal produced by each page
//! load — network requests, cookies, JS fingerprinting attempts, rendered
//! advertising elements, and resource byte weight — into a relational
//! dataset.
//!
//! The object graph is built bottom-up: [`classifier::TrackerDatabase`] and
//! the [`consent`] strategy cascade are stateless/read-only collaborators
//! handed to a [`engine::CrawlEngine`], which [`scheduler::Scheduler`] drives
//! across many tasks against one [`viewpoint_core::Browser`], persisting
//! through [`store::Store`].

pub mod ads;
pub mod classifier;
pub mod config;
pub mod consent;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod models;
pub mod scheduler;
pub mod sites;
pub mod store;
pub mod util;

pub use config::{load_config, CrawlerConfig};
pub use engine::CrawlEngine;
pub use models::{ConsentMode, CrawlStatus, Observation, Site, Task};
pub use scheduler::{RunReport, Scheduler};
pub use store::Store;
