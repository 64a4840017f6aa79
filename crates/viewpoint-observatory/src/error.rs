//! Error types, one enum per concern, matching `viewpoint_core::error`'s shape.

use thiserror::Error;

/// Errors loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read site list {path}: {source}")]
    SitesRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse site list: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid consent mode in --modes: {0}")]
    InvalidConsentMode(String),
}

/// Errors from classifier data loading.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("failed to read tracker data {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tracker data {path}: {0}", path = path)]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the consent resolver's strategy cascade.
#[derive(Error, Debug)]
pub enum ConsentError {
    #[error("browser context error: {0}")]
    Context(#[from] viewpoint_core::CoreError),

    #[error("page error: {0}")]
    Page(String),

    #[error("no strategy succeeded")]
    NoMatch,
}

/// Errors from the fingerprint and ad observers.
#[derive(Error, Debug)]
pub enum ObserverError {
    #[error("page error: {0}")]
    Page(String),

    #[error("script evaluation failed: {0}")]
    Evaluation(String),

    #[error("image decode/crop failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors from the per-task crawl engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("navigation timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("context error: {0}")]
    Context(String),

    #[error("page error: {0}")]
    Page(String),

    #[error("consent resolver error: {0}")]
    Consent(#[from] ConsentError),
}

/// Errors from the relational store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Errors from the scheduler driving many tasks.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
