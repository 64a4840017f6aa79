//! CLI entry point: load config, build the object graph bottom-up
//! (classifier → consent resolver → engine → scheduler → store), launch one
//! browser, and run the full `sites × modes` task set.

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use viewpoint_core::Browser;
use viewpoint_observatory::classifier::TrackerDatabase;
use viewpoint_observatory::config::load_config;
use viewpoint_observatory::consent::ConsentResolver;
use viewpoint_observatory::engine::{CrawlEngine, ProgressSink};
use viewpoint_observatory::models::{ConsentMode, Task};
use viewpoint_observatory::sites::load_sites_csv;
use viewpoint_observatory::store::Store;
use viewpoint_observatory::Scheduler;

/// Footprint Crawler — privacy-observatory crawler for cookie-consent and
/// tracking-signal capture.
#[derive(Debug, Parser)]
#[command(name = "viewpoint-observatory", version, about)]
struct Cli {
    /// Path to config.yaml.
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the sites CSV file path.
    #[arg(long)]
    sites: Option<PathBuf>,

    /// Override the number of concurrent browser contexts.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Comma-separated consent modes to run.
    #[arg(long, default_value = "ignore,accept,reject")]
    modes: String,

    /// Only crawl the first N sites (for testing).
    #[arg(long)]
    limit: Option<usize>,

    /// Run in headed mode (visible browser windows).
    #[arg(long)]
    headed: bool,

    /// Enable verbose (DEBUG) logging.
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Skip sites/modes already crawled successfully.
    #[arg(long)]
    resume: bool,

    /// Disable colored/structured log output (plain text).
    #[arg(long)]
    no_color: bool,

    /// Disable the fingerprint observer.
    #[arg(long)]
    no_fingerprint: bool,

    /// Disable the ad observer.
    #[arg(long)]
    no_ads: bool,

    /// Disable ad screenshot capture.
    #[arg(long)]
    no_ad_capture: bool,

    /// Override the maximum number of ad screenshots per task.
    #[arg(long)]
    ad_capture_limit: Option<usize>,

    /// Measure response body size via interception (slow, optional).
    #[arg(long)]
    measure_body_size: bool,
}

struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn on_progress(&self, task_key: &str, phase: &str, detail: &str) {
        info!(task = task_key, phase, detail, "progress");
    }
}

fn parse_modes(raw: &str) -> Result<Vec<ConsentMode>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<ConsentMode>().map_err(|e| anyhow::anyhow!(e)))
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_ansi(!cli.no_color)
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config =
        load_config(&cli.config).with_context(|| format!("loading config {:?}", cli.config))?;

    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = concurrency;
    }
    if cli.headed {
        config.crawler.headless = false;
    }
    if cli.no_fingerprint {
        config.fingerprinting.enabled = false;
    }
    if cli.no_ads {
        config.ads.enabled = false;
    }
    if cli.no_ad_capture {
        config.ad_capture.enabled = false;
    }
    if let Some(limit) = cli.ad_capture_limit {
        config.ad_capture.max_captures = limit;
    }
    if cli.measure_body_size {
        config.resource_weight.measure_body_size = true;
    }

    let modes = parse_modes(&cli.modes).context("parsing --modes")?;

    let sites_path = match &cli.sites {
        Some(path) => config.resolve_path(&path.display().to_string()),
        None => config.resolve_path(&config.sites_file),
    };
    if !sites_path.exists() {
        bail!("sites file not found: {}", sites_path.display());
    }
    let mut sites = load_sites_csv(&sites_path)
        .with_context(|| format!("loading sites from {}", sites_path.display()))?;
    if let Some(limit) = cli.limit {
        sites.truncate(limit);
    }

    let config = Arc::new(config);

    let mut tracker_db = TrackerDatabase::new();
    let disconnect_path = config.resolve_path("data/trackers/disconnect.json");
    if disconnect_path.exists() {
        tracker_db
            .load_disconnect_json(&disconnect_path)
            .with_context(|| format!("loading {}", disconnect_path.display()))
            .unwrap_or_else(|e| tracing::warn!(error = %e, "disconnect.me tracker data not loaded"));
    }
    let region_path = config.resolve_path("data/trackers/region_trackers.json");
    if region_path.exists() {
        tracker_db
            .load_region_json(&region_path)
            .with_context(|| format!("loading {}", region_path.display()))
            .unwrap_or_else(|e| tracing::warn!(error = %e, "region tracker data not loaded"));
    }
    let tracker_db = Arc::new(tracker_db);

    let consent_resolver = Arc::new(ConsentResolver::new(
        config.consent_patterns.clone(),
        std::time::Duration::from_millis(config.crawler.consent_timeout_ms),
    ));

    let engine = Arc::new(CrawlEngine::new(config.clone(), tracker_db.clone(), consent_resolver));

    let db_path = config.resolve_path(&config.database.path);
    let store = Arc::new(
        Store::connect(&db_path)
            .await
            .with_context(|| format!("opening database {}", db_path.display()))?,
    );

    let scheduler = Scheduler::new(config.clone(), engine, store.clone());
    let (tasks, skipped): (Vec<Task>, usize) =
        scheduler.build_tasks(&sites, &modes, cli.resume).await.context("building task list")?;

    if tasks.is_empty() {
        info!(skipped, "no tasks to run; all sites already crawled");
        store.close().await;
        return Ok(());
    }

    info!(
        sites = sites.len(),
        modes = modes.len(),
        tasks = tasks.len(),
        skipped,
        concurrency = config.crawler.concurrency,
        headless = config.crawler.headless,
        "starting crawl",
    );

    let browser = Arc::new(
        Browser::launch()
            .headless(config.crawler.headless)
            .launch()
            .await
            .context("launching browser")?,
    );

    let run_id: Arc<str> = Arc::from(chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string());
    let progress: Arc<dyn ProgressSink> = Arc::new(TracingProgressSink);

    let report = scheduler.run(browser, tasks, run_id, progress).await;

    store.close().await;

    info!(
        total = report.total_tasks,
        succeeded = report.succeeded.load(Ordering::Relaxed),
        errored = report.errored.load(Ordering::Relaxed),
        database = %db_path.display(),
        "crawl complete",
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_modes() {
        let modes = parse_modes("ignore,accept,reject").unwrap();
        assert_eq!(modes, vec![ConsentMode::Ignore, ConsentMode::Accept, ConsentMode::Reject]);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(parse_modes("ignore,maybe").is_err());
    }

    #[test]
    fn trims_whitespace_in_modes() {
        let modes = parse_modes(" accept , reject ").unwrap();
        assert_eq!(modes, vec![ConsentMode::Accept, ConsentMode::Reject]);
    }
}
