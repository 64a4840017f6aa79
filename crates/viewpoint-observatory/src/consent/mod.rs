//! Cookie-consent banner resolution: a cascade of strategies tried in order
//! until one reports success, matching the outward behavior of a real
//! visitor dismissing a banner.
//!
//! Each strategy is independently testable against a `page.set_content(html)`
//! fixture. None of them assume a particular CMP is present; [`ConsentResolver`]
//! tries them in order and stops at the first that clicks something.

mod cmp_table;
mod context_scan;
mod strategies;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, instrument};
use viewpoint_core::Page;

use crate::config::ConsentPatterns;
use crate::error::ConsentError;
use crate::models::{ConsentInfo, ConsentMode};

pub use cmp_table::{CmpDefinition, KNOWN_CMPS};

/// Which consent action to pursue. [`ConsentMode::Ignore`] never reaches the
/// resolver; the crawl engine skips straight past `CONSENTING` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentAction {
    Accept,
    Reject,
}

impl ConsentAction {
    /// Build the action to pursue for a task's consent mode, or `None` for `Ignore`.
    #[must_use]
    pub fn from_mode(mode: ConsentMode) -> Option<Self> {
        match mode {
            ConsentMode::Ignore => None,
            ConsentMode::Accept => Some(Self::Accept),
            ConsentMode::Reject => Some(Self::Reject),
        }
    }

    fn selectors<'a>(self, cmp: &CmpDefinition) -> &'static [&'static str] {
        match self {
            Self::Accept => cmp.accept_selectors,
            Self::Reject => cmp.reject_selectors,
        }
    }

    fn phrases<'a>(self, patterns: &'a ConsentPatterns) -> &'a [String] {
        match self {
            Self::Accept => &patterns.accept,
            Self::Reject => &patterns.reject,
        }
    }
}

impl std::fmt::Display for ConsentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        })
    }
}

/// What a single strategy decided.
#[derive(Debug, Clone)]
pub enum StrategyOutcome {
    /// The strategy found and clicked a matching control.
    Success { cmp_platform: String, button_text: String },
    /// The strategy found nothing it recognized; try the next one.
    NotApplicable,
}

/// One technique for locating and actuating a consent banner.
///
/// `probe` returns a manually-boxed future rather than using `async fn` in
/// the trait so that `Box<dyn ConsentStrategy>` stays object-safe without
/// pulling in an extra dependency — the same shape `viewpoint_core` uses for
/// its route handlers.
pub trait ConsentStrategy: Send + Sync {
    /// Short identifier used in logs, not shown to end users.
    fn name(&self) -> &'static str;

    fn probe<'a>(
        &'a self,
        page: &'a Page,
        action: ConsentAction,
        patterns: &'a ConsentPatterns,
    ) -> Pin<Box<dyn Future<Output = Result<StrategyOutcome, ConsentError>> + Send + 'a>>;
}

/// Runs the strategy cascade against a page within a single timeout budget.
pub struct ConsentResolver {
    strategies: Vec<Box<dyn ConsentStrategy>>,
    patterns: ConsentPatterns,
    timeout: Duration,
}

impl ConsentResolver {
    #[must_use]
    pub fn new(patterns: ConsentPatterns, timeout: Duration) -> Self {
        let strategies: Vec<Box<dyn ConsentStrategy>> = vec![
            Box::new(strategies::KnownCmpStrategy),
            Box::new(strategies::ShadowDomPiercingStrategy),
            Box::new(strategies::SeznamTwoStepStrategy),
            Box::new(strategies::PhraseTextLocatorStrategy),
            Box::new(strategies::AccessibleRoleStrategy),
            Box::new(strategies::GenericBannerScanStrategy),
            Box::new(strategies::FullPagePhraseScanStrategy),
            Box::new(strategies::DidomiJsApiStrategy),
            Box::new(strategies::NestedIframeCmpScanStrategy),
        ];
        Self { strategies, patterns, timeout }
    }

    /// Try every strategy in order until one succeeds or the timeout elapses.
    ///
    /// A strategy that errors (rather than reporting `NotApplicable`) is
    /// logged and treated the same as a miss; the resolver never propagates
    /// a single strategy's failure as the crawl's failure.
    #[instrument(skip(self, page), fields(action = %action))]
    pub async fn resolve(&self, page: &Page, action: ConsentAction) -> ConsentInfo {
        let deadline = Instant::now() + self.timeout;

        for strategy in &self.strategies {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                debug!("consent timeout reached before exhausting strategy list");
                break;
            }

            let attempt = tokio::time::timeout(remaining, strategy.probe(page, action, &self.patterns)).await;
            match attempt {
                Ok(Ok(StrategyOutcome::Success { cmp_platform, button_text })) => {
                    debug!(strategy = strategy.name(), cmp = %cmp_platform, "consent resolved");
                    return ConsentInfo {
                        banner_detected: true,
                        cmp_platform: Some(cmp_platform),
                        button_text: Some(button_text),
                        action_taken: true,
                    };
                }
                Ok(Ok(StrategyOutcome::NotApplicable)) => continue,
                Ok(Err(err)) => {
                    debug!(strategy = strategy.name(), error = %err, "strategy failed, trying next");
                    continue;
                }
                Err(_) => {
                    debug!("consent resolver timed out mid-strategy");
                    break;
                }
            }
        }

        ConsentInfo { banner_detected: false, cmp_platform: None, button_text: None, action_taken: false }
    }
}

pub(crate) use context_scan::consent_context_keywords;
