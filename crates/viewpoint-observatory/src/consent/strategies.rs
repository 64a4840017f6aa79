//! Concrete consent strategies, tried in the order `ConsentResolver` lists them.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use viewpoint_core::error::{LocatorError, PageError};
use viewpoint_core::{AriaRole, DocumentLoadState, Page};

use crate::config::ConsentPatterns;
use crate::error::ConsentError;

use super::context_scan::{phrase_scan_script, ScanResult};
use super::{cmp_table, CmpDefinition, ConsentAction, ConsentStrategy, StrategyOutcome};

fn locator_err(e: LocatorError) -> ConsentError {
    ConsentError::Page(e.to_string())
}

fn page_err(e: PageError) -> ConsentError {
    ConsentError::Page(e.to_string())
}

/// Phrases considered generic enough to count as a banner candidate even
/// without an exact configured match (used only to seed selector scans, not
/// to decide the click itself).
const BANNER_CONTAINER_SELECTORS: &[&str] = &[
    "[class*='cookie' i]",
    "[id*='cookie' i]",
    "[class*='consent' i]",
    "[id*='consent' i]",
    "[class*='gdpr' i]",
    "[role='dialog']",
    "[role='alertdialog']",
];

/// Strategy 1 + 3: known CMPs, tried by their fingerprint selectors first in
/// the main document, then inside the CMP's iframe if it hosts its buttons there.
pub(super) struct KnownCmpStrategy;

impl KnownCmpStrategy {
    async fn try_main_doc(
        page: &Page,
        cmp: &CmpDefinition,
        action: ConsentAction,
    ) -> Result<Option<StrategyOutcome>, ConsentError> {
        let root = page.locator(cmp.root_selector).first();
        let root_present = root.count().await.map_err(locator_err)? > 0;
        if !root_present || !root.is_visible().await.unwrap_or(false) {
            return Ok(None);
        }

        for selector in action.selectors(cmp) {
            let button = page.locator(*selector).first();
            if button.count().await.map_err(locator_err)? == 0 {
                continue;
            }
            if !button.is_visible().await.unwrap_or(false) {
                continue;
            }
            let text = button.text_content().await.ok().flatten().unwrap_or_default();
            button.click().await.map_err(locator_err)?;
            return Ok(Some(StrategyOutcome::Success { cmp_platform: cmp.name.to_string(), button_text: text }));
        }
        Ok(None)
    }

    async fn try_iframe(
        page: &Page,
        cmp: &CmpDefinition,
        action: ConsentAction,
    ) -> Result<Option<StrategyOutcome>, ConsentError> {
        let Some(iframe_selector) = cmp.iframe_selector else { return Ok(None) };
        if page.locator(iframe_selector).first().count().await.unwrap_or(0) == 0 {
            return Ok(None);
        }

        let frame_locator = page.frame_locator(iframe_selector);
        for selector in action.selectors(cmp) {
            let el = frame_locator.locator(*selector);
            if el.count().await.unwrap_or(0) == 0 {
                continue;
            }
            if !el.is_visible().await.unwrap_or(false) {
                continue;
            }
            let text = el.text_content().await.ok().flatten().unwrap_or_default();
            el.click().await.map_err(page_err)?;
            return Ok(Some(StrategyOutcome::Success { cmp_platform: cmp.name.to_string(), button_text: text }));
        }
        Ok(None)
    }

    async fn probe_impl(&self, page: &Page, action: ConsentAction) -> Result<StrategyOutcome, ConsentError> {
        for cmp in cmp_table::KNOWN_CMPS {
            if let Some(outcome) = Self::try_main_doc(page, cmp, action).await? {
                return Ok(outcome);
            }
            if let Some(outcome) = Self::try_iframe(page, cmp, action).await? {
                return Ok(outcome);
            }
        }
        Ok(StrategyOutcome::NotApplicable)
    }
}

impl ConsentStrategy for KnownCmpStrategy {
    fn name(&self) -> &'static str {
        "known_cmp"
    }

    fn probe<'a>(
        &'a self,
        page: &'a Page,
        action: ConsentAction,
        _patterns: &'a ConsentPatterns,
    ) -> Pin<Box<dyn Future<Output = Result<StrategyOutcome, ConsentError>> + Send + 'a>> {
        Box::pin(self.probe_impl(page, action))
    }
}

/// Strategy 2: walk open shadow roots on a short list of known hosts
/// (Seznam's `szn-cwl` custom element, Didomi's `#didomi-host`) looking for
/// a button whose text matches a configured phrase. Closed shadow roots are
/// unreachable from JS and are simply not found, same as a real browser
/// extension would see.
pub(super) struct ShadowDomPiercingStrategy;

const SHADOW_HOSTS: &[&str] = &["szn-cwl", "#didomi-host", "#usercentrics-root", "#cookie-law-info-bar"];

impl ShadowDomPiercingStrategy {
    fn script(phrases: &[String]) -> String {
        let hosts_json = serde_json::to_string(SHADOW_HOSTS).unwrap_or_else(|_| "[]".to_string());
        let phrases_json = serde_json::to_string(phrases).unwrap_or_else(|_| "[]".to_string());
        format!(
            r#"(() => {{
    const hosts = {hosts_json};
    const phrases = {phrases_json};
    for (const hostSelector of hosts) {{
        const host = document.querySelector(hostSelector);
        if (!host || !host.shadowRoot) continue;
        const buttons = host.shadowRoot.querySelectorAll("button, [role='button'], a");
        for (const el of buttons) {{
            const text = (el.innerText || el.textContent || '').trim();
            if (!text) continue;
            const lower = text.toLowerCase();
            if (phrases.some(p => lower.includes(p.toLowerCase()))) {{
                el.click();
                return {{ clicked: true, text, host: hostSelector }};
            }}
        }}
    }}
    return {{ clicked: false, text: null, host: null }};
}})()"#,
            hosts_json = hosts_json,
            phrases_json = phrases_json,
        )
    }

    async fn probe_impl(
        &self,
        page: &Page,
        action: ConsentAction,
        patterns: &ConsentPatterns,
    ) -> Result<StrategyOutcome, ConsentError> {
        #[derive(serde::Deserialize)]
        struct Result_ {
            clicked: bool,
            text: Option<String>,
            host: Option<String>,
        }

        let script = Self::script(action.phrases(patterns));
        let result: Result_ = page.evaluate(&script).await.map_err(page_err)?;
        if result.clicked {
            let platform = result.host.unwrap_or_else(|| "shadow-dom".to_string());
            return Ok(StrategyOutcome::Success { cmp_platform: platform, button_text: result.text.unwrap_or_default() });
        }
        Ok(StrategyOutcome::NotApplicable)
    }
}

impl ConsentStrategy for ShadowDomPiercingStrategy {
    fn name(&self) -> &'static str {
        "shadow_dom_piercing"
    }

    fn probe<'a>(
        &'a self,
        page: &'a Page,
        action: ConsentAction,
        patterns: &'a ConsentPatterns,
    ) -> Pin<Box<dyn Future<Output = Result<StrategyOutcome, ConsentError>> + Send + 'a>> {
        Box::pin(self.probe_impl(page, action, patterns))
    }
}

/// Strategy 4: Seznam's CWL widget (and others like it) show a summary
/// screen with a "settings"/"more options" link before the real accept/reject
/// buttons appear. Click through to the settings screen, then apply the action.
pub(super) struct SeznamTwoStepStrategy;

const SETTINGS_SELECTORS: &[&str] = &[
    "button[data-testid='cw-button-settings']",
    ".szn-cwl-settings",
    "button:has-text('Nastavení')",
];

impl SeznamTwoStepStrategy {
    async fn probe_impl(
        &self,
        page: &Page,
        action: ConsentAction,
        patterns: &ConsentPatterns,
    ) -> Result<StrategyOutcome, ConsentError> {
        let seznam = cmp_table::KNOWN_CMPS.iter().find(|c| c.name == "SeznamCwl").expect("SeznamCwl entry present");

        let root_present = page.locator(seznam.root_selector).first().count().await.unwrap_or(0) > 0
            || match seznam.iframe_selector {
                Some(sel) => page.locator(sel).first().count().await.unwrap_or(0) > 0,
                None => false,
            };
        if !root_present {
            return Ok(StrategyOutcome::NotApplicable);
        }

        let mut clicked_settings = false;
        for selector in SETTINGS_SELECTORS {
            let locator = page.locator(*selector).first();
            if locator.count().await.unwrap_or(0) > 0 && locator.is_visible().await.unwrap_or(false) {
                if locator.click().await.is_ok() {
                    clicked_settings = true;
                    break;
                }
            }
        }

        if clicked_settings {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }

        // Whether or not a settings screen exists, the final action button
        // should now be reachable via the same selectors known-CMP tries.
        for selector in action.selectors(seznam) {
            let locator = page.locator(*selector).first();
            if locator.count().await.unwrap_or(0) > 0 && locator.is_visible().await.unwrap_or(false) {
                let text = locator.text_content().await.ok().flatten().unwrap_or_default();
                locator.click().await.map_err(locator_err)?;
                return Ok(StrategyOutcome::Success { cmp_platform: "SeznamCwl".to_string(), button_text: text });
            }
        }

        // Generic fallback: any visible button matching the phrase list after
        // having opened a settings panel.
        if clicked_settings {
            let script = phrase_scan_script(action.phrases(patterns), None, false, 30);
            let result: ScanResult = page.evaluate(&script).await.map_err(page_err)?;
            if result.clicked {
                return Ok(StrategyOutcome::Success {
                    cmp_platform: "SeznamCwl".to_string(),
                    button_text: result.text.unwrap_or_default(),
                });
            }
        }

        Ok(StrategyOutcome::NotApplicable)
    }
}

impl ConsentStrategy for SeznamTwoStepStrategy {
    fn name(&self) -> &'static str {
        "seznam_two_step"
    }

    fn probe<'a>(
        &'a self,
        page: &'a Page,
        action: ConsentAction,
        patterns: &'a ConsentPatterns,
    ) -> Pin<Box<dyn Future<Output = Result<StrategyOutcome, ConsentError>> + Send + 'a>> {
        Box::pin(self.probe_impl(page, action, patterns))
    }
}

/// Strategy 5: built-in text-matching locators (`get_by_text`), the most
/// direct translation of "find the button that says X".
pub(super) struct PhraseTextLocatorStrategy;

impl PhraseTextLocatorStrategy {
    async fn probe_impl(
        &self,
        page: &Page,
        action: ConsentAction,
        patterns: &ConsentPatterns,
    ) -> Result<StrategyOutcome, ConsentError> {
        for phrase in action.phrases(patterns) {
            let locator = page.get_by_text(phrase.clone()).first();
            if locator.count().await.unwrap_or(0) == 0 {
                continue;
            }
            if !locator.is_visible().await.unwrap_or(false) {
                continue;
            }
            let text = locator.text_content().await.ok().flatten().unwrap_or_else(|| phrase.clone());
            locator.click().await.map_err(locator_err)?;
            return Ok(StrategyOutcome::Success { cmp_platform: "text-match".to_string(), button_text: text });
        }
        Ok(StrategyOutcome::NotApplicable)
    }
}

impl ConsentStrategy for PhraseTextLocatorStrategy {
    fn name(&self) -> &'static str {
        "phrase_text_locator"
    }

    fn probe<'a>(
        &'a self,
        page: &'a Page,
        action: ConsentAction,
        patterns: &'a ConsentPatterns,
    ) -> Pin<Box<dyn Future<Output = Result<StrategyOutcome, ConsentError>> + Send + 'a>> {
        Box::pin(self.probe_impl(page, action, patterns))
    }
}

/// Strategy 6: accessible-role locators, for CMPs whose markup relies on
/// ARIA roles rather than semantic class names.
pub(super) struct AccessibleRoleStrategy;

impl AccessibleRoleStrategy {
    async fn probe_impl(
        &self,
        page: &Page,
        action: ConsentAction,
        patterns: &ConsentPatterns,
    ) -> Result<StrategyOutcome, ConsentError> {
        for phrase in action.phrases(patterns) {
            let locator = page.get_by_role(AriaRole::Button).with_name(phrase.clone()).build().first();
            if locator.count().await.unwrap_or(0) == 0 {
                continue;
            }
            if !locator.is_visible().await.unwrap_or(false) {
                continue;
            }
            let text = locator.text_content().await.ok().flatten().unwrap_or_else(|| phrase.clone());
            locator.click().await.map_err(locator_err)?;
            return Ok(StrategyOutcome::Success { cmp_platform: "aria-role".to_string(), button_text: text });
        }
        Ok(StrategyOutcome::NotApplicable)
    }
}

impl ConsentStrategy for AccessibleRoleStrategy {
    fn name(&self) -> &'static str {
        "accessible_role"
    }

    fn probe<'a>(
        &'a self,
        page: &'a Page,
        action: ConsentAction,
        patterns: &'a ConsentPatterns,
    ) -> Pin<Box<dyn Future<Output = Result<StrategyOutcome, ConsentError>> + Send + 'a>> {
        Box::pin(self.probe_impl(page, action, patterns))
    }
}

/// Strategy 7: scan likely banner containers (by class/id/role keyword) for
/// a matching button, without requiring a known CMP fingerprint.
pub(super) struct GenericBannerScanStrategy;

impl GenericBannerScanStrategy {
    async fn probe_impl(
        &self,
        page: &Page,
        action: ConsentAction,
        patterns: &ConsentPatterns,
    ) -> Result<StrategyOutcome, ConsentError> {
        let root_selector = BANNER_CONTAINER_SELECTORS.join(", ");
        let script = phrase_scan_script(action.phrases(patterns), Some(&root_selector), false, 50);
        let result: ScanResult = page.evaluate(&script).await.map_err(page_err)?;
        if result.clicked {
            return Ok(StrategyOutcome::Success {
                cmp_platform: "generic-banner".to_string(),
                button_text: result.text.unwrap_or_default(),
            });
        }
        Ok(StrategyOutcome::NotApplicable)
    }
}

impl ConsentStrategy for GenericBannerScanStrategy {
    fn name(&self) -> &'static str {
        "generic_banner_scan"
    }

    fn probe<'a>(
        &'a self,
        page: &'a Page,
        action: ConsentAction,
        patterns: &'a ConsentPatterns,
    ) -> Pin<Box<dyn Future<Output = Result<StrategyOutcome, ConsentError>> + Send + 'a>> {
        Box::pin(self.probe_impl(page, action, patterns))
    }
}

/// Strategy 8: the last resort before giving up on the main document. Scans
/// every clickable element on the page (bounded to keep this cheap) and
/// requires an ancestor that looks like consent UI before clicking, so a
/// stray "Accept" button in an unrelated newsletter signup form doesn't
/// get clicked instead.
const FULL_PAGE_SCAN_MAX_CANDIDATES: usize = 50;

pub(super) struct FullPagePhraseScanStrategy;

impl FullPagePhraseScanStrategy {
    async fn probe_impl(
        &self,
        page: &Page,
        action: ConsentAction,
        patterns: &ConsentPatterns,
    ) -> Result<StrategyOutcome, ConsentError> {
        let script = phrase_scan_script(action.phrases(patterns), None, true, FULL_PAGE_SCAN_MAX_CANDIDATES);
        let result: ScanResult = page.evaluate(&script).await.map_err(page_err)?;
        if result.clicked {
            return Ok(StrategyOutcome::Success {
                cmp_platform: "full-page-scan".to_string(),
                button_text: result.text.unwrap_or_default(),
            });
        }
        Ok(StrategyOutcome::NotApplicable)
    }
}

impl ConsentStrategy for FullPagePhraseScanStrategy {
    fn name(&self) -> &'static str {
        "full_page_phrase_scan"
    }

    fn probe<'a>(
        &'a self,
        page: &'a Page,
        action: ConsentAction,
        patterns: &'a ConsentPatterns,
    ) -> Pin<Box<dyn Future<Output = Result<StrategyOutcome, ConsentError>> + Send + 'a>> {
        Box::pin(self.probe_impl(page, action, patterns))
    }
}

/// Strategy 9: Didomi exposes a JS API that works even when its widget
/// hasn't rendered yet (e.g. consent already partially recorded).
pub(super) struct DidomiJsApiStrategy;

impl DidomiJsApiStrategy {
    async fn probe_impl(&self, page: &Page, action: ConsentAction) -> Result<StrategyOutcome, ConsentError> {
        let call = match action {
            ConsentAction::Accept => "setUserAgreeToAll",
            ConsentAction::Reject => "setUserDisagreeToAll",
        };
        let script = format!(
            r#"(() => {{
    if (typeof window.Didomi === 'undefined' || typeof window.Didomi.{call} !== 'function') {{
        return false;
    }}
    window.Didomi.{call}();
    return true;
}})()"#,
            call = call
        );
        let applied: bool = page.evaluate(&script).await.map_err(page_err)?;
        if applied {
            return Ok(StrategyOutcome::Success {
                cmp_platform: "Didomi".to_string(),
                button_text: format!("Didomi.{call}()"),
            });
        }
        Ok(StrategyOutcome::NotApplicable)
    }
}

impl ConsentStrategy for DidomiJsApiStrategy {
    fn name(&self) -> &'static str {
        "didomi_js_api"
    }

    fn probe<'a>(
        &'a self,
        page: &'a Page,
        action: ConsentAction,
        _patterns: &'a ConsentPatterns,
    ) -> Pin<Box<dyn Future<Output = Result<StrategyOutcome, ConsentError>> + Send + 'a>> {
        Box::pin(self.probe_impl(page, action))
    }
}

/// Strategy 10: some sites host their CMP inside a nested iframe with no
/// predictable name, identifiable only by keywords in its URL or title.
/// Scan every non-main frame for those keywords and try a phrase match
/// inside it via a frame locator.
pub(super) struct NestedIframeCmpScanStrategy;

const IFRAME_KEYWORD_SET: &[&str] =
    &["consent", "cookie", "gdpr", "privacy", "cmp", "sp_message", "sourcepoint", "quantcast"];

impl NestedIframeCmpScanStrategy {
    async fn probe_impl(
        &self,
        page: &Page,
        action: ConsentAction,
        patterns: &ConsentPatterns,
    ) -> Result<StrategyOutcome, ConsentError> {
        let Ok(main_frame) = page.main_frame().await else { return Ok(StrategyOutcome::NotApplicable) };
        let Ok(frames) = page.frames().await else { return Ok(StrategyOutcome::NotApplicable) };

        for frame in frames {
            if frame.is_detached() || frame.id() == main_frame.id() {
                continue;
            }
            let url = frame.url().to_lowercase();
            let name = frame.name().to_lowercase();
            let matches = IFRAME_KEYWORD_SET.iter().any(|k| url.contains(k) || name.contains(k));
            if !matches {
                continue;
            }

            let selector = format!("iframe[src=\"{}\"]", frame.url());
            let _ = frame
                .wait_for_load_state_with_timeout(DocumentLoadState::DomContentLoaded, Duration::from_millis(2_000))
                .await;

            let frame_locator = page.frame_locator(&selector);
            for phrase in action.phrases(patterns) {
                let el = frame_locator.get_by_text(phrase.clone());
                if el.count().await.unwrap_or(0) == 0 {
                    continue;
                }
                if !el.is_visible().await.unwrap_or(false) {
                    continue;
                }
                let text = el.text_content().await.ok().flatten().unwrap_or_else(|| phrase.clone());
                el.click().await.map_err(page_err)?;
                return Ok(StrategyOutcome::Success { cmp_platform: "nested-iframe".to_string(), button_text: text });
            }
        }
        Ok(StrategyOutcome::NotApplicable)
    }
}

impl ConsentStrategy for NestedIframeCmpScanStrategy {
    fn name(&self) -> &'static str {
        "nested_iframe_cmp_scan"
    }

    fn probe<'a>(
        &'a self,
        page: &'a Page,
        action: ConsentAction,
        patterns: &'a ConsentPatterns,
    ) -> Pin<Box<dyn Future<Output = Result<StrategyOutcome, ConsentError>> + Send + 'a>> {
        Box::pin(self.probe_impl(page, action, patterns))
    }
}
