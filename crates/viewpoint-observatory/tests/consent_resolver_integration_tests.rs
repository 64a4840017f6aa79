#![cfg(feature = "integration")]

//! Live-browser tests for the consent resolver cascade. Requires a
//! Chromium-family browser reachable by `viewpoint-core`.

use std::time::Duration;

use viewpoint_core::Browser;
use viewpoint_observatory::config::CrawlerConfig;
use viewpoint_observatory::consent::{ConsentAction, ConsentResolver};

async fn launch_with_page() -> (Browser, viewpoint_core::BrowserContext, viewpoint_core::Page) {
    let browser = Browser::launch()
        .headless(true)
        .timeout(Duration::from_secs(30))
        .launch()
        .await
        .expect("failed to launch browser");
    let context = browser.new_context().await.expect("failed to create context");
    let page = context.new_page().await.expect("failed to create page");
    (browser, context, page)
}

/// A page with both a OneTrust-shaped banner and a generic `.cookie-banner`
/// should resolve through the known-CMP strategy and click the OneTrust
/// accept button, not the generic one.
#[tokio::test]
async fn known_cmp_wins_over_generic_banner() {
    let (browser, _context, page) = launch_with_page().await;

    page.set_content(
        r#"<html><body>
            <div id="onetrust-banner-sdk">
                <button id="onetrust-accept-btn-handler">Accept all cookies</button>
            </div>
            <div class="cookie-banner">
                <button>Souhlasím</button>
            </div>
        </body></html>"#,
    )
    .set()
    .await
    .expect("failed to set content");

    let patterns = CrawlerConfig::default().consent_patterns;
    let resolver = ConsentResolver::new(patterns, Duration::from_secs(5));
    let info = resolver.resolve(&page, ConsentAction::Accept).await;

    assert!(info.banner_detected);
    assert_eq!(info.cmp_platform.as_deref(), Some("OneTrust"));
    assert!(info.action_taken);
    assert_eq!(info.button_text.as_deref(), Some("Accept all cookies"));

    browser.close().await.ok();
}

/// A page with only a generic consent-phrase banner (no known CMP) should
/// still resolve through the text-matching fallback strategies.
#[tokio::test]
async fn resolves_generic_text_banner() {
    let (browser, _context, page) = launch_with_page().await;

    page.set_content(
        r#"<html><body>
            <div class="cookie-consent-banner" role="dialog">
                <p>We use cookies.</p>
                <button>Accept all</button>
            </div>
        </body></html>"#,
    )
    .set()
    .await
    .expect("failed to set content");

    let patterns = CrawlerConfig::default().consent_patterns;
    let resolver = ConsentResolver::new(patterns, Duration::from_secs(5));
    let info = resolver.resolve(&page, ConsentAction::Accept).await;

    assert!(info.banner_detected);
    assert!(info.action_taken);

    browser.close().await.ok();
}

/// No banner at all should report `banner_detected = false` without
/// clicking anything.
#[tokio::test]
async fn no_banner_reports_not_detected() {
    let (browser, _context, page) = launch_with_page().await;

    page.set_content("<html><body><h1>Hello world</h1></body></html>")
        .set()
        .await
        .expect("failed to set content");

    let patterns = CrawlerConfig::default().consent_patterns;
    let resolver = ConsentResolver::new(patterns, Duration::from_secs(2));
    let info = resolver.resolve(&page, ConsentAction::Accept).await;

    assert!(!info.banner_detected);
    assert!(!info.action_taken);

    browser.close().await.ok();
}
