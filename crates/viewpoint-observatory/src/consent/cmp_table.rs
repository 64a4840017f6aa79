//! Known consent-management-platform DOM fingerprints, used by the
//! known-CMP-by-selector strategy and its iframe replay.
//!
//! Each entry names a CMP by its vendor-specific root element and the
//! selectors it uses for its accept/reject buttons. Selectors are drawn from
//! the vendor's published widget markup, which tends to stay stable across
//! versions because third-party auditing tools depend on it too.

/// One CMP's DOM fingerprint: a root element that signals its presence, and
/// the button selectors for each consent action.
#[derive(Debug, Clone, Copy)]
pub struct CmpDefinition {
    /// Human-readable platform name, stored on [`crate::models::ConsentInfo::cmp_platform`].
    pub name: &'static str,
    /// Selector whose presence in the DOM signals this CMP is active.
    pub root_selector: &'static str,
    /// Selector for this CMP hosting its UI in an iframe rather than the main document.
    pub iframe_selector: Option<&'static str>,
    /// Candidate selectors for the "accept all" action, tried in order.
    pub accept_selectors: &'static [&'static str],
    /// Candidate selectors for the "reject all" / "necessary only" action.
    pub reject_selectors: &'static [&'static str],
}

/// The known-CMP table, ordered roughly by market share among Czech sites
/// (per the site list this observatory was built against).
pub const KNOWN_CMPS: &[CmpDefinition] = &[
    CmpDefinition {
        name: "OneTrust",
        root_selector: "#onetrust-banner-sdk",
        iframe_selector: None,
        accept_selectors: &["#onetrust-accept-btn-handler"],
        reject_selectors: &["#onetrust-reject-all-handler", ".ot-pc-refuse-all-handler"],
    },
    CmpDefinition {
        name: "Cookiebot",
        root_selector: "#CybotCookiebotDialog",
        iframe_selector: None,
        accept_selectors: &["#CybotCookiebotDialogBodyLevelButtonLevelOptinAllowAll", "#CybotCookiebotDialogBodyButtonAccept"],
        reject_selectors: &["#CybotCookiebotDialogBodyButtonDecline", "#CybotCookiebotDialogBodyLevelButtonLevelOptinDeclineAll"],
    },
    CmpDefinition {
        name: "CookieYes",
        root_selector: ".cky-consent-container",
        iframe_selector: None,
        accept_selectors: &[".cky-btn-accept"],
        reject_selectors: &[".cky-btn-reject"],
    },
    CmpDefinition {
        name: "Didomi",
        root_selector: "#didomi-host",
        iframe_selector: None,
        accept_selectors: &["#didomi-notice-agree-button", "button.didomi-components-button__agree"],
        reject_selectors: &["#didomi-notice-disagree-button", "button.didomi-components-button__disagree"],
    },
    CmpDefinition {
        name: "Quantcast",
        root_selector: ".qc-cmp2-container",
        iframe_selector: Some("iframe[id^='sp_message_iframe_']"),
        accept_selectors: &["button[mode='primary']", ".qc-cmp2-summary-buttons button:last-child"],
        reject_selectors: &["button[mode='secondary']", ".qc-cmp2-summary-buttons button:first-child"],
    },
    CmpDefinition {
        name: "Termly",
        root_selector: "#termly-code-snippet-support",
        iframe_selector: None,
        accept_selectors: &[".t-acceptAllButton"],
        reject_selectors: &[".t-declineButton"],
    },
    CmpDefinition {
        name: "Osano",
        root_selector: ".osano-cm-window",
        iframe_selector: None,
        accept_selectors: &[".osano-cm-accept-all", ".osano-cm-accept"],
        reject_selectors: &[".osano-cm-denyAll", ".osano-cm-deny"],
    },
    CmpDefinition {
        name: "TrustArc",
        root_selector: "#truste-consent-track",
        iframe_selector: Some("#trustarc-banner-container iframe"),
        accept_selectors: &["#truste-consent-button", ".call"],
        reject_selectors: &["#truste-show-consent", ".trustarc-agree-btn"],
    },
    CmpDefinition {
        name: "Iubenda",
        root_selector: "#iubenda-cs-banner",
        iframe_selector: None,
        accept_selectors: &[".iubenda-cs-accept-btn"],
        reject_selectors: &[".iubenda-cs-reject-btn"],
    },
    CmpDefinition {
        name: "Klaro",
        root_selector: ".klaro",
        iframe_selector: None,
        accept_selectors: &[".cm-btn-success", ".cm-btn-accept-all"],
        reject_selectors: &[".cm-btn-decline"],
    },
    CmpDefinition {
        name: "Complianz",
        root_selector: "#cmplz-cookiebanner-container",
        iframe_selector: None,
        accept_selectors: &[".cmplz-accept", "[data-cmplz-button-action='accept']"],
        reject_selectors: &[".cmplz-deny", "[data-cmplz-button-action='deny']"],
    },
    CmpDefinition {
        name: "Civic",
        root_selector: "#cc-window",
        iframe_selector: None,
        accept_selectors: &[".cc-allow", ".cc-dismiss"],
        reject_selectors: &[".cc-deny"],
    },
    CmpDefinition {
        name: "Sourcepoint",
        root_selector: ".message-container",
        iframe_selector: Some("iframe[title*='SP Consent Message']"),
        accept_selectors: &["button[aria-label='Accept all']", "button[title='Accept All']"],
        reject_selectors: &["button[aria-label='Reject all']", "button[title='Reject All']"],
    },
    CmpDefinition {
        name: "SeznamCwl",
        root_selector: "szn-cwl, #szn-cmp-dialog-container",
        iframe_selector: Some("iframe.szn-cwl-frame, iframe[src*='cwl.seznam.cz']"),
        accept_selectors: &["button[data-testid='cw-button-agree-with-ads']", ".szn-cwl-agree"],
        reject_selectors: &["button[data-testid='cw-button-disagree']", ".szn-cwl-disagree"],
    },
    CmpDefinition {
        name: "Alza",
        root_selector: "#cookiesBar, .js-cookies-info",
        iframe_selector: None,
        accept_selectors: &[".js-cookies-info-accept", "#cookiesBarAccept"],
        reject_selectors: &[".js-cookies-info-reject", "#cookiesBarReject"],
    },
    CmpDefinition {
        name: "IdnesContentWall",
        root_selector: "#didomi-host, .imgwrapper-cmp",
        iframe_selector: None,
        accept_selectors: &["#didomi-notice-agree-button"],
        reject_selectors: &["#didomi-notice-disagree-button"],
    },
    CmpDefinition {
        name: "AllegroGroup",
        root_selector: "[data-role='cookie-bar'], #cookie-bar",
        iframe_selector: None,
        accept_selectors: &["[data-role='accept-consent']", "button[data-testid='cookie-bar-accept']"],
        reject_selectors: &["[data-role='reject-consent']", "button[data-testid='cookie-bar-reject']"],
    },
    CmpDefinition {
        name: "Cpex",
        root_selector: "#cpex-cmp, .cpex-consent",
        iframe_selector: None,
        accept_selectors: &[".cpex-consent-accept"],
        reject_selectors: &[".cpex-consent-reject"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cmp_has_at_least_one_accept_selector() {
        for cmp in KNOWN_CMPS {
            assert!(!cmp.accept_selectors.is_empty(), "{} has no accept selector", cmp.name);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = KNOWN_CMPS.iter().map(|c| c.name).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }
}
