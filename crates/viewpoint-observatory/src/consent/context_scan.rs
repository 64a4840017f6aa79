//! The "is this element part of a consent banner" predicate, and the
//! in-page JS used by the generic phrase-scanning strategies.
//!
//! Real sites never mark up their consent UI consistently, so the generic
//! strategies fall back to scanning clickable elements by visible text and
//! checking whether an ancestor looks like a consent/cookie dialog before
//! clicking. This mirrors how a human skims a page for "the cookie thing"
//! rather than reading markup.

use serde::Deserialize;

/// Ancestor keywords (checked against `id`, `class`, and `role` attributes,
/// case-insensitively) that mark an element as living inside consent UI.
const CONTEXT_KEYWORDS: &[&str] = &[
    "cookie",
    "consent",
    "gdpr",
    "privacy",
    "souhlas",
    "soukrom",
    "cwl",
    "cmp",
    "didomi",
    "onetrust",
    "cookiebot",
];

/// Roles that count as consent UI regardless of keyword match.
const CONTEXT_ROLES: &[&str] = &["dialog", "alertdialog"];

/// Maximum ancestor levels walked while checking consent context.
const MAX_ANCESTOR_DEPTH: u32 = 10;

#[must_use]
pub(crate) fn consent_context_keywords() -> &'static [&'static str] {
    CONTEXT_KEYWORDS
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScanResult {
    pub clicked: bool,
    pub text: Option<String>,
}

/// Build the JS snippet shared by the generic banner scan and full-page
/// phrase scan strategies. The only difference between them is `root_selector`
/// (banner scan: scoped to a handful of likely container selectors; full-page
/// scan: the whole document) and `require_context` (full-page scan insists on
/// an ancestor match to avoid clicking unrelated buttons that merely contain
/// the word "accept").
pub(crate) fn phrase_scan_script(
    phrases: &[String],
    root_selector: Option<&str>,
    require_context: bool,
    max_candidates: usize,
) -> String {
    let phrases_json = serde_json::to_string(phrases).unwrap_or_else(|_| "[]".to_string());
    let keywords_json = serde_json::to_string(CONTEXT_KEYWORDS).unwrap_or_else(|_| "[]".to_string());
    let roles_json = serde_json::to_string(CONTEXT_ROLES).unwrap_or_else(|_| "[]".to_string());
    let root_json = serde_json::to_string(&root_selector).unwrap_or_else(|_| "null".to_string());

    format!(
        r#"(() => {{
    const phrases = {phrases_json};
    const keywords = {keywords_json};
    const contextRoles = {roles_json};
    const rootSelector = {root_json};
    const requireContext = {require_context};
    const maxCandidates = {max_candidates};
    const maxDepth = {max_depth};

    function looksLikeConsentContext(el) {{
        let node = el;
        for (let depth = 0; depth < maxDepth && node; depth++) {{
            const role = (node.getAttribute && node.getAttribute('role') || '').toLowerCase();
            if (contextRoles.includes(role)) return true;
            const haystack = ((node.id || '') + ' ' + (node.className || '')).toLowerCase();
            if (keywords.some(k => haystack.includes(k))) return true;
            node = node.parentElement;
        }}
        return false;
    }}

    function isVisible(el) {{
        const rect = el.getBoundingClientRect();
        if (rect.width <= 0 || rect.height <= 0) return false;
        const style = window.getComputedStyle(el);
        return style.visibility !== 'hidden' && style.display !== 'none' && style.opacity !== '0';
    }}

    let roots;
    if (rootSelector) {{
        roots = Array.from(document.querySelectorAll(rootSelector));
    }} else {{
        roots = [document];
    }}

    const candidates = [];
    for (const root of roots) {{
        const found = root.querySelectorAll("button, a[role='button'], input[type='submit'], input[type='button'], [role='button']");
        for (const el of found) {{
            candidates.push(el);
            if (candidates.length >= maxCandidates) break;
        }}
        if (candidates.length >= maxCandidates) break;
    }}

    for (const el of candidates) {{
        if (!isVisible(el)) continue;
        const text = (el.innerText || el.value || el.getAttribute('aria-label') || '').trim();
        if (!text) continue;
        const lower = text.toLowerCase();
        const matched = phrases.some(p => lower.includes(p.toLowerCase()));
        if (!matched) continue;
        if (requireContext && !looksLikeConsentContext(el)) continue;
        el.click();
        return {{ clicked: true, text }};
    }}

    return {{ clicked: false, text: null }};
}})()"#,
        phrases_json = phrases_json,
        keywords_json = keywords_json,
        roles_json = roles_json,
        root_json = root_json,
        require_context = require_context,
        max_candidates = max_candidates,
        max_depth = MAX_ANCESTOR_DEPTH,
    )
}
