//! Error types for the core browser automation API.

use std::time::Duration;

use thiserror::Error;

use viewpoint_cdp::CdpError;

/// Errors that can occur while launching or connecting to a browser.
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Launching the browser process failed.
    #[error("failed to launch browser: {0}")]
    LaunchFailed(String),

    /// The browser did not finish launching within the configured timeout.
    #[error("browser launch timed out after {0:?}")]
    LaunchTimeout(Duration),

    /// No Chromium/Chrome executable could be located.
    #[error("Chromium not found")]
    ChromiumNotFound,

    /// Connecting to the browser timed out.
    #[error("connection to browser timed out after {0:?}")]
    ConnectionTimeout(Duration),

    /// The given CDP endpoint URL was invalid.
    #[error("invalid CDP endpoint URL: {0}")]
    InvalidEndpointUrl(String),

    /// Discovering the browser's WebSocket endpoint failed.
    #[error("failed to discover browser endpoint: {0}")]
    EndpointDiscoveryFailed(String),

    /// Connecting to the browser's WebSocket endpoint failed.
    #[error("failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// An underlying CDP transport error occurred.
    #[error(transparent)]
    Cdp(#[from] CdpError),
}

/// Errors that can occur on a [`crate::BrowserContext`].
#[derive(Error, Debug)]
pub enum ContextError {
    /// The context has already been closed.
    #[error("browser context is closed")]
    Closed,

    /// An operation on the context timed out.
    #[error("context operation '{operation}' timed out after {duration:?}")]
    Timeout {
        /// Name of the operation that timed out.
        operation: String,
        /// Configured timeout duration.
        duration: Duration,
    },

    /// An internal error occurred.
    #[error("internal context error: {0}")]
    Internal(String),

    /// An underlying CDP transport error occurred.
    #[error(transparent)]
    Cdp(#[from] CdpError),
}

/// Errors that can occur on a [`crate::Page`].
#[derive(Error, Debug)]
pub enum PageError {
    /// The page has already been closed.
    #[error("page is closed")]
    Closed,

    /// A script evaluation on the page failed.
    #[error("evaluation failed: {0}")]
    EvaluationFailed(String),

    /// An underlying CDP transport error occurred.
    #[error(transparent)]
    Cdp(#[from] CdpError),
}

/// Errors related to network monitoring, routing, and HAR handling.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// The request or response was aborted.
    #[error("request aborted")]
    Aborted,

    /// The route has already been handled (fulfilled, continued, or aborted).
    #[error("route has already been handled")]
    AlreadyHandled,

    /// A HAR recording or replay operation failed.
    #[error("HAR error: {0}")]
    HarError(String),

    /// The response body or headers were invalid or unavailable.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A filesystem I/O operation failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Waiting for a request/response timed out.
    #[error("network wait timed out after {0:?}")]
    Timeout(Duration),

    /// An underlying CDP transport error occurred.
    #[error(transparent)]
    Cdp(#[from] CdpError),
}

/// Errors that can occur during page navigation.
#[derive(Error, Debug)]
pub enum NavigationError {
    /// The navigation was cancelled, e.g. by a subsequent navigation.
    #[error("navigation was cancelled")]
    Cancelled,

    /// The navigation failed due to a network-level error.
    #[error("navigation failed: {0}")]
    NetworkError(String),

    /// An underlying CDP transport error occurred.
    #[error(transparent)]
    Cdp(#[from] CdpError),
}

/// Errors that can occur while locating or interacting with elements.
#[derive(Error, Debug)]
pub enum LocatorError {
    /// No element matched the locator within the timeout.
    #[error("no element found: {0}")]
    NotFound(String),

    /// The element was found but is not visible/actionable.
    #[error("element is not visible")]
    NotVisible,

    /// The page the locator belongs to was closed.
    #[error("page is closed")]
    PageClosed,

    /// Touch input was used but the context has no touch support enabled.
    #[error("touch input is not enabled for this context")]
    TouchNotEnabled,

    /// A JavaScript evaluation used internally by the locator failed.
    #[error("evaluation error: {0}")]
    EvaluationError(String),

    /// Waiting for a condition (e.g. navigation) failed.
    #[error("wait error: {0}")]
    WaitError(#[from] WaitError),

    /// An underlying CDP transport error occurred.
    #[error(transparent)]
    Cdp(#[from] CdpError),
}

/// Errors that can occur while waiting on a condition or load state.
#[derive(Error, Debug)]
pub enum WaitError {
    /// The wait exceeded its configured timeout.
    #[error("wait timed out after {0:?}")]
    Timeout(Duration),

    /// The page was closed while waiting.
    #[error("page was closed while waiting")]
    PageClosed,

    /// An underlying CDP transport error occurred.
    #[error(transparent)]
    Cdp(#[from] CdpError),
}

/// Top-level error aggregating every subsystem error in this crate.
///
/// Useful as the error type in examples and small scripts that don't need
/// to distinguish between subsystems.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A browser launch/connection error.
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// A browser context error.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// A page error.
    #[error(transparent)]
    Page(#[from] PageError),

    /// A network error.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// A navigation error.
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// A locator error.
    #[error(transparent)]
    Locator(#[from] LocatorError),

    /// A wait error.
    #[error(transparent)]
    Wait(#[from] WaitError),

    /// An underlying CDP transport error.
    #[error(transparent)]
    Cdp(#[from] CdpError),
}
