//! Error types for the CDP transport layer.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while talking to a browser over CDP.
#[derive(Error, Debug)]
pub enum CdpError {
    /// The WebSocket connection could not be established.
    #[error("WebSocket connection failed: {0}")]
    ConnectionFailed(String),

    /// The WebSocket connection was dropped.
    #[error("WebSocket connection lost")]
    ConnectionLost,

    /// Connecting to the endpoint timed out.
    #[error("connection attempt timed out after {0:?}")]
    ConnectionTimeout(Duration),

    /// Sending a message over the connection failed.
    #[error("failed to send CDP message: {0}")]
    SendFailed(String),

    /// The browser returned a CDP protocol-level error.
    #[error("CDP protocol error {code}: {message}")]
    Protocol {
        /// CDP error code.
        code: i64,
        /// CDP error message.
        message: String,
    },

    /// A command did not receive a response in time.
    #[error("response timeout after {0:?}")]
    Timeout(Duration),

    /// A response was received for a message ID we did not send.
    #[error("invalid message ID: expected {expected}, got {got}")]
    InvalidMessageId {
        /// Expected message ID.
        expected: u64,
        /// Message ID actually received.
        got: u64,
    },

    /// The given WebSocket URL could not be parsed.
    #[error("invalid WebSocket URL: {0}")]
    InvalidUrl(String),

    /// The given HTTP endpoint URL could not be parsed or used.
    #[error("invalid CDP endpoint URL: {0}")]
    InvalidEndpointUrl(String),

    /// Discovering the WebSocket URL from an HTTP endpoint failed.
    #[error("failed to discover WebSocket URL from {url}: {reason}")]
    EndpointDiscoveryFailed {
        /// HTTP endpoint URL that was queried.
        url: String,
        /// Reason discovery failed.
        reason: String,
    },

    /// An HTTP request made during endpoint discovery failed.
    #[error("HTTP request failed: {0}")]
    HttpRequestFailed(String),

    /// A CDP session ID did not correspond to a known target.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Spawning the browser process failed.
    #[error("failed to spawn browser process: {0}")]
    SpawnFailed(String),

    /// The browser process did not expose a debugging WebSocket URL.
    #[error("failed to get debugging URL from browser")]
    NoDebuggingUrl,

    /// No Chromium/Chrome executable could be located.
    #[error(
        "Chromium not found. Set CHROMIUM_PATH environment variable or ensure Chromium is installed."
    )]
    ChromiumNotFound,

    /// A JSON serialization or deserialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::ConnectionFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests;
