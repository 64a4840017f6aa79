//! Error types for the test harness and assertion library.

use thiserror::Error;

/// A single failed assertion.
#[derive(Error, Debug, Clone)]
#[error("{description}: expected {expected}, got {actual}")]
pub struct AssertionError {
    /// What was being checked, e.g. `"Page should have URL"`.
    pub description: String,
    /// The expected value, formatted for display.
    pub expected: String,
    /// The actual value, formatted for display.
    pub actual: String,
}

impl AssertionError {
    /// Create a new assertion error.
    pub fn new(
        description: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Errors raised by the test harness or a failed assertion.
#[derive(Error, Debug)]
pub enum TestError {
    /// Setting up the test harness (browser, context, or page) failed.
    #[error("test setup failed: {0}")]
    Setup(String),

    /// An assertion failed.
    #[error(transparent)]
    Assertion(#[from] AssertionError),
}
