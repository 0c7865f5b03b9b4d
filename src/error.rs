//! Error types for shopcheck
//!
//! This module provides a comprehensive error type hierarchy using `thiserror`
//! for proper error handling across all components.

use thiserror::Error;

/// The main error type for shopcheck operations
#[derive(Error, Debug)]
pub enum Error {
    /// Browser session lifecycle errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Element interaction errors
    #[error("Interaction error: {0}")]
    Interact(#[from] InteractError),

    /// Product API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Screenshot capture errors
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Expectation mismatch between observed and expected state
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// Missing or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Scenario was cancelled while running
    #[error("Scenario interrupted: {0}")]
    Interrupted(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ChromiumOxide errors
    #[error("CDP error: {0}")]
    Cdp(String),
}

/// Session construction and teardown errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// Browser process failed to start; wraps the underlying cause
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// The session profile could not be turned into a launch configuration
    #[error("Invalid session profile: {0}")]
    ConfigRejected(String),

    /// Failed to open the initial page
    #[error("Failed to open page: {0}")]
    PageFailed(String),

    /// Session close did not complete cleanly
    #[error("Session close failed: {0}")]
    CloseFailed(String),

    /// Step code asked for a session outside scenario bounds
    #[error("No active session in the scenario context")]
    NotAcquired,
}

/// Interaction layer errors
#[derive(Error, Debug)]
pub enum InteractError {
    /// The element never satisfied the wait predicate within the budget
    #[error("Element '{selector}' not found after {waited_ms}ms")]
    LookupTimeout {
        /// The selector that was polled
        selector: String,
        /// The full wait budget that was exhausted
        waited_ms: u64,
    },

    /// The element was found but never became interactable
    #[error("Element '{selector}' not interactable after {waited_ms}ms")]
    NotInteractable {
        /// The selector that was polled
        selector: String,
        /// The full wait budget that was exhausted
        waited_ms: u64,
    },

    /// Page navigation did not complete within the page-load timeout
    #[error("Navigation to '{url}' timed out after {timeout_ms}ms")]
    NavigationTimeout {
        /// The navigation target
        url: String,
        /// The page-load budget that was exhausted
        timeout_ms: u64,
    },

    /// Navigation failed outright
    #[error("Navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The navigation target
        url: String,
        /// The underlying failure
        reason: String,
    },
}

/// Product API contract violations
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request itself failed (connect, DNS, timeout)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-200 status
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus {
        /// HTTP status code received
        status: u16,
        /// The requested URL
        url: String,
    },

    /// The response took longer than the configured bound
    #[error("Response took {elapsed_ms}ms, limit is {limit_ms}ms")]
    SlowResponse {
        /// Observed response time
        elapsed_ms: u64,
        /// Configured response-time bound
        limit_ms: u64,
    },

    /// A response field did not match the request
    #[error("Field mismatch: expected {expected}, got {actual}")]
    FieldMismatch {
        /// What the request implied
        expected: String,
        /// What the response carried
        actual: String,
    },

    /// The response body violated the product schema
    #[error("Invalid product body: {0}")]
    InvalidBody(String),
}

/// Screenshot capture errors
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Screenshot failed
    #[error("Screenshot capture failed: {0}")]
    ScreenshotFailed(String),
}

/// Result type alias for shopcheck operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an assertion error with a human-readable message
    pub fn assertion<S: Into<String>>(msg: S) -> Self {
        Error::Assertion(msg.into())
    }

    /// Create an assertion error comparing two displayed values
    pub fn mismatch(
        what: &str,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Error::Assertion(format!("{what}: expected `{expected}`, got `{actual}`"))
    }

    /// Create a configuration error from a string
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a CDP error from a string
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }
}

/// Convert chromiumoxide errors
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Session(SessionError::LaunchFailed("no chrome".to_string()));
        assert!(err.to_string().contains("Failed to launch browser"));
        assert!(err.to_string().contains("no chrome"));
    }

    #[test]
    fn test_lookup_timeout_carries_selector_and_budget() {
        let err = InteractError::LookupTimeout {
            selector: "#login-button".to_string(),
            waited_ms: 10_000,
        };
        let msg = err.to_string();
        assert!(msg.contains("#login-button"));
        assert!(msg.contains("10000ms"));
    }

    #[test]
    fn test_api_error() {
        let err = ApiError::UnexpectedStatus {
            status: 404,
            url: "https://example.com/products/4".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("/products/4"));
    }

    #[test]
    fn test_mismatch_builds_diff_message() {
        let err = Error::mismatch("listing title", "Products", "Swag Labs");
        assert_eq!(
            err.to_string(),
            "Assertion failed: listing title: expected `Products`, got `Swag Labs`"
        );
    }

    #[test]
    fn test_capture_error_wraps() {
        let err: Error = CaptureError::ScreenshotFailed("target closed".to_string()).into();
        assert!(err.to_string().contains("Screenshot capture failed"));
    }
}
