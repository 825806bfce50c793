//! Error types for the page object layer.
//!
//! Every failure reported by a [`Driver`](crate::driver::Driver) propagates
//! unchanged through pages to the caller. The layer performs no local recovery
//! and no retries; the only exception is diagnostic screenshot capture, whose
//! failure is logged instead of returned.
//!
//! # Usage
//!
//! ```ignore
//! use page_objects::{Error, Result};
//!
//! async fn example(page: &LoginPage) -> Result<()> {
//!     match page.get_error_message().await {
//!         Ok(text) => assert_eq!(text, "Your username is invalid!"),
//!         Err(e) if e.is_timeout() => panic!("no error was shown"),
//!         Err(e) => return Err(e),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidArgument`] |
//! | Navigation | [`Error::Navigation`], [`Error::StalePage`] |
//! | Element | [`Error::ElementNotFound`], [`Error::ElementNotInteractable`] |
//! | Execution | [`Error::Timeout`], [`Error::Protocol`], [`Error::Screenshot`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::Url`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;
use std::time::Duration;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when page options or the handle builder are invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Invalid argument.
    ///
    /// Returned for malformed selectors and empty selector lists.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Navigation Errors
    // ========================================================================
    /// Navigation target unreachable.
    ///
    /// Returned when the driver reports a network or DNS failure.
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that was requested.
        url: String,
        /// Driver-reported reason.
        message: String,
    },

    /// Page object no longer describes the live document.
    ///
    /// Returned when the handle navigated away since the page was anchored.
    #[error("Stale page {page}: anchored at {anchored_url}, handle is at {current_url}")]
    StalePage {
        /// Name of the page object.
        page: String,
        /// Location the page was anchored to.
        anchored_url: String,
        /// Location the handle currently reports.
        current_url: String,
    },

    // ========================================================================
    // Element Errors
    // ========================================================================
    /// No element matched any strategy of the locator.
    #[error("Element not found: {locator}")]
    ElementNotFound {
        /// Locator description.
        locator: String,
    },

    /// Element is present but cannot be acted on.
    ///
    /// Hidden, disabled or obscured elements produce this error.
    #[error("Element not interactable: {locator} ({reason})")]
    ElementNotInteractable {
        /// Locator description.
        locator: String,
        /// Why the action was refused.
        reason: String,
    },

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// Operation timeout.
    ///
    /// The driver handle stays valid after a timeout.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// Driver protocol failure not covered by another variant.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the failure.
        message: String,
    },

    /// Screenshot capture or decoding failed.
    #[error("Screenshot error: {message}")]
    Screenshot {
        /// Description of the failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a navigation error.
    #[inline]
    pub fn navigation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a stale page error.
    #[inline]
    pub fn stale_page(
        page: impl Into<String>,
        anchored_url: impl Into<String>,
        current_url: impl Into<String>,
    ) -> Self {
        Self::StalePage {
            page: page.into(),
            anchored_url: anchored_url.into(),
            current_url: current_url.into(),
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(locator: impl Into<String>) -> Self {
        Self::ElementNotFound {
            locator: locator.into(),
        }
    }

    /// Creates an element not interactable error.
    #[inline]
    pub fn not_interactable(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ElementNotInteractable {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a screenshot error.
    #[inline]
    pub fn screenshot(message: impl Into<String>) -> Self {
        Self::Screenshot {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this is an element error.
    #[inline]
    #[must_use]
    pub fn is_element_error(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::ElementNotInteractable { .. }
        )
    }

    /// Returns `true` if the page object was stale.
    #[inline]
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StalePage { .. })
    }

    /// Returns `true` if the handle is still usable after this error.
    ///
    /// Timeouts and staleness never invalidate the driver handle.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::StalePage { .. }
                | Self::ElementNotFound { .. }
                | Self::ElementNotInteractable { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
