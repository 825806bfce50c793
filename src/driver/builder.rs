//! Builder pattern for handle configuration.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use page_objects::DriverHandle;
//!
//! let handle = DriverHandle::builder()
//!     .driver(my_driver)
//!     .base_url("http://localhost:3000")
//!     .action_timeout(Duration::from_secs(5))
//!     .build()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};

use super::capability::Driver;
use super::core::DriverHandle;
use super::options::PageOptions;

// ============================================================================
// HandleBuilder
// ============================================================================

/// Builder for configuring a [`DriverHandle`].
///
/// Use [`DriverHandle::builder()`] to create a new builder.
#[derive(Default)]
pub struct HandleBuilder {
    /// Driver to wrap.
    driver: Option<Arc<dyn Driver>>,
    /// Options being assembled.
    options: PageOptions,
}

// ============================================================================
// HandleBuilder Implementation
// ============================================================================

impl HandleBuilder {
    /// Creates a builder with default options and no driver.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the driver.
    #[inline]
    #[must_use]
    pub fn driver(mut self, driver: impl Driver + 'static) -> Self {
        self.driver = Some(Arc::new(driver));
        self
    }

    /// Sets an already shared driver.
    #[inline]
    #[must_use]
    pub fn shared_driver(mut self, driver: Arc<dyn Driver>) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Replaces all options.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: PageOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the base URL.
    #[inline]
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.options = self.options.with_base_url(base_url);
        self
    }

    /// Sets the navigation timeout.
    #[inline]
    #[must_use]
    pub fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_navigation_timeout(timeout);
        self
    }

    /// Sets the action timeout.
    #[inline]
    #[must_use]
    pub fn action_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_action_timeout(timeout);
        self
    }

    /// Sets the wait timeout.
    #[inline]
    #[must_use]
    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_wait_timeout(timeout);
        self
    }

    /// Sets the polling interval.
    #[inline]
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.options = self.options.with_poll_interval(interval);
        self
    }

    /// Sets the screenshot directory.
    #[inline]
    #[must_use]
    pub fn screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options = self.options.with_screenshot_dir(dir);
        self
    }

    /// Enables or disables stale page detection.
    #[inline]
    #[must_use]
    pub fn stale_check(mut self, enabled: bool) -> Self {
        self.options = self.options.with_stale_check(enabled);
        self
    }

    /// Builds the handle with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if no driver was set
    /// - [`Error::Config`] if the options fail [`PageOptions::validate`]
    pub fn build(self) -> Result<DriverHandle> {
        let driver = self
            .driver
            .ok_or_else(|| Error::config("driver is required"))?;
        self.options.validate()?;

        let handle = DriverHandle::from_arc(driver, self.options);
        debug!(
            handle = %handle.id(),
            base_url = %handle.options().base_url,
            "Driver handle created"
        );
        Ok(handle)
    }
}

// ============================================================================
// Tests
// ============================================================================
