//! Shared driver handle.
//!
//! A [`DriverHandle`] pairs one [`Driver`] with the [`PageOptions`] pages
//! built on it use. The handle is owned by the test; pages hold clones,
//! which share the same underlying driver and therefore observe the same
//! navigation state.
//!
//! # Example
//!
//! ```ignore
//! use page_objects::{DriverHandle, LoginPage, PageOptions};
//!
//! let handle = DriverHandle::new(my_driver, PageOptions::from_env()?);
//! let login = LoginPage::new(&handle);
//! login.open().await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::identifiers::HandleId;

use super::builder::HandleBuilder;
use super::capability::{Driver, Location};
use super::options::PageOptions;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a handle.
pub(crate) struct HandleInner {
    /// Handle ID for log correlation.
    pub id: HandleId,

    /// The driver all operations go through.
    pub driver: Arc<dyn Driver>,

    /// Options used by every page on this handle.
    pub options: PageOptions,
}

// ============================================================================
// DriverHandle
// ============================================================================

/// A cloneable, shared reference to one live driver.
#[derive(Clone)]
pub struct DriverHandle {
    pub(crate) inner: Arc<HandleInner>,
}

impl fmt::Debug for DriverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverHandle")
            .field("id", &self.inner.id)
            .field("base_url", &self.inner.options.base_url)
            .finish_non_exhaustive()
    }
}

impl DriverHandle {
    /// Creates a handle around `driver`.
    ///
    /// Options are used as given; call [`PageOptions::validate`] or go
    /// through [`DriverHandle::builder`] to have them checked.
    pub fn new(driver: impl Driver + 'static, options: PageOptions) -> Self {
        Self::from_arc(Arc::new(driver), options)
    }

    /// Creates a handle around an already shared driver.
    pub fn from_arc(driver: Arc<dyn Driver>, options: PageOptions) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                id: HandleId::new(),
                driver,
                options,
            }),
        }
    }

    /// Creates a handle builder.
    #[inline]
    #[must_use]
    pub fn builder() -> HandleBuilder {
        HandleBuilder::new()
    }
}

// ============================================================================
// DriverHandle - Accessors
// ============================================================================

impl DriverHandle {
    /// Returns the handle ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> HandleId {
        self.inner.id
    }

    /// Returns the underlying driver.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> &dyn Driver {
        self.inner.driver.as_ref()
    }

    /// Returns the options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &PageOptions {
        &self.inner.options
    }

    /// Returns the driver's current location.
    #[inline]
    #[must_use]
    pub fn location(&self) -> Location {
        self.inner.driver.location()
    }

    /// Joins a route path onto the configured base URL.
    ///
    /// # Errors
    ///
    /// [`Error::Url`](crate::Error::Url) if the result is not a valid URL.
    pub fn url_for(&self, path: &str) -> Result<String> {
        self.inner.options.url_for(path)
    }

    /// Returns `true` if both handles share the same driver.
    #[inline]
    #[must_use]
    pub fn same_driver(&self, other: &DriverHandle) -> bool {
        Arc::ptr_eq(&self.inner.driver, &other.inner.driver)
    }
}

// ============================================================================
// Tests
// ============================================================================
