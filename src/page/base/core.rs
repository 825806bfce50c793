//! Core BasePage struct, anchoring and internal helpers.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::driver::{Action, Driver, DriverHandle, Location, PageOptions};
use crate::error::{Error, Result};
use crate::page::locator::Locator;
use crate::page::selector::By;
use crate::page::wait::{poll_until, with_deadline};

// ============================================================================
// BasePage
// ============================================================================

/// Shared primitives every page object composes.
///
/// A `BasePage` wraps a [`DriverHandle`] clone, the page's name and the
/// location the page is anchored to. Concrete pages hold one and expose
/// their own semantic operations on top of it.
///
/// Operations are selector-driven: each takes anything implementing
/// [`IntoLocator`](crate::page::IntoLocator), so named locators and ad-hoc
/// selector strings mix freely.
pub struct BasePage {
    handle: DriverHandle,
    name: Cow<'static, str>,
    anchor: Mutex<Location>,
}

impl fmt::Debug for BasePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasePage")
            .field("name", &self.name)
            .field("handle", &self.handle.id())
            .field("anchor", &*self.anchor.lock())
            .finish()
    }
}

impl BasePage {
    /// Creates a page anchored to the handle's current location.
    pub fn new(handle: &DriverHandle, name: impl Into<Cow<'static, str>>) -> Self {
        let anchor = handle.location();
        let name = name.into();
        debug!(handle = %handle.id(), page = %name, anchor = %anchor, "Page created");
        Self {
            handle: handle.clone(),
            name,
            anchor: Mutex::new(anchor),
        }
    }
}

// ============================================================================
// BasePage - Accessors
// ============================================================================

impl BasePage {
    /// Returns the driver handle.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> &DriverHandle {
        &self.handle
    }

    /// Returns the page name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the options of the underlying handle.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &PageOptions {
        self.handle.options()
    }

    /// Returns the location this page is anchored to.
    #[must_use]
    pub fn anchor(&self) -> Location {
        self.anchor.lock().clone()
    }

    /// Returns `true` if the handle is still on the anchored document.
    ///
    /// A navigation that lands back on the anchored URL, such as a form
    /// post re-rendering the same route, keeps the page current.
    #[must_use]
    pub fn is_current(&self) -> bool {
        let anchor = self.anchor.lock();
        let current = self.handle.location();
        anchor.generation == current.generation || anchor.url == current.url
    }

    /// Re-anchors the page to the handle's current location.
    ///
    /// Use after an in-page action the caller knows left this page's
    /// locators valid, such as a form post that re-renders the same page.
    pub fn rebind(&self) -> Location {
        let location = self.handle.location();
        debug!(
            handle = %self.handle.id(),
            page = %self.name,
            anchor = %location,
            "Page re-anchored"
        );
        *self.anchor.lock() = location.clone();
        location
    }
}

// ============================================================================
// BasePage - Internal
// ============================================================================

impl BasePage {
    #[inline]
    pub(crate) fn driver(&self) -> &dyn Driver {
        self.handle.driver()
    }

    /// Fails with [`Error::StalePage`] if the handle navigated to another URL.
    ///
    /// A reload of the anchored URL re-anchors the page instead.
    pub(crate) fn ensure_current(&self) -> Result<()> {
        if !self.options().stale_check {
            return Ok(());
        }
        let current = self.handle.location();
        let anchor = {
            let mut anchor = self.anchor.lock();
            if anchor.generation == current.generation {
                return Ok(());
            }
            if anchor.url == current.url {
                debug!(
                    handle = %self.handle.id(),
                    page = %self.name,
                    anchor = %current,
                    "Same URL reloaded, page re-anchored"
                );
                *anchor = current;
                return Ok(());
            }
            anchor.clone()
        };
        debug!(
            handle = %self.handle.id(),
            page = %self.name,
            anchor = %anchor,
            current = %current,
            "Stale page"
        );
        Err(Error::stale_page(
            self.name.as_ref(),
            anchor.url,
            current.url,
        ))
    }

    /// Resolves `locator`, waiting up to `deadline` for any strategy to match.
    pub(crate) async fn resolve<'l>(
        &self,
        locator: &'l Locator,
        deadline: Duration,
    ) -> Result<&'l By> {
        let driver = self.driver();
        let resolved = poll_until(
            || format!("resolve({locator})"),
            deadline,
            self.options().poll_interval,
            move || async move {
                self.ensure_current()?;
                locator.first_match(driver).await
            },
        )
        .await;

        match resolved {
            Ok(by) => Ok(by),
            Err(Error::Timeout { .. }) => Err(Error::element_not_found(locator.to_string())),
            Err(e) => Err(e),
        }
    }

    /// Resolves `locator` and performs `action` within the action timeout.
    pub(crate) async fn act(&self, locator: &Locator, action: Action) -> Result<()> {
        self.ensure_current()?;
        debug!(
            handle = %self.handle.id(),
            page = %self.name,
            locator = %locator,
            action = %action,
            "Performing action"
        );

        let budget = self.options().action_timeout;
        let started = Instant::now();
        let by = self.resolve(locator, budget).await?;
        let remaining = budget.saturating_sub(started.elapsed());

        with_deadline(
            || format!("{}({locator})", action.name()),
            remaining,
            self.driver().perform(by, &action),
        )
        .await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::{MockDocument, MockDriver, MockElement};

    #[test]
    fn test_page_is_send_sync_debug() {
        fn assert_traits<T: Send + Sync + fmt::Debug>() {}
        assert_traits::<BasePage>();
    }

    #[tokio::test]
    async fn test_new_page_is_current() {
        let handle = DriverHandle::new(MockDriver::new(), PageOptions::new());
        let page = BasePage::new(&handle, "Blank");
        assert!(page.is_current());
        assert!(page.ensure_current().is_ok());
    }

    #[tokio::test]
    async fn test_navigation_elsewhere_makes_page_stale() {
        let driver = MockDriver::new();
        driver.route("https://app.test/a", MockDocument::new());
        let handle = DriverHandle::new(driver, PageOptions::new());

        let page = BasePage::new(&handle, "Blank");
        handle.driver().goto("https://app.test/a").await.unwrap();

        assert!(!page.is_current());
        let err = page.ensure_current().unwrap_err();
        assert!(err.is_stale());

        page.rebind();
        assert!(page.is_current());
        assert_eq!(page.anchor().url, "https://app.test/a");
    }

    #[tokio::test]
    async fn test_same_url_reload_keeps_page_current() {
        let driver = MockDriver::new();
        driver.route("https://app.test/a", MockDocument::new());
        driver.route("https://app.test/b", MockDocument::new());
        let handle = DriverHandle::new(driver, PageOptions::new());

        handle.driver().goto("https://app.test/a").await.unwrap();
        let page = BasePage::new(&handle, "A");
        let first = page.anchor().generation;

        handle.driver().goto("https://app.test/a").await.unwrap();
        assert!(page.is_current());
        assert!(page.ensure_current().is_ok());
        assert!(page.anchor().generation > first);

        handle.driver().goto("https://app.test/b").await.unwrap();
        assert!(!page.is_current());
        assert!(page.ensure_current().unwrap_err().is_stale());
    }

    #[tokio::test]
    async fn test_stale_check_can_be_disabled() {
        let driver = MockDriver::new();
        driver.route("https://app.test/a", MockDocument::new());
        let handle = DriverHandle::new(driver, PageOptions::new().with_stale_check(false));

        let page = BasePage::new(&handle, "Blank");
        handle.driver().goto("https://app.test/a").await.unwrap();

        assert!(page.ensure_current().is_ok());
    }

    #[tokio::test]
    async fn test_resolve_times_out_as_element_not_found() {
        let handle = DriverHandle::new(MockDriver::new(), PageOptions::new());
        let page = BasePage::new(&handle, "Blank");
        let locator = Locator::new("missing", By::id("missing"));

        let err = page
            .resolve(&locator, Duration::from_millis(30))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_picks_fallback() {
        let doc = MockDocument::new().with(MockElement::new("nav").class("navbar"));
        let handle = DriverHandle::new(
            MockDriver::with_document("https://app.test/", doc),
            PageOptions::new(),
        );
        let page = BasePage::new(&handle, "Home");
        let locator = Locator::new("navigation", By::id("main-nav")).or(By::class("navbar"));

        let by = page
            .resolve(&locator, Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(by, &By::class("navbar"));
    }
}
