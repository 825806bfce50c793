//! Concrete page pattern.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;

use super::base::BasePage;
use super::locator::Locator;

// ============================================================================
// PageObject
// ============================================================================

/// A logical page: a route, a [`BasePage`] and the locators that define it.
///
/// Implementors build every locator eagerly in their constructor and expose
/// semantic operations composed from `BasePage` primitives. Pages hold their
/// primitives rather than extending them.
///
/// # Example
///
/// ```ignore
/// struct SettingsPage {
///     base: BasePage,
///     title: Locator,
/// }
///
/// #[async_trait]
/// impl PageObject for SettingsPage {
///     const PATH: &'static str = "/settings";
///
///     fn base(&self) -> &BasePage {
///         &self.base
///     }
///
///     fn defining_locators(&self) -> Vec<&Locator> {
///         vec![&self.title]
///     }
/// }
/// ```
#[async_trait]
pub trait PageObject: Send + Sync {
    /// Route of the page, relative to the configured base URL.
    const PATH: &'static str;

    /// Returns the shared primitives.
    fn base(&self) -> &BasePage;

    /// Returns the locators that must all be visible for the page to count as loaded.
    fn defining_locators(&self) -> Vec<&Locator>;

    /// Navigates to [`Self::PATH`] under the base URL and anchors the page there.
    async fn open(&self) -> Result<()> {
        debug!(page = %self.base().name(), path = Self::PATH, "Opening page");
        self.base().navigate_to(Self::PATH).await
    }

    /// Returns `true` only if every defining locator is visible.
    ///
    /// All or nothing: one invisible locator makes the whole page not loaded.
    async fn is_loaded(&self) -> Result<bool> {
        let locators = self.defining_locators();
        self.base().all_visible(&locators).await
    }
}
