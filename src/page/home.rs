//! Home page.

use async_trait::async_trait;
use tracing::debug;

use crate::driver::DriverHandle;
use crate::error::Result;

use super::base::BasePage;
use super::keyboard::Key;
use super::locator::Locator;
use super::object::PageObject;
use super::selector::By;

// ============================================================================
// HomePage
// ============================================================================

/// The landing page after sign-in.
#[derive(Debug)]
pub struct HomePage {
    base: BasePage,
    welcome_message: Locator,
    navigation: Locator,
    search_box: Locator,
    user_profile: Locator,
    logout_button: Locator,
    notification_icon: Locator,
    notification_badge: Locator,
}

impl HomePage {
    /// Builds the page and its locators, anchored to the handle's current location.
    pub fn new(handle: &DriverHandle) -> Self {
        Self {
            base: BasePage::new(handle, "HomePage"),
            welcome_message: Locator::new("welcome message", By::class("welcome-message"))
                .or(By::tag("h1"))
                .or(By::class("greeting")),
            navigation: Locator::new("navigation", By::tag("nav")).or(By::class("navbar")),
            search_box: Locator::new("search box", By::css("input[type=\"search\"]"))
                .or(By::css("input[placeholder*=\"Search\"]")),
            user_profile: Locator::new("user profile", By::class("user-profile"))
                .or(By::class("account-menu")),
            logout_button: Locator::new("logout", By::has_text("button", "Logout"))
                .or(By::has_text("a", "Logout")),
            notification_icon: Locator::new("notification icon", By::class("notification-icon"))
                .or(By::class("bell-icon")),
            notification_badge: Locator::new(
                "notification badge",
                By::class("notification-badge"),
            ),
        }
    }

    /// Returns the user profile locator.
    #[inline]
    #[must_use]
    pub fn user_profile(&self) -> &Locator {
        &self.user_profile
    }

    /// Returns the logout control locator.
    #[inline]
    #[must_use]
    pub fn logout_button(&self) -> &Locator {
        &self.logout_button
    }

    /// Returns the notification icon locator.
    #[inline]
    #[must_use]
    pub fn notification_icon(&self) -> &Locator {
        &self.notification_icon
    }
}

// ============================================================================
// HomePage - Operations
// ============================================================================

impl HomePage {
    /// Returns the trimmed welcome text, `None` if the element has no text.
    pub async fn get_welcome_message(&self) -> Result<Option<String>> {
        self.base.get_text(&self.welcome_message).await
    }

    /// Returns whether the user profile control is visible.
    pub async fn is_user_logged_in(&self) -> Result<bool> {
        self.base.is_visible(&self.user_profile).await
    }

    /// Types `term` into the search box and submits with Enter.
    pub async fn search(&self, term: &str) -> Result<()> {
        debug!(handle = %self.base.handle().id(), term, "Searching");
        self.base.fill(&self.search_box, term).await?;
        self.base.press(&self.search_box, Key::Enter).await
    }

    /// Clicks the navigation link whose text contains `name`.
    pub async fn click_menu_item(&self, name: &str) -> Result<()> {
        self.base.click(By::has_text("nav a", name)).await
    }

    /// Opens the profile menu and clicks logout.
    ///
    /// Exactly two actions; the profile menu is not waited on separately.
    pub async fn logout(&self) -> Result<()> {
        debug!(handle = %self.base.handle().id(), "Logging out");
        self.base.click(&self.user_profile).await?;
        self.base.click(&self.logout_button).await
    }

    /// Returns whether a notification badge is visible.
    pub async fn has_notifications(&self) -> Result<bool> {
        self.base.is_visible(&self.notification_badge).await
    }
}

#[async_trait]
impl PageObject for HomePage {
    const PATH: &'static str = "/";

    fn base(&self) -> &BasePage {
        &self.base
    }

    fn defining_locators(&self) -> Vec<&Locator> {
        vec![&self.welcome_message, &self.navigation]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::driver::{Action, PageOptions};
    use crate::testing::{MockDocument, MockDriver, MockElement};

    #[tokio::test]
    async fn test_search_fills_then_presses_enter() {
        let doc = MockDocument::home().with(
            MockElement::new("input")
                .attr("placeholder", "Search docs")
                .css("input[placeholder*=\"Search\"]"),
        );
        let driver = MockDriver::with_document("https://app.test/", doc);
        let handle = DriverHandle::new(driver.clone(), PageOptions::new());
        let page = HomePage::new(&handle);

        page.search("locators").await.unwrap();

        let fallback = By::css("input[placeholder*=\"Search\"]");
        assert_eq!(
            driver.actions(),
            vec![
                (fallback.clone(), Action::fill("locators")),
                (fallback, Action::press(Key::Enter)),
            ]
        );
    }

    #[tokio::test]
    async fn test_click_menu_item_targets_nav_link() {
        let doc = MockDocument::home()
            .with(MockElement::new("a").css("nav a").text("Docs"))
            .with(MockElement::new("a").css("nav a").text("Community"));
        let driver = MockDriver::with_document("https://app.test/", doc);
        let handle = DriverHandle::new(driver.clone(), PageOptions::new());
        let page = HomePage::new(&handle);

        page.click_menu_item("Community").await.unwrap();
        assert_eq!(
            driver.actions(),
            vec![(By::has_text("nav a", "Community"), Action::Click)]
        );
    }

    #[tokio::test]
    async fn test_has_notifications() {
        let handle = DriverHandle::new(
            MockDriver::with_document("https://app.test/", MockDocument::home()),
            PageOptions::new(),
        );
        assert!(!HomePage::new(&handle).has_notifications().await.unwrap());

        let doc = MockDocument::home().with(MockElement::new("span").class("notification-badge").text("3"));
        let handle = DriverHandle::new(MockDriver::with_document("https://app.test/", doc), PageOptions::new());
        assert!(HomePage::new(&handle).has_notifications().await.unwrap());
    }
}
