//! Login page.

use async_trait::async_trait;
use tracing::debug;

use crate::driver::DriverHandle;
use crate::error::Result;

use super::base::BasePage;
use super::locator::Locator;
use super::object::PageObject;
use super::selector::By;

// ============================================================================
// LoginPage
// ============================================================================

/// The sign-in form.
///
/// # Example
///
/// ```ignore
/// let login = LoginPage::new(&handle);
/// login.open().await?;
/// login.login("student", "Password123").await?;
/// ```
#[derive(Debug)]
pub struct LoginPage {
    base: BasePage,
    username: Locator,
    password: Locator,
    submit: Locator,
    error: Locator,
    forgot_password: Locator,
    remember_me: Locator,
}

impl LoginPage {
    /// Builds the page and its locators, anchored to the handle's current location.
    pub fn new(handle: &DriverHandle) -> Self {
        Self {
            base: BasePage::new(handle, "LoginPage"),
            username: Locator::new("username", By::id("username"))
                .or(By::name("username"))
                .or(By::css("input[type=\"email\"]")),
            password: Locator::new("password", By::id("password"))
                .or(By::name("password"))
                .or(By::css("input[type=\"password\"]")),
            submit: Locator::new("submit", By::css("button[type=\"submit\"]"))
                .or(By::has_text("button", "Login"))
                .or(By::has_text("button", "Sign In"))
                .or(By::id("submit")),
            error: Locator::new("error message", By::class("error-message"))
                .or(By::class("alert-danger"))
                .or(By::css("[role=\"alert\"]"))
                .or(By::id("error")),
            forgot_password: Locator::new(
                "forgot password",
                By::has_text("a", "Forgot Password"),
            ),
            remember_me: Locator::new(
                "remember me",
                By::css("input[type=\"checkbox\"][name=\"remember\"]"),
            ),
        }
    }

    /// Returns the username field locator.
    #[inline]
    #[must_use]
    pub fn username(&self) -> &Locator {
        &self.username
    }

    /// Returns the password field locator.
    #[inline]
    #[must_use]
    pub fn password(&self) -> &Locator {
        &self.password
    }

    /// Returns the submit button locator.
    #[inline]
    #[must_use]
    pub fn submit(&self) -> &Locator {
        &self.submit
    }

    /// Returns the error indicator locator.
    #[inline]
    #[must_use]
    pub fn error(&self) -> &Locator {
        &self.error
    }
}

// ============================================================================
// LoginPage - Operations
// ============================================================================

impl LoginPage {
    /// Fills both credentials and submits.
    ///
    /// Does not wait for the outcome; assert on navigation or the error
    /// message afterwards.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        debug!(handle = %self.base.handle().id(), username, "Logging in");
        self.base.fill(&self.username, username).await?;
        self.base.fill(&self.password, password).await?;
        self.base.click(&self.submit).await
    }

    /// Like [`login`](Self::login), checking "remember me" before submitting.
    pub async fn login_with_remember_me(&self, username: &str, password: &str) -> Result<()> {
        debug!(handle = %self.base.handle().id(), username, "Logging in with remember me");
        self.base.fill(&self.username, username).await?;
        self.base.fill(&self.password, password).await?;
        self.base.check(&self.remember_me).await?;
        self.base.click(&self.submit).await
    }

    /// Waits for the error indicator to become visible and returns its text.
    ///
    /// Only call when an error is expected. An error element without text
    /// yields an empty string.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`](crate::Error::Timeout) if no error appears within the wait timeout.
    pub async fn get_error_message(&self) -> Result<String> {
        self.base.wait_for_element(&self.error).await?;
        Ok(self.base.get_text(&self.error).await?.unwrap_or_default())
    }

    /// Returns whether the error indicator is visible right now.
    pub async fn is_error_displayed(&self) -> Result<bool> {
        self.base.is_visible(&self.error).await
    }

    /// Follows the "Forgot Password" link.
    pub async fn click_forgot_password(&self) -> Result<()> {
        self.base.click(&self.forgot_password).await
    }

    /// Clears both credential fields.
    pub async fn clear_form(&self) -> Result<()> {
        self.base.clear(&self.username).await?;
        self.base.clear(&self.password).await
    }
}

#[async_trait]
impl PageObject for LoginPage {
    const PATH: &'static str = "/login";

    fn base(&self) -> &BasePage {
        &self.base
    }

    fn defining_locators(&self) -> Vec<&Locator> {
        vec![&self.username, &self.password, &self.submit]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::driver::{Action, PageOptions};
    use crate::testing::{MockDocument, MockDriver};

    #[test]
    fn test_locator_chains() {
        let handle = DriverHandle::new(MockDriver::new(), PageOptions::new());
        let page = LoginPage::new(&handle);

        assert_eq!(page.username().strategies().len(), 3);
        assert_eq!(page.submit().strategies()[0], By::css("button[type=\"submit\"]"));
        assert_eq!(page.error().strategies().last(), Some(&By::id("error")));
        assert_eq!(page.defining_locators().len(), 3);
        assert_eq!(LoginPage::PATH, "/login");
    }

    #[tokio::test]
    async fn test_clear_form_order() {
        let doc = MockDocument::login_form();
        let driver = MockDriver::with_document("https://app.test/login", doc);
        let handle = DriverHandle::new(driver.clone(), PageOptions::new());
        let page = LoginPage::new(&handle);

        page.clear_form().await.unwrap();
        assert_eq!(
            driver.actions(),
            vec![
                (By::id("username"), Action::Clear),
                (By::id("password"), Action::Clear),
            ]
        );
    }
}
