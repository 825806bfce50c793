//! Element waits, actions and queries.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::driver::Action;
use crate::error::Result;
use crate::page::keyboard::Key;
use crate::page::locator::{IntoLocator, Locator};
use crate::page::wait::{ElementState, poll_until, with_deadline};

use super::BasePage;

// ============================================================================
// BasePage - Waits
// ============================================================================

impl BasePage {
    /// Waits until `target` is visible, bounded by the wait timeout.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`](crate::Error::Timeout) if it never becomes visible.
    pub async fn wait_for_element<'a>(&self, target: impl IntoLocator<'a>) -> Result<()> {
        let deadline = self.options().wait_timeout;
        self.wait_for_state(target, ElementState::Visible, deadline)
            .await
    }

    /// Waits until `target` reaches `state` within `deadline`.
    pub async fn wait_for_state<'a>(
        &self,
        target: impl IntoLocator<'a>,
        state: ElementState,
        deadline: Duration,
    ) -> Result<()> {
        let locator = target.into_locator();
        self.ensure_current()?;
        debug!(
            handle = %self.handle().id(),
            page = %self.name(),
            locator = %locator,
            %state,
            timeout_ms = deadline.as_millis() as u64,
            "Waiting for element"
        );

        let driver = self.driver();
        let locator: &Locator = &locator;
        poll_until(
            || format!("wait_for({locator}, {state})"),
            deadline,
            self.options().poll_interval,
            move || async move {
                self.ensure_current()?;
                Ok(locator.is_in_state(driver, state).await?.then_some(()))
            },
        )
        .await
    }
}

// ============================================================================
// BasePage - Actions
// ============================================================================

impl BasePage {
    /// Clicks the first match of `target`.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementNotFound`](crate::Error::ElementNotFound) if nothing matches within the action timeout
    /// - [`Error::ElementNotInteractable`](crate::Error::ElementNotInteractable) if the match is hidden or disabled
    pub async fn click<'a>(&self, target: impl IntoLocator<'a>) -> Result<()> {
        self.act(&target.into_locator(), Action::Click).await
    }

    /// Double-clicks the first match of `target`.
    pub async fn double_click<'a>(&self, target: impl IntoLocator<'a>) -> Result<()> {
        self.act(&target.into_locator(), Action::DoubleClick).await
    }

    /// Hovers over the first match of `target`.
    pub async fn hover<'a>(&self, target: impl IntoLocator<'a>) -> Result<()> {
        self.act(&target.into_locator(), Action::Hover).await
    }

    /// Checks the first match of `target`.
    pub async fn check<'a>(&self, target: impl IntoLocator<'a>) -> Result<()> {
        self.act(&target.into_locator(), Action::Check).await
    }

    /// Replaces the value of the first match of `target` with `text`.
    pub async fn fill<'a>(&self, target: impl IntoLocator<'a>, text: &str) -> Result<()> {
        self.act(&target.into_locator(), Action::fill(text)).await
    }

    /// Clears the value of the first match of `target`.
    pub async fn clear<'a>(&self, target: impl IntoLocator<'a>) -> Result<()> {
        self.act(&target.into_locator(), Action::Clear).await
    }

    /// Presses `key` on the first match of `target`.
    pub async fn press<'a>(&self, target: impl IntoLocator<'a>, key: Key) -> Result<()> {
        self.act(&target.into_locator(), Action::press(key)).await
    }
}

// ============================================================================
// BasePage - Queries
// ============================================================================

impl BasePage {
    /// Returns the trimmed text content of the first match.
    ///
    /// `None` means the element has no text content; an element with
    /// whitespace-only text yields `Some("")`. The two are not merged.
    ///
    /// # Errors
    ///
    /// [`Error::ElementNotFound`](crate::Error::ElementNotFound) if nothing matches within the action timeout.
    pub async fn get_text<'a>(&self, target: impl IntoLocator<'a>) -> Result<Option<String>> {
        let locator = target.into_locator();
        self.ensure_current()?;
        debug!(handle = %self.handle().id(), page = %self.name(), locator = %locator, "Getting text");

        let budget = self.options().action_timeout;
        let started = Instant::now();
        let by = self.resolve(&locator, budget).await?;
        let text = with_deadline(
            || format!("text_content({locator})"),
            budget.saturating_sub(started.elapsed()),
            self.driver().text_content(by),
        )
        .await?;

        Ok(text.map(|t| t.trim().to_string()))
    }

    /// Returns an attribute of the first match.
    pub async fn get_attribute<'a>(
        &self,
        target: impl IntoLocator<'a>,
        name: &str,
    ) -> Result<Option<String>> {
        let locator = target.into_locator();
        self.ensure_current()?;
        debug!(
            handle = %self.handle().id(),
            page = %self.name(),
            locator = %locator,
            attribute = name,
            "Getting attribute"
        );

        let budget = self.options().action_timeout;
        let started = Instant::now();
        let by = self.resolve(&locator, budget).await?;
        with_deadline(
            || format!("attribute({locator}, {name})"),
            budget.saturating_sub(started.elapsed()),
            self.driver().attribute(by, name),
        )
        .await
    }

    /// Returns whether `target` is visible right now.
    ///
    /// Never fails because nothing matches: an absent element is `false`.
    /// Does not wait for the element to appear.
    pub async fn is_visible<'a>(&self, target: impl IntoLocator<'a>) -> Result<bool> {
        let locator = target.into_locator();
        self.ensure_current()?;

        let visible = with_deadline(
            || format!("is_visible({locator})"),
            self.options().action_timeout,
            locator.is_in_state(self.driver(), ElementState::Visible),
        )
        .await?;

        debug!(
            handle = %self.handle().id(),
            page = %self.name(),
            locator = %locator,
            visible,
            "Checked visibility"
        );
        Ok(visible)
    }

    /// Returns `true` only if every locator is visible.
    ///
    /// Locators are checked in order and the check stops at the first
    /// invisible one. An empty slice is vacuously `true`.
    pub async fn all_visible(&self, locators: &[&Locator]) -> Result<bool> {
        for locator in locators {
            if !self.is_visible(*locator).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Counts matches of the winning strategy of `target`.
    pub async fn count<'a>(&self, target: impl IntoLocator<'a>) -> Result<usize> {
        let locator = target.into_locator();
        self.ensure_current()?;
        with_deadline(
            || format!("count({locator})"),
            self.options().action_timeout,
            locator.count(self.driver()),
        )
        .await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::driver::{Action, DriverHandle, PageOptions};
    use crate::error::Error;
    use crate::page::{BasePage, By, ElementState, Key, Locator};
    use crate::testing::{MockDocument, MockDriver, MockElement};

    fn options() -> PageOptions {
        PageOptions::new()
            .with_action_timeout(Duration::from_millis(60))
            .with_wait_timeout(Duration::from_millis(150))
            .with_poll_interval(Duration::from_millis(5))
    }

    fn form() -> MockDocument {
        MockDocument::new()
            .with(MockElement::new("input").id("username"))
            .with(MockElement::new("h1").text("  Welcome back  "))
            .with(MockElement::new("div").class("empty"))
            .with(MockElement::new("button").id("disabled").disabled())
            .with(MockElement::new("div").id("error").text("Oops").hidden())
            .with(MockElement::new("a").id("link").attr("href", "/docs"))
    }

    fn page() -> (DriverHandle, BasePage) {
        let handle = DriverHandle::new(
            MockDriver::with_document("https://app.test/", form()),
            options(),
        );
        let page = BasePage::new(&handle, "Form");
        (handle, page)
    }

    #[tokio::test]
    async fn test_is_visible_absent_is_false() {
        let (_, page) = page();
        assert!(!page.is_visible("#does-not-exist").await.unwrap());
        assert!(page.is_visible("#username").await.unwrap());
        assert!(!page.is_visible("#error").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_text_trims_and_keeps_absence() {
        let (_, page) = page();
        assert_eq!(page.get_text("h1").await.unwrap().as_deref(), Some("Welcome back"));
        assert_eq!(page.get_text(".empty").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_text_missing_element() {
        let (_, page) = page();
        let err = page.get_text("#nope").await.unwrap_err();
        assert!(matches!(err, Error::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_attribute() {
        let (_, page) = page();
        assert_eq!(
            page.get_attribute("#link", "href").await.unwrap().as_deref(),
            Some("/docs")
        );
        assert_eq!(page.get_attribute("#link", "target").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fill_and_press_reach_driver() {
        let driver = MockDriver::with_document("https://app.test/", form());
        let handle = DriverHandle::new(driver.clone(), options());
        let page = BasePage::new(&handle, "Form");

        page.fill("#username", "student").await.unwrap();
        page.press(By::id("username"), Key::Enter).await.unwrap();

        assert_eq!(
            driver.actions(),
            vec![
                (By::css("#username"), Action::fill("student")),
                (By::id("username"), Action::press(Key::Enter)),
            ]
        );
        assert_eq!(driver.value_of(&By::id("username")).as_deref(), Some("student"));
    }

    #[tokio::test]
    async fn test_click_not_interactable() {
        let (_, page) = page();
        let err = page.click("#disabled").await.unwrap_err();
        assert!(matches!(err, Error::ElementNotInteractable { .. }));

        let err = page.click("#error").await.unwrap_err();
        assert!(matches!(err, Error::ElementNotInteractable { .. }));
    }

    #[tokio::test]
    async fn test_click_not_found_after_action_timeout() {
        let (_, page) = page();
        let err = page.click("#ghost").await.unwrap_err();
        assert!(matches!(err, Error::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn test_wait_for_element_delayed() {
        let doc = MockDocument::new().with(
            MockElement::new("div")
                .id("toast")
                .visible_after(Duration::from_millis(40)),
        );
        let handle = DriverHandle::new(MockDriver::with_document("https://app.test/", doc), options());
        let page = BasePage::new(&handle, "Toast");

        assert!(!page.is_visible("#toast").await.unwrap());
        page.wait_for_element("#toast").await.unwrap();
        assert!(page.is_visible("#toast").await.unwrap());
    }

    #[tokio::test]
    async fn test_wait_for_element_timeout() {
        let (_, page) = page();
        let err = page.wait_for_element("#error").await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_wait_for_hidden_and_detached() {
        let (_, page) = page();
        page.wait_for_state("#error", ElementState::Hidden, Duration::from_millis(50))
            .await
            .unwrap();
        page.wait_for_state("#gone", ElementState::Detached, Duration::from_millis(50))
            .await
            .unwrap();
        page.wait_for_state("#error", ElementState::Attached, Duration::from_millis(50))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_all_visible_is_all_or_nothing() {
        let (_, page) = page();
        let username = Locator::new("username", By::id("username"));
        let heading = Locator::new("heading", By::tag("h1"));
        let error = Locator::new("error", By::id("error"));

        assert!(page.all_visible(&[&username, &heading]).await.unwrap());
        assert!(!page.all_visible(&[&username, &error, &heading]).await.unwrap());
        assert!(page.all_visible(&[]).await.unwrap());
    }

    #[tokio::test]
    async fn test_count_uses_winning_strategy() {
        let doc = MockDocument::new()
            .with(MockElement::new("li").class("item"))
            .with(MockElement::new("li").class("item"))
            .with(MockElement::new("li").class("row"));
        let handle = DriverHandle::new(MockDriver::with_document("https://app.test/", doc), options());
        let page = BasePage::new(&handle, "List");
        let items = Locator::new("items", By::class("item")).or(By::tag("li"));

        assert_eq!(page.count(&items).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_operations_fail_fast_when_stale() {
        let driver = MockDriver::with_document("https://app.test/", form());
        driver.route("https://app.test/other", MockDocument::new());
        let handle = DriverHandle::new(driver.clone(), options());
        let page = BasePage::new(&handle, "Form");

        handle.driver().goto("https://app.test/other").await.unwrap();

        assert!(page.is_visible("#username").await.unwrap_err().is_stale());
        assert!(page.click("#username").await.unwrap_err().is_stale());
        assert!(driver.actions().is_empty());
        assert_eq!(page.get_current_url(), "https://app.test/other");
    }

    #[tokio::test]
    async fn test_get_text_shares_one_action_budget() {
        let driver = MockDriver::with_document("https://app.test/", MockDocument::new());
        driver.set_read_latency(Duration::from_millis(30));
        let handle = DriverHandle::new(driver.clone(), options());
        let page = BasePage::new(&handle, "Late");

        let appear = async {
            tokio::time::sleep(Duration::from_millis(40)).await;
            driver.edit_document(|doc| {
                *doc = MockDocument::new().with(MockElement::new("p").id("late").text("Hi"));
            });
        };
        let (result, ()) = tokio::join!(page.get_text("#late"), appear);

        assert!(result.unwrap_err().is_timeout());
        assert_eq!(page.get_text("#late").await.unwrap().as_deref(), Some("Hi"));
        assert_eq!(
            page.get_attribute("#late", "id").await.unwrap().as_deref(),
            Some("late")
        );
    }

    #[tokio::test]
    async fn test_navigation_during_wait_reports_stale() {
        let driver = MockDriver::with_document("https://app.test/", form());
        driver.route(
            "https://app.test/other",
            MockDocument::new().with(MockElement::new("div").id("late")),
        );
        let handle = DriverHandle::new(driver, options());
        let page = BasePage::new(&handle, "Form");

        let navigate = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.driver().goto("https://app.test/other").await
        };
        let (waited, navigated) = tokio::join!(page.wait_for_element("#late"), navigate);

        navigated.unwrap();
        assert!(waited.unwrap_err().is_stale());
    }

    #[tokio::test]
    async fn test_navigation_during_resolution_reports_stale() {
        let driver = MockDriver::with_document("https://app.test/", form());
        driver.route(
            "https://app.test/other",
            MockDocument::new().with(MockElement::new("button").id("late")),
        );
        let handle = DriverHandle::new(driver.clone(), options());
        let page = BasePage::new(&handle, "Form");

        let navigate = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.driver().goto("https://app.test/other").await
        };
        let (clicked, navigated) = tokio::join!(page.click("#late"), navigate);

        navigated.unwrap();
        assert!(clicked.unwrap_err().is_stale());
        assert!(driver.actions().is_empty());
    }
}
