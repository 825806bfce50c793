//! Navigation and location methods.

use regex::Regex;
use tracing::debug;

use crate::driver::LoadState;
use crate::error::Result;
use crate::page::wait::{poll_until, with_deadline};

use super::BasePage;

// ============================================================================
// BasePage - Navigation
// ============================================================================

impl BasePage {
    /// Navigates to a URL and anchors the page to the new document.
    ///
    /// Resolves once the driver reports the navigation committed, which is
    /// not necessarily a full load.
    ///
    /// # Errors
    ///
    /// - [`Error::Navigation`](crate::Error::Navigation) if the target is unreachable
    /// - [`Error::Timeout`](crate::Error::Timeout) after the navigation timeout
    pub async fn navigate(&self, url: &str) -> Result<()> {
        debug!(handle = %self.handle().id(), page = %self.name(), url = %url, "Navigating");

        let deadline = self.options().navigation_timeout;
        with_deadline(|| format!("goto({url})"), deadline, self.driver().goto(url)).await?;

        self.rebind();
        Ok(())
    }

    /// Navigates to a route path under the configured base URL.
    pub async fn navigate_to(&self, path: &str) -> Result<()> {
        let url = self.handle().url_for(path)?;
        self.navigate(&url).await
    }

    /// Waits for network quiescence.
    ///
    /// A coarse, best-effort barrier: documents with persistent background
    /// traffic never go idle and this fails with
    /// [`Error::Timeout`](crate::Error::Timeout) after the navigation timeout.
    pub async fn wait_for_navigation(&self) -> Result<()> {
        self.wait_for_load_state(LoadState::NetworkIdle).await
    }

    /// Waits until the document reaches `state`, bounded by the navigation timeout.
    pub async fn wait_for_load_state(&self, state: LoadState) -> Result<()> {
        debug!(handle = %self.handle().id(), page = %self.name(), %state, "Waiting for load state");

        let deadline = self.options().navigation_timeout;
        with_deadline(
            || format!("wait_for_load_state({state})"),
            deadline,
            self.driver().wait_for_load_state(state),
        )
        .await
    }

    /// Waits until the current URL matches `pattern` and returns it.
    ///
    /// Bounded by the wait timeout.
    pub async fn wait_for_url(&self, pattern: &Regex) -> Result<String> {
        debug!(handle = %self.handle().id(), page = %self.name(), pattern = %pattern, "Waiting for URL");

        let handle = self.handle();
        poll_until(
            || format!("wait_for_url({pattern})"),
            self.options().wait_timeout,
            self.options().poll_interval,
            move || async move {
                let url = handle.location().url;
                Ok(pattern.is_match(&url).then_some(url))
            },
        )
        .await
    }

    /// Returns the current URL of the handle.
    ///
    /// Reads driver-tracked state; never suspends and never fails as stale.
    #[must_use]
    pub fn get_current_url(&self) -> String {
        self.handle().location().url
    }
}

// ============================================================================
// Tests
// ============================================================================
