//! Scrolling.

use crate::driver::Action;
use crate::error::Result;
use crate::page::locator::IntoLocator;

use super::BasePage;

impl BasePage {
    /// Scrolls the first match of `target` into view.
    ///
    /// Best effort: an element already in view is left where it is.
    /// Hidden elements are still scrolled to.
    ///
    /// # Errors
    ///
    /// [`Error::ElementNotFound`](crate::Error::ElementNotFound) if nothing matches within the action timeout.
    pub async fn scroll_to_element<'a>(&self, target: impl IntoLocator<'a>) -> Result<()> {
        self.act(&target.into_locator(), Action::ScrollIntoView)
            .await
    }
}
