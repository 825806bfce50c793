//! Fallback-chain locators.
//!
//! A [`Locator`] is a named, ordered, non-empty list of [`By`] strategies.
//! It is never a live element reference: every operation resolves it again
//! against the handle's current document.
//!
//! Resolution is **first-match-wins**: strategies are tried in order and
//! the first one matching at least one element is used, even when a later
//! strategy would match a "better" element.
//!
//! # Example
//!
//! ```ignore
//! use page_objects::{By, Locator};
//!
//! let username = Locator::new("username", By::id("username"))
//!     .or(By::name("username"))
//!     .or(By::css("input[type=\"email\"]"));
//!
//! // Same chain from a selector list
//! let username = Locator::parse_fallbacks(
//!     "username",
//!     r#"#username, [name="username"], input[type="email"]"#,
//! )?;
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::driver::Driver;
use crate::error::{Error, Result};

use super::selector::By;
use super::wait::ElementState;

// ============================================================================
// Locator
// ============================================================================

/// Named fallback chain of selector strategies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    name: String,
    chain: Vec<By>,
}

impl Locator {
    /// Creates a locator with a single strategy.
    pub fn new(name: impl Into<String>, first: impl Into<By>) -> Self {
        Self {
            name: name.into(),
            chain: vec![first.into()],
        }
    }

    /// Appends a fallback strategy.
    #[must_use]
    pub fn or(mut self, next: impl Into<By>) -> Self {
        self.chain.push(next.into());
        self
    }

    /// Creates an unnamed locator from one strategy.
    ///
    /// The strategy's display form doubles as the name.
    pub fn from_by(by: By) -> Self {
        Self::new(by.to_string(), by)
    }

    /// Builds a chain from a comma-separated selector list.
    ///
    /// Commas inside quotes, brackets or parentheses do not split. Each
    /// item is parsed with [`By::parse`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the list or any item is empty.
    pub fn parse_fallbacks(name: impl Into<String>, list: &str) -> Result<Self> {
        let name = name.into();
        let mut chain = Vec::new();
        for item in split_top_level(list) {
            chain.push(By::parse(item).map_err(|e| {
                Error::invalid_argument(format!("locator {name}: {e}"))
            })?);
        }
        if chain.is_empty() {
            return Err(Error::invalid_argument(format!(
                "locator {name}: empty selector list"
            )));
        }
        Ok(Self { name, chain })
    }

    /// Returns the locator name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the strategies in resolution order.
    #[inline]
    #[must_use]
    pub fn strategies(&self) -> &[By] {
        &self.chain
    }
}

// ============================================================================
// Locator - Resolution
// ============================================================================

impl Locator {
    /// Returns the first strategy matching at least one element.
    ///
    /// Checks once; does not wait.
    pub async fn first_match(&self, driver: &dyn Driver) -> Result<Option<&By>> {
        for by in &self.chain {
            if driver.count(by).await? > 0 {
                return Ok(Some(by));
            }
        }
        Ok(None)
    }

    /// Counts matches of the winning strategy, zero if none matches.
    pub async fn count(&self, driver: &dyn Driver) -> Result<usize> {
        for by in &self.chain {
            let n = driver.count(by).await?;
            if n > 0 {
                return Ok(n);
            }
        }
        Ok(0)
    }

    /// Returns whether the locator is currently in `state`.
    ///
    /// Visibility is judged on the winning strategy only.
    pub async fn is_in_state(&self, driver: &dyn Driver, state: ElementState) -> Result<bool> {
        let matched = self.first_match(driver).await?;
        Ok(match (state, matched) {
            (ElementState::Attached, m) => m.is_some(),
            (ElementState::Detached, m) => m.is_none(),
            (ElementState::Visible, Some(by)) => driver.is_visible(by).await?,
            (ElementState::Visible, None) => false,
            (ElementState::Hidden, Some(by)) => !driver.is_visible(by).await?,
            (ElementState::Hidden, None) => true,
        })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.name)?;
        for (i, by) in self.chain.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{by}")?;
        }
        f.write_str("]")
    }
}

/// Splits a selector list on commas outside quotes, brackets and parentheses.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in list.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                items.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(list[start..].trim());
    items.retain(|s| !s.is_empty());
    items
}

// ============================================================================
// IntoLocator
// ============================================================================

/// Conversion into a locator, borrowing when possible.
///
/// Lets page primitives take named locators and ad-hoc selectors alike.
pub trait IntoLocator<'a> {
    /// Performs the conversion.
    fn into_locator(self) -> Cow<'a, Locator>;
}

impl<'a> IntoLocator<'a> for &'a Locator {
    fn into_locator(self) -> Cow<'a, Locator> {
        Cow::Borrowed(self)
    }
}

impl<'a> IntoLocator<'a> for Locator {
    fn into_locator(self) -> Cow<'a, Locator> {
        Cow::Owned(self)
    }
}

impl<'a> IntoLocator<'a> for By {
    fn into_locator(self) -> Cow<'a, Locator> {
        Cow::Owned(Locator::from_by(self))
    }
}

impl<'a> IntoLocator<'a> for &str {
    /// Parses with [`By::parse`], treating unparseable input as CSS.
    fn into_locator(self) -> Cow<'a, Locator> {
        let by = By::parse(self).unwrap_or_else(|_| By::css(self));
        Cow::Owned(Locator::new(self, by))
    }
}

impl<'a> IntoLocator<'a> for String {
    fn into_locator(self) -> Cow<'a, Locator> {
        self.as_str().into_locator()
    }
}

// ============================================================================
// Tests
// ============================================================================
