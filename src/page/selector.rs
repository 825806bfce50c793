//! Element selector strategies.
//!
//! A [`By`] is a single strategy. Pages never hold a bare `By`; they hold
//! [`Locator`](super::Locator) fallback chains built from several of them.
//!
//! # Example
//!
//! ```ignore
//! use page_objects::By;
//!
//! // CSS selector (default)
//! let submit = By::css("button[type='submit']");
//!
//! // Shorthands
//! let user = By::id("username");       // #username
//! let email = By::name("email");       // [name="email"]
//!
//! // CSS filtered by contained text
//! let logout = By::has_text("button", "Logout");
//!
//! // Parsed from engine-prefixed strings
//! let link = By::parse(r#"a:has-text("Forgot Password")"#)?;
//! let title = By::parse("xpath=//h1")?;
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Matches `selector:has-text("text")` and `selector:has-text('text')`.
static HAS_TEXT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"^(?P<css>.*?):has-text\((?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')\)$"#).ok()
});

// ============================================================================
// By Enum
// ============================================================================

/// Element selector strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value")]
pub enum By {
    /// CSS selector (most common).
    #[serde(rename = "css")]
    Css(String),

    /// XPath expression.
    #[serde(rename = "xpath")]
    XPath(String),

    /// Exact text content match.
    ///
    /// Finds element where `textContent.trim() === value`.
    #[serde(rename = "text")]
    Text(String),

    /// Partial text content match.
    #[serde(rename = "partialText")]
    PartialText(String),

    /// Element ID (shorthand for `#id` CSS selector).
    #[serde(rename = "id")]
    Id(String),

    /// Tag name.
    #[serde(rename = "tag")]
    Tag(String),

    /// Name attribute.
    #[serde(rename = "name")]
    Name(String),

    /// Class name (single class).
    #[serde(rename = "class")]
    Class(String),

    /// Link text (for `<a>` elements).
    #[serde(rename = "linkText")]
    LinkText(String),

    /// Partial link text (for `<a>` elements).
    #[serde(rename = "partialLinkText")]
    PartialLinkText(String),

    /// CSS selector restricted to elements whose text contains `text`.
    ///
    /// # Example
    /// ```ignore
    /// By::has_text("nav a", "Docs")  // nav a:has-text("Docs")
    /// ```
    #[serde(rename = "hasText")]
    HasText {
        /// CSS selector.
        css: String,
        /// Text the element must contain.
        text: String,
    },
}

impl By {
    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates a text content selector.
    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a partial text content selector.
    #[inline]
    pub fn partial_text(text: impl Into<String>) -> Self {
        Self::PartialText(text.into())
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Creates a name attribute selector.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Creates a link text selector.
    #[inline]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Creates a partial link text selector.
    #[inline]
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::PartialLinkText(text.into())
    }

    /// Creates a CSS selector filtered by contained text.
    #[inline]
    pub fn has_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::HasText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// Parses a single selector string.
    ///
    /// Recognised forms, checked in order:
    ///
    /// | Input | Result |
    /// |-------|--------|
    /// | `css=…`, `xpath=…`, `text=…`, `id=…` | explicit engine |
    /// | `//…`, `(//…` | [`By::XPath`] |
    /// | `sel:has-text("t")` | [`By::HasText`] |
    /// | anything else | [`By::Css`] |
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for empty input or an empty engine body.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::invalid_argument("empty selector"));
        }

        if let Some((engine, body)) = input.split_once('=')
            && let Some(ctor) = engine_constructor(engine)
        {
            let body = body.trim();
            if body.is_empty() {
                return Err(Error::invalid_argument(format!(
                    "empty {engine} selector"
                )));
            }
            return Ok(ctor(body.to_string()));
        }

        if input.starts_with("//") || input.starts_with("(//") {
            return Ok(Self::XPath(input.to_string()));
        }

        if let Some(re) = HAS_TEXT.as_ref()
            && let Some(caps) = re.captures(input)
        {
            let css = caps.name("css").map_or("", |m| m.as_str()).trim();
            let text = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .map_or("", |m| m.as_str());
            let css = if css.is_empty() { "*" } else { css };
            return Ok(Self::has_text(css, text));
        }

        Ok(Self::Css(input.to_string()))
    }

    /// Returns the strategy name.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Text(_) => "text",
            Self::PartialText(_) => "partialText",
            Self::Id(_) => "id",
            Self::Tag(_) => "tag",
            Self::Name(_) => "name",
            Self::Class(_) => "class",
            Self::LinkText(_) => "linkText",
            Self::PartialLinkText(_) => "partialLinkText",
            Self::HasText { .. } => "hasText",
        }
    }

    /// Returns the selector value.
    ///
    /// For [`By::HasText`] this is the CSS part; see [`By::text_filter`].
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(v)
            | Self::XPath(v)
            | Self::Text(v)
            | Self::PartialText(v)
            | Self::Id(v)
            | Self::Tag(v)
            | Self::Name(v)
            | Self::Class(v)
            | Self::LinkText(v)
            | Self::PartialLinkText(v) => v,
            Self::HasText { css, .. } => css,
        }
    }

    /// Returns the text filter of a [`By::HasText`] strategy.
    #[must_use]
    pub fn text_filter(&self) -> Option<&str> {
        match self {
            Self::HasText { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Returns the equivalent plain CSS selector, if one exists.
    ///
    /// Text-based strategies and XPath have no CSS form.
    #[must_use]
    pub fn to_css(&self) -> Option<String> {
        match self {
            Self::Css(v) | Self::Tag(v) => Some(v.clone()),
            Self::Id(v) => Some(format!("#{v}")),
            Self::Class(v) => Some(format!(".{v}")),
            Self::Name(v) => Some(format!("[name=\"{v}\"]")),
            _ => None,
        }
    }
}

fn engine_constructor(engine: &str) -> Option<fn(String) -> By> {
    match engine {
        "css" => Some(By::Css),
        "xpath" => Some(By::XPath),
        "text" => Some(By::Text),
        "id" => Some(By::Id),
        _ => None,
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HasText { css, text } => write!(f, "{css}:has-text(\"{text}\")"),
            other => match other.to_css() {
                Some(css) => f.write_str(&css),
                None => write!(f, "{}={}", other.strategy(), other.value()),
            },
        }
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<&str> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
