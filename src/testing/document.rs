//! In-memory document model.

use std::time::Duration;

use rustc_hash::FxHashMap;
use tokio::time::Instant;

use crate::page::By;

// ============================================================================
// MockElement
// ============================================================================

/// One element of a [`MockDocument`].
///
/// CSS support is deliberately small: `#id`, `.class`, a bare tag name and
/// `*` are understood directly. Any other CSS or XPath selector only
/// matches through an alias registered with [`css`](Self::css).
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    tag: String,
    attributes: FxHashMap<String, String>,
    aliases: Vec<String>,
    text: Option<String>,
    value: String,
    checked: bool,
    hidden: bool,
    disabled: bool,
    visible_after: Option<Duration>,
}

impl MockElement {
    /// Creates an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Sets the `id` attribute.
    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Adds a class.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        let classes = self.attributes.entry("class".to_string()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Registers a selector (CSS or XPath) this element answers to.
    #[must_use]
    pub fn css(mut self, selector: &str) -> Self {
        self.aliases.push(selector.to_string());
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Makes the element invisible.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Disables the element.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Keeps the element invisible until `delay` after the document loads.
    #[must_use]
    pub fn visible_after(mut self, delay: Duration) -> Self {
        self.visible_after = Some(delay);
        self
    }

    /// Makes a hidden element visible.
    pub fn reveal(&mut self) {
        self.hidden = false;
        self.visible_after = None;
    }

    /// Replaces the text content.
    pub fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }

    /// Returns the tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns the text content.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the form value set by fill and clear.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns whether the element has been checked.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Returns whether the element is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub(crate) fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    pub(crate) fn set_checked(&mut self) {
        self.checked = true;
    }

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn contains_text(&self, needle: &str) -> bool {
        self.text.as_deref().is_some_and(|t| t.contains(needle))
    }

    fn matches_css(&self, selector: &str) -> bool {
        if self.aliases.iter().any(|a| a == selector) {
            return true;
        }
        if selector == "*" {
            return true;
        }
        if let Some(id) = selector.strip_prefix('#') {
            return is_ident(id) && self.attribute("id") == Some(id);
        }
        if let Some(class) = selector.strip_prefix('.') {
            return is_ident(class) && self.has_class(class);
        }
        is_ident(selector) && self.tag.eq_ignore_ascii_case(selector)
    }

    /// Returns whether this element matches `by`.
    #[must_use]
    pub fn matches(&self, by: &By) -> bool {
        match by {
            By::Css(selector) => self.matches_css(selector),
            By::XPath(expr) => self.aliases.iter().any(|a| a == expr),
            By::Text(text) => self.text.as_deref().map(str::trim) == Some(text.as_str()),
            By::PartialText(text) => self.contains_text(text),
            By::Id(id) => self.attribute("id") == Some(id.as_str()),
            By::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
            By::Name(name) => self.attribute("name") == Some(name.as_str()),
            By::Class(class) => self.has_class(class),
            By::LinkText(text) => {
                self.tag == "a" && self.text.as_deref().map(str::trim) == Some(text.as_str())
            }
            By::PartialLinkText(text) => self.tag == "a" && self.contains_text(text),
            By::HasText { css, text } => self.matches_css(css) && self.contains_text(text),
        }
    }

    fn is_visible_at(&self, loaded_at: Instant) -> bool {
        if self.hidden {
            return false;
        }
        match self.visible_after {
            Some(delay) => loaded_at.elapsed() >= delay,
            None => true,
        }
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// ============================================================================
// MockDocument
// ============================================================================

/// An ordered list of elements standing in for a loaded page.
#[derive(Debug, Clone)]
pub struct MockDocument {
    elements: Vec<MockElement>,
    loaded_at: Instant,
}

impl Default for MockDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            loaded_at: Instant::now(),
        }
    }

    /// Appends an element.
    #[must_use]
    pub fn with(mut self, element: MockElement) -> Self {
        self.elements.push(element);
        self
    }

    /// A sign-in form with username, password, submit, a hidden error,
    /// "remember me" and "Forgot Password".
    #[must_use]
    pub fn login_form() -> Self {
        Self::new()
            .with(MockElement::new("input").id("username").attr("name", "username"))
            .with(
                MockElement::new("input")
                    .id("password")
                    .attr("name", "password")
                    .attr("type", "password"),
            )
            .with(
                MockElement::new("input")
                    .attr("type", "checkbox")
                    .attr("name", "remember")
                    .css("input[type=\"checkbox\"][name=\"remember\"]"),
            )
            .with(
                MockElement::new("button")
                    .id("submit")
                    .attr("type", "submit")
                    .css("button[type=\"submit\"]")
                    .text("Login"),
            )
            .with(MockElement::new("div").id("error").class("error-message").hidden())
            .with(MockElement::new("a").attr("href", "/forgot").text("Forgot Password"))
    }

    /// A landing page with welcome heading, navigation, profile menu and logout.
    #[must_use]
    pub fn home() -> Self {
        Self::new()
            .with(MockElement::new("h1").class("welcome-message").text("Welcome, student"))
            .with(MockElement::new("nav").class("navbar"))
            .with(MockElement::new("div").class("user-profile").text("student"))
            .with(MockElement::new("button").id("logout").text("Logout"))
    }

    /// Returns the elements in document order.
    #[must_use]
    pub fn elements(&self) -> &[MockElement] {
        &self.elements
    }

    /// Returns the first element matching `by`.
    #[must_use]
    pub fn find(&self, by: &By) -> Option<&MockElement> {
        self.elements.iter().find(|e| e.matches(by))
    }

    /// Returns the first element matching `by`, mutably.
    pub fn find_mut(&mut self, by: &By) -> Option<&mut MockElement> {
        self.elements.iter_mut().find(|e| e.matches(by))
    }

    /// Returns the element with the given id, mutably.
    pub fn element_mut(&mut self, id: &str) -> Option<&mut MockElement> {
        self.find_mut(&By::id(id))
    }

    /// Returns the form value of the element with the given id.
    #[must_use]
    pub fn value_of(&self, id: &str) -> Option<&str> {
        self.find(&By::id(id)).map(MockElement::value)
    }

    /// Removes every element matching `by`.
    pub fn remove(&mut self, by: &By) {
        self.elements.retain(|e| !e.matches(by));
    }

    /// Counts elements matching `by`.
    #[must_use]
    pub fn count(&self, by: &By) -> usize {
        self.elements.iter().filter(|e| e.matches(by)).count()
    }

    /// Returns whether the first match of `by` is visible now.
    #[must_use]
    pub fn is_visible(&self, by: &By) -> bool {
        self.find(by)
            .is_some_and(|e| e.is_visible_at(self.loaded_at))
    }

    /// Restarts the load clock used by delayed visibility.
    pub(crate) fn mark_loaded(&mut self) {
        self.loaded_at = Instant::now();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_css_forms() {
        let el = MockElement::new("nav").id("main").class("navbar").class("dark");
        assert!(el.matches(&By::css("#main")));
        assert!(el.matches(&By::css(".dark")));
        assert!(el.matches(&By::css("nav")));
        assert!(el.matches(&By::css("*")));
        assert!(!el.matches(&By::css("nav.navbar")));
        assert!(el.matches(&By::class("navbar")));
    }

    #[test]
    fn test_aliases_and_text() {
        let el = MockElement::new("a").css("nav a").text("  Docs  ");
        assert!(el.matches(&By::css("nav a")));
        assert!(el.matches(&By::has_text("nav a", "Docs")));
        assert!(!el.matches(&By::has_text("nav a", "Blog")));
        assert!(el.matches(&By::link_text("Docs")));
        assert!(el.matches(&By::partial_text("Do")));
        assert!(!el.matches(&By::xpath("//a")));
    }

    #[test]
    fn test_document_queries() {
        let mut doc = MockDocument::login_form();
        assert_eq!(doc.count(&By::tag("input")), 3);
        assert!(doc.is_visible(&By::id("username")));
        assert!(!doc.is_visible(&By::id("error")));
        assert!(!doc.is_visible(&By::id("missing")));

        doc.element_mut("error").unwrap().reveal();
        assert!(doc.is_visible(&By::id("error")));

        doc.remove(&By::id("submit"));
        assert_eq!(doc.count(&By::id("submit")), 0);
    }
}
