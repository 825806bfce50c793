//! Shared page primitives.
//!
//! [`BasePage`] is composed by every concrete page. It owns no element
//! references; each call resolves its locator against the current document.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | BasePage struct, anchoring, staleness |
//! | `navigation` | URL navigation, load and URL waits |
//! | `elements` | Element waits, actions and queries |
//! | `screenshot` | Diagnostic screenshots |
//! | `scroll` | Scroll into view |
//!
//! # Example
//!
//! ```ignore
//! let page = BasePage::new(&handle, "Search");
//!
//! page.navigate_to("/search").await?;
//! page.fill("input[type=\"search\"]", "rust").await?;
//! page.press("input[type=\"search\"]", Key::Enter).await?;
//!
//! if !page.is_visible(".results").await? {
//!     page.take_screenshot("no-results.png").await;
//! }
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod core;
mod elements;
mod navigation;
mod screenshot;
mod scroll;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::core::BasePage;
