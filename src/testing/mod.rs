//! In-memory driver for tests, demos and benchmarks.
//!
//! [`MockDriver`] implements [`Driver`](crate::Driver) over a
//! [`MockDocument`], records every call it receives and can be scripted
//! with routes, unreachable URLs and click reactions.
//!
//! # Example
//!
//! ```ignore
//! use page_objects::testing::{MockDocument, MockDriver};
//! use page_objects::{DriverHandle, LoginPage, PageOptions};
//!
//! let driver = MockDriver::with_document("https://app.test/login", MockDocument::login_form());
//! let handle = DriverHandle::new(driver.clone(), PageOptions::new());
//!
//! LoginPage::new(&handle).login("student", "Password123").await?;
//! assert_eq!(driver.actions().len(), 3);
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod document;
mod driver;

// ============================================================================
// Re-exports
// ============================================================================

pub use document::{MockDocument, MockElement};
pub use driver::{DriverCall, MockDriver, Reaction};
