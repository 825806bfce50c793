//! Page Objects - browser test automation over a pluggable driver.
//!
//! This library wraps a live browser tab (the [`Driver`] capability) in
//! page objects: per-page structs that bind named locators to semantic
//! user actions such as "log in" or "search".
//!
//! # Architecture
//!
//! The layer sits between test scripts and a browser driver:
//!
//! - **Driver**: an implementation of [`Driver`] owned by the test runner
//! - **Handle**: a cloneable [`DriverHandle`] carrying the driver and [`PageOptions`]
//! - **Pages**: [`BasePage`] primitives composed by concrete pages like [`LoginPage`]
//!
//! Key design principles:
//!
//! - Locators are ordered fallback chains resolved first-match-wins
//! - Every suspending operation carries a deadline from [`PageOptions`]
//! - Pages anchor to a navigation generation and fail fast once stale
//! - No retries: failures propagate unchanged to the test
//!
//! # Quick Start
//!
//! ```no_run
//! use page_objects::testing::{MockDocument, MockDriver};
//! use page_objects::{DriverHandle, LoginPage, PageObject, PageOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let driver = MockDriver::new();
//!     driver.route("https://app.test/login", MockDocument::login_form());
//!
//!     let options = PageOptions::new().with_base_url("https://app.test");
//!     let handle = DriverHandle::new(driver, options);
//!
//!     let login = LoginPage::new(&handle);
//!     login.open().await?;
//!     assert!(login.is_loaded().await?);
//!     login.login("student", "Password123").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`driver`] | Driver capability, handle and options |
//! | [`page`] | Locators, [`BasePage`] and concrete pages |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`fixtures`] | Test credentials and expected messages |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`testing`] | In-memory driver |

// ============================================================================
// Modules
// ============================================================================

/// Driver capability, handle and configuration.
///
/// Use [`DriverHandle::builder()`] to wrap a driver with options.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Shared test data.
pub mod fixtures;

/// Type-safe identifiers for handles and navigation state.
pub mod identifiers;

/// Page objects and their primitives.
///
/// - [`Locator`] - named fallback chain of [`By`] strategies
/// - [`BasePage`] - selector-driven primitives
/// - [`PageObject`] - the concrete page pattern
pub mod page;

/// In-memory driver for tests, demos and benchmarks.
pub mod testing;

// ============================================================================
// Re-exports
// ============================================================================

// Driver types
pub use driver::{
    Action, Driver, DriverHandle, HandleBuilder, ImageFormat, LoadState, Location, PageOptions,
};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{Generation, HandleId};

// Page types
pub use page::{
    BasePage, By, ElementState, HomePage, IntoLocator, Key, Locator, LoginPage, PageObject,
};
