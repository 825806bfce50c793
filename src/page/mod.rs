//! Page objects and the primitives they are built from.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `selector` | Single selector strategies ([`By`]) |
//! | `locator` | Named fallback chains ([`Locator`]) |
//! | `keyboard` | Key names for `press` |
//! | `wait` | Element states, deadlines and polling |
//! | `base` | [`BasePage`] primitives |
//! | `object` | The [`PageObject`] pattern |
//! | `login` | [`LoginPage`] |
//! | `home` | [`HomePage`] |

// ============================================================================
// Submodules
// ============================================================================

pub mod base;
pub mod home;
pub mod keyboard;
pub mod locator;
pub mod login;
pub mod object;
pub mod selector;
pub mod wait;

// ============================================================================
// Re-exports
// ============================================================================

pub use base::BasePage;
pub use home::HomePage;
pub use keyboard::Key;
pub use locator::{IntoLocator, Locator};
pub use login::LoginPage;
pub use object::PageObject;
pub use selector::By;
pub use wait::ElementState;
