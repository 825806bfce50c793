//! Driver capability, handle and configuration.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Driver`] | Capability implemented by a browser automation engine |
//! | [`DriverHandle`] | Shared reference to one driver plus its options |
//! | [`HandleBuilder`] | Validating builder for handles |
//! | [`PageOptions`] | Timeouts, base URL, screenshot directory |
//! | [`Action`] | Element action primitives |

// ============================================================================
// Submodules
// ============================================================================

/// Element action primitives.
pub mod action;

/// Builder for [`DriverHandle`].
pub mod builder;

/// The [`Driver`] trait and the types it exchanges.
pub mod capability;

/// Shared driver handle.
pub mod core;

/// Page configuration.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use action::Action;
pub use builder::HandleBuilder;
pub use capability::{Driver, ImageFormat, LoadState, Location};
pub use self::core::DriverHandle;
pub use options::PageOptions;
