//! Type-safe identifiers for handles and navigation state.
//!
//! Newtype wrappers prevent mixing a handle ID with other UUIDs and a
//! navigation generation with arbitrary counters.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// HandleId
// ============================================================================

/// Unique identifier of a [`DriverHandle`](crate::driver::DriverHandle).
///
/// Used to correlate log events from pages sharing one handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleId(Uuid);

impl HandleId {
    /// Generates a new random handle ID.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for HandleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps log lines readable.
        let full = self.0.simple().to_string();
        f.write_str(&full[..8])
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Navigation generation of a driver handle.
///
/// Starts at zero and increases by one on every committed navigation,
/// including navigations triggered by clicking a link or submitting a form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Generation(u64);

impl Generation {
    /// The generation of a freshly created handle.
    pub const INITIAL: Generation = Generation(0);

    /// Creates a generation from a raw counter.
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the generation following this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw counter.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
