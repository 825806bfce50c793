//! The driver capability consumed by pages.
//!
//! A [`Driver`] is one live browser tab or context owned by the test runner.
//! This crate never launches browsers; it is handed an implementation and
//! wraps every call in a deadline taken from [`PageOptions`](super::PageOptions).
//!
//! Implementations report failures with the crate taxonomy:
//!
//! | Situation | Error |
//! |-----------|-------|
//! | Network or DNS failure during `goto` | [`Error::Navigation`](crate::Error::Navigation) |
//! | No element matched | [`Error::ElementNotFound`](crate::Error::ElementNotFound) |
//! | Hidden, disabled or obscured element | [`Error::ElementNotInteractable`](crate::Error::ElementNotInteractable) |
//! | Anything else | [`Error::Protocol`](crate::Error::Protocol) |

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identifiers::Generation;
use crate::page::By;

use super::Action;

// ============================================================================
// Location
// ============================================================================

/// Current location of a driver handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Document URL.
    pub url: String,
    /// Number of committed navigations so far.
    pub generation: Generation,
}

impl Location {
    /// Creates a location.
    #[inline]
    pub fn new(url: impl Into<String>, generation: Generation) -> Self {
        Self {
            url: url.into(),
            generation,
        }
    }

    /// Location of a handle that never navigated.
    #[must_use]
    pub fn blank() -> Self {
        Self::new("about:blank", Generation::INITIAL)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.url, self.generation)
    }
}

// ============================================================================
// LoadState
// ============================================================================

/// Document load states a driver can wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// The `load` event fired.
    #[default]
    Load,
    /// The `DOMContentLoaded` event fired.
    #[serde(rename = "domcontentloaded")]
    DomContentLoaded,
    /// No network activity for a driver-defined quiet period.
    ///
    /// Best-effort: pages with persistent background traffic never settle.
    #[serde(rename = "networkidle")]
    NetworkIdle,
}

impl LoadState {
    /// Returns the event name for this load state.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "domcontentloaded",
            Self::NetworkIdle => "networkidle",
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

// ============================================================================
// ImageFormat
// ============================================================================

/// Image format for screenshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format with quality (0-100).
    Jpeg(u8),
}

impl ImageFormat {
    /// Creates JPEG format with quality clamped to 100.
    #[inline]
    #[must_use]
    pub fn jpeg(quality: u8) -> Self {
        Self::Jpeg(quality.min(100))
    }

    /// Picks a format from a file name's extension.
    ///
    /// `.jpg` and `.jpeg` select JPEG at quality 85, everything else PNG.
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => Self::jpeg(85),
            _ => Self::Png,
        }
    }

    /// Returns the MIME type for this format.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg(_) => "image/jpeg",
        }
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg(_) => "jpg",
        }
    }

    /// Returns the quality value if JPEG.
    #[must_use]
    pub fn quality(&self) -> Option<u8> {
        match self {
            Self::Png => None,
            Self::Jpeg(q) => Some(*q),
        }
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Browser automation capability backing one tab or context.
///
/// Element operations take a single [`By`] strategy and act on its first
/// match; fallback chains are resolved by [`Locator`](crate::page::Locator)
/// before the driver is called.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Loads `url`, resolving once navigation is committed.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Returns the current location without suspending.
    fn location(&self) -> Location;

    /// Counts elements currently matching `by`.
    async fn count(&self, by: &By) -> Result<usize>;

    /// Performs `action` on the first element matching `by`.
    async fn perform(&self, by: &By, action: &Action) -> Result<()>;

    /// Returns whether the first match is visible.
    ///
    /// Must return `Ok(false)` when nothing matches.
    async fn is_visible(&self, by: &By) -> Result<bool>;

    /// Returns the raw text content of the first match.
    async fn text_content(&self, by: &By) -> Result<Option<String>>;

    /// Returns an attribute of the first match.
    async fn attribute(&self, by: &By, name: &str) -> Result<Option<String>>;

    /// Suspends until the document reaches `state`.
    async fn wait_for_load_state(&self, state: LoadState) -> Result<()>;

    /// Captures the viewport and returns base64-encoded image data.
    async fn screenshot(&self, format: ImageFormat) -> Result<String>;
}

// ============================================================================
// Tests
// ============================================================================
