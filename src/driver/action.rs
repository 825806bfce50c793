//! Action primitives a driver performs on a resolved element.
//!
//! Actions are serialised the same way across drivers so call logs and
//! remote drivers share one vocabulary.
//!
//! | Action | Effect |
//! |--------|--------|
//! | `click` | single left click |
//! | `dblclick` | double click |
//! | `hover` | move pointer over the element |
//! | `check` | tick a checkbox or radio |
//! | `fill` | replace the input value |
//! | `clear` | empty the input value |
//! | `press` | press a named key with focus on the element |
//! | `scrollIntoView` | scroll until visible, no-op if already in view |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::page::Key;

// ============================================================================
// Action
// ============================================================================

/// Element action primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "params")]
pub enum Action {
    /// Click the element.
    #[serde(rename = "click")]
    Click,

    /// Double-click the element.
    #[serde(rename = "dblclick")]
    DoubleClick,

    /// Hover over the element.
    #[serde(rename = "hover")]
    Hover,

    /// Check a checkbox or radio input.
    #[serde(rename = "check")]
    Check,

    /// Fill an input with text, replacing its value.
    #[serde(rename = "fill")]
    Fill {
        /// Text to enter.
        text: String,
    },

    /// Clear an input.
    #[serde(rename = "clear")]
    Clear,

    /// Press a key while the element has focus.
    #[serde(rename = "press")]
    Press {
        /// Key to press.
        key: Key,
    },

    /// Scroll the element into view if needed.
    #[serde(rename = "scrollIntoView")]
    ScrollIntoView,
}

impl Action {
    /// Creates a fill action.
    #[inline]
    pub fn fill(text: impl Into<String>) -> Self {
        Self::Fill { text: text.into() }
    }

    /// Creates a press action.
    #[inline]
    #[must_use]
    pub fn press(key: Key) -> Self {
        Self::Press { key }
    }

    /// Returns the action name used in logs and operation descriptions.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::DoubleClick => "dblclick",
            Self::Hover => "hover",
            Self::Check => "check",
            Self::Fill { .. } => "fill",
            Self::Clear => "clear",
            Self::Press { .. } => "press",
            Self::ScrollIntoView => "scrollIntoView",
        }
    }

    /// Returns `true` if the action needs a visible, enabled element.
    ///
    /// Scrolling only needs the element to be attached.
    #[must_use]
    pub fn requires_interactable(&self) -> bool {
        !matches!(self, Self::ScrollIntoView)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Fill text never reaches logs.
            Self::Press { key } => write!(f, "press({key})"),
            other => f.write_str(other.name()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
