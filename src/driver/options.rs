//! Page timing and environment configuration.
//!
//! Options are layered: defaults, then an optional JSON file, then
//! environment variables.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use page_objects::PageOptions;
//!
//! let options = PageOptions::from_json_file("pages.json")?
//!     .with_env_overrides()?
//!     .with_action_timeout(Duration::from_secs(5));
//! options.validate()?;
//! ```
//!
//! # Environment
//!
//! | Variable | Field |
//! |----------|-------|
//! | `BASE_URL` | `base_url` |
//! | `PAGE_NAVIGATION_TIMEOUT_MS` | `navigation_timeout` |
//! | `PAGE_ACTION_TIMEOUT_MS` | `action_timeout` |
//! | `PAGE_WAIT_TIMEOUT_MS` | `wait_timeout` |
//! | `PAGE_SCREENSHOT_DIR` | `screenshot_dir` |

// ============================================================================
// Imports
// ============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default application under test.
pub const DEFAULT_BASE_URL: &str = "https://demo.playwright.dev";

/// Default navigation deadline (30 seconds).
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default deadline for click, fill and other actions (10 seconds).
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for visibility waits (5 seconds).
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default polling interval for waits (50 milliseconds).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Default directory for diagnostic screenshots.
pub const DEFAULT_SCREENSHOT_DIR: &str = "test-results";

// ============================================================================
// PageOptions
// ============================================================================

/// Configuration shared by every page built on one handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    /// Base URL page paths are joined to.
    pub base_url: String,

    /// Deadline for `goto` and network-idle waits.
    pub navigation_timeout: Duration,

    /// Deadline for resolving and acting on an element.
    pub action_timeout: Duration,

    /// Deadline for visibility and URL waits.
    pub wait_timeout: Duration,

    /// Interval between polls while waiting.
    pub poll_interval: Duration,

    /// Directory diagnostic screenshots are written to.
    pub screenshot_dir: PathBuf,

    /// Fail operations on pages whose handle navigated away.
    pub stale_check: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl PageOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            action_timeout: DEFAULT_ACTION_TIMEOUT,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            screenshot_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
            stale_check: true,
        }
    }

    /// Creates options from defaults and the process environment.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if a timeout variable is not an integer.
    pub fn from_env() -> Result<Self> {
        Self::new().with_env_overrides()
    }

    /// Creates options from a JSON document layered over defaults.
    ///
    /// Recognised keys: `base_url`, `navigation_timeout_ms`,
    /// `action_timeout_ms`, `wait_timeout_ms`, `poll_interval_ms`,
    /// `screenshot_dir`, `stale_check`. Unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// [`Error::Json`] on malformed input.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: OptionsFile = serde_json::from_str(json)?;
        Ok(file.apply(Self::new()))
    }

    /// Reads [`from_json_str`](Self::from_json_str) input from a file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, [`Error::Json`] if it is malformed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl PageOptions {
    /// Sets the base URL.
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the navigation timeout.
    #[inline]
    #[must_use]
    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Sets the action timeout.
    #[inline]
    #[must_use]
    pub fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    /// Sets the wait timeout.
    #[inline]
    #[must_use]
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Sets the polling interval.
    #[inline]
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the screenshot directory.
    #[inline]
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// Enables or disables stale page detection.
    #[inline]
    #[must_use]
    pub fn with_stale_check(mut self, enabled: bool) -> Self {
        self.stale_check = enabled;
        self
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if a timeout variable is not an integer.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if a timeout value is not an integer.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url;
        }
        if let Some(ms) = millis_var(&lookup, "PAGE_NAVIGATION_TIMEOUT_MS")? {
            self.navigation_timeout = ms;
        }
        if let Some(ms) = millis_var(&lookup, "PAGE_ACTION_TIMEOUT_MS")? {
            self.action_timeout = ms;
        }
        if let Some(ms) = millis_var(&lookup, "PAGE_WAIT_TIMEOUT_MS")? {
            self.wait_timeout = ms;
        }
        if let Some(dir) = lookup("PAGE_SCREENSHOT_DIR").filter(|v| !v.trim().is_empty()) {
            self.screenshot_dir = PathBuf::from(dir);
        }
        Ok(self)
    }
}

fn millis_var<F>(lookup: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| Error::config(format!("{key} must be milliseconds, got {raw:?}"))),
    }
}

// ============================================================================
// Validation
// ============================================================================

impl PageOptions {
    /// Validates the options.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for an unparseable base URL, a zero timeout, or a
    /// poll interval not shorter than the wait timeout.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("invalid base_url {:?}: {e}", self.base_url)))?;

        for (name, value) in [
            ("navigation_timeout", self.navigation_timeout),
            ("action_timeout", self.action_timeout),
            ("wait_timeout", self.wait_timeout),
            ("poll_interval", self.poll_interval),
        ] {
            if value.is_zero() {
                return Err(Error::config(format!("{name} must be greater than zero")));
            }
        }

        if self.poll_interval >= self.wait_timeout {
            return Err(Error::config(
                "poll_interval must be shorter than wait_timeout",
            ));
        }
        Ok(())
    }

    /// Joins a route path onto the base URL.
    ///
    /// Exactly one slash separates the two, so a base URL with a path
    /// prefix keeps it: `https://host/app` + `/login` is `https://host/app/login`.
    ///
    /// # Errors
    ///
    /// [`Error::Url`] if the result is not a valid URL.
    pub fn url_for(&self, path: &str) -> Result<String> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?.to_string())
    }
}

// ============================================================================
// OptionsFile
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsFile {
    base_url: Option<String>,
    navigation_timeout_ms: Option<u64>,
    action_timeout_ms: Option<u64>,
    wait_timeout_ms: Option<u64>,
    poll_interval_ms: Option<u64>,
    screenshot_dir: Option<PathBuf>,
    stale_check: Option<bool>,
}

impl OptionsFile {
    fn apply(self, mut options: PageOptions) -> PageOptions {
        if let Some(v) = self.base_url {
            options.base_url = v;
        }
        if let Some(ms) = self.navigation_timeout_ms {
            options.navigation_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.action_timeout_ms {
            options.action_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.wait_timeout_ms {
            options.wait_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.poll_interval_ms {
            options.poll_interval = Duration::from_millis(ms);
        }
        if let Some(dir) = self.screenshot_dir {
            options.screenshot_dir = dir;
        }
        if let Some(v) = self.stale_check {
            options.stale_check = v;
        }
        options
    }
}

// ============================================================================
// Tests
// ============================================================================
