//! Diagnostic screenshots.

use std::path::{Component, Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use tracing::{debug, warn};

use crate::driver::ImageFormat;
use crate::error::{Error, Result};
use crate::page::wait::with_deadline;

use super::BasePage;

// ============================================================================
// BasePage - Screenshot
// ============================================================================

impl BasePage {
    /// Captures the viewport into `<screenshot_dir>/<name>`.
    ///
    /// Best effort for diagnostics: failures are logged and yield `None`.
    /// The image format follows the extension (`.jpg`/`.jpeg` or PNG).
    pub async fn take_screenshot(&self, name: &str) -> Option<PathBuf> {
        match self.capture_screenshot(name).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(
                    handle = %self.handle().id(),
                    page = %self.name(),
                    name,
                    error = %e,
                    "Screenshot failed"
                );
                None
            }
        }
    }

    /// Captures the viewport into `<screenshot_dir>/<name>`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `name` is empty or not a plain file name
    /// - [`Error::Screenshot`] if the driver cannot capture or returns bad data
    /// - [`Error::Io`] if the file cannot be written
    pub async fn capture_screenshot(&self, name: &str) -> Result<PathBuf> {
        validate_file_name(name)?;

        let format = ImageFormat::from_file_name(name);
        let path = self.options().screenshot_dir.join(name);
        debug!(
            handle = %self.handle().id(),
            page = %self.name(),
            path = %path.display(),
            format = ?format,
            "Capturing screenshot"
        );

        let data = with_deadline(
            || format!("screenshot({name})"),
            self.options().action_timeout,
            self.driver().screenshot(format),
        )
        .await?;

        let bytes = Base64Standard
            .decode(data.as_bytes())
            .map_err(|e| Error::screenshot(format!("Failed to decode base64: {e}")))?;

        tokio::fs::create_dir_all(&self.options().screenshot_dir).await?;
        tokio::fs::write(&path, bytes).await?;

        Ok(path)
    }
}

fn validate_file_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::invalid_argument(format!(
            "screenshot name must be a plain file name, got {name:?}"
        ))),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::driver::{DriverHandle, PageOptions};
    use crate::testing::MockDriver;

    fn page_in(dir: &Path, driver: MockDriver) -> (DriverHandle, BasePage) {
        let handle = DriverHandle::new(driver, PageOptions::new().with_screenshot_dir(dir));
        let page = BasePage::new(&handle, "Shot");
        (handle, page)
    }

    #[tokio::test]
    async fn test_screenshot_written_under_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");
        let (_, page) = page_in(&target, MockDriver::new());

        let path = page.take_screenshot("login.png").await.unwrap();
        assert_eq!(path, target.join("login.png"));
        assert!(!std::fs::read(&path).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_screenshot_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let driver = MockDriver::new();
        driver.fail_screenshots(true);
        let (_, page) = page_in(dir.path(), driver);

        assert!(page.take_screenshot("broken.png").await.is_none());
        assert!(!dir.path().join("broken.png").exists());
    }

    #[tokio::test]
    async fn test_screenshot_rejects_paths() {
        let dir = tempfile::tempdir().unwrap();
        let (_, page) = page_in(dir.path(), MockDriver::new());

        for name in ["", "../escape.png", "a/b.png", "/abs.png"] {
            let err = page.capture_screenshot(name).await.unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { .. }), "{name}");
        }
    }

    #[tokio::test]
    async fn test_screenshot_ignores_staleness() {
        let dir = tempfile::tempdir().unwrap();
        let driver = MockDriver::new();
        let (handle, page) = page_in(dir.path(), driver);
        handle.driver().goto("https://app.test/elsewhere").await.unwrap();

        assert!(!page.is_current());
        assert!(page.take_screenshot("after.jpg").await.is_some());
    }
}
