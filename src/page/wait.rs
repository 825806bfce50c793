//! Deadlines and polling.
//!
//! Every suspending operation carries an explicit deadline threaded from
//! [`PageOptions`](crate::PageOptions). Expiry yields
//! [`Error::Timeout`] and leaves the driver handle usable.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, timeout};

use crate::error::{Error, Result};

// ============================================================================
// ElementState
// ============================================================================

/// Element state a wait can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementState {
    /// A match exists and is visible.
    #[default]
    Visible,
    /// No visible match; an absent element counts as hidden.
    Hidden,
    /// At least one strategy matches.
    Attached,
    /// No strategy matches.
    Detached,
}

impl ElementState {
    /// Returns the state name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Attached => "attached",
            Self::Detached => "detached",
        }
    }
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Deadlines
// ============================================================================

/// Runs `fut` under `deadline`, mapping expiry to [`Error::Timeout`].
///
/// `operation` is only rendered when the deadline fires.
pub(crate) async fn with_deadline<T, D, F>(operation: D, deadline: Duration, fut: F) -> Result<T>
where
    D: FnOnce() -> String,
    F: Future<Output = Result<T>>,
{
    match timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(Error::timeout(operation(), deadline)),
    }
}

/// Polls `check` every `interval` until it yields a value or `deadline` expires.
///
/// Errors from `check` end the wait immediately.
pub(crate) async fn poll_until<T, D, P, Fut>(
    operation: D,
    deadline: Duration,
    interval: Duration,
    mut check: P,
) -> Result<T>
where
    D: FnOnce() -> String,
    P: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    with_deadline(operation, deadline, async move {
        loop {
            if let Some(value) = check().await? {
                return Ok(value);
            }
            sleep(interval).await;
        }
    })
    .await
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_with_deadline_passes_result_through() {
        let value = with_deadline(|| "noop".into(), Duration::from_millis(50), async {
            Ok::<_, Error>(7)
        })
        .await
        .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_with_deadline_times_out() {
        let err = with_deadline(
            || "never".into(),
            Duration::from_millis(20),
            std::future::pending::<Result<()>>(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Timeout { ref operation, timeout_ms: 20 } if operation == "never"
        ));
    }

    #[tokio::test]
    async fn test_poll_until_succeeds_after_retries() {
        let calls = &AtomicU32::new(0);
        let value = poll_until(
            || "counter".into(),
            Duration::from_secs(1),
            Duration::from_millis(1),
            move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Ok((n >= 3).then_some(n))
            },
        )
        .await
        .unwrap();

        assert_eq!(value, 3);
    }

    #[tokio::test]
    async fn test_poll_until_propagates_check_error() {
        let err = poll_until(
            || "failing".into(),
            Duration::from_secs(1),
            Duration::from_millis(1),
            || async { Err::<Option<()>, _>(Error::protocol("boom")) },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Protocol { .. }));
    }

    #[test]
    fn test_element_state_display() {
        assert_eq!(ElementState::default().to_string(), "visible");
        assert_eq!(ElementState::Detached.as_str(), "detached");
    }
}
