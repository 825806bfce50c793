//! In-memory [`Driver`] implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::driver::{Action, Driver, ImageFormat, LoadState, Location};
use crate::error::{Error, Result};
use crate::page::By;

use super::document::MockDocument;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = b"\xff\xd8\xff\xe0";

// ============================================================================
// Types
// ============================================================================

/// What the document does after a scripted click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// The document stays loaded, possibly mutated by the handler.
    Stay,
    /// The click commits a navigation to the URL.
    Navigate(String),
}

/// One call received by a [`MockDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    /// `goto(url)`.
    Goto(String),
    /// `count(by)`.
    Count(By),
    /// `perform(by, action)`.
    Perform(By, Action),
    /// `is_visible(by)`.
    IsVisible(By),
    /// `text_content(by)`.
    TextContent(By),
    /// `attribute(by, name)`.
    Attribute(By, String),
    /// `wait_for_load_state(state)`.
    WaitForLoadState(LoadState),
    /// `screenshot(format)`.
    Screenshot(ImageFormat),
}

impl DriverCall {
    /// Returns `true` for calls that change the document.
    #[must_use]
    pub fn is_action(&self) -> bool {
        matches!(self, Self::Perform(..) | Self::Goto(_))
    }
}

type ClickHandler = Arc<dyn Fn(&mut MockDocument) -> Reaction + Send + Sync>;

struct MockState {
    location: Location,
    document: MockDocument,
    routes: FxHashMap<String, MockDocument>,
    unreachable: FxHashSet<String>,
    click_handlers: FxHashMap<String, ClickHandler>,
    network_busy: bool,
    fail_screenshots: bool,
    read_latency: Duration,
    recording: bool,
    calls: Vec<DriverCall>,
}

impl MockState {
    fn log(&mut self, call: DriverCall) {
        if self.recording {
            self.calls.push(call);
        }
    }

    fn commit(&mut self, url: &str) {
        let mut document = self.routes.get(url).cloned().unwrap_or_default();
        document.mark_loaded();
        self.document = document;
        self.location = Location::new(url, self.location.generation.next());
        debug!(url, generation = %self.location.generation, "Mock navigation committed");
    }
}

// ============================================================================
// MockDriver
// ============================================================================

/// Scriptable driver over a [`MockDocument`].
///
/// Clones share state, so a test can keep one clone for inspection while a
/// [`DriverHandle`](crate::DriverHandle) owns another.
///
/// # Example
///
/// ```ignore
/// let driver = MockDriver::with_document("https://app.test/login", MockDocument::login_form());
/// driver.on_click("submit", |doc| {
///     doc.element_mut("error").map(|e| e.reveal());
///     Reaction::Stay
/// });
/// let handle = DriverHandle::new(driver.clone(), PageOptions::new());
/// ```
#[derive(Clone)]
pub struct MockDriver {
    state: Arc<Mutex<MockState>>,
}

impl std::fmt::Debug for MockDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockDriver")
            .field("location", &state.location)
            .field("elements", &state.document.elements().len())
            .field("calls", &state.calls.len())
            .finish()
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Creates a driver on an empty `about:blank` document.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Location::blank(), MockDocument::new())
    }

    /// Creates a driver already showing `document` at `url`.
    ///
    /// The location starts at the initial generation.
    #[must_use]
    pub fn with_document(url: &str, document: MockDocument) -> Self {
        let mut location = Location::blank();
        location.url = url.to_string();
        Self::from_parts(location, document)
    }

    fn from_parts(location: Location, mut document: MockDocument) -> Self {
        document.mark_loaded();
        Self {
            state: Arc::new(Mutex::new(MockState {
                location,
                document,
                routes: FxHashMap::default(),
                unreachable: FxHashSet::default(),
                click_handlers: FxHashMap::default(),
                network_busy: false,
                fail_screenshots: false,
                read_latency: Duration::ZERO,
                recording: true,
                calls: Vec::new(),
            })),
        }
    }
}

// ============================================================================
// MockDriver - Scripting
// ============================================================================

impl MockDriver {
    /// Serves `document` whenever `url` is loaded.
    pub fn route(&self, url: &str, document: MockDocument) {
        self.state.lock().routes.insert(url.to_string(), document);
    }

    /// Makes `goto(url)` fail as unreachable.
    pub fn fail_navigation(&self, url: &str) {
        self.state.lock().unreachable.insert(url.to_string());
    }

    /// Keeps the network busy so network-idle waits never finish.
    pub fn set_network_busy(&self, busy: bool) {
        self.state.lock().network_busy = busy;
    }

    /// Makes screenshot capture fail.
    pub fn fail_screenshots(&self, fail: bool) {
        self.state.lock().fail_screenshots = fail;
    }

    /// Delays every text and attribute read by `latency`.
    pub fn set_read_latency(&self, latency: Duration) {
        self.state.lock().read_latency = latency;
    }

    async fn read_delay(&self) {
        let latency = self.state.lock().read_latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    /// Runs `handler` when the element with id `element_id` is clicked.
    pub fn on_click<F>(&self, element_id: &str, handler: F)
    where
        F: Fn(&mut MockDocument) -> Reaction + Send + Sync + 'static,
    {
        self.state
            .lock()
            .click_handlers
            .insert(element_id.to_string(), Arc::new(handler));
    }

    /// Mutates the loaded document in place.
    pub fn edit_document<R>(&self, edit: impl FnOnce(&mut MockDocument) -> R) -> R {
        edit(&mut self.state.lock().document)
    }
}

// ============================================================================
// MockDriver - Inspection
// ============================================================================

impl MockDriver {
    /// Returns every call received, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<DriverCall> {
        self.state.lock().calls.clone()
    }

    /// Returns only the performed actions, in order.
    #[must_use]
    pub fn actions(&self) -> Vec<(By, Action)> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                DriverCall::Perform(by, action) => Some((by.clone(), action.clone())),
                _ => None,
            })
            .collect()
    }

    /// Turns the call log on or off.
    pub fn set_recording(&self, recording: bool) {
        self.state.lock().recording = recording;
    }

    /// Forgets recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Returns the form value of the first match of `by`.
    #[must_use]
    pub fn value_of(&self, by: &By) -> Option<String> {
        self.state
            .lock()
            .document
            .find(by)
            .map(|e| e.value().to_string())
    }

    /// Returns whether the first match of `by` is checked.
    #[must_use]
    pub fn is_checked(&self, by: &By) -> bool {
        self.state
            .lock()
            .document
            .find(by)
            .is_some_and(|e| e.is_checked())
    }
}

// ============================================================================
// Driver
// ============================================================================

#[async_trait]
impl Driver for MockDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.log(DriverCall::Goto(url.to_string()));
        if state.unreachable.contains(url) {
            return Err(Error::navigation(url, "net::ERR_NAME_NOT_RESOLVED"));
        }
        state.commit(url);
        Ok(())
    }

    fn location(&self) -> Location {
        self.state.lock().location.clone()
    }

    async fn count(&self, by: &By) -> Result<usize> {
        let mut state = self.state.lock();
        state.log(DriverCall::Count(by.clone()));
        Ok(state.document.count(by))
    }

    async fn perform(&self, by: &By, action: &Action) -> Result<()> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.log(DriverCall::Perform(by.clone(), action.clone()));

        let visible = state.document.is_visible(by);
        let Some(element) = state.document.find_mut(by) else {
            return Err(Error::element_not_found(by.to_string()));
        };

        if action.requires_interactable() {
            if !visible {
                return Err(Error::not_interactable(by.to_string(), "element is not visible"));
            }
            if element.is_disabled() {
                return Err(Error::not_interactable(by.to_string(), "element is disabled"));
            }
        }

        match action {
            Action::Fill { text } => element.set_value(text),
            Action::Clear => element.set_value(""),
            Action::Check => element.set_checked(),
            Action::Click => {
                let handler = element
                    .attribute("id")
                    .and_then(|id| state.click_handlers.get(id).cloned());
                if let Some(handler) = handler {
                    if let Reaction::Navigate(url) = handler(&mut state.document) {
                        state.commit(&url);
                    }
                }
            }
            Action::DoubleClick | Action::Hover | Action::Press { .. } | Action::ScrollIntoView => {}
        }
        Ok(())
    }

    async fn is_visible(&self, by: &By) -> Result<bool> {
        let mut state = self.state.lock();
        state.log(DriverCall::IsVisible(by.clone()));
        Ok(state.document.is_visible(by))
    }

    async fn text_content(&self, by: &By) -> Result<Option<String>> {
        self.read_delay().await;
        let mut state = self.state.lock();
        state.log(DriverCall::TextContent(by.clone()));
        state
            .document
            .find(by)
            .map(|e| e.text_content().map(str::to_string))
            .ok_or_else(|| Error::element_not_found(by.to_string()))
    }

    async fn attribute(&self, by: &By, name: &str) -> Result<Option<String>> {
        self.read_delay().await;
        let mut state = self.state.lock();
        state.log(DriverCall::Attribute(by.clone(), name.to_string()));
        state
            .document
            .find(by)
            .map(|e| e.attribute(name).map(str::to_string))
            .ok_or_else(|| Error::element_not_found(by.to_string()))
    }

    async fn wait_for_load_state(&self, state: LoadState) -> Result<()> {
        let busy = {
            let mut inner = self.state.lock();
            inner.log(DriverCall::WaitForLoadState(state));
            inner.network_busy
        };
        if busy && state == LoadState::NetworkIdle {
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    async fn screenshot(&self, format: ImageFormat) -> Result<String> {
        let mut state = self.state.lock();
        state.log(DriverCall::Screenshot(format));
        if state.fail_screenshots {
            return Err(Error::screenshot("capture failed"));
        }
        let magic = match format {
            ImageFormat::Png => PNG_MAGIC,
            ImageFormat::Jpeg(_) => JPEG_MAGIC,
        };
        Ok(Base64Standard.encode(magic))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::identifiers::Generation;
    use crate::page::Key;
    use crate::testing::MockElement;

    #[tokio::test]
    async fn test_goto_advances_generation() {
        let driver = MockDriver::new();
        assert_eq!(driver.location(), Location::blank());

        driver.goto("https://app.test/a").await.unwrap();
        driver.goto("https://app.test/a").await.unwrap();

        let location = driver.location();
        assert_eq!(location.url, "https://app.test/a");
        assert_eq!(location.generation, Generation::new(2));
    }

    #[tokio::test]
    async fn test_routes_serve_fresh_documents() {
        let driver = MockDriver::new();
        driver.route("https://app.test/login", MockDocument::login_form());

        driver.goto("https://app.test/login").await.unwrap();
        driver
            .perform(&By::id("username"), &Action::fill("student"))
            .await
            .unwrap();
        assert_eq!(driver.value_of(&By::id("username")).as_deref(), Some("student"));

        driver.goto("https://app.test/login").await.unwrap();
        assert_eq!(driver.value_of(&By::id("username")).as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_click_handler_can_navigate() {
        let driver = MockDriver::with_document("https://app.test/login", MockDocument::login_form());
        driver.route("https://app.test/", MockDocument::home());
        driver.on_click("submit", |_| Reaction::Navigate("https://app.test/".into()));

        driver.perform(&By::id("submit"), &Action::Click).await.unwrap();

        assert_eq!(driver.location().url, "https://app.test/");
        assert_eq!(driver.count(&By::class("user-profile")).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_perform_errors() {
        let doc = MockDocument::new()
            .with(MockElement::new("button").id("off").disabled())
            .with(MockElement::new("div").id("ghost").hidden());
        let driver = MockDriver::with_document("https://app.test/", doc);

        let err = driver.perform(&By::id("nope"), &Action::Click).await.unwrap_err();
        assert!(matches!(err, Error::ElementNotFound { .. }));

        let err = driver.perform(&By::id("off"), &Action::Click).await.unwrap_err();
        assert!(matches!(err, Error::ElementNotInteractable { .. }));

        let err = driver
            .perform(&By::id("ghost"), &Action::press(Key::Tab))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ElementNotInteractable { .. }));

        driver
            .perform(&By::id("ghost"), &Action::ScrollIntoView)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_calls_are_recorded() {
        let driver = MockDriver::with_document("https://app.test/", MockDocument::home());
        driver.count(&By::tag("nav")).await.unwrap();
        driver.perform(&By::tag("nav"), &Action::Hover).await.unwrap();

        assert_eq!(
            driver.calls(),
            vec![
                DriverCall::Count(By::tag("nav")),
                DriverCall::Perform(By::tag("nav"), Action::Hover),
            ]
        );
        assert!(driver.calls()[1].is_action());
        driver.clear_calls();
        assert!(driver.calls().is_empty());
    }
}
