// Integration tests for BasePage primitives
//
// Tests cover:
// - is_visible() never fails on zero matches
// - timeouts leave the handle usable
// - stale pages fail fast and carry both URLs
// - independent handles run concurrently
// - screenshots land in the configured directory

mod common;

use std::time::Duration;

use page_objects::testing::{MockDocument, MockDriver, MockElement};
use page_objects::{BasePage, By, DriverHandle, Error, LoginPage, PageObject};

#[tokio::test]
async fn test_is_visible_on_nonexistent_selector() {
    common::init_tracing();
    let handle = DriverHandle::new(
        MockDriver::with_document(common::HOME_URL, MockDocument::home()),
        common::fast_options(),
    );
    let page = BasePage::new(&handle, "Home");

    for selector in ["#nothing-here", ".missing", "xpath=//table", "text=Nope"] {
        assert!(
            !page
                .is_visible(selector)
                .await
                .expect("is_visible must not fail on zero matches"),
            "{selector}"
        );
    }
}

#[tokio::test]
async fn test_timeouts_are_not_fatal_to_handle() {
    let driver = MockDriver::with_document(common::LOGIN_URL, MockDocument::login_form());
    driver.set_network_busy(true);
    let handle = DriverHandle::new(driver.clone(), common::fast_options());
    let login = LoginPage::new(&handle);

    let err = login.base().wait_for_navigation().await.unwrap_err();
    assert!(err.is_timeout());
    assert!(err.is_recoverable());

    let err = login.base().wait_for_element("#error").await.unwrap_err();
    assert!(err.is_timeout());

    driver.set_network_busy(false);
    login.base().wait_for_navigation().await.expect("Network should be idle");
    login.login("student", "Password123").await.expect("Failed to log in");
}

#[tokio::test]
async fn test_stale_error_carries_urls() {
    let driver = MockDriver::with_document(common::LOGIN_URL, MockDocument::login_form());
    let handle = DriverHandle::new(driver, common::fast_options());
    let login = LoginPage::new(&handle);
    let other = BasePage::new(&handle, "Other");

    other
        .navigate("https://app.test/elsewhere")
        .await
        .expect("Failed to navigate");
    assert!(other.is_current());

    match login.is_loaded().await {
        Err(Error::StalePage {
            page,
            anchored_url,
            current_url,
        }) => {
            assert_eq!(page, "LoginPage");
            assert_eq!(anchored_url, common::LOGIN_URL);
            assert_eq!(current_url, "https://app.test/elsewhere");
        }
        other => panic!("expected StalePage, got {other:?}"),
    }

    // Explicit re-anchoring is the way back.
    login.base().rebind();
    assert!(!login.is_loaded().await.expect("Failed to check load state"));
}

#[tokio::test]
async fn test_independent_handles_run_concurrently() {
    let make = |user: &'static str| async move {
        let driver = MockDriver::with_document(common::LOGIN_URL, MockDocument::login_form());
        let handle = DriverHandle::new(driver.clone(), common::fast_options());
        LoginPage::new(&handle).login(user, "pw").await?;
        Ok::<_, Error>(driver.value_of(&By::id("username")))
    };

    let (a, b) = tokio::join!(make("alice"), make("bob"));
    assert_eq!(a.expect("alice failed").as_deref(), Some("alice"));
    assert_eq!(b.expect("bob failed").as_deref(), Some("bob"));
}

#[tokio::test]
async fn test_handles_shared_across_tasks() {
    let doc = MockDocument::new().with(
        MockElement::new("div")
            .id("late")
            .visible_after(Duration::from_millis(30)),
    );
    let handle = DriverHandle::new(
        MockDriver::with_document(common::HOME_URL, doc),
        common::fast_options(),
    );

    let task = tokio::spawn({
        let handle = handle.clone();
        async move {
            let page = BasePage::new(&handle, "Waiter");
            page.wait_for_element("#late").await
        }
    });

    task.await
        .expect("Task panicked")
        .expect("Element never appeared");
}

#[tokio::test]
async fn test_screenshot_into_configured_dir() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let options = common::fast_options().with_screenshot_dir(dir.path());
    let handle = DriverHandle::new(
        MockDriver::with_document(common::HOME_URL, MockDocument::home()),
        options,
    );
    let page = BasePage::new(&handle, "Home");

    let png = page
        .take_screenshot("home.png")
        .await
        .ok_or_else(|| anyhow::anyhow!("PNG not written"))?;
    let jpg = page.capture_screenshot("home.jpeg").await?;

    assert_eq!(&std::fs::read(png)?[..4], b"\x89PNG");
    assert_eq!(&std::fs::read(jpg)?[..3], b"\xff\xd8\xff");
    Ok(())
}
