// Shared helpers for integration tests.
//
// Each test binary includes this module and uses a different subset.
#![allow(dead_code)]

use std::time::Duration;

use page_objects::PageOptions;
use page_objects::fixtures;
use page_objects::testing::{MockDocument, MockDriver, MockElement, Reaction};

pub const BASE_URL: &str = "https://app.test";
pub const LOGIN_URL: &str = "https://app.test/login";
pub const HOME_URL: &str = "https://app.test/";

/// Installs a subscriber once; `RUST_LOG=page_objects=debug` shows driver events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Short deadlines so failure paths finish quickly.
pub fn fast_options() -> PageOptions {
    PageOptions::new()
        .with_base_url(BASE_URL)
        .with_navigation_timeout(Duration::from_millis(200))
        .with_action_timeout(Duration::from_millis(100))
        .with_wait_timeout(Duration::from_millis(200))
        .with_poll_interval(Duration::from_millis(5))
}

/// Bare login markup: only the `#id` fallbacks match.
pub fn bare_login_document() -> MockDocument {
    MockDocument::new()
        .with(MockElement::new("input").id("username"))
        .with(MockElement::new("input").id("password"))
        .with(MockElement::new("button").id("submit").text("Go"))
        .with(MockElement::new("div").id("error").hidden())
}

/// A driver on the bare login page whose submit reveals an error for
/// `invaliduser/wrongpass` and navigates home for the valid user.
pub fn scripted_login_driver() -> MockDriver {
    let driver = MockDriver::with_document(LOGIN_URL, bare_login_document());
    driver.route(HOME_URL, MockDocument::home());
    driver.on_click("submit", |doc| {
        let username = doc.value_of("username").unwrap_or_default().to_string();
        let password = doc.value_of("password").unwrap_or_default().to_string();

        if username == fixtures::VALID_USER.username && password == fixtures::VALID_USER.password {
            return Reaction::Navigate(HOME_URL.to_string());
        }
        if username == "invaliduser" && password == "wrongpass" {
            if let Some(error) = doc.element_mut("error") {
                error.set_text(fixtures::INVALID_USERNAME);
                error.reveal();
            }
        }
        Reaction::Stay
    });
    driver
}
