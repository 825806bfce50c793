//! Login flow walkthrough on the in-memory driver.
//!
//! Demonstrates:
//! - Layering PageOptions from defaults and environment
//! - Opening LoginPage and checking it loaded
//! - A rejected login and its error message
//! - A successful login, staleness of the old page and the HomePage
//! - Diagnostic screenshots
//!
//! Usage:
//!   cargo run --example login_flow
//!   cargo run --example login_flow -- --debug
//!   BASE_URL=https://staging.test cargo run --example login_flow

// ============================================================================
// Imports
// ============================================================================

use page_objects::fixtures::{self, VALID_USER};
use page_objects::testing::{MockDocument, MockDriver, Reaction};
use page_objects::{DriverHandle, HomePage, LoginPage, PageObject, PageOptions, Result};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let debug = std::env::args().any(|a| a == "--debug");
    init_logging(debug);

    if let Err(e) = run().await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        "page_objects=debug"
    } else {
        "page_objects=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

/// A driver serving a login form that rejects everything but the valid user.
fn demo_driver(options: &PageOptions) -> Result<MockDriver> {
    let login_url = options.url_for("/login")?;
    let home_url = options.url_for("/")?;

    let driver = MockDriver::new();
    driver.route(&login_url, MockDocument::login_form());
    driver.route(&home_url, MockDocument::home());
    driver.on_click("submit", move |doc| {
        let accepted = doc.value_of("username") == Some(VALID_USER.username)
            && doc.value_of("password") == Some(VALID_USER.password);
        if accepted {
            return Reaction::Navigate(home_url.clone());
        }
        if let Some(error) = doc.element_mut("error") {
            error.set_text(fixtures::INVALID_USERNAME);
            error.reveal();
        }
        Reaction::Stay
    });
    Ok(driver)
}

async fn run() -> Result<()> {
    println!("=== Login Flow ===\n");

    // ========================================================================
    // Configure
    // ========================================================================

    println!("[1] Loading options...");
    let options = PageOptions::new().with_env_overrides()?;
    let screenshot_dir = std::env::temp_dir().join("page-objects-demo");
    let options = options.with_screenshot_dir(&screenshot_dir);
    options.validate()?;
    println!("    Base URL: {}", options.base_url);
    println!("    ✓ Options ready\n");

    let handle = DriverHandle::builder()
        .driver(demo_driver(&options)?)
        .options(options)
        .build()?;

    // ========================================================================
    // Rejected login
    // ========================================================================

    println!("[2] Opening login page...");
    let login = LoginPage::new(&handle);
    login.open().await?;
    println!("    URL: {}", login.base().get_current_url());
    println!("    Loaded: {}\n", login.is_loaded().await?);

    println!("[3] Logging in with bad credentials...");
    let user = fixtures::INVALID_USER;
    login.login(user.username, user.password).await?;
    println!("    Error: {}", login.get_error_message().await?);
    if let Some(path) = login.base().take_screenshot("rejected.png").await {
        println!("    Screenshot: {}", path.display());
    }
    println!("    ✓ Rejected as expected\n");

    // ========================================================================
    // Successful login
    // ========================================================================

    println!("[4] Logging in as {}...", VALID_USER.username);
    login.clear_form().await?;
    login.login(VALID_USER.username, VALID_USER.password).await?;
    println!("    URL: {}", handle.location().url);

    match login.is_error_displayed().await {
        Err(e) if e.is_stale() => println!("    Old login page is stale: {e}"),
        other => println!("    Unexpected: {other:?}"),
    }

    let home = HomePage::new(&handle);
    println!("    Home loaded: {}", home.is_loaded().await?);
    println!(
        "    Welcome: {}",
        home.get_welcome_message().await?.unwrap_or_default()
    );
    println!("    ✓ Logged in\n");

    // ========================================================================
    // Logout
    // ========================================================================

    println!("[5] Logging out...");
    home.logout().await?;
    println!("    ✓ Done");

    Ok(())
}
