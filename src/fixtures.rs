//! Test credentials and expected messages.
//!
//! # Example
//!
//! ```ignore
//! use page_objects::fixtures::{self, VALID_USER};
//!
//! login.login(VALID_USER.username, VALID_USER.password).await?;
//! assert_eq!(login.get_error_message().await?, fixtures::INVALID_USERNAME);
//! ```

use std::fmt;

use serde::Serialize;

// ============================================================================
// Credentials
// ============================================================================

/// A user account known to the application under test.
#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Login name.
    pub username: &'static str,
    /// Password.
    pub password: &'static str,
    /// Contact email.
    pub email: &'static str,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("email", &self.email)
            .finish()
    }
}

/// Account that logs in successfully.
pub const VALID_USER: Credentials = Credentials {
    username: "student",
    password: "Password123",
    email: "student@example.com",
};

/// Account rejected with [`INVALID_USERNAME`].
pub const INVALID_USER: Credentials = Credentials {
    username: "invaliduser",
    password: "wrongpassword",
    email: "invalid@example.com",
};

/// Administrator account.
pub const ADMIN_USER: Credentials = Credentials {
    username: "admin",
    password: "Admin@123",
    email: "admin@example.com",
};

// ============================================================================
// Messages
// ============================================================================

/// Shown for an unknown username.
pub const INVALID_USERNAME: &str = "Your username is invalid!";

/// Shown for a known username with the wrong password.
pub const INVALID_PASSWORD: &str = "Your password is invalid!";

/// Shown when a required field is left empty.
pub const EMPTY_FIELDS: &str = "Please fill in all fields";

/// Shown when the backend cannot be reached.
pub const NETWORK_ERROR: &str = "Network request failed";
