//! Driving port for user account use-cases.
//!
//! The façade and HTTP handlers depend on [`UserAccounts`] rather than on a
//! concrete service so transports stay ignorant of persistence wiring.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Use-cases for registering and looking up users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Default, sanitise, validate and persist a new user.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_request` error for a malformed email, `conflict`
    /// when the email is already registered, and `internal_error` for
    /// storage failures.
    async fn create_user(&self, user: User) -> Result<User, Error>;

    /// Look up a user by email.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_request` error for a malformed email, `not_found`
    /// when nothing matches, and `internal_error` for storage failures.
    async fn read_by_email(&self, email: &str) -> Result<User, Error>;
}
