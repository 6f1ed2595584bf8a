//! Port abstraction for user persistence adapters and their errors.
//!
//! Email is the natural key. Adapters classify storage failures into the
//! variants below and never forward raw driver text to callers.
use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The store rejected an insert because the email is already taken.
        DuplicateEmail { email: String } => "user with email '{email}' already exists",
        /// No stored user matches the requested email.
        EmailNotFound { email: String } => "email '{email}' not found",
        /// Any other storage failure; the message is safe to surface.
        Internal { message: String } => "user repository failure: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch the user whose email matches exactly.
    async fn read_by_email(&self, email: &str) -> Result<User, UserPersistenceError>;
}
