//! User account service.
//!
//! Implements the [`UserAccounts`] driving port on top of the user repository
//! and the optional side-cache. Validation runs here; storage failures are
//! translated into domain errors without exposing adapter text for internal
//! faults.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{UserAccounts, UserCache, UserPersistenceError, UserRepository};
use crate::domain::{BestEffort, Error, User, UserValidationError, validate_email};

/// Service orchestrating user creation and lookup.
#[derive(Clone)]
pub struct UserService<R, C> {
    repository: Arc<R>,
    cache: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<R, C> UserService<R, C> {
    /// Create a service over the given repository, cache and clock.
    pub fn new(repository: Arc<R>, cache: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            cache,
            clock,
        }
    }
}

fn map_validation_error(error: UserValidationError) -> Error {
    match error {
        UserValidationError::InvalidEmail => {
            Error::invalid_request(error.to_string()).with_details(json!({
                "field": "email",
                "code": "invalid_email",
            }))
        }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::conflict(error.to_string()).with_details(json!({ "code": "duplicate_email" }))
        }
        UserPersistenceError::EmailNotFound { .. } => {
            Error::not_found(error.to_string()).with_details(json!({ "code": "email_not_found" }))
        }
        UserPersistenceError::Internal { message } => {
            debug!(%message, "user repository failure");
            Error::internal("internal error")
        }
    }
}

#[async_trait]
impl<R, C> UserAccounts for UserService<R, C>
where
    R: UserRepository,
    C: UserCache,
{
    async fn create_user(&self, mut user: User) -> Result<User, Error> {
        user.set_defaults(self.clock.utc());
        user.sanitize();
        user.validate().map_err(map_validation_error)?;

        self.repository
            .create(&user)
            .await
            .map_err(map_persistence_error)?;
        Ok(user)
    }

    async fn read_by_email(&self, email: &str) -> Result<User, Error> {
        let email = email.trim();
        validate_email(email).map_err(map_validation_error)?;

        let user = self
            .repository
            .read_by_email(email)
            .await
            .map_err(map_persistence_error)?;

        // Cache population is an optimisation; a failed write never fails the read.
        self.cache
            .put(&user.email, &user)
            .await
            .best_effort("cache user after read");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
