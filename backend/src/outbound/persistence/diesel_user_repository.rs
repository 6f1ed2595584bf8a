//! PostgreSQL-backed `UserRepository` using Diesel.
//!
//! Uniqueness violations are recognised by Diesel's structured
//! `DatabaseErrorKind`, never by matching driver text. Raw driver failures
//! are logged at `debug` and surface as a generic `Internal` error.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::User;
use crate::domain::ports::{UserPersistenceError, UserRepository};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Upper bound on a single repository call, checkout included.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    query_timeout: Duration,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Run `operation` under the query timeout. On expiry the future is
    /// dropped, which cancels the in-flight statement.
    async fn bounded<T, F>(&self, name: &'static str, operation: F) -> Result<T, UserPersistenceError>
    where
        F: Future<Output = Result<T, UserPersistenceError>>,
    {
        tokio::time::timeout(self.query_timeout, operation)
            .await
            .unwrap_or_else(|_| {
                debug!(operation = name, timeout = ?self.query_timeout, "user query timed out");
                Err(UserPersistenceError::internal("database operation timed out"))
            })
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    debug!(%error, "user repository connection checkout failed");
    UserPersistenceError::internal("database unavailable")
}

fn log_diesel_error(error: &DieselError, operation: &str) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        other => debug!(error = %other, operation, "diesel operation failed"),
    }
}

fn map_insert_error(error: DieselError, email: &str) -> UserPersistenceError {
    log_diesel_error(&error, "insert user");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::duplicate_email(email)
        }
        _ => UserPersistenceError::internal("database error"),
    }
}

fn map_read_error(error: DieselError, email: &str) -> UserPersistenceError {
    log_diesel_error(&error, "read user by email");
    match error {
        DieselError::NotFound => UserPersistenceError::email_not_found(email),
        _ => UserPersistenceError::internal("database error"),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let (Some(created_at), Some(updated_at)) = (user.created_at, user.updated_at) else {
            return Err(UserPersistenceError::internal(
                "user timestamps must be set before insert",
            ));
        };
        let row = NewUserRow {
            first_name: &user.first_name,
            last_name: &user.last_name,
            mobile: &user.mobile,
            email: (!user.email.is_empty()).then_some(user.email.as_str()),
            created_at,
            updated_at,
        };

        self.bounded("insert user", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::insert_into(users::table)
                .values(&row)
                .execute(&mut conn)
                .await
                .map(|_| ())
                .map_err(|err| map_insert_error(err, &user.email))
        })
        .await
    }

    async fn read_by_email(&self, email: &str) -> Result<User, UserPersistenceError> {
        self.bounded("read user by email", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            users::table
                .filter(users::email.eq(email))
                .select(UserRow::as_select())
                .first::<UserRow>(&mut conn)
                .await
                .map(User::from)
                .map_err(|err| map_read_error(err, email))
        })
        .await
    }
}
