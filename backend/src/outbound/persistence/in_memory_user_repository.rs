//! Process-local `UserRepository` used when no database is configured and
//! as a lightweight double in HTTP tests.
//!
//! Users are keyed by email under a single mutex, which gives the same
//! duplicate-rejection guarantee the unique index provides in PostgreSQL.
//! Users without an email are kept but cannot be looked up.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::User;
use crate::domain::ports::{UserPersistenceError, UserRepository};

#[derive(Debug, Default)]
struct Store {
    by_email: HashMap<String, User>,
    without_email: Vec<User>,
}

/// In-memory user repository.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users, including those without an email.
    pub fn len(&self) -> usize {
        let store = self.store.lock().unwrap_or_else(|e| e.into_inner());
        store.by_email.len() + store.without_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        if user.created_at.is_none() || user.updated_at.is_none() {
            return Err(UserPersistenceError::internal(
                "user timestamps must be set before insert",
            ));
        }
        let mut store = self.store.lock().unwrap_or_else(|e| e.into_inner());
        if user.email.is_empty() {
            store.without_email.push(user.clone());
            return Ok(());
        }
        if store.by_email.contains_key(&user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_str()));
        }
        store.by_email.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn read_by_email(&self, email: &str) -> Result<User, UserPersistenceError> {
        let store = self.store.lock().unwrap_or_else(|e| e.into_inner());
        store
            .by_email
            .get(email)
            .cloned()
            .ok_or_else(|| UserPersistenceError::email_not_found(email))
    }
}
