//! In-process user side-cache.
//!
//! A bounded map keyed by email. Overwriting an existing key always
//! succeeds; inserting a new key beyond capacity fails with
//! [`UserCacheError::Backend`] and leaves the cache unchanged. Nothing reads
//! from this cache yet, so it never evicts.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::User;
use crate::domain::ports::{UserCache, UserCacheError};

/// Default number of users held by [`InMemoryUserCache`].
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Bounded, mutex-guarded user cache.
#[derive(Debug)]
pub struct InMemoryUserCache {
    capacity: usize,
    entries: Mutex<HashMap<String, User>>,
}

impl InMemoryUserCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Cached copy of the user stored under `email`.
    pub fn get(&self, email: &str) -> Option<User> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(email).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryUserCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[async_trait]
impl UserCache for InMemoryUserCache {
    async fn put(&self, email: &str, user: &User) -> Result<(), UserCacheError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if !entries.contains_key(email) && entries.len() >= self.capacity {
            return Err(UserCacheError::backend(format!(
                "cache is full ({} entries)",
                self.capacity
            )));
        }
        entries.insert(email.to_owned(), user.clone());
        Ok(())
    }
}
