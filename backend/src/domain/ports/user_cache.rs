//! Port interface for the opportunistic user side-cache.
use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by user cache adapters.
    pub enum UserCacheError {
        /// Cache backend rejected the write or is unavailable.
        Backend { message: String } => "user cache backend failure: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Store a user under the given email key.
    async fn put(&self, email: &str, user: &User) -> Result<(), UserCacheError>;
}

/// Cache that accepts and discards every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpUserCache;

#[async_trait]
impl UserCache for NoOpUserCache {
    async fn put(&self, _email: &str, _user: &User) -> Result<(), UserCacheError> {
        Ok(())
    }
}
