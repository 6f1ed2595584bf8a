//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod completion_source;
mod user_accounts;
mod user_cache;
mod user_repository;

#[cfg(test)]
pub use completion_source::MockCompletionSource;
pub use completion_source::{CompletionSource, CompletionSourceError, DisabledCompletionSource};
#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::UserAccounts;
#[cfg(test)]
pub use user_cache::MockUserCache;
pub use user_cache::{NoOpUserCache, UserCache, UserCacheError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
