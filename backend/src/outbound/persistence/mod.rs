//! User persistence adapters.
//!
//! - [`DieselUserRepository`]: PostgreSQL via `diesel-async` and a `bb8`
//!   pool. Row structs and the table definition stay private to this module.
//! - [`InMemoryUserRepository`]: process-local fallback used when no
//!   datastore is configured.
//!
//! ```ignore
//! use app_template::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/store")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod in_memory_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::{DEFAULT_QUERY_TIMEOUT, DieselUserRepository};
pub use in_memory_user_repository::InMemoryUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
