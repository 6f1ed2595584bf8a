//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; each
//! suite pulls in only the helpers it needs, so some go unused per crate.
#![allow(dead_code)]

use std::sync::Arc;

use app_template::api::Api;
use app_template::config::AppInfoConfig;
use app_template::domain::UserService;
use app_template::domain::ports::{CompletionSource, NoOpUserCache, UserRepository};
use mockable::{Clock, DefaultClock};

pub mod embedded_postgres;

/// Build an [`Api`] over `repository` with the system clock and no cache.
pub fn api_over<R>(repository: Arc<R>, completion: Arc<dyn CompletionSource>) -> Api
where
    R: UserRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = UserService::new(repository, Arc::new(NoOpUserCache), clock.clone());
    Api::new(Arc::new(users), completion, AppInfoConfig::default(), clock)
}
