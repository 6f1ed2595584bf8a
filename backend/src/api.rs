//! API façade consumed by transport adapters.
//!
//! [`Api`] aggregates the domain services behind one surface so HTTP
//! handlers never learn which services exist or how they are wired. It adds
//! no business rules of its own.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::config::AppInfoConfig;
use crate::domain::ports::{CompletionSource, UserAccounts};
use crate::domain::{Error, User};

const HEALTH_STATUS: &str = "all systems up and running";

/// Descriptive bundle returned by [`Api::health`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    #[schema(example = "production")]
    pub env: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    pub commit: String,
    #[schema(example = "all systems up and running")]
    pub status: String,
    pub started_at: DateTime<Utc>,
    /// Process start time; the build carries no separate release stamp.
    pub released_on: DateTime<Utc>,
    pub uptime_seconds: i64,
}

/// Façade over the user and completion services.
#[derive(Clone)]
pub struct Api {
    users: Arc<dyn UserAccounts>,
    completion: Arc<dyn CompletionSource>,
    info: AppInfoConfig,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
}

impl Api {
    /// Build the façade. The start time used by [`Api::health`] is read from
    /// `clock` here.
    pub fn new(
        users: Arc<dyn UserAccounts>,
        completion: Arc<dyn CompletionSource>,
        info: AppInfoConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let started_at = clock.utc();
        Self {
            users,
            completion,
            info,
            clock,
            started_at,
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Passes through the domain error from the user service.
    pub async fn create_user(&self, user: User) -> Result<User, Error> {
        self.users.create_user(user).await
    }

    /// Look up a user by email.
    ///
    /// # Errors
    ///
    /// Passes through the domain error from the user service.
    pub async fn read_user_by_email(&self, email: &str) -> Result<User, Error> {
        self.users.read_by_email(email).await
    }

    pub fn health(&self) -> ApiHealth {
        let uptime = self.clock.utc() - self.started_at;
        ApiHealth {
            env: self.info.environment.clone(),
            version: self.info.version.clone(),
            commit: self.info.commit.clone(),
            status: HEALTH_STATUS.to_owned(),
            started_at: self.started_at,
            released_on: self.started_at,
            uptime_seconds: uptime.num_seconds().max(0),
        }
    }

    /// A paragraph about `topic` from the completion proxy, or an empty
    /// string when the proxy fails.
    pub async fn paragraph_by_topic(&self, topic: &str) -> String {
        match self.completion.complete(topic).await {
            Ok(text) => text,
            Err(error) => {
                warn!(%error, topic, "completion proxy failed");
                String::new()
            }
        }
    }
}
