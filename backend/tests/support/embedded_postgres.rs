//! Embedded PostgreSQL provisioning for repository tests.
//!
//! Each test gets its own temporary database on a process-wide cluster, with
//! the crate's embedded migrations applied. When the cluster cannot start
//! the test prints a `SKIP-TEST-CLUSTER` marker and returns early, unless
//! `REQUIRE_TEST_CLUSTER` is truthy, in which case it fails.

use std::time::Duration;

use app_template::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::TemporaryDatabase;

const SHARED_CLUSTER_RETRIES: usize = 3;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Returns true when `REQUIRE_TEST_CLUSTER` is `1`, `true` or `yes`.
pub fn cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip (returning `None`) or fail, depending on [`cluster_required`].
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if cluster_required() {
        panic!("Test cluster setup failed: {reason}. Unset REQUIRE_TEST_CLUSTER to skip.");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}

fn shared_cluster() -> Result<&'static pg_embedded_setup_unpriv::ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt} failed, retrying: {error:?}");
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// A migrated temporary database, dropped with the value.
pub struct MigratedDatabase {
    url: String,
    _database: TemporaryDatabase,
}

impl MigratedDatabase {
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Create a temporary database and apply the embedded migrations.
pub fn migrated_database() -> Result<MigratedDatabase, String> {
    let cluster = shared_cluster()?;
    let database = cluster
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4()).as_str())
        .map_err(|err| format!("create temporary database: {err:?}"))?;
    let url = database.url().to_owned();
    run_pending_migrations(&url).map_err(|err| err.to_string())?;
    Ok(MigratedDatabase {
        url,
        _database: database,
    })
}
