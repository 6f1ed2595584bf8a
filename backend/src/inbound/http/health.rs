//! Process health state and the `/-/health` probe.
//!
//! [`HealthState`] is the only mutable state shared between request workers.
//! All access goes through one `std::sync::Mutex`, held for the duration of a
//! single read or write and never across an `.await`.
//!
//! Phases move `Starting → Serving → Draining` and never back. Once draining,
//! the probe answers 503 with a fixed notice regardless of the status map.

use std::collections::BTreeMap;
use std::sync::Mutex;

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

/// Lifecycle phase of the serving process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ServerPhase {
    /// Socket not yet bound.
    Starting,
    /// Accepting connections.
    Serving,
    /// Shutdown signalled; in-flight requests are finishing.
    Draining,
}

/// Result of a health read taken under the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthSnapshot {
    /// Live subsystem statuses.
    Live(BTreeMap<String, String>),
    /// Fixed notice reported while draining.
    ShuttingDown(String),
}

#[derive(Debug)]
struct Inner {
    statuses: BTreeMap<String, String>,
    phase: ServerPhase,
    shutdown_response: String,
    started_at: Option<DateTime<Utc>>,
}

/// Lock-guarded health state shared by the server and its handlers.
#[derive(Debug)]
pub struct HealthState {
    inner: Mutex<Inner>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                statuses: BTreeMap::new(),
                phase: ServerPhase::Starting,
                shutdown_response: String::new(),
                started_at: None,
            }),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panicked writer cannot leave the map half-updated.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record or replace a subsystem status.
    pub fn append(&self, subsystem: impl Into<String>, status: impl Into<String>) {
        self.lock().statuses.insert(subsystem.into(), status.into());
    }

    /// Clear every subsystem status. The phase is untouched.
    pub fn reset(&self) {
        self.lock().statuses.clear();
    }

    /// Move from `Starting` to `Serving` and record the HTTP subsystem as up.
    /// Has no effect once serving or draining.
    pub fn mark_serving(&self, now: DateTime<Utc>) {
        let mut inner = self.lock();
        if inner.phase != ServerPhase::Starting {
            return;
        }
        inner.phase = ServerPhase::Serving;
        inner.started_at = Some(now);
        inner.statuses.insert(
            "http".to_owned(),
            format!("OK: {}", now.to_rfc3339_opts(SecondsFormat::Nanos, true)),
        );
        drop(inner);
        info!("server is serving");
    }

    /// Enter `Draining`. Returns `true` only for the call that performed the
    /// transition; later calls keep the original shutdown notice.
    pub fn initiate_shutdown(&self, now: DateTime<Utc>) -> bool {
        let mut inner = self.lock();
        if inner.phase == ServerPhase::Draining {
            return false;
        }
        inner.phase = ServerPhase::Draining;
        inner.shutdown_response = format!(
            "server is shutting down | {}",
            now.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        drop(inner);
        info!("server is draining");
        true
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        let inner = self.lock();
        match inner.phase {
            ServerPhase::Draining => HealthSnapshot::ShuttingDown(inner.shutdown_response.clone()),
            ServerPhase::Starting | ServerPhase::Serving => {
                HealthSnapshot::Live(inner.statuses.clone())
            }
        }
    }

    pub fn phase(&self) -> ServerPhase {
        self.lock().phase
    }

    /// When the server started serving, if it has.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.lock().started_at
    }
}

/// Health probe. 200 with the subsystem map while serving, 503 with a plain
/// text notice once draining.
#[utoipa::path(
    get,
    path = "/-/health",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Subsystem statuses", body = BTreeMap<String, String>),
        (status = 503, description = "Server is shutting down", body = String, content_type = "text/plain")
    )
)]
#[get("/-/health")]
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    match state.snapshot() {
        HealthSnapshot::Live(statuses) => HttpResponse::Ok()
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(statuses),
        HealthSnapshot::ShuttingDown(notice) => HttpResponse::ServiceUnavailable()
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .content_type("text/plain; charset=utf-8")
            .body(notice),
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
