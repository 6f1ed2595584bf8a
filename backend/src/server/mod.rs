//! Server construction, middleware wiring and lifecycle.
//!
//! [`create_server`] binds the listener and flips the health state to
//! serving. [`AppServer::run_until`] drives the server until a shutdown
//! signal arrives, reports draining on the health endpoint, then lets actix
//! finish in-flight requests within the configured deadline.

mod config;

pub use config::ServerConfig;

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, HttpServer, web};
use mockable::Clock;
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::api::Api;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::configure_api;
use crate::inbound::http::health::{HealthState, health};
use crate::middleware::Trace;

const CORS_MAX_AGE_SECS: usize = 3600;

/// Build the CORS policy for the versioned API scope.
///
/// A `*` entry allows any origin; credentials stay enabled, so actix-cors
/// echoes the caller's origin rather than sending a literal wildcard.
fn build_cors(origins: &[String]) -> Cors {
    let cors = origins.iter().fold(Cors::default(), |cors, origin| {
        if origin == "*" {
            cors.allow_any_origin()
        } else {
            cors.allowed_origin(origin)
        }
    });
    cors.supports_credentials()
        .allowed_methods(["GET", "POST", "PUT", "PATCH", "OPTIONS"])
        .allowed_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(CORS_MAX_AGE_SECS)
}

/// Assemble the application: trace middleware, health probe, the CORS
/// wrapped `/api/v1` scope and, in debug builds, Swagger UI.
pub fn build_app(
    api: web::Data<Api>,
    health_state: web::Data<HealthState>,
    allowed_origins: &[String],
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let scope = web::scope("/api/v1")
        .wrap(build_cors(allowed_origins))
        .configure(configure_api);

    let app = App::new()
        .app_data(api)
        .app_data(health_state)
        .wrap(Trace)
        .service(health)
        .service(scope);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// A bound, not yet running, HTTP server together with the handles needed
/// to stop it.
pub struct AppServer {
    server: Server,
    shutdown: ShutdownHandle,
    addrs: Vec<SocketAddr>,
}

/// Cloneable handle that drains a running [`AppServer`].
#[derive(Clone)]
pub struct ShutdownHandle {
    handle: ServerHandle,
    health: web::Data<HealthState>,
    clock: Arc<dyn Clock>,
}

impl ShutdownHandle {
    /// Report draining on the health endpoint, then stop accepting
    /// connections and wait for in-flight requests to finish.
    ///
    /// Repeated calls are harmless; only the first flips the health state.
    pub async fn shutdown(&self) {
        if self.health.initiate_shutdown(self.clock.utc()) {
            info!("shutdown initiated; draining connections");
        }
        self.handle.stop(true).await;
    }
}

impl AppServer {
    /// Socket addresses the listener is bound to.
    #[must_use]
    pub fn addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    /// Handle for programmatic shutdown from another task.
    #[must_use]
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Serve until `signal` resolves, then drain gracefully.
    ///
    /// Returns early with the server's own result if it stops before the
    /// signal fires.
    ///
    /// # Errors
    /// Propagates I/O failures from the server and a failed join of its task.
    pub async fn run_until<F>(self, signal: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        let Self {
            server, shutdown, ..
        } = self;
        let mut task = actix_web::rt::spawn(server);

        tokio::select! {
            outcome = &mut task => return join_outcome(outcome),
            () = signal => {}
        }

        shutdown.shutdown().await;
        let outcome = join_outcome(task.await);
        info!("server stopped");
        outcome
    }
}

fn join_outcome(
    outcome: Result<io::Result<()>, tokio::task::JoinError>,
) -> io::Result<()> {
    outcome.map_err(|err| {
        warn!(error = %err, "server task failed");
        io::Error::other(err)
    })?
}

/// Construct and bind the HTTP server.
///
/// Actix's own signal handling is disabled so shutdown always flows through
/// [`AppServer::run_until`] or a [`ShutdownHandle`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    api: web::Data<Api>,
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> io::Result<AppServer> {
    let server_health = health_state.clone();
    let origins = config.allowed_origins().to_vec();

    let server = HttpServer::new(move || {
        build_app(api.clone(), server_health.clone(), &origins)
    })
    .disable_signals()
    .shutdown_timeout(config.shutdown_timeout_secs())
    .client_request_timeout(config.read_header_timeout())
    .keep_alive(config.idle_timeout())
    .bind(config.bind_addr())?;

    let addrs = server.addrs();
    let server = server.run();
    health_state.mark_serving(config.clock.utc());
    info!(addrs = ?addrs, "server listening");

    let shutdown = ShutdownHandle {
        handle: server.handle(),
        health: health_state,
        clock: config.clock,
    };
    Ok(AppServer {
        server,
        shutdown,
        addrs,
    })
}
