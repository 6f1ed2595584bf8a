//! Service entry-point: loads configuration, wires adapters into the domain
//! and serves HTTP until Ctrl-C or SIGTERM.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use app_template::api::Api;
use app_template::config::{AppSettings, CompletionConfig, DatastoreConfig};
use app_template::domain::UserService;
use app_template::domain::ports::{
    CompletionSource, DisabledCompletionSource, NoOpUserCache, UserAccounts, UserRepository,
};
use app_template::inbound::http::health::HealthState;
use app_template::outbound::cache::InMemoryUserCache;
use app_template::outbound::completion::{OpenAiCompletionSource, OpenAiSettings};
use app_template::outbound::persistence::{
    DbPool, DieselUserRepository, InMemoryUserRepository, PoolConfig, run_migrations,
};
use app_template::server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load configuration")?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let users = build_user_accounts(&settings, clock.clone()).await?;
    let completion = build_completion_source(settings.completion());
    let api = web::Data::new(Api::new(users, completion, settings.app_info(), clock.clone()));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        api,
        health_state,
        ServerConfig::new(settings.http()).with_clock(clock),
    )
    .wrap_err("failed to bind HTTP listener")?;

    server.run_until(shutdown_signal()).await?;
    Ok(())
}

async fn build_user_accounts(
    settings: &AppSettings,
    clock: Arc<dyn Clock>,
) -> Result<Arc<dyn UserAccounts>> {
    let cache_capacity = settings.user_cache_capacity();
    let Some(datastore) = settings.datastore() else {
        warn!("no database host configured; users are kept in memory only");
        return Ok(user_service(
            Arc::new(InMemoryUserRepository::new()),
            cache_capacity,
            clock,
        ));
    };

    if settings.run_migrations {
        run_migrations(datastore.connection_url())
            .await
            .wrap_err("failed to apply database migrations")?;
        info!("database migrations applied");
    }

    let pool = build_pool(&datastore).await?;
    let repository = DieselUserRepository::new(pool).with_query_timeout(datastore.query_timeout);
    Ok(user_service(Arc::new(repository), cache_capacity, clock))
}

fn user_service<R>(
    repository: Arc<R>,
    cache_capacity: Option<usize>,
    clock: Arc<dyn Clock>,
) -> Arc<dyn UserAccounts>
where
    R: UserRepository + 'static,
{
    match cache_capacity {
        Some(capacity) => {
            info!(capacity, "user side cache enabled");
            let cache = Arc::new(InMemoryUserCache::new(capacity));
            Arc::new(UserService::new(repository, cache, clock))
        }
        None => Arc::new(UserService::new(repository, Arc::new(NoOpUserCache), clock)),
    }
}

async fn build_pool(datastore: &DatastoreConfig) -> Result<DbPool> {
    let config = PoolConfig::new(datastore.connection_url())
        .with_max_size(datastore.pool_size)
        .with_min_idle(Some(datastore.min_idle))
        .with_connection_timeout(datastore.connect_timeout);
    let pool = DbPool::new(config)
        .await
        .wrap_err("failed to build database pool")?;
    info!(
        host = %datastore.host,
        store = %datastore.store_name,
        "database pool ready"
    );
    Ok(pool)
}

fn build_completion_source(config: CompletionConfig) -> Arc<dyn CompletionSource> {
    let Some(api_key) = config.api_key else {
        info!("no completion API key configured; paragraphs will be empty");
        return Arc::new(DisabledCompletionSource);
    };
    let base_url = match config.base_url.parse::<reqwest::Url>() {
        Ok(url) => url,
        Err(e) => {
            warn!(
                error = %e,
                base_url = %config.base_url,
                "invalid completion base URL; proxy disabled"
            );
            return Arc::new(DisabledCompletionSource);
        }
    };
    let settings = OpenAiSettings {
        base_url,
        api_key,
        model: config.model,
        timeout: config.timeout,
    };
    match OpenAiCompletionSource::new(settings) {
        Ok(source) => Arc::new(source),
        Err(e) => {
            warn!(error = %e, "completion source unavailable; proxy disabled");
            Arc::new(DisabledCompletionSource)
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl-C"),
        () = terminate => info!("received SIGTERM"),
    }
}
