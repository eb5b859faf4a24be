//! Backend entry-point: loads settings, migrates the schema, and serves the
//! persons REST API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::demographics::DemographicEndpoints;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use ortho_config::OrthoConfig;

use server::settings::AppSettings;
use server::{ServerConfig, create_server};

fn invalid_settings(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
}

fn server_config(settings: &AppSettings) -> std::io::Result<ServerConfig> {
    let endpoints = DemographicEndpoints {
        age: settings.age_source_url().map_err(invalid_settings)?,
        gender: settings.gender_source_url().map_err(invalid_settings)?,
        nationality: settings.nationality_source_url().map_err(invalid_settings)?,
    };
    let config = ServerConfig::new(
        settings.bind_addr().map_err(invalid_settings)?,
        endpoints,
        settings.lookup_timeout().map_err(invalid_settings)?,
    )
    .with_cache_ttl(settings.cache_ttl().map_err(invalid_settings)?);

    Ok(match settings.redis_url() {
        Some(url) => config.with_redis_url(url),
        None => config,
    })
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let database_url = settings.database_url().map_err(invalid_settings)?;
    let config = server_config(&settings)?;

    run_pending_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;

    let pool_config = PoolConfig::new(database_url)
        .with_max_size(settings.db_max_connections().map_err(invalid_settings)?);
    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;
    let config = config.with_db_pool(pool);

    info!(bind_addr = %config.bind_addr(), "starting people backend");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config).await?.await
}
