//! Backend entry-point: loads configuration, prepares storage and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use workasana::inbound::http::health::HealthState;
use workasana::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use workasana::outbound::security::{BuildMode, token_settings_from_env};
use workasana::settings::AppSettings;

/// Application bootstrap.
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

    let settings = AppSettings::load().wrap_err("failed to load configuration")?;
    let mode = BuildMode::from_debug_assertions();
    let token_settings =
        token_settings_from_env(&DefaultEnv::new(), mode).wrap_err("signing secret unavailable")?;
    info!(
        fingerprint = %token_settings.fingerprint(),
        "session token signing secret loaded"
    );

    let bind_addr = settings.bind_addr().wrap_err("invalid bind host")?;
    let config = ServerConfig::new(bind_addr, token_settings);
    let config = match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .wrap_err("database migrations failed")?;
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.database_max_connections()),
            )
            .await
            .wrap_err("database pool unavailable")?;
            info!("persistence backed by PostgreSQL");
            config.with_db_pool(pool)
        }
        None if mode.is_debug() => {
            warn!("no database configured; using in-memory stores (dev only)");
            config
        }
        None => return Err(eyre!("WORKASANA_DATABASE_URL must be set in release builds")),
    };

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(match server::build_prometheus() {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            warn!(error = %e, "metrics disabled: Prometheus registration failed");
            None
        }
    });

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
