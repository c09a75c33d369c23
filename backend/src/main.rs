//! Circulation entry-point: loads settings, prepares storage and serves the
//! REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use circulation::inbound::http::health::HealthState;
use circulation::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use circulation::settings::CirculationSettings;
use server::{ServerConfig, create_server};

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

    let settings = CirculationSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr);
    match settings.database_url(&DefaultEnv::new()) {
        Some(url) => {
            if settings.run_migrations() {
                let applied = run_pending_migrations(&url)
                    .await
                    .map_err(std::io::Error::other)?;
                info!(applied, "database migrations complete");
            }
            let max_size = settings.pool_max_size().map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(max_size))
                .await
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database URL configured; using in-process storage"),
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
