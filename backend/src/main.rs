//! Backend entry-point: loads settings, prepares storage and runs the HTTP server.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use foodshare::inbound::http::health::HealthState;
use foodshare::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = build_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state.clone(), config).await?;
    info!(addr = %settings.bind_addr().map_err(std::io::Error::other)?, "server listening");
    let result = server.await;
    health_state.mark_draining();
    result
}

async fn build_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let key = settings.session_key().map_err(std::io::Error::other)?;
    let config = ServerConfig::new(
        key,
        settings.cookie_secure(),
        settings.same_site().map_err(std::io::Error::other)?,
        settings.bind_addr().map_err(std::io::Error::other)?,
    )
    .with_demo_accounts(settings.seed_demo_accounts());

    let Some(database_url) = settings.database_url() else {
        info!("no database URL configured; using in-memory stores");
        return Ok(config);
    };

    run_pending_migrations(database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool failed: {e}")))?;
    Ok(config.with_db_pool(pool))
}
