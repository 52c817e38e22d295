//! User directory entry-point: loads settings, wires the record store and
//! serves the REST and map client endpoints.

mod server;

use std::net::{SocketAddr, ToSocketAddrs};

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_directory::inbound::http::health::HealthState;
use user_directory::outbound::persistence::DbPool;
use user_directory::settings::AppSettings;

fn resolve_bind_addr(settings: &AppSettings) -> std::io::Result<SocketAddr> {
    (settings.bind_host(), settings.bind_port())
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| {
            std::io::Error::other(format!(
                "bind address {}:{} did not resolve",
                settings.bind_host(),
                settings.bind_port()
            ))
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
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let mut config = ServerConfig::new(resolve_bind_addr(&settings)?);

    match settings.pool_config() {
        Some(pool_config) => {
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; user records are kept in memory"),
    }

    #[cfg(feature = "metrics")]
    let config = {
        let prometheus = server::prometheus()
            .map_err(|e| std::io::Error::other(format!("failed to configure metrics: {e}")))?;
        config.with_metrics(Some(prometheus))
    };

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    info!("user directory stopped");
    outcome
}
