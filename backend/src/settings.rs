//! Application settings loaded via OrthoConfig.
//!
//! Values come from `USER_DIRECTORY_*` environment variables, an optional
//! configuration file and command-line flags. The port carries an OrthoConfig
//! default; the other fields are optional and their accessors supply the
//! fallbacks.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, PoolConfig};

const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Runtime configuration for the user directory server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_DIRECTORY")]
pub struct AppSettings {
    /// PostgreSQL connection string. Without one the server keeps records
    /// in memory.
    pub database_url: Option<String>,
    /// Interface to bind.
    pub bind_host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = 8080)]
    pub bind_port: u16,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection before failing.
    pub pool_connection_timeout_secs: Option<u64>,
}

impl AppSettings {
    pub fn bind_host(&self) -> &str {
        self.bind_host.as_deref().unwrap_or(DEFAULT_BIND_HOST)
    }

    pub fn bind_port(&self) -> u16 {
        self.bind_port
    }

    pub fn pool_connection_timeout(&self) -> Duration {
        self.pool_connection_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CONNECTION_TIMEOUT)
    }

    /// Pool settings, or `None` when no database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().filter(|url| !url.trim().is_empty())?;
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE))
                .with_connection_timeout(self.pool_connection_timeout()),
        )
    }
}
