//! Process configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `WORKASANA_*` environment variables over
//! configuration files. The signing secret is deliberately absent; it is read
//! separately by [`crate::outbound::security::token_settings_from_env`].

use std::net::{AddrParseError, IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Port the API listens on when none is configured.
pub const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "0.0.0.0";

/// Startup settings for the API server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WORKASANA")]
pub struct AppSettings {
    /// Interface address to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// PostgreSQL connection string; in-memory stores are used when absent
    /// in debug builds.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub database_max_connections: u32,
}

impl AppSettings {
    /// Socket address to bind, defaulting to `0.0.0.0:5000`.
    ///
    /// # Errors
    /// Returns [`AddrParseError`] when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let host: IpAddr = self.host.as_deref().unwrap_or(DEFAULT_HOST).trim().parse()?;
        Ok(SocketAddr::new(host, self.port))
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections.max(1)
    }
}
