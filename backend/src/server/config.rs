//! Start-up settings and the server configuration derived from them.

use std::io;
use std::net::{IpAddr, SocketAddr};

use coupon_backend::domain::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_UPLOAD_BYTES, ServiceOptions};
use coupon_backend::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings loaded from CLI flags, `COUPONS_*` variables and config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COUPONS")]
pub struct CouponSettings {
    /// IP address to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound for the connection pool.
    pub db_max_connections: Option<u32>,
    /// Largest accepted photo upload in bytes.
    pub max_upload_bytes: Option<usize>,
    /// Draws allowed before code generation gives up.
    pub code_max_attempts: Option<u32>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl CouponSettings {
    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidInput`] when the host is not an IP address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.trim().parse().map_err(|err| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("invalid host {host}: {err}"))
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Database URL with surrounding whitespace removed; blank counts as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url().map(|url| {
            PoolConfig::new(url).with_max_size(
                self.db_max_connections
                    .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            )
        })
    }

    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            code_max_attempts: self
                .code_max_attempts
                .unwrap_or(DEFAULT_MAX_ATTEMPTS)
                .max(1),
            max_upload_bytes: self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) options: ServiceOptions,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, options: ServiceOptions) -> Self {
        Self {
            bind_addr,
            options,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database pool. Without one the server uses the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
