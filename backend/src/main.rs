//! Backend entry-point: loads settings, wires repositories and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use coupon_backend::inbound::http::health::HealthState;
use coupon_backend::outbound::persistence::{DbPool, run_pending_migrations};

use server::{CouponSettings, ServerConfig, create_server};

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

    let settings = CouponSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(bind_addr, settings.service_options());

    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations {
            run_pending_migrations(pool_config.database_url())
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else if settings.run_migrations {
        warn!("run_migrations ignored without a database URL");
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(Some(server::make_metrics()?));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "coupon backend listening");
    server.await
}
