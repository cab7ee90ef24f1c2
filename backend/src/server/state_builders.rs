//! Builders for the HTTP state from the configured repositories.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use coupon_backend::domain::{CouponServices, ServiceOptions};
use coupon_backend::inbound::http::state::HttpState;
use coupon_backend::outbound::memory::InMemoryStore;
use coupon_backend::outbound::persistence::{
    DbPool, DieselCouponRepository, DieselLocationRepository, DieselStoreRepository,
};
use coupon_backend::outbound::qr::{QrCodeSvgRenderer, RqrrQrDecoder};

use super::ServerConfig;

fn build_services(
    db_pool: Option<&DbPool>,
    options: ServiceOptions,
    clock: Arc<dyn Clock>,
) -> CouponServices {
    let decoder = Arc::new(RqrrQrDecoder::new());
    match db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            CouponServices::new(
                Arc::new(DieselCouponRepository::new(pool.clone())),
                Arc::new(DieselLocationRepository::new(pool.clone())),
                Arc::new(DieselStoreRepository::new(pool.clone())),
                decoder,
                clock,
                options,
            )
        }
        None => {
            warn!("no database configured; coupons are kept in memory");
            let store = Arc::new(InMemoryStore::new());
            CouponServices::new(
                store.clone(),
                store.clone(),
                store,
                decoder,
                clock,
                options,
            )
        }
    }
}

/// Build the shared HTTP state, preferring the database when one is attached.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let services = build_services(
        config.db_pool.as_ref(),
        config.options,
        Arc::new(DefaultClock),
    );
    web::Data::new(HttpState::new(services, Arc::new(QrCodeSvgRenderer::new())))
}
