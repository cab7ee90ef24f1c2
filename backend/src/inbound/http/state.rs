//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::CouponServices;
use crate::domain::ports::{
    CatalogueCommand, CatalogueQuery, CouponIssuance, CouponLedgerQuery, CouponRedemption,
    CouponStatsQuery, QrRenderer, ScanRedemption,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub issuance: Arc<dyn CouponIssuance>,
    pub redemption: Arc<dyn CouponRedemption>,
    pub scan: Arc<dyn ScanRedemption>,
    pub stats: Arc<dyn CouponStatsQuery>,
    pub ledger: Arc<dyn CouponLedgerQuery>,
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub catalogue_admin: Arc<dyn CatalogueCommand>,
    pub qr: Arc<dyn QrRenderer>,
}

impl HttpState {
    /// Construct state from the start-up service bundle and a QR renderer.
    pub fn new(services: CouponServices, qr: Arc<dyn QrRenderer>) -> Self {
        let CouponServices {
            issuance,
            redemption,
            scan,
            stats,
            ledger,
            catalogue,
            catalogue_admin,
        } = services;
        Self {
            issuance,
            redemption,
            scan,
            stats,
            ledger,
            catalogue,
            catalogue_admin,
            qr,
        }
    }
}
