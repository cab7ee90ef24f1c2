//! Start-up wiring of the driving ports.
//!
//! The server and the test harnesses build one [`CouponServices`] from their
//! repositories and hand it to the inbound adapter. There is no global
//! registry.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CatalogueCommand, CatalogueQuery, CouponIssuance, CouponLedgerQuery, CouponRedemption,
    CouponRepository, CouponStatsQuery, LocationRepository, QrDecoder, ScanRedemption,
    StoreRepository,
};
use crate::domain::{
    CatalogueService, CodeGenerator, CouponReportingService, CouponService,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_UPLOAD_BYTES, RandomCodeSource, RedemptionGateway,
};

/// Tunables that shape service behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    pub code_max_attempts: u32,
    pub max_upload_bytes: usize,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            code_max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Every driving port, backed by the domain services.
#[derive(Clone)]
pub struct CouponServices {
    pub issuance: Arc<dyn CouponIssuance>,
    pub redemption: Arc<dyn CouponRedemption>,
    pub scan: Arc<dyn ScanRedemption>,
    pub stats: Arc<dyn CouponStatsQuery>,
    pub ledger: Arc<dyn CouponLedgerQuery>,
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub catalogue_admin: Arc<dyn CatalogueCommand>,
}

impl CouponServices {
    /// Build the services over one set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use coupon_backend::domain::{CouponServices, ServiceOptions};
    /// use coupon_backend::outbound::memory::InMemoryStore;
    /// use coupon_backend::outbound::qr::RqrrQrDecoder;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let _services = CouponServices::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    ///     Arc::new(RqrrQrDecoder::new()),
    ///     Arc::new(DefaultClock),
    ///     ServiceOptions::default(),
    /// );
    /// ```
    pub fn new<C, L, S, D>(
        coupons: Arc<C>,
        locations: Arc<L>,
        stores: Arc<S>,
        decoder: Arc<D>,
        clock: Arc<dyn Clock>,
        options: ServiceOptions,
    ) -> Self
    where
        C: CouponRepository + 'static,
        L: LocationRepository + 'static,
        S: StoreRepository + 'static,
        D: QrDecoder + 'static,
    {
        let generator = CodeGenerator::new(
            Arc::new(RandomCodeSource),
            clock.clone(),
            options.code_max_attempts,
        );
        let coupon_service = Arc::new(CouponService::new(
            coupons.clone(),
            locations.clone(),
            stores.clone(),
            generator,
            clock.clone(),
        ));
        let reporting = Arc::new(CouponReportingService::new(
            coupons,
            locations.clone(),
            stores.clone(),
            clock.clone(),
        ));
        let catalogue = Arc::new(CatalogueService::new(locations, stores, clock));
        let gateway = Arc::new(RedemptionGateway::new(
            decoder,
            coupon_service.clone(),
            options.max_upload_bytes,
        ));

        Self {
            issuance: coupon_service.clone(),
            redemption: coupon_service,
            scan: gateway,
            stats: reporting.clone(),
            ledger: reporting,
            catalogue: catalogue.clone(),
            catalogue_admin: catalogue,
        }
    }
}
