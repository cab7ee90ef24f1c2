//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`QrDecoder`], [`QrRenderer`]) are
//! implemented by outbound adapters. Driving ports are implemented by
//! domain services and consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_admin;
mod coupon_issuance;
mod coupon_ledger_query;
mod coupon_redemption;
mod coupon_repository;
mod coupon_stats_query;
mod location_repository;
mod qr_decoder;
mod qr_renderer;
mod scan_redemption;
mod store_repository;

#[cfg(test)]
pub use catalogue_admin::{MockCatalogueCommand, MockCatalogueQuery};
pub use catalogue_admin::{
    CatalogueCommand, CatalogueQuery, CreateLocationRequest, CreateStoreRequest,
};
#[cfg(test)]
pub use coupon_issuance::MockCouponIssuance;
pub use coupon_issuance::{CouponIssuance, GeneratedCode, IssueCouponRequest, IssuedCoupon};
#[cfg(test)]
pub use coupon_ledger_query::MockCouponLedgerQuery;
pub use coupon_ledger_query::{CouponDetails, CouponLedgerQuery, DEFAULT_RECENT_LIMIT};
#[cfg(test)]
pub use coupon_redemption::MockCouponRedemption;
pub use coupon_redemption::{
    CouponRedemption, InvalidReason, RedeemCouponRequest, RedemptionOutcome,
};
#[cfg(test)]
pub use coupon_repository::MockCouponRepository;
pub use coupon_repository::{
    CouponCountFilter, CouponRepository, CouponRepositoryError, LocationTally, StoreTally,
};
#[cfg(test)]
pub use coupon_stats_query::MockCouponStatsQuery;
pub use coupon_stats_query::CouponStatsQuery;
#[cfg(test)]
pub use location_repository::MockLocationRepository;
pub use location_repository::{LocationRepository, LocationRepositoryError};
#[cfg(test)]
pub use qr_decoder::MockQrDecoder;
pub use qr_decoder::{
    DecodeStrategy, DecodedSymbol, FixtureQrDecoder, QrDecodeError, QrDecoder,
};
#[cfg(test)]
pub use qr_renderer::MockQrRenderer;
pub use qr_renderer::{QrRenderError, QrRenderer};
#[cfg(test)]
pub use scan_redemption::MockScanRedemption;
pub use scan_redemption::{ScanRedemption, ScanRedemptionRequest, ScanRedemptionResponse};
#[cfg(test)]
pub use store_repository::MockStoreRepository;
pub use store_repository::{StoreRepository, StoreRepositoryError};
