//! Driving port for read-only coupon statistics.

use async_trait::async_trait;

use crate::domain::{Error, LocationStats, LocationUsage, StoreStats, StoreValidations, SystemStats};

/// Counting reads over issued coupons. Repeated calls without intervening
/// writes return identical results.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponStatsQuery: Send + Sync {
    /// Dashboard totals across every location.
    async fn system_stats(&self) -> Result<SystemStats, Error>;

    /// Issued, used and unused totals for the location with `slug`.
    async fn location_stats(&self, slug: &str) -> Result<LocationStats, Error>;

    /// Number of coupons redeemed by the store with `slug`.
    async fn store_stats(&self, slug: &str) -> Result<StoreStats, Error>;

    /// Locations ordered by usage rate, highest first.
    async fn location_usage_ranking(&self) -> Result<Vec<LocationUsage>, Error>;

    /// Stores ordered by redemption count, highest first.
    async fn store_validation_ranking(&self) -> Result<Vec<StoreValidations>, Error>;
}
