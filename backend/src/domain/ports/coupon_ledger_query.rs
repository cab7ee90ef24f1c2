//! Driving port for looking up individual coupons.

use async_trait::async_trait;

use crate::domain::{Coupon, Error, Location, Store};

/// Default page size for [`CouponLedgerQuery::recent_coupons`].
pub const DEFAULT_RECENT_LIMIT: u32 = 50;

/// A coupon with the location that issued it and the store that redeemed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponDetails {
    pub coupon: Coupon,
    pub location: Option<Location>,
    pub redeemed_by: Option<Store>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponLedgerQuery: Send + Sync {
    /// Details for `code`; the raw input is normalised first.
    async fn coupon_details(&self, code: &str) -> Result<CouponDetails, Error>;

    /// Newest coupons first, at most `limit`.
    async fn recent_coupons(&self, limit: u32) -> Result<Vec<CouponDetails>, Error>;
}
