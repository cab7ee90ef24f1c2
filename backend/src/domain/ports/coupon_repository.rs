//! Port for coupon persistence.
//!
//! Redemption goes through [`CouponRepository::redeem_if_unused`], a single
//! conditional write. Adapters must make it atomic so two stores scanning
//! the same code at once cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Coupon, CouponCode, LocationId, Redemption, StoreId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by coupon repository adapters.
    pub enum CouponRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "coupon repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "coupon repository query failed: {message}",
        /// The code is already taken by another coupon.
        DuplicateCode { code: String } =>
            "coupon code {code} already exists",
    }
}

/// Conjunctive filter for [`CouponRepository::count`]. Unset fields match all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CouponCountFilter {
    pub location_id: Option<LocationId>,
    pub redeemed_by: Option<StoreId>,
    pub is_used: Option<bool>,
    pub created_since: Option<DateTime<Utc>>,
    pub validated_since: Option<DateTime<Utc>>,
}

impl CouponCountFilter {
    /// Match every coupon.
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn in_location(mut self, location_id: LocationId) -> Self {
        self.location_id = Some(location_id);
        self
    }

    #[must_use]
    pub fn redeemed_by(mut self, store_id: StoreId) -> Self {
        self.redeemed_by = Some(store_id);
        self
    }

    #[must_use]
    pub fn used(mut self, is_used: bool) -> Self {
        self.is_used = Some(is_used);
        self
    }

    #[must_use]
    pub fn created_since(mut self, since: DateTime<Utc>) -> Self {
        self.created_since = Some(since);
        self
    }

    #[must_use]
    pub fn validated_since(mut self, since: DateTime<Utc>) -> Self {
        self.validated_since = Some(since);
        self
    }

    /// Whether `coupon` satisfies every set criterion.
    pub fn matches(&self, coupon: &Coupon) -> bool {
        let redemption = coupon.redemption();
        self.location_id.is_none_or(|id| coupon.location_id() == id)
            && self
                .redeemed_by
                .is_none_or(|id| redemption.is_some_and(|r| r.store_id == id))
            && self.is_used.is_none_or(|used| coupon.is_used() == used)
            && self
                .created_since
                .is_none_or(|since| coupon.created_at() >= since)
            && self
                .validated_since
                .is_none_or(|since| redemption.is_some_and(|r| r.validated_at >= since))
    }
}

/// Per-location issued and used totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationTally {
    pub location_id: LocationId,
    pub total: u64,
    pub used: u64,
}

/// Per-store redemption totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTally {
    pub store_id: StoreId,
    pub validated: u64,
}

/// Port for storing, redeeming and counting coupons.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponRepository: Send + Sync {
    /// Persist a newly issued coupon.
    async fn insert(&self, coupon: &Coupon) -> Result<(), CouponRepositoryError>;

    /// Whether any coupon already uses `code`.
    async fn code_exists(&self, code: &CouponCode) -> Result<bool, CouponRepositoryError>;

    /// Find a coupon by code regardless of location.
    async fn find_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<Coupon>, CouponRepositoryError>;

    /// Find a coupon by code, restricted to one location.
    async fn find_in_location(
        &self,
        code: &CouponCode,
        location_id: &LocationId,
    ) -> Result<Option<Coupon>, CouponRepositoryError>;

    /// Mark the coupon redeemed only if it is still unused.
    ///
    /// Returns `true` when this call performed the transition and `false`
    /// when no unused coupon matched.
    async fn redeem_if_unused(
        &self,
        code: &CouponCode,
        location_id: &LocationId,
        redemption: &Redemption,
    ) -> Result<bool, CouponRepositoryError>;

    /// Count coupons matching `filter`.
    async fn count(&self, filter: CouponCountFilter) -> Result<u64, CouponRepositoryError>;

    /// Totals grouped by location. Locations without coupons are omitted.
    async fn tally_by_location(&self) -> Result<Vec<LocationTally>, CouponRepositoryError>;

    /// Redemption totals grouped by store. Stores without redemptions are omitted.
    async fn tally_by_store(&self) -> Result<Vec<StoreTally>, CouponRepositoryError>;

    /// Most recently issued coupons, newest first.
    async fn list_recent(&self, limit: u32) -> Result<Vec<Coupon>, CouponRepositoryError>;
}
