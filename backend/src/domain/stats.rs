//! Read-only coupon statistics.

use super::{Location, LocationId, Store, StoreId};

/// Integer usage percentage, rounded half up. Zero when nothing was issued.
///
/// # Examples
/// ```
/// use coupon_backend::domain::usage_rate;
///
/// assert_eq!(usage_rate(1, 3), 33);
/// assert_eq!(usage_rate(1, 8), 13);
/// assert_eq!(usage_rate(0, 0), 0);
/// ```
pub fn usage_rate(used: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let clamped = used.min(total);
    let rounded = (clamped * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(100)
}

/// Issued/used counts for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationStats {
    pub location: Location,
    pub total: u64,
    pub used: u64,
    pub unused: u64,
}

/// Redemption count for one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub store: Store,
    pub validated: u64,
}

/// Whole-system dashboard figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemStats {
    pub total_coupons: u64,
    pub used_coupons: u64,
    pub unused_coupons: u64,
    pub usage_rate: u32,
    pub active_locations: u64,
    pub active_stores: u64,
    pub today_issued: u64,
    pub today_used: u64,
}

/// One row of the location usage ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationUsage {
    pub location_id: LocationId,
    pub location_name: String,
    pub total: u64,
    pub used: u64,
    pub usage_rate: u32,
}

/// One row of the store validation ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreValidations {
    pub store_id: StoreId,
    pub store_name: String,
    pub location_id: LocationId,
    pub validated: u64,
}
