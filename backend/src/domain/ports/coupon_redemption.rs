//! Driving port for the validator surface: redeem a code at a store.
//!
//! An already-used or foreign code is a normal outcome, not an error; the
//! validator shows the message and carries on.

use async_trait::async_trait;

use crate::domain::{Coupon, Error, Location, Store};

/// Request to redeem a typed or scanned code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemCouponRequest {
    pub store_slug: String,
    pub code: String,
}

/// Why a code was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Not eight letters or digits.
    Malformed,
    /// No coupon with this code belongs to the store's location.
    NotIssuedHere,
}

/// Result of a redemption attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionOutcome {
    /// This attempt redeemed the coupon.
    Redeemed {
        coupon: Coupon,
        location: Location,
        store: Store,
    },
    /// The coupon was redeemed earlier, possibly by another store.
    AlreadyUsed {
        coupon: Coupon,
        redeemed_by: Option<Store>,
    },
    /// The code cannot be used at this store.
    Invalid { code: String, reason: InvalidReason },
}

impl RedemptionOutcome {
    /// The code refers to a coupon this store may see.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid { .. })
    }

    /// The coupon had been used before this attempt.
    pub fn is_used(&self) -> bool {
        matches!(self, Self::AlreadyUsed { .. })
    }

    /// Normalised code the outcome refers to.
    pub fn code(&self) -> &str {
        match self {
            Self::Redeemed { coupon, .. } | Self::AlreadyUsed { coupon, .. } => {
                coupon.code().as_str()
            }
            Self::Invalid { code, .. } => code.as_str(),
        }
    }

    /// Message shown to store staff.
    pub fn message(&self) -> String {
        match self {
            Self::Redeemed {
                location, store, ..
            } => format!("{} visit coupon redeemed at {}", location.name, store.name),
            Self::AlreadyUsed { redeemed_by, .. } => {
                let place = redeemed_by
                    .as_ref()
                    .map_or("another store", |store| store.name.as_str());
                format!("This coupon was already used at {place}")
            }
            Self::Invalid {
                reason: InvalidReason::Malformed,
                ..
            } => "Coupon codes are 8 letters or digits".to_owned(),
            Self::Invalid {
                reason: InvalidReason::NotIssuedHere,
                ..
            } => "This code cannot be used at this store".to_owned(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponRedemption: Send + Sync {
    /// Redeem `request.code` at the store named by `request.store_slug`.
    async fn redeem(&self, request: RedeemCouponRequest) -> Result<RedemptionOutcome, Error>;
}
