//! Driving port for the generator surface: mint and issue coupon codes.

use async_trait::async_trait;

use crate::domain::{Coupon, CouponCode, Error, Location};

/// Request to issue a caller-supplied code at a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCouponRequest {
    pub location_slug: String,
    pub code: String,
}

/// A fresh code that is not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub code: CouponCode,
    pub location: Location,
}

/// A stored, unused coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCoupon {
    pub coupon: Coupon,
    pub location: Location,
}

impl IssuedCoupon {
    /// Confirmation shown on the generator page.
    pub fn message(&self) -> String {
        format!(
            "{} visit coupon {} issued",
            self.location.name,
            self.coupon.code()
        )
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponIssuance: Send + Sync {
    /// Mint a code unique at generation time for an active location.
    async fn generate_code(&self, location_slug: &str) -> Result<GeneratedCode, Error>;

    /// Store `request.code` as an unused coupon of the location.
    async fn issue(&self, request: IssueCouponRequest) -> Result<IssuedCoupon, Error>;

    /// Generate and store a coupon in one step.
    async fn issue_new(&self, location_slug: &str) -> Result<IssuedCoupon, Error>;
}
