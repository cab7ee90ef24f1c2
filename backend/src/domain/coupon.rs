//! Coupon aggregate and its one-way lifecycle.
//!
//! ```text
//! Unused --redeem at a store of the same location--> Redeemed
//! ```
//!
//! There is no path back to `Unused`; once redeemed, the store and both
//! timestamps are fixed.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{CouponCode, LocationId, StoreId};

/// Redemption facts recorded exactly once per coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redemption {
    pub store_id: StoreId,
    pub used_at: DateTime<Utc>,
    pub validated_at: DateTime<Utc>,
}

impl Redemption {
    /// Record a redemption by `store_id` happening at `at`.
    pub fn at_store(store_id: StoreId, at: DateTime<Utc>) -> Self {
        Self {
            store_id,
            used_at: at,
            validated_at: at,
        }
    }
}

/// Lifecycle state of a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponState {
    Unused,
    Redeemed(Redemption),
}

/// Flat persistence shape used to rehydrate a [`Coupon`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponRecord {
    pub id: Uuid,
    pub code: CouponCode,
    pub location_id: LocationId,
    pub created_at: DateTime<Utc>,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub validated_at: Option<DateTime<Utc>>,
    pub validated_by_store_id: Option<StoreId>,
}

/// Rejected persistence shapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouponRecordError {
    #[error("coupon {code} is marked used but lacks {missing}")]
    IncompleteRedemption { code: String, missing: &'static str },
    #[error("coupon {code} is unused but carries redemption fields")]
    UnexpectedRedemption { code: String },
}

/// A coupon issued for a single location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    id: Uuid,
    code: CouponCode,
    location_id: LocationId,
    created_at: DateTime<Utc>,
    state: CouponState,
}

impl Coupon {
    /// Issue a fresh, unused coupon.
    pub fn issue(code: CouponCode, location_id: LocationId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            location_id,
            created_at,
            state: CouponState::Unused,
        }
    }

    /// Rehydrate a coupon, enforcing that redemption fields appear together.
    pub fn from_record(record: CouponRecord) -> Result<Self, CouponRecordError> {
        let CouponRecord {
            id,
            code,
            location_id,
            created_at,
            is_used,
            used_at,
            validated_at,
            validated_by_store_id,
        } = record;

        let state = if is_used {
            let incomplete = |missing| CouponRecordError::IncompleteRedemption {
                code: code.to_string(),
                missing,
            };
            CouponState::Redeemed(Redemption {
                store_id: validated_by_store_id.ok_or_else(|| incomplete("validated_by_store_id"))?,
                used_at: used_at.ok_or_else(|| incomplete("used_at"))?,
                validated_at: validated_at.ok_or_else(|| incomplete("validated_at"))?,
            })
        } else {
            if used_at.is_some() || validated_at.is_some() || validated_by_store_id.is_some() {
                return Err(CouponRecordError::UnexpectedRedemption {
                    code: code.to_string(),
                });
            }
            CouponState::Unused
        };

        Ok(Self {
            id,
            code,
            location_id,
            created_at,
            state,
        })
    }

    /// Flatten into the persistence shape.
    pub fn to_record(&self) -> CouponRecord {
        let redemption = self.redemption();
        CouponRecord {
            id: self.id,
            code: self.code.clone(),
            location_id: self.location_id,
            created_at: self.created_at,
            is_used: redemption.is_some(),
            used_at: redemption.map(|r| r.used_at),
            validated_at: redemption.map(|r| r.validated_at),
            validated_by_store_id: redemption.map(|r| r.store_id),
        }
    }

    /// Move an unused coupon to `Redeemed`. Returns `false` and leaves the
    /// coupon untouched when it was already redeemed.
    pub fn redeem(&mut self, redemption: Redemption) -> bool {
        if self.is_used() {
            return false;
        }
        self.state = CouponState::Redeemed(redemption);
        true
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn code(&self) -> &CouponCode {
        &self.code
    }

    pub fn location_id(&self) -> LocationId {
        self.location_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> CouponState {
        self.state
    }

    pub fn is_used(&self) -> bool {
        matches!(self.state, CouponState::Redeemed(_))
    }

    /// Redemption facts, if the coupon has been used.
    pub fn redemption(&self) -> Option<Redemption> {
        match self.state {
            CouponState::Redeemed(redemption) => Some(redemption),
            CouponState::Unused => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[fixture]
    fn unused_record() -> CouponRecord {
        CouponRecord {
            id: Uuid::new_v4(),
            code: CouponCode::parse("ZK8X2Q1B").expect("valid code"),
            location_id: LocationId::random(),
            created_at: timestamp(),
            is_used: false,
            used_at: None,
            validated_at: None,
            validated_by_store_id: None,
        }
    }

    #[rstest]
    fn issue_starts_unused() {
        let coupon = Coupon::issue(
            CouponCode::parse("ZK8X2Q1B").expect("valid code"),
            LocationId::random(),
            timestamp(),
        );
        assert_eq!(coupon.state(), CouponState::Unused);
        assert!(coupon.redemption().is_none());
    }

    #[rstest]
    fn record_round_trips_redeemed_state(mut unused_record: CouponRecord) {
        let store_id = StoreId::random();
        unused_record.is_used = true;
        unused_record.used_at = Some(timestamp());
        unused_record.validated_at = Some(timestamp());
        unused_record.validated_by_store_id = Some(store_id);

        let coupon = Coupon::from_record(unused_record.clone()).expect("valid record");

        assert!(coupon.is_used());
        assert_eq!(coupon.redemption().map(|r| r.store_id), Some(store_id));
        assert_eq!(coupon.to_record(), unused_record);
    }

    #[rstest]
    fn used_record_requires_store(mut unused_record: CouponRecord) {
        unused_record.is_used = true;
        unused_record.used_at = Some(timestamp());
        unused_record.validated_at = Some(timestamp());

        let error = Coupon::from_record(unused_record).expect_err("incomplete record");
        assert!(matches!(
            error,
            CouponRecordError::IncompleteRedemption {
                missing: "validated_by_store_id",
                ..
            }
        ));
    }

    #[rstest]
    fn unused_record_rejects_stray_redemption_fields(mut unused_record: CouponRecord) {
        unused_record.validated_by_store_id = Some(StoreId::random());

        let error = Coupon::from_record(unused_record).expect_err("inconsistent record");
        assert!(matches!(error, CouponRecordError::UnexpectedRedemption { .. }));
    }

    #[rstest]
    fn redeem_happens_once() {
        let mut coupon = Coupon::issue(
            CouponCode::parse("ZK8X2Q1B").expect("valid code"),
            LocationId::random(),
            timestamp(),
        );
        let first = Redemption::at_store(StoreId::random(), timestamp());
        let second = Redemption::at_store(StoreId::random(), timestamp());

        assert!(coupon.redeem(first));
        assert!(!coupon.redeem(second));
        assert_eq!(coupon.redemption(), Some(first));
    }
}
