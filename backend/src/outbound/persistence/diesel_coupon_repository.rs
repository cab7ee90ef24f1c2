//! PostgreSQL-backed `CouponRepository` implementation using Diesel ORM.
//!
//! Redemption is one `UPDATE ... WHERE is_used = false`; the affected row
//! count tells the caller whether it won. The unique index on `code` backs
//! up the generator's existence check.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    CouponCountFilter, CouponRepository, CouponRepositoryError, LocationTally, StoreTally,
};
use crate::domain::{Coupon, CouponCode, CouponRecord, LocationId, Redemption, StoreId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CouponRedemptionUpdate, CouponRow, NewCouponRow};
use super::pool::{DbPool, PoolError};
use super::schema::coupons;

/// Diesel-backed implementation of the coupon repository port.
#[derive(Clone)]
pub struct DieselCouponRepository {
    pool: DbPool,
}

impl DieselCouponRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CouponRepositoryError {
    map_basic_pool_error(error, CouponRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CouponRepositoryError {
    map_basic_diesel_error(
        error,
        CouponRepositoryError::query,
        CouponRepositoryError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error, code: &CouponCode) -> CouponRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            CouponRepositoryError::duplicate_code(code.as_str())
        }
        other => map_diesel_error(other),
    }
}

fn row_to_coupon(row: CouponRow) -> Result<Coupon, CouponRepositoryError> {
    let code = CouponCode::parse(&row.code)
        .map_err(|err| CouponRepositoryError::query(format!("stored code {}: {err}", row.code)))?;
    Coupon::from_record(CouponRecord {
        id: row.id,
        code,
        location_id: LocationId::from_uuid(row.location_id),
        created_at: row.created_at,
        is_used: row.is_used,
        used_at: row.used_at,
        validated_at: row.validated_at,
        validated_by_store_id: row.validated_by_store_id.map(StoreId::from_uuid),
    })
    .map_err(|err| CouponRepositoryError::query(err.to_string()))
}

fn to_count(value: i64) -> u64 {
    value.unsigned_abs()
}

#[async_trait]
impl CouponRepository for DieselCouponRepository {
    async fn insert(&self, coupon: &Coupon) -> Result<(), CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCouponRow {
            id: coupon.id(),
            code: coupon.code().as_str(),
            location_id: *coupon.location_id().as_uuid(),
            created_at: coupon.created_at(),
            is_used: false,
        };

        diesel::insert_into(coupons::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, coupon.code()))
    }

    async fn code_exists(&self, code: &CouponCode) -> Result<bool, CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            coupons::table.filter(coupons::code.eq(code.as_str())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<Coupon>, CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = coupons::table
            .filter(coupons::code.eq(code.as_str()))
            .select(CouponRow::as_select())
            .first::<CouponRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_coupon).transpose()
    }

    async fn find_in_location(
        &self,
        code: &CouponCode,
        location_id: &LocationId,
    ) -> Result<Option<Coupon>, CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = coupons::table
            .filter(
                coupons::code
                    .eq(code.as_str())
                    .and(coupons::location_id.eq(location_id.as_uuid())),
            )
            .select(CouponRow::as_select())
            .first::<CouponRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_coupon).transpose()
    }

    async fn redeem_if_unused(
        &self,
        code: &CouponCode,
        location_id: &LocationId,
        redemption: &Redemption,
    ) -> Result<bool, CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = CouponRedemptionUpdate {
            is_used: true,
            used_at: redemption.used_at,
            validated_at: redemption.validated_at,
            validated_by_store_id: *redemption.store_id.as_uuid(),
        };

        let affected = diesel::update(
            coupons::table.filter(
                coupons::code
                    .eq(code.as_str())
                    .and(coupons::location_id.eq(location_id.as_uuid()))
                    .and(coupons::is_used.eq(false)),
            ),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected == 1)
    }

    async fn count(&self, filter: CouponCountFilter) -> Result<u64, CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = coupons::table.into_boxed();
        if let Some(location_id) = filter.location_id {
            query = query.filter(coupons::location_id.eq(*location_id.as_uuid()));
        }
        if let Some(store_id) = filter.redeemed_by {
            query = query.filter(coupons::validated_by_store_id.eq(*store_id.as_uuid()));
        }
        if let Some(is_used) = filter.is_used {
            query = query.filter(coupons::is_used.eq(is_used));
        }
        if let Some(since) = filter.created_since {
            query = query.filter(coupons::created_at.ge(since));
        }
        if let Some(since) = filter.validated_since {
            query = query.filter(coupons::validated_at.ge(since));
        }

        let count: i64 = query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(to_count(count))
    }

    async fn tally_by_location(&self) -> Result<Vec<LocationTally>, CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let totals: Vec<(Uuid, i64)> = coupons::table
            .group_by(coupons::location_id)
            .select((coupons::location_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let used: HashMap<Uuid, i64> = coupons::table
            .filter(coupons::is_used.eq(true))
            .group_by(coupons::location_id)
            .select((coupons::location_id, count_star()))
            .load::<(Uuid, i64)>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .collect();

        Ok(totals
            .into_iter()
            .map(|(location_id, total)| LocationTally {
                location_id: LocationId::from_uuid(location_id),
                total: to_count(total),
                used: to_count(used.get(&location_id).copied().unwrap_or(0)),
            })
            .collect())
    }

    async fn tally_by_store(&self) -> Result<Vec<StoreTally>, CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(Option<Uuid>, i64)> = coupons::table
            .filter(coupons::validated_by_store_id.is_not_null())
            .group_by(coupons::validated_by_store_id)
            .select((coupons::validated_by_store_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(store_id, validated)| {
                store_id.map(|id| StoreTally {
                    store_id: StoreId::from_uuid(id),
                    validated: to_count(validated),
                })
            })
            .collect())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Coupon>, CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CouponRow> = coupons::table
            .order((coupons::created_at.desc(), coupons::id.desc()))
            .limit(i64::from(limit))
            .select(CouponRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_coupon).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> CouponRow {
        CouponRow {
            id: Uuid::new_v4(),
            code: "ZK8X2Q1B".to_owned(),
            location_id: Uuid::new_v4(),
            created_at: Utc::now(),
            is_used: false,
            used_at: None,
            validated_at: None,
            validated_by_store_id: None,
        }
    }

    #[rstest]
    fn unused_row_converts(valid_row: CouponRow) {
        let coupon = row_to_coupon(valid_row).expect("valid row");
        assert!(!coupon.is_used());
        assert_eq!(coupon.code().as_str(), "ZK8X2Q1B");
    }

    #[rstest]
    fn redeemed_row_carries_store(mut valid_row: CouponRow) {
        let store_id = Uuid::new_v4();
        valid_row.is_used = true;
        valid_row.used_at = Some(Utc::now());
        valid_row.validated_at = valid_row.used_at;
        valid_row.validated_by_store_id = Some(store_id);

        let coupon = row_to_coupon(valid_row).expect("valid row");
        assert_eq!(
            coupon.redemption().map(|r| *r.store_id.as_uuid()),
            Some(store_id)
        );
    }

    #[rstest]
    fn half_redeemed_row_is_rejected(mut valid_row: CouponRow) {
        valid_row.is_used = true;
        let error = row_to_coupon(valid_row).expect_err("incomplete redemption");
        assert!(matches!(error, CouponRepositoryError::Query { .. }));
    }

    #[rstest]
    fn stored_garbage_code_is_rejected(mut valid_row: CouponRow) {
        valid_row.code = "bad code".to_owned();
        assert!(row_to_coupon(valid_row).is_err());
    }

    #[rstest]
    fn unique_violation_on_insert_is_duplicate_code() {
        let code = CouponCode::parse("ZK8X2Q1B").expect("valid code");
        let error = map_insert_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new("duplicate key value".to_owned()),
            ),
            &code,
        );
        assert_eq!(error, CouponRepositoryError::duplicate_code("ZK8X2Q1B"));
    }

    #[rstest]
    fn pool_error_maps_to_connection() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(error, CouponRepositoryError::Connection { .. }));
    }
}
