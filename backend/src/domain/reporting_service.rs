//! Read-only statistics and coupon lookups.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use mockable::Clock;
use tracing::debug;

use super::coupon_service::{map_coupon_error, map_location_error, map_store_error};
use crate::domain::ports::{
    CouponCountFilter, CouponDetails, CouponLedgerQuery, CouponRepository, CouponStatsQuery,
    LocationRepository, StoreRepository,
};
use crate::domain::{
    Coupon, CouponCode, Error, Location, LocationId, LocationStats, LocationUsage, Store,
    StoreId, StoreStats, StoreValidations, SystemStats, usage_rate,
};

/// Upper bound for [`CouponLedgerQuery::recent_coupons`].
const MAX_RECENT_LIMIT: u32 = 500;

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Domain service implementing [`CouponStatsQuery`] and [`CouponLedgerQuery`].
#[derive(Clone)]
pub struct CouponReportingService<C, L, S> {
    coupons: Arc<C>,
    locations: Arc<L>,
    stores: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<C, L, S> CouponReportingService<C, L, S> {
    pub fn new(coupons: Arc<C>, locations: Arc<L>, stores: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            coupons,
            locations,
            stores,
            clock,
        }
    }
}

impl<C, L, S> CouponReportingService<C, L, S>
where
    C: CouponRepository,
    L: LocationRepository,
    S: StoreRepository,
{
    async fn count(&self, filter: CouponCountFilter) -> Result<u64, Error> {
        self.coupons.count(filter).await.map_err(map_coupon_error)
    }

    async fn catalogue_index(
        &self,
    ) -> Result<(HashMap<LocationId, Location>, HashMap<StoreId, Store>), Error> {
        let locations = self
            .locations
            .list(false)
            .await
            .map_err(map_location_error)?
            .into_iter()
            .map(|location| (location.id, location))
            .collect();
        let stores = self
            .stores
            .list(false)
            .await
            .map_err(map_store_error)?
            .into_iter()
            .map(|store| (store.id, store))
            .collect();
        Ok((locations, stores))
    }
}

fn details_from_index(
    coupon: Coupon,
    locations: &HashMap<LocationId, Location>,
    stores: &HashMap<StoreId, Store>,
) -> CouponDetails {
    let location = locations.get(&coupon.location_id()).cloned();
    let redeemed_by = coupon
        .redemption()
        .and_then(|redemption| stores.get(&redemption.store_id).cloned());
    CouponDetails {
        coupon,
        location,
        redeemed_by,
    }
}

#[async_trait]
impl<C, L, S> CouponStatsQuery for CouponReportingService<C, L, S>
where
    C: CouponRepository,
    L: LocationRepository,
    S: StoreRepository,
{
    async fn system_stats(&self) -> Result<SystemStats, Error> {
        let today = start_of_day(self.clock.utc());
        let total_coupons = self.count(CouponCountFilter::all()).await?;
        let used_coupons = self.count(CouponCountFilter::all().used(true)).await?;
        let active_locations = self
            .locations
            .count_active()
            .await
            .map_err(map_location_error)?;
        let active_stores = self
            .stores
            .count_active()
            .await
            .map_err(map_store_error)?;
        let today_issued = self
            .count(CouponCountFilter::all().created_since(today))
            .await?;
        let today_used = self
            .count(CouponCountFilter::all().used(true).validated_since(today))
            .await?;

        Ok(SystemStats {
            total_coupons,
            used_coupons,
            unused_coupons: total_coupons.saturating_sub(used_coupons),
            usage_rate: usage_rate(used_coupons, total_coupons),
            active_locations,
            active_stores,
            today_issued,
            today_used,
        })
    }

    async fn location_stats(&self, slug: &str) -> Result<LocationStats, Error> {
        let location = self
            .locations
            .find_by_slug(slug.trim())
            .await
            .map_err(map_location_error)?
            .ok_or_else(|| Error::not_found(format!("location {} not found", slug.trim())))?;
        let scope = CouponCountFilter::all().in_location(location.id);
        let total = self.count(scope).await?;
        let used = self.count(scope.used(true)).await?;
        debug!(location = %location.slug, total, used, "location stats read");

        Ok(LocationStats {
            location,
            total,
            used,
            unused: total.saturating_sub(used),
        })
    }

    async fn store_stats(&self, slug: &str) -> Result<StoreStats, Error> {
        let store = self
            .stores
            .find_by_slug(slug.trim())
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("store {} not found", slug.trim())))?;
        let validated = self
            .count(CouponCountFilter::all().redeemed_by(store.id))
            .await?;

        Ok(StoreStats { store, validated })
    }

    async fn location_usage_ranking(&self) -> Result<Vec<LocationUsage>, Error> {
        let tallies: HashMap<_, _> = self
            .coupons
            .tally_by_location()
            .await
            .map_err(map_coupon_error)?
            .into_iter()
            .map(|tally| (tally.location_id, tally))
            .collect();
        let locations = self
            .locations
            .list(true)
            .await
            .map_err(map_location_error)?;

        let mut ranking: Vec<LocationUsage> = locations
            .into_iter()
            .map(|location| {
                let (total, used) = tallies
                    .get(&location.id)
                    .map_or((0, 0), |tally| (tally.total, tally.used));
                LocationUsage {
                    location_id: location.id,
                    location_name: location.name,
                    total,
                    used,
                    usage_rate: usage_rate(used, total),
                }
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.usage_rate
                .cmp(&a.usage_rate)
                .then_with(|| b.total.cmp(&a.total))
                .then_with(|| a.location_name.cmp(&b.location_name))
        });
        Ok(ranking)
    }

    async fn store_validation_ranking(&self) -> Result<Vec<StoreValidations>, Error> {
        let tallies: HashMap<_, _> = self
            .coupons
            .tally_by_store()
            .await
            .map_err(map_coupon_error)?
            .into_iter()
            .map(|tally| (tally.store_id, tally.validated))
            .collect();
        let stores = self.stores.list(true).await.map_err(map_store_error)?;

        let mut ranking: Vec<StoreValidations> = stores
            .into_iter()
            .map(|store| StoreValidations {
                validated: tallies.get(&store.id).copied().unwrap_or(0),
                store_id: store.id,
                store_name: store.name,
                location_id: store.location_id,
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.validated
                .cmp(&a.validated)
                .then_with(|| a.store_name.cmp(&b.store_name))
        });
        Ok(ranking)
    }
}

#[async_trait]
impl<C, L, S> CouponLedgerQuery for CouponReportingService<C, L, S>
where
    C: CouponRepository,
    L: LocationRepository,
    S: StoreRepository,
{
    async fn coupon_details(&self, code: &str) -> Result<CouponDetails, Error> {
        let code = CouponCode::parse(code)
            .map_err(|err| Error::invalid_request(format!("invalid coupon code: {err}")))?;
        let coupon = self
            .coupons
            .find_by_code(&code)
            .await
            .map_err(map_coupon_error)?
            .ok_or_else(|| Error::not_found(format!("coupon {code} not found")))?;
        let location = self
            .locations
            .find_by_id(&coupon.location_id())
            .await
            .map_err(map_location_error)?;
        let redeemed_by = match coupon.redemption() {
            Some(redemption) => self
                .stores
                .find_by_id(&redemption.store_id)
                .await
                .map_err(map_store_error)?,
            None => None,
        };

        Ok(CouponDetails {
            coupon,
            location,
            redeemed_by,
        })
    }

    async fn recent_coupons(&self, limit: u32) -> Result<Vec<CouponDetails>, Error> {
        let limit = limit.clamp(1, MAX_RECENT_LIMIT);
        let coupons = self
            .coupons
            .list_recent(limit)
            .await
            .map_err(map_coupon_error)?;
        let (locations, stores) = self.catalogue_index().await?;

        Ok(coupons
            .into_iter()
            .map(|coupon| details_from_index(coupon, &locations, &stores))
            .collect())
    }
}

#[cfg(test)]
#[path = "reporting_service_tests.rs"]
mod tests;
