//! In-process store implementing every repository port.
//!
//! Used when no database URL is configured and by HTTP and behaviour tests.
//! A single lock guards locations, stores and coupons together, so each
//! repository call observes and mutates one consistent snapshot. Data is
//! lost when the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    CouponCountFilter, CouponRepository, CouponRepositoryError, LocationRepository,
    LocationRepositoryError, LocationTally, StoreRepository, StoreRepositoryError, StoreTally,
};
use crate::domain::{Coupon, CouponCode, Location, LocationId, Redemption, Store, StoreId};

#[derive(Debug, Default)]
struct State {
    locations: HashMap<LocationId, Location>,
    stores: HashMap<StoreId, Store>,
    coupons: HashMap<CouponCode, Coupon>,
}

/// Shared in-memory repository. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn sorted_by_name<T>(mut items: Vec<T>, key: impl Fn(&T) -> (&str, &str)) -> Vec<T> {
    items.sort_by(|a, b| key(a).cmp(&key(b)));
    items
}

#[async_trait]
impl LocationRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>, LocationRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .locations
            .values()
            .find(|location| location.slug == slug)
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: &LocationId,
    ) -> Result<Option<Location>, LocationRepositoryError> {
        Ok(self.state.read().await.locations.get(id).cloned())
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Location>, LocationRepositoryError> {
        let state = self.state.read().await;
        let locations = state
            .locations
            .values()
            .filter(|location| !active_only || location.is_active)
            .cloned()
            .collect();
        Ok(sorted_by_name(locations, |l| (l.name.as_str(), l.slug.as_str())))
    }

    async fn insert(&self, location: &Location) -> Result<(), LocationRepositoryError> {
        let mut state = self.state.write().await;
        if state.locations.values().any(|l| l.slug == location.slug) {
            return Err(LocationRepositoryError::duplicate_slug(location.slug.clone()));
        }
        state.locations.insert(location.id, location.clone());
        Ok(())
    }

    async fn update(&self, location: &Location) -> Result<bool, LocationRepositoryError> {
        let mut state = self.state.write().await;
        if state
            .locations
            .values()
            .any(|l| l.slug == location.slug && l.id != location.id)
        {
            return Err(LocationRepositoryError::duplicate_slug(location.slug.clone()));
        }
        match state.locations.get_mut(&location.id) {
            Some(existing) => {
                *existing = location.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_active(&self) -> Result<u64, LocationRepositoryError> {
        let state = self.state.read().await;
        Ok(to_count(
            state.locations.values().filter(|l| l.is_active).count(),
        ))
    }
}

#[async_trait]
impl StoreRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Store>, StoreRepositoryError> {
        let state = self.state.read().await;
        Ok(state.stores.values().find(|store| store.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: &StoreId) -> Result<Option<Store>, StoreRepositoryError> {
        Ok(self.state.read().await.stores.get(id).cloned())
    }

    async fn list_for_location(
        &self,
        location_id: &LocationId,
        active_only: bool,
    ) -> Result<Vec<Store>, StoreRepositoryError> {
        let state = self.state.read().await;
        let stores = state
            .stores
            .values()
            .filter(|store| store.serves(location_id) && (!active_only || store.is_active))
            .cloned()
            .collect();
        Ok(sorted_by_name(stores, |s| (s.name.as_str(), s.slug.as_str())))
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Store>, StoreRepositoryError> {
        let state = self.state.read().await;
        let stores = state
            .stores
            .values()
            .filter(|store| !active_only || store.is_active)
            .cloned()
            .collect();
        Ok(sorted_by_name(stores, |s| (s.name.as_str(), s.slug.as_str())))
    }

    async fn insert(&self, store: &Store) -> Result<(), StoreRepositoryError> {
        let mut state = self.state.write().await;
        if state.stores.values().any(|s| s.slug == store.slug) {
            return Err(StoreRepositoryError::duplicate_slug(store.slug.clone()));
        }
        if !state.locations.contains_key(&store.location_id) {
            return Err(StoreRepositoryError::query(format!(
                "location {} does not exist",
                store.location_id
            )));
        }
        state.stores.insert(store.id, store.clone());
        Ok(())
    }

    async fn update(&self, store: &Store) -> Result<bool, StoreRepositoryError> {
        let mut state = self.state.write().await;
        if state
            .stores
            .values()
            .any(|s| s.slug == store.slug && s.id != store.id)
        {
            return Err(StoreRepositoryError::duplicate_slug(store.slug.clone()));
        }
        match state.stores.get_mut(&store.id) {
            Some(existing) => {
                *existing = store.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_active(&self) -> Result<u64, StoreRepositoryError> {
        let state = self.state.read().await;
        Ok(to_count(state.stores.values().filter(|s| s.is_active).count()))
    }
}

#[async_trait]
impl CouponRepository for InMemoryStore {
    async fn insert(&self, coupon: &Coupon) -> Result<(), CouponRepositoryError> {
        let mut state = self.state.write().await;
        if state.coupons.contains_key(coupon.code()) {
            return Err(CouponRepositoryError::duplicate_code(coupon.code().as_str()));
        }
        if !state.locations.contains_key(&coupon.location_id()) {
            return Err(CouponRepositoryError::query(format!(
                "location {} does not exist",
                coupon.location_id()
            )));
        }
        state.coupons.insert(coupon.code().clone(), coupon.clone());
        Ok(())
    }

    async fn code_exists(&self, code: &CouponCode) -> Result<bool, CouponRepositoryError> {
        Ok(self.state.read().await.coupons.contains_key(code))
    }

    async fn find_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<Coupon>, CouponRepositoryError> {
        Ok(self.state.read().await.coupons.get(code).cloned())
    }

    async fn find_in_location(
        &self,
        code: &CouponCode,
        location_id: &LocationId,
    ) -> Result<Option<Coupon>, CouponRepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .coupons
            .get(code)
            .filter(|coupon| coupon.location_id() == *location_id)
            .cloned())
    }

    async fn redeem_if_unused(
        &self,
        code: &CouponCode,
        location_id: &LocationId,
        redemption: &Redemption,
    ) -> Result<bool, CouponRepositoryError> {
        let mut state = self.state.write().await;
        Ok(state
            .coupons
            .get_mut(code)
            .filter(|coupon| coupon.location_id() == *location_id)
            .is_some_and(|coupon| coupon.redeem(*redemption)))
    }

    async fn count(&self, filter: CouponCountFilter) -> Result<u64, CouponRepositoryError> {
        let state = self.state.read().await;
        Ok(to_count(
            state.coupons.values().filter(|c| filter.matches(c)).count(),
        ))
    }

    async fn tally_by_location(&self) -> Result<Vec<LocationTally>, CouponRepositoryError> {
        let state = self.state.read().await;
        let mut tallies: HashMap<LocationId, LocationTally> = HashMap::new();
        for coupon in state.coupons.values() {
            let tally = tallies
                .entry(coupon.location_id())
                .or_insert_with(|| LocationTally {
                    location_id: coupon.location_id(),
                    total: 0,
                    used: 0,
                });
            tally.total += 1;
            if coupon.is_used() {
                tally.used += 1;
            }
        }
        Ok(tallies.into_values().collect())
    }

    async fn tally_by_store(&self) -> Result<Vec<StoreTally>, CouponRepositoryError> {
        let state = self.state.read().await;
        let mut tallies: HashMap<StoreId, u64> = HashMap::new();
        for redemption in state.coupons.values().filter_map(Coupon::redemption) {
            *tallies.entry(redemption.store_id).or_default() += 1;
        }
        Ok(tallies
            .into_iter()
            .map(|(store_id, validated)| StoreTally {
                store_id,
                validated,
            })
            .collect())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Coupon>, CouponRepositoryError> {
        let state = self.state.read().await;
        let mut coupons: Vec<Coupon> = state.coupons.values().cloned().collect();
        coupons.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        coupons.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(coupons)
    }
}
