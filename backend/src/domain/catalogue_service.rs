//! Catalogue browsing and administration service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::coupon_service::{map_location_error, map_store_error};
use crate::domain::ports::{
    CatalogueCommand, CatalogueQuery, CreateLocationRequest, CreateStoreRequest,
    LocationRepository, StoreRepository,
};
use crate::domain::{
    CatalogueValidationError, Error, Location, LocationChanges, LocationDraft, LocationId, Store,
    StoreChanges, StoreDraft, StoreId,
};

fn map_validation_error(error: CatalogueValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Domain service implementing [`CatalogueQuery`] and [`CatalogueCommand`].
#[derive(Clone)]
pub struct CatalogueService<L, S> {
    locations: Arc<L>,
    stores: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<L, S> CatalogueService<L, S> {
    pub fn new(locations: Arc<L>, stores: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            locations,
            stores,
            clock,
        }
    }
}

impl<L, S> CatalogueService<L, S>
where
    L: LocationRepository,
    S: StoreRepository,
{
    async fn existing_location(&self, id: LocationId) -> Result<Location, Error> {
        self.locations
            .find_by_id(&id)
            .await
            .map_err(map_location_error)?
            .ok_or_else(|| Error::not_found(format!("location {id} not found")))
    }

    async fn existing_store(&self, id: StoreId) -> Result<Store, Error> {
        self.stores
            .find_by_id(&id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("store {id} not found")))
    }

    async fn save_location(&self, location: Location) -> Result<Location, Error> {
        let updated = self
            .locations
            .update(&location)
            .await
            .map_err(map_location_error)?;
        if !updated {
            return Err(Error::not_found(format!("location {} not found", location.id)));
        }
        Ok(location)
    }

    async fn save_store(&self, store: Store) -> Result<Store, Error> {
        let updated = self
            .stores
            .update(&store)
            .await
            .map_err(map_store_error)?;
        if !updated {
            return Err(Error::not_found(format!("store {} not found", store.id)));
        }
        Ok(store)
    }
}

#[async_trait]
impl<L, S> CatalogueQuery for CatalogueService<L, S>
where
    L: LocationRepository,
    S: StoreRepository,
{
    async fn active_locations(&self) -> Result<Vec<Location>, Error> {
        self.locations.list(true).await.map_err(map_location_error)
    }

    async fn all_locations(&self) -> Result<Vec<Location>, Error> {
        self.locations.list(false).await.map_err(map_location_error)
    }

    async fn active_stores_for(&self, location_slug: &str) -> Result<Vec<Store>, Error> {
        let location = self
            .locations
            .find_by_slug(location_slug.trim())
            .await
            .map_err(map_location_error)?
            .filter(|location| location.is_active)
            .ok_or_else(|| {
                Error::not_found(format!("location {} not found", location_slug.trim()))
            })?;
        self.stores
            .list_for_location(&location.id, true)
            .await
            .map_err(map_store_error)
    }

    async fn all_stores(&self) -> Result<Vec<Store>, Error> {
        self.stores.list(false).await.map_err(map_store_error)
    }
}

#[async_trait]
impl<L, S> CatalogueCommand for CatalogueService<L, S>
where
    L: LocationRepository,
    S: StoreRepository,
{
    async fn create_location(&self, request: CreateLocationRequest) -> Result<Location, Error> {
        let now = self.clock.utc();
        let location = Location::new(LocationDraft {
            id: LocationId::random(),
            slug: request.slug,
            name: request.name,
            description: request.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
        .map_err(map_validation_error)?;
        self.locations
            .insert(&location)
            .await
            .map_err(map_location_error)?;
        info!(location = %location.slug, "location created");
        Ok(location)
    }

    async fn update_location(
        &self,
        id: LocationId,
        changes: LocationChanges,
    ) -> Result<Location, Error> {
        let location = self
            .existing_location(id)
            .await?
            .apply(changes, self.clock.utc())
            .map_err(map_validation_error)?;
        self.save_location(location).await
    }

    async fn deactivate_location(&self, id: LocationId) -> Result<Location, Error> {
        let location = self
            .existing_location(id)
            .await?
            .deactivate(self.clock.utc());
        let saved = self.save_location(location).await?;
        info!(location = %saved.slug, "location deactivated");
        Ok(saved)
    }

    async fn create_store(&self, request: CreateStoreRequest) -> Result<Store, Error> {
        let owner = self
            .locations
            .find_by_id(&request.location_id)
            .await
            .map_err(map_location_error)?;
        if owner.is_none() {
            return Err(Error::invalid_request(format!(
                "location {} does not exist",
                request.location_id
            )));
        }

        let now = self.clock.utc();
        let store = Store::new(StoreDraft {
            id: StoreId::random(),
            slug: request.slug,
            name: request.name,
            location_id: request.location_id,
            description: request.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
        .map_err(map_validation_error)?;
        self.stores.insert(&store).await.map_err(map_store_error)?;
        info!(store = %store.slug, "store created");
        Ok(store)
    }

    async fn update_store(&self, id: StoreId, changes: StoreChanges) -> Result<Store, Error> {
        let store = self
            .existing_store(id)
            .await?
            .apply(changes, self.clock.utc())
            .map_err(map_validation_error)?;
        self.save_store(store).await
    }

    async fn deactivate_store(&self, id: StoreId) -> Result<Store, Error> {
        let store = self.existing_store(id).await?.deactivate(self.clock.utc());
        let saved = self.save_store(store).await?;
        info!(store = %saved.slug, "store deactivated");
        Ok(saved)
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
