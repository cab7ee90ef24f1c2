//! Driving ports for browsing and administering locations and stores.

use async_trait::async_trait;

use crate::domain::{Error, Location, LocationChanges, LocationId, Store, StoreChanges, StoreId};

/// Request to create a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLocationRequest {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
}

/// Request to create a store under an existing location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStoreRequest {
    pub slug: String,
    pub name: String,
    pub location_id: LocationId,
    pub description: Option<String>,
}

/// Public and administrative catalogue reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// Active locations ordered by name.
    async fn active_locations(&self) -> Result<Vec<Location>, Error>;

    /// Every location, including deactivated ones, ordered by name.
    async fn all_locations(&self) -> Result<Vec<Location>, Error>;

    /// Active stores of the active location with `slug`, ordered by name.
    async fn active_stores_for(&self, location_slug: &str) -> Result<Vec<Store>, Error>;

    /// Every store ordered by name.
    async fn all_stores(&self) -> Result<Vec<Store>, Error>;
}

/// Administrative catalogue writes. Deletion is deactivation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueCommand: Send + Sync {
    async fn create_location(&self, request: CreateLocationRequest) -> Result<Location, Error>;

    async fn update_location(
        &self,
        id: LocationId,
        changes: LocationChanges,
    ) -> Result<Location, Error>;

    async fn deactivate_location(&self, id: LocationId) -> Result<Location, Error>;

    async fn create_store(&self, request: CreateStoreRequest) -> Result<Store, Error>;

    async fn update_store(&self, id: StoreId, changes: StoreChanges) -> Result<Store, Error>;

    async fn deactivate_store(&self, id: StoreId) -> Result<Store, Error>;
}
