//! Port for partner store persistence.

use async_trait::async_trait;

use crate::domain::{LocationId, Store, StoreId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by store repository adapters.
    pub enum StoreRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "store repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "store repository query failed: {message}",
        /// Another store already uses the slug.
        DuplicateSlug { slug: String } =>
            "store slug {slug} already exists",
    }
}

/// Port for reading and writing stores.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Find a store by slug, active or not.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Store>, StoreRepositoryError>;

    /// Find a store by id, active or not.
    async fn find_by_id(&self, id: &StoreId) -> Result<Option<Store>, StoreRepositoryError>;

    /// List stores of one location ordered by name.
    async fn list_for_location(
        &self,
        location_id: &LocationId,
        active_only: bool,
    ) -> Result<Vec<Store>, StoreRepositoryError>;

    /// List all stores ordered by name.
    async fn list(&self, active_only: bool) -> Result<Vec<Store>, StoreRepositoryError>;

    /// Persist a new store.
    async fn insert(&self, store: &Store) -> Result<(), StoreRepositoryError>;

    /// Overwrite an existing store. Returns `false` when the id is unknown.
    async fn update(&self, store: &Store) -> Result<bool, StoreRepositoryError>;

    /// Number of active stores.
    async fn count_active(&self) -> Result<u64, StoreRepositoryError>;
}
