//! Port for visit location persistence.

use async_trait::async_trait;

use crate::domain::{Location, LocationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by location repository adapters.
    pub enum LocationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "location repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "location repository query failed: {message}",
        /// Another location already uses the slug.
        DuplicateSlug { slug: String } =>
            "location slug {slug} already exists",
    }
}

/// Port for reading and writing locations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Find a location by slug, active or not.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>, LocationRepositoryError>;

    /// Find a location by id, active or not.
    async fn find_by_id(
        &self,
        id: &LocationId,
    ) -> Result<Option<Location>, LocationRepositoryError>;

    /// List locations ordered by name.
    async fn list(&self, active_only: bool) -> Result<Vec<Location>, LocationRepositoryError>;

    /// Persist a new location.
    async fn insert(&self, location: &Location) -> Result<(), LocationRepositoryError>;

    /// Overwrite an existing location. Returns `false` when the id is unknown.
    async fn update(&self, location: &Location) -> Result<bool, LocationRepositoryError>;

    /// Number of active locations.
    async fn count_active(&self) -> Result<u64, LocationRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn duplicate_slug_error_names_slug() {
        let err = LocationRepositoryError::duplicate_slug("loc-gangnam");
        assert!(err.to_string().contains("loc-gangnam"));
    }
}
