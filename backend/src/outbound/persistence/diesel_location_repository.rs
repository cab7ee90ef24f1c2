//! PostgreSQL-backed `LocationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LocationRepository, LocationRepositoryError};
use crate::domain::{Location, LocationDraft, LocationId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, map_basic_pool_error};
use super::models::{LocationRow, LocationUpdate, NewLocationRow};
use super::pool::{DbPool, PoolError};
use super::schema::locations;

/// Diesel-backed implementation of the location repository port.
#[derive(Clone)]
pub struct DieselLocationRepository {
    pool: DbPool,
}

impl DieselLocationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LocationRepositoryError {
    map_basic_pool_error(error, LocationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> LocationRepositoryError {
    match classify_diesel_error(&error) {
        DieselFailure::UniqueViolation => {
            LocationRepositoryError::query("unique constraint violated")
        }
        DieselFailure::Connection(message) => LocationRepositoryError::connection(message),
        DieselFailure::Query(message) => LocationRepositoryError::query(message),
    }
}

/// Writes report a taken slug instead of a bare constraint failure.
fn map_write_error(error: diesel::result::Error, slug: &str) -> LocationRepositoryError {
    match classify_diesel_error(&error) {
        DieselFailure::UniqueViolation => LocationRepositoryError::duplicate_slug(slug),
        _ => map_diesel_error(error),
    }
}

fn row_to_location(row: LocationRow) -> Result<Location, LocationRepositoryError> {
    Location::new(LocationDraft {
        id: LocationId::from_uuid(row.id),
        slug: row.slug,
        name: row.name,
        description: row.description,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| LocationRepositoryError::query(err.to_string()))
}

#[async_trait]
impl LocationRepository for DieselLocationRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Location>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = locations::table
            .filter(locations::slug.eq(slug))
            .select(LocationRow::as_select())
            .first::<LocationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_location).transpose()
    }

    async fn find_by_id(
        &self,
        id: &LocationId,
    ) -> Result<Option<Location>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = locations::table
            .filter(locations::id.eq(id.as_uuid()))
            .select(LocationRow::as_select())
            .first::<LocationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_location).transpose()
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Location>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = locations::table
            .select(LocationRow::as_select())
            .order((locations::name.asc(), locations::slug.asc()))
            .into_boxed();
        if active_only {
            query = query.filter(locations::is_active.eq(true));
        }

        let rows: Vec<LocationRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_location).collect()
    }

    async fn insert(&self, location: &Location) -> Result<(), LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewLocationRow {
            id: *location.id.as_uuid(),
            slug: &location.slug,
            name: &location.name,
            description: location.description.as_deref(),
            is_active: location.is_active,
            created_at: location.created_at,
            updated_at: location.updated_at,
        };

        diesel::insert_into(locations::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, &location.slug))
    }

    async fn update(&self, location: &Location) -> Result<bool, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = LocationUpdate {
            slug: &location.slug,
            name: &location.name,
            description: location.description.as_deref(),
            is_active: location.is_active,
            updated_at: location.updated_at,
        };

        let affected = diesel::update(locations::table.filter(locations::id.eq(location.id.as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &location.slug))?;
        Ok(affected > 0)
    }

    async fn count_active(&self) -> Result<u64, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = locations::table
            .filter(locations::is_active.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count.unsigned_abs())
    }
}
