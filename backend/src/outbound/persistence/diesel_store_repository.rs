//! PostgreSQL-backed `StoreRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreRepository, StoreRepositoryError};
use crate::domain::{LocationId, Store, StoreDraft, StoreId};

use super::diesel_basic_error_mapping::{DieselFailure, classify_diesel_error, map_basic_pool_error};
use super::models::{NewStoreRow, StoreRow, StoreUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::stores;

/// Diesel-backed implementation of the store repository port.
#[derive(Clone)]
pub struct DieselStoreRepository {
    pool: DbPool,
}

impl DieselStoreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StoreRepositoryError {
    map_basic_pool_error(error, StoreRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> StoreRepositoryError {
    match classify_diesel_error(&error) {
        DieselFailure::UniqueViolation => StoreRepositoryError::query("unique constraint violated"),
        DieselFailure::Connection(message) => StoreRepositoryError::connection(message),
        DieselFailure::Query(message) => StoreRepositoryError::query(message),
    }
}

fn map_write_error(error: diesel::result::Error, slug: &str) -> StoreRepositoryError {
    match classify_diesel_error(&error) {
        DieselFailure::UniqueViolation => StoreRepositoryError::duplicate_slug(slug),
        _ => map_diesel_error(error),
    }
}

fn row_to_store(row: StoreRow) -> Result<Store, StoreRepositoryError> {
    Store::new(StoreDraft {
        id: StoreId::from_uuid(row.id),
        slug: row.slug,
        name: row.name,
        location_id: LocationId::from_uuid(row.location_id),
        description: row.description,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| StoreRepositoryError::query(err.to_string()))
}

#[async_trait]
impl StoreRepository for DieselStoreRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Store>, StoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = stores::table
            .filter(stores::slug.eq(slug))
            .select(StoreRow::as_select())
            .first::<StoreRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_store).transpose()
    }

    async fn find_by_id(&self, id: &StoreId) -> Result<Option<Store>, StoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = stores::table
            .filter(stores::id.eq(id.as_uuid()))
            .select(StoreRow::as_select())
            .first::<StoreRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_store).transpose()
    }

    async fn list_for_location(
        &self,
        location_id: &LocationId,
        active_only: bool,
    ) -> Result<Vec<Store>, StoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = stores::table
            .filter(stores::location_id.eq(location_id.as_uuid()))
            .select(StoreRow::as_select())
            .order((stores::name.asc(), stores::slug.asc()))
            .into_boxed();
        if active_only {
            query = query.filter(stores::is_active.eq(true));
        }

        let rows: Vec<StoreRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_store).collect()
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Store>, StoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = stores::table
            .select(StoreRow::as_select())
            .order((stores::name.asc(), stores::slug.asc()))
            .into_boxed();
        if active_only {
            query = query.filter(stores::is_active.eq(true));
        }

        let rows: Vec<StoreRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_store).collect()
    }

    async fn insert(&self, store: &Store) -> Result<(), StoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewStoreRow {
            id: *store.id.as_uuid(),
            slug: &store.slug,
            name: &store.name,
            location_id: *store.location_id.as_uuid(),
            description: store.description.as_deref(),
            is_active: store.is_active,
            created_at: store.created_at,
            updated_at: store.updated_at,
        };

        diesel::insert_into(stores::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, &store.slug))
    }

    async fn update(&self, store: &Store) -> Result<bool, StoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = StoreUpdate {
            slug: &store.slug,
            name: &store.name,
            description: store.description.as_deref(),
            is_active: store.is_active,
            updated_at: store.updated_at,
        };

        let affected = diesel::update(stores::table.filter(stores::id.eq(store.id.as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &store.slug))?;
        Ok(affected > 0)
    }

    async fn count_active(&self) -> Result<u64, StoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = stores::table
            .filter(stores::is_active.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;

    #[fixture]
    fn valid_row() -> StoreRow {
        StoreRow {
            id: Uuid::new_v4(),
            slug: "store-cafe-gangnam".to_owned(),
            name: "Cafe Gangnam".to_owned(),
            location_id: Uuid::new_v4(),
            description: None,
            is_active: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_converts_to_store(valid_row: StoreRow) {
        let location_id = valid_row.location_id;
        let store = row_to_store(valid_row).expect("valid row");
        assert_eq!(store.location_id.as_uuid(), &location_id);
        assert!(!store.is_active);
    }

    #[rstest]
    fn blank_name_row_is_a_query_error(mut valid_row: StoreRow) {
        valid_row.name = "  ".to_owned();
        let error = row_to_store(valid_row).expect_err("blank name");
        assert!(matches!(error, StoreRepositoryError::Query { .. }));
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let error = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("closed".to_owned()),
        ));
        assert!(matches!(error, StoreRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn unique_violation_on_write_names_slug() {
        let error = map_write_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new("duplicate key".to_owned()),
            ),
            "store-cafe-gangnam",
        );
        assert_eq!(error, StoreRepositoryError::duplicate_slug("store-cafe-gangnam"));
    }
}
