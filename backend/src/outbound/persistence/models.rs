//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; repositories convert them
//! into validated domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{coupons, locations, stores};

/// Row struct for reading from the locations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LocationRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new locations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = locations)]
pub(crate) struct NewLocationRow<'a> {
    pub id: Uuid,
    pub slug: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for administrator edits. A `None` description clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = locations)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct LocationUpdate<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the stores table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = stores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StoreRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub location_id: Uuid,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new stores.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stores)]
pub(crate) struct NewStoreRow<'a> {
    pub id: Uuid,
    pub slug: &'a str,
    pub name: &'a str,
    pub location_id: Uuid,
    pub description: Option<&'a str>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for administrator edits. The owning location never changes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = stores)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct StoreUpdate<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the coupons table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = coupons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CouponRow {
    pub id: Uuid,
    pub code: String,
    pub location_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub validated_at: Option<DateTime<Utc>>,
    pub validated_by_store_id: Option<Uuid>,
}

/// Insertable struct for newly issued coupons.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = coupons)]
pub(crate) struct NewCouponRow<'a> {
    pub id: Uuid,
    pub code: &'a str,
    pub location_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub is_used: bool,
}

/// Changeset applied by the conditional redemption update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = coupons)]
pub(crate) struct CouponRedemptionUpdate {
    pub is_used: bool,
    pub used_at: DateTime<Utc>,
    pub validated_at: DateTime<Utc>,
    pub validated_by_store_id: Uuid,
}
