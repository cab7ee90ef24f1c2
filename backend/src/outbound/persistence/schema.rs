//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Visit locations that issue coupons.
    locations (id) {
        id -> Uuid,
        /// Unique, URL-safe identifier.
        slug -> Varchar,
        name -> Varchar,
        description -> Nullable<Text>,
        /// Soft-delete flag; deactivated rows stay referenced by coupons.
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Partner stores; each belongs to exactly one location.
    stores (id) {
        id -> Uuid,
        slug -> Varchar,
        name -> Varchar,
        location_id -> Uuid,
        description -> Nullable<Text>,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Issued coupons.
    ///
    /// `used_at`, `validated_at` and `validated_by_store_id` are set together
    /// when `is_used` flips to true, and never cleared.
    coupons (id) {
        id -> Uuid,
        /// Unique eight character code.
        code -> Varchar,
        location_id -> Uuid,
        created_at -> Timestamptz,
        is_used -> Bool,
        used_at -> Nullable<Timestamptz>,
        validated_at -> Nullable<Timestamptz>,
        validated_by_store_id -> Nullable<Uuid>,
    }
}

diesel::joinable!(stores -> locations (location_id));
diesel::joinable!(coupons -> locations (location_id));
diesel::joinable!(coupons -> stores (validated_by_store_id));

diesel::allow_tables_to_appear_in_same_query!(coupons, locations, stores);
