//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel row structs and domain types and
//! hold no business rules. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module.
//!
//! ```ignore
//! use coupon_backend::outbound::persistence::{DbPool, DieselCouponRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/coupons")).await?;
//! let coupons = DieselCouponRepository::new(pool.clone());
//! ```

mod diesel_basic_error_mapping;
mod diesel_coupon_repository;
mod diesel_location_repository;
mod diesel_store_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_coupon_repository::DieselCouponRepository;
pub use diesel_location_repository::DieselLocationRepository;
pub use diesel_store_repository::DieselStoreRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
