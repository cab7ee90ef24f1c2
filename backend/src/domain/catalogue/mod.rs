//! Catalogue of visit locations and partner stores.
//!
//! A location hands out coupons; a store belongs to exactly one location and
//! redeems that location's coupons. Both are soft-deleted by deactivation so
//! issued coupons keep their references.

use std::fmt;

mod ids;
mod location;
mod store;
mod validation;


pub use ids::{LocationId, StoreId};
pub use location::{Location, LocationChanges, LocationDraft};
pub use store::{Store, StoreChanges, StoreDraft};

/// Validation errors returned by catalogue constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueValidationError {
    InvalidSlug { field: &'static str },
    EmptyField { field: &'static str },
}

impl fmt::Display for CatalogueValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSlug { field } => write!(
                f,
                "{field} must be lowercase letters, digits or hyphens"
            ),
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
        }
    }
}

impl std::error::Error for CatalogueValidationError {}
