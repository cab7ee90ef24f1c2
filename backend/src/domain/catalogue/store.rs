//! Partner store entity.

use chrono::{DateTime, Utc};

use super::validation::{normalise_description, validate_name, validate_slug};
use super::{CatalogueValidationError, LocationId, StoreId};

/// Input payload for [`Store::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDraft {
    pub id: StoreId,
    pub slug: String,
    pub name: String,
    pub location_id: LocationId,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied by administrators. `None` keeps the current value.
///
/// The owning location is fixed once a store exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreChanges {
    pub slug: Option<String>,
    pub name: Option<String>,
    /// `Some("")` clears the description.
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// A shop that redeems coupons issued by its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub id: StoreId,
    pub slug: String,
    pub name: String,
    pub location_id: LocationId,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// Validate and construct a store.
    pub fn new(draft: StoreDraft) -> Result<Self, CatalogueValidationError> {
        Ok(Self {
            id: draft.id,
            slug: validate_slug(draft.slug, "store.slug")?,
            name: validate_name(draft.name, "store.name")?,
            location_id: draft.location_id,
            description: normalise_description(draft.description),
            is_active: draft.is_active,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }

    /// Apply administrator changes, re-validating the result.
    pub fn apply(
        self,
        changes: StoreChanges,
        now: DateTime<Utc>,
    ) -> Result<Self, CatalogueValidationError> {
        Self::new(StoreDraft {
            id: self.id,
            slug: changes.slug.unwrap_or(self.slug),
            name: changes.name.unwrap_or(self.name),
            location_id: self.location_id,
            description: changes.description.or(self.description),
            is_active: changes.is_active.unwrap_or(self.is_active),
            created_at: self.created_at,
            updated_at: now,
        })
    }

    /// Soft-delete the store.
    #[must_use]
    pub fn deactivate(mut self, now: DateTime<Utc>) -> Self {
        self.is_active = false;
        self.updated_at = now;
        self
    }

    /// Whether the store may redeem coupons of `location_id`.
    pub fn serves(&self, location_id: &LocationId) -> bool {
        self.location_id == *location_id
    }
}
