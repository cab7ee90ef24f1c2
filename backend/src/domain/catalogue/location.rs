//! Visit location entity.

use chrono::{DateTime, Utc};

use super::validation::{normalise_description, validate_name, validate_slug};
use super::{CatalogueValidationError, LocationId};

/// Input payload for [`Location::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDraft {
    pub id: LocationId,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied by administrators. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationChanges {
    pub slug: Option<String>,
    pub name: Option<String>,
    /// `Some("")` clears the description.
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// A place visitors travel to and collect a coupon from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Validate and construct a location.
    pub fn new(draft: LocationDraft) -> Result<Self, CatalogueValidationError> {
        Ok(Self {
            id: draft.id,
            slug: validate_slug(draft.slug, "location.slug")?,
            name: validate_name(draft.name, "location.name")?,
            description: normalise_description(draft.description),
            is_active: draft.is_active,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }

    /// Apply administrator changes, re-validating the result.
    pub fn apply(
        self,
        changes: LocationChanges,
        now: DateTime<Utc>,
    ) -> Result<Self, CatalogueValidationError> {
        Self::new(LocationDraft {
            id: self.id,
            slug: changes.slug.unwrap_or(self.slug),
            name: changes.name.unwrap_or(self.name),
            description: changes.description.or(self.description),
            is_active: changes.is_active.unwrap_or(self.is_active),
            created_at: self.created_at,
            updated_at: now,
        })
    }

    /// Soft-delete the location.
    #[must_use]
    pub fn deactivate(mut self, now: DateTime<Utc>) -> Self {
        self.is_active = false;
        self.updated_at = now;
        self
    }
}
