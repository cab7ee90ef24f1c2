//! Validation helpers shared by catalogue entities.

use super::CatalogueValidationError;
use crate::domain::slug::is_valid_slug;

pub(super) fn validate_slug(
    value: String,
    field: &'static str,
) -> Result<String, CatalogueValidationError> {
    let trimmed = value.trim();
    if !is_valid_slug(trimmed) {
        return Err(CatalogueValidationError::InvalidSlug { field });
    }
    Ok(trimmed.to_owned())
}

pub(super) fn validate_name(
    value: String,
    field: &'static str,
) -> Result<String, CatalogueValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogueValidationError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

/// Blank descriptions are stored as absent.
pub(super) fn normalise_description(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
