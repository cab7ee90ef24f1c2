//! JSON shapes shared by several endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Coupon, Location, Store};

/// A visit location.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub id: Uuid,
    #[schema(example = "loc-gangnam")]
    pub slug: String,
    #[schema(example = "Gangnam")]
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<&Location> for LocationResponse {
    fn from(location: &Location) -> Self {
        Self {
            id: *location.id.as_uuid(),
            slug: location.slug.clone(),
            name: location.name.clone(),
            description: location.description.clone(),
            is_active: location.is_active,
        }
    }
}

/// A partner store.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreResponse {
    pub id: Uuid,
    #[schema(example = "store-cafe-gangnam")]
    pub slug: String,
    #[schema(example = "Cafe Gangnam")]
    pub name: String,
    pub location_id: Uuid,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<&Store> for StoreResponse {
    fn from(store: &Store) -> Self {
        Self {
            id: *store.id.as_uuid(),
            slug: store.slug.clone(),
            name: store.name.clone(),
            location_id: *store.location_id.as_uuid(),
            description: store.description.clone(),
            is_active: store.is_active,
        }
    }
}

/// A coupon and its redemption facts, when redeemed.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub id: Uuid,
    #[schema(example = "ZK8X2Q1B")]
    pub code: String,
    pub location_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub validated_at: Option<DateTime<Utc>>,
    pub validated_by_store_id: Option<Uuid>,
}

impl From<&Coupon> for CouponResponse {
    fn from(coupon: &Coupon) -> Self {
        let redemption = coupon.redemption();
        Self {
            id: coupon.id(),
            code: coupon.code().to_string(),
            location_id: *coupon.location_id().as_uuid(),
            created_at: coupon.created_at(),
            is_used: coupon.is_used(),
            used_at: redemption.map(|r| r.used_at),
            validated_at: redemption.map(|r| r.validated_at),
            validated_by_store_id: redemption.map(|r| *r.store_id.as_uuid()),
        }
    }
}
