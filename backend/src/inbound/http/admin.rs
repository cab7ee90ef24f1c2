//! Administration surface: catalogue maintenance and the coupon ledger.
//!
//! ```text
//! GET    /api/v1/admin/locations
//! POST   /api/v1/admin/locations
//! PATCH  /api/v1/admin/locations/{id}
//! DELETE /api/v1/admin/locations/{id}
//! GET    /api/v1/admin/stores
//! POST   /api/v1/admin/stores
//! PATCH  /api/v1/admin/stores/{id}
//! DELETE /api/v1/admin/stores/{id}
//! GET    /api/v1/admin/coupons?limit=
//! GET    /api/v1/admin/coupons/{code}
//! ```
//!
//! DELETE deactivates; rows are kept so issued coupons still resolve.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{
    CouponDetails, CreateLocationRequest, CreateStoreRequest, DEFAULT_RECENT_LIMIT,
};
use crate::domain::{LocationChanges, LocationId, StoreChanges, StoreId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CouponResponse, LocationResponse, StoreResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationBody {
    #[schema(example = "loc-gangnam")]
    pub slug: String,
    #[schema(example = "Gangnam")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreBody {
    #[schema(example = "store-cafe-gangnam")]
    pub slug: String,
    #[schema(example = "Cafe Gangnam")]
    pub name: String,
    pub location_id: Uuid,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update. Omitted fields keep their value; an empty description
/// clears it.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueEntryPatch {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl From<CatalogueEntryPatch> for LocationChanges {
    fn from(patch: CatalogueEntryPatch) -> Self {
        Self {
            slug: patch.slug,
            name: patch.name,
            description: patch.description,
            is_active: patch.is_active,
        }
    }
}

impl From<CatalogueEntryPatch> for StoreChanges {
    fn from(patch: CatalogueEntryPatch) -> Self {
        Self {
            slug: patch.slug,
            name: patch.name,
            description: patch.description,
            is_active: patch.is_active,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentCouponsQuery {
    /// Number of coupons to return, newest first.
    #[param(example = 50)]
    pub limit: Option<u32>,
}

/// A coupon with its catalogue context.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponDetailsResponse {
    pub coupon: CouponResponse,
    pub location: Option<LocationResponse>,
    pub redeemed_by: Option<StoreResponse>,
}

impl From<&CouponDetails> for CouponDetailsResponse {
    fn from(details: &CouponDetails) -> Self {
        Self {
            coupon: CouponResponse::from(&details.coupon),
            location: details.location.as_ref().map(LocationResponse::from),
            redeemed_by: details.redeemed_by.as_ref().map(StoreResponse::from),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/locations",
    responses((status = 200, description = "All locations", body = [LocationResponse])),
    tags = ["admin"],
    operation_id = "adminListLocations"
)]
#[get("/admin/locations")]
pub async fn list_all_locations(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let locations = state.catalogue.all_locations().await?;
    let body: Vec<_> = locations.iter().map(LocationResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/locations",
    request_body = CreateLocationBody,
    responses(
        (status = 201, description = "Location created", body = LocationResponse),
        (status = 400, description = "Invalid slug or name", body = ErrorSchema),
        (status = 409, description = "Slug taken", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateLocation"
)]
#[post("/admin/locations")]
pub async fn create_location(
    state: web::Data<HttpState>,
    body: web::Json<CreateLocationBody>,
) -> ApiResult<HttpResponse> {
    let CreateLocationBody {
        slug,
        name,
        description,
    } = body.into_inner();
    let location = state
        .catalogue_admin
        .create_location(CreateLocationRequest {
            slug,
            name,
            description,
        })
        .await?;
    Ok(HttpResponse::Created().json(LocationResponse::from(&location)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/locations/{id}",
    params(("id" = Uuid, Path, description = "Location id")),
    request_body = CatalogueEntryPatch,
    responses(
        (status = 200, description = "Location updated", body = LocationResponse),
        (status = 404, description = "Unknown location", body = ErrorSchema),
        (status = 409, description = "Slug taken", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateLocation"
)]
#[patch("/admin/locations/{id}")]
pub async fn update_location(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    body: web::Json<CatalogueEntryPatch>,
) -> ApiResult<HttpResponse> {
    let location = state
        .catalogue_admin
        .update_location(LocationId::from_uuid(path.into_inner()), body.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(LocationResponse::from(&location)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/locations/{id}",
    params(("id" = Uuid, Path, description = "Location id")),
    responses(
        (status = 200, description = "Location deactivated", body = LocationResponse),
        (status = 404, description = "Unknown location", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeactivateLocation"
)]
#[delete("/admin/locations/{id}")]
pub async fn deactivate_location(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let location = state
        .catalogue_admin
        .deactivate_location(LocationId::from_uuid(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(LocationResponse::from(&location)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/stores",
    responses((status = 200, description = "All stores", body = [StoreResponse])),
    tags = ["admin"],
    operation_id = "adminListStores"
)]
#[get("/admin/stores")]
pub async fn list_all_stores(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let stores = state.catalogue.all_stores().await?;
    let body: Vec<_> = stores.iter().map(StoreResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/stores",
    request_body = CreateStoreBody,
    responses(
        (status = 201, description = "Store created", body = StoreResponse),
        (status = 400, description = "Invalid fields or unknown location", body = ErrorSchema),
        (status = 409, description = "Slug taken", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCreateStore"
)]
#[post("/admin/stores")]
pub async fn create_store(
    state: web::Data<HttpState>,
    body: web::Json<CreateStoreBody>,
) -> ApiResult<HttpResponse> {
    let CreateStoreBody {
        slug,
        name,
        location_id,
        description,
    } = body.into_inner();
    let store = state
        .catalogue_admin
        .create_store(CreateStoreRequest {
            slug,
            name,
            location_id: LocationId::from_uuid(location_id),
            description,
        })
        .await?;
    Ok(HttpResponse::Created().json(StoreResponse::from(&store)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admin/stores/{id}",
    params(("id" = Uuid, Path, description = "Store id")),
    request_body = CatalogueEntryPatch,
    responses(
        (status = 200, description = "Store updated", body = StoreResponse),
        (status = 404, description = "Unknown store", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateStore"
)]
#[patch("/admin/stores/{id}")]
pub async fn update_store(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    body: web::Json<CatalogueEntryPatch>,
) -> ApiResult<HttpResponse> {
    let store = state
        .catalogue_admin
        .update_store(StoreId::from_uuid(path.into_inner()), body.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(StoreResponse::from(&store)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/stores/{id}",
    params(("id" = Uuid, Path, description = "Store id")),
    responses(
        (status = 200, description = "Store deactivated", body = StoreResponse),
        (status = 404, description = "Unknown store", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminDeactivateStore"
)]
#[delete("/admin/stores/{id}")]
pub async fn deactivate_store(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let store = state
        .catalogue_admin
        .deactivate_store(StoreId::from_uuid(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(StoreResponse::from(&store)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/coupons",
    params(RecentCouponsQuery),
    responses((status = 200, description = "Newest coupons first", body = [CouponDetailsResponse])),
    tags = ["admin"],
    operation_id = "adminRecentCoupons"
)]
#[get("/admin/coupons")]
pub async fn recent_coupons(
    state: web::Data<HttpState>,
    query: web::Query<RecentCouponsQuery>,
) -> ApiResult<HttpResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let coupons = state.ledger.recent_coupons(limit).await?;
    let body: Vec<_> = coupons.iter().map(CouponDetailsResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/coupons/{code}",
    params(("code" = String, Path, description = "Coupon code")),
    responses(
        (status = 200, description = "Coupon details", body = CouponDetailsResponse),
        (status = 400, description = "Malformed code", body = ErrorSchema),
        (status = 404, description = "Unknown code", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "adminCouponDetails"
)]
#[get("/admin/coupons/{code}")]
pub async fn coupon_details(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let details = state.ledger.coupon_details(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CouponDetailsResponse::from(&details)))
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
