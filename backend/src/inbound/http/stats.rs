//! Read-only usage counters.
//!
//! ```text
//! GET /api/v1/stats
//! GET /api/v1/stats/locations
//! GET /api/v1/stats/stores
//! GET /api/v1/locations/{slug}/stats
//! GET /api/v1/stores/{slug}/stats
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{LocationStats, LocationUsage, StoreStats, StoreValidations, SystemStats};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{LocationResponse, StoreResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// System-wide totals. `today*` counts start at UTC midnight.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatsResponse {
    pub total_coupons: u64,
    pub used_coupons: u64,
    pub unused_coupons: u64,
    /// Rounded percentage of issued coupons that were redeemed.
    #[schema(example = 25)]
    pub usage_rate: u32,
    pub active_locations: u64,
    pub active_stores: u64,
    pub today_issued: u64,
    pub today_used: u64,
}

impl From<SystemStats> for SystemStatsResponse {
    fn from(stats: SystemStats) -> Self {
        Self {
            total_coupons: stats.total_coupons,
            used_coupons: stats.used_coupons,
            unused_coupons: stats.unused_coupons,
            usage_rate: stats.usage_rate,
            active_locations: stats.active_locations,
            active_stores: stats.active_stores,
            today_issued: stats.today_issued,
            today_used: stats.today_used,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationStatsResponse {
    pub location: LocationResponse,
    pub total: u64,
    pub used: u64,
    pub unused: u64,
}

impl From<LocationStats> for LocationStatsResponse {
    fn from(stats: LocationStats) -> Self {
        Self {
            location: LocationResponse::from(&stats.location),
            total: stats.total,
            used: stats.used,
            unused: stats.unused,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatsResponse {
    pub store: StoreResponse,
    pub validated: u64,
}

impl From<StoreStats> for StoreStatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            store: StoreResponse::from(&stats.store),
            validated: stats.validated,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationUsageResponse {
    pub location_id: Uuid,
    pub location_name: String,
    pub total: u64,
    pub used: u64,
    pub usage_rate: u32,
}

impl From<LocationUsage> for LocationUsageResponse {
    fn from(usage: LocationUsage) -> Self {
        Self {
            location_id: *usage.location_id.as_uuid(),
            location_name: usage.location_name,
            total: usage.total,
            used: usage.used,
            usage_rate: usage.usage_rate,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreValidationsResponse {
    pub store_id: Uuid,
    pub store_name: String,
    pub location_id: Uuid,
    pub validated: u64,
}

impl From<StoreValidations> for StoreValidationsResponse {
    fn from(row: StoreValidations) -> Self {
        Self {
            store_id: *row.store_id.as_uuid(),
            store_name: row.store_name,
            location_id: *row.location_id.as_uuid(),
            validated: row.validated,
        }
    }
}

fn json_list<T, R>(items: Vec<T>) -> HttpResponse
where
    R: From<T> + Serialize,
{
    HttpResponse::Ok().json(items.into_iter().map(R::from).collect::<Vec<R>>())
}

#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "System totals", body = SystemStatsResponse),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "getSystemStats"
)]
#[get("/stats")]
pub async fn system_stats(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let stats = state.stats.system_stats().await?;
    Ok(HttpResponse::Ok().json(SystemStatsResponse::from(stats)))
}

/// Active locations ordered by usage rate.
#[utoipa::path(
    get,
    path = "/api/v1/stats/locations",
    responses(
        (status = 200, description = "Usage ranking", body = [LocationUsageResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "getLocationUsageRanking"
)]
#[get("/stats/locations")]
pub async fn location_ranking(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let ranking = state.stats.location_usage_ranking().await?;
    Ok(json_list::<_, LocationUsageResponse>(ranking))
}

/// Active stores ordered by redemptions.
#[utoipa::path(
    get,
    path = "/api/v1/stats/stores",
    responses(
        (status = 200, description = "Validation ranking", body = [StoreValidationsResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "getStoreValidationRanking"
)]
#[get("/stats/stores")]
pub async fn store_ranking(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let ranking = state.stats.store_validation_ranking().await?;
    Ok(json_list::<_, StoreValidationsResponse>(ranking))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations/{slug}/stats",
    params(("slug" = String, Path, description = "Location slug")),
    responses(
        (status = 200, description = "Location totals", body = LocationStatsResponse),
        (status = 404, description = "Unknown location", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "getLocationStats"
)]
#[get("/locations/{slug}/stats")]
pub async fn location_stats(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let stats = state.stats.location_stats(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LocationStatsResponse::from(stats)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stores/{slug}/stats",
    params(("slug" = String, Path, description = "Store slug")),
    responses(
        (status = 200, description = "Store totals", body = StoreStatsResponse),
        (status = 404, description = "Unknown store", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "getStoreStats"
)]
#[get("/stores/{slug}/stats")]
pub async fn store_stats(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let stats = state.stats.store_stats(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StoreStatsResponse::from(stats)))
}
