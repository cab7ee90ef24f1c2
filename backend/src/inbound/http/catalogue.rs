//! Public catalogue reads used to populate the generator and validator
//! pickers.
//!
//! ```text
//! GET /api/v1/locations
//! GET /api/v1/locations/{slug}/stores
//! ```

use actix_web::{HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{LocationResponse, StoreResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Active locations ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    responses(
        (status = 200, description = "Active locations", body = [LocationResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listLocations"
)]
#[get("/locations")]
pub async fn list_locations(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let locations = state.catalogue.active_locations().await?;
    let body: Vec<_> = locations.iter().map(LocationResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Active stores of one location ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/locations/{slug}/stores",
    params(("slug" = String, Path, description = "Location slug")),
    responses(
        (status = 200, description = "Active stores", body = [StoreResponse]),
        (status = 404, description = "Unknown location", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listLocationStores"
)]
#[get("/locations/{slug}/stores")]
pub async fn list_location_stores(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let stores = state.catalogue.active_stores_for(&path.into_inner()).await?;
    let body: Vec<_> = stores.iter().map(StoreResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
