//! Generator surface: mint, issue and render coupon codes.
//!
//! ```text
//! POST /api/v1/locations/{slug}/coupon-codes
//! POST /api/v1/locations/{slug}/coupons
//! GET  /api/v1/coupons/{code}/qr
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::ports::{GeneratedCode, IssueCouponRequest, IssuedCoupon};
use crate::domain::{CouponCode, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CouponResponse, LocationResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// A fresh code that has not been stored yet.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCodeResponse {
    #[schema(example = "ZK8X2Q1B")]
    pub code: String,
    pub location: LocationResponse,
}

impl From<GeneratedCode> for GeneratedCodeResponse {
    fn from(generated: GeneratedCode) -> Self {
        Self {
            code: generated.code.to_string(),
            location: LocationResponse::from(&generated.location),
        }
    }
}

/// Issue request. Omit `code` to have the server pick one.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueCouponBody {
    #[serde(default)]
    #[schema(example = "ZK8X2Q1B")]
    pub code: Option<String>,
}

/// A stored, unused coupon.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCouponResponse {
    pub coupon: CouponResponse,
    pub location: LocationResponse,
    #[schema(example = "Gangnam visit coupon ZK8X2Q1B issued")]
    pub message: String,
}

impl From<IssuedCoupon> for IssuedCouponResponse {
    fn from(issued: IssuedCoupon) -> Self {
        Self {
            message: issued.message(),
            coupon: CouponResponse::from(&issued.coupon),
            location: LocationResponse::from(&issued.location),
        }
    }
}

/// Generate a code for a location without storing it.
#[utoipa::path(
    post,
    path = "/api/v1/locations/{slug}/coupon-codes",
    params(("slug" = String, Path, description = "Location slug")),
    responses(
        (status = 200, description = "Generated code", body = GeneratedCodeResponse),
        (status = 404, description = "Unknown or inactive location", body = ErrorSchema),
        (status = 503, description = "Storage unavailable or code space exhausted", body = ErrorSchema)
    ),
    tags = ["coupons"],
    operation_id = "generateCouponCode"
)]
#[post("/locations/{slug}/coupon-codes")]
pub async fn generate_code(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let generated = state.issuance.generate_code(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(GeneratedCodeResponse::from(generated)))
}

/// Issue a coupon at a location.
#[utoipa::path(
    post,
    path = "/api/v1/locations/{slug}/coupons",
    params(("slug" = String, Path, description = "Location slug")),
    request_body = IssueCouponBody,
    responses(
        (status = 201, description = "Coupon issued", body = IssuedCouponResponse),
        (status = 400, description = "Malformed code", body = ErrorSchema),
        (status = 404, description = "Unknown or inactive location", body = ErrorSchema),
        (status = 409, description = "Code already issued", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["coupons"],
    operation_id = "issueCoupon"
)]
#[post("/locations/{slug}/coupons")]
pub async fn issue_coupon(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Json<IssueCouponBody>,
) -> ApiResult<HttpResponse> {
    let location_slug = path.into_inner();
    let issued = match body.into_inner().code {
        Some(code) => {
            state
                .issuance
                .issue(IssueCouponRequest {
                    location_slug,
                    code,
                })
                .await?
        }
        None => state.issuance.issue_new(&location_slug).await?,
    };
    Ok(HttpResponse::Created().json(IssuedCouponResponse::from(issued)))
}

/// Render a coupon code as an SVG QR symbol.
#[utoipa::path(
    get,
    path = "/api/v1/coupons/{code}/qr",
    params(("code" = String, Path, description = "Coupon code")),
    responses(
        (status = 200, description = "SVG document", content_type = "image/svg+xml", body = String),
        (status = 400, description = "Malformed code", body = ErrorSchema)
    ),
    tags = ["coupons"],
    operation_id = "getCouponQr"
)]
#[get("/coupons/{code}/qr")]
pub async fn coupon_qr(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let code =
        CouponCode::parse(&path.into_inner()).map_err(|err| Error::invalid_request(err.to_string()))?;
    let svg = state.qr.render_svg(&code).map_err(|err| {
        error!(error = %err, %code, "QR rendering failed");
        Error::internal("QR rendering failed")
    })?;
    Ok(HttpResponse::Ok().content_type("image/svg+xml").body(svg))
}

#[cfg(test)]
#[path = "coupons_tests.rs"]
mod tests;
