//! Validator surface: redeem typed or scanned codes at a store.
//!
//! ```text
//! POST /api/v1/stores/{slug}/redemptions
//! POST /api/v1/stores/{slug}/redemptions/scan
//! ```
//!
//! Already-used and foreign codes are reported with status 200; only
//! request and infrastructure failures are errors.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    RedeemCouponRequest, RedemptionOutcome, ScanRedemptionRequest, ScanRedemptionResponse,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{LocationResponse, StoreResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Code typed by store staff.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedeemCouponBody {
    #[schema(example = "zk8x2q1b")]
    pub code: String,
}

/// Outcome of one redemption attempt.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionResponse {
    /// The code belongs to this store's location.
    pub is_valid: bool,
    /// The coupon had been redeemed before this attempt.
    pub is_used: bool,
    #[schema(example = "Gangnam visit coupon redeemed at Cafe Gangnam")]
    pub message: String,
    #[schema(example = "ZK8X2Q1B")]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redeemed_by: Option<StoreResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_at: Option<DateTime<Utc>>,
}

impl From<&RedemptionOutcome> for RedemptionResponse {
    fn from(outcome: &RedemptionOutcome) -> Self {
        let mut response = Self {
            is_valid: outcome.is_valid(),
            is_used: outcome.is_used(),
            message: outcome.message(),
            code: outcome.code().to_owned(),
            location: None,
            store: None,
            redeemed_by: None,
            used_at: None,
        };
        match outcome {
            RedemptionOutcome::Redeemed {
                coupon,
                location,
                store,
            } => {
                response.location = Some(LocationResponse::from(location));
                response.store = Some(StoreResponse::from(store));
                response.used_at = coupon.redemption().map(|r| r.used_at);
            }
            RedemptionOutcome::AlreadyUsed {
                coupon,
                redeemed_by,
            } => {
                response.redeemed_by = redeemed_by.as_ref().map(StoreResponse::from);
                response.used_at = coupon.redemption().map(|r| r.used_at);
            }
            RedemptionOutcome::Invalid { .. } => {}
        }
        response
    }
}

/// Scan result: what the camera read and how the code was redeemed.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    /// Code candidate extracted from the QR payload.
    pub decoded: String,
    /// Decoding pass that found the symbol.
    #[schema(example = "no_invert")]
    pub strategy: String,
    #[serde(flatten)]
    pub redemption: RedemptionResponse,
}

impl From<ScanRedemptionResponse> for ScanResponse {
    fn from(scan: ScanRedemptionResponse) -> Self {
        Self {
            redemption: RedemptionResponse::from(&scan.outcome),
            strategy: scan.strategy.to_string(),
            decoded: scan.decoded,
        }
    }
}

/// Redeem a typed code at a store.
#[utoipa::path(
    post,
    path = "/api/v1/stores/{slug}/redemptions",
    params(("slug" = String, Path, description = "Store slug")),
    request_body = RedeemCouponBody,
    responses(
        (status = 200, description = "Redeemed, already used or not valid here", body = RedemptionResponse),
        (status = 400, description = "Blank code", body = ErrorSchema),
        (status = 404, description = "Unknown or inactive store", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["redemptions"],
    operation_id = "redeemCoupon"
)]
#[post("/stores/{slug}/redemptions")]
pub async fn redeem_coupon(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Json<RedeemCouponBody>,
) -> ApiResult<HttpResponse> {
    let outcome = state
        .redemption
        .redeem(RedeemCouponRequest {
            store_slug: path.into_inner(),
            code: body.into_inner().code,
        })
        .await?;
    Ok(HttpResponse::Ok().json(RedemptionResponse::from(&outcome)))
}

/// Decode a QR photo sent as the raw request body and redeem its code.
#[utoipa::path(
    post,
    path = "/api/v1/stores/{slug}/redemptions/scan",
    params(("slug" = String, Path, description = "Store slug")),
    request_body(content = Vec<u8>, content_type = "image/*", description = "Photo of the coupon"),
    responses(
        (status = 200, description = "Decoded and redeemed, already used or not valid here", body = ScanResponse),
        (status = 400, description = "Not an image, too large, or no QR code found", body = ErrorSchema),
        (status = 404, description = "Unknown or inactive store", body = ErrorSchema)
    ),
    tags = ["redemptions"],
    operation_id = "scanAndRedeemCoupon"
)]
#[post("/stores/{slug}/redemptions/scan")]
pub async fn scan_coupon(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    request: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let scanned = state
        .scan
        .scan_and_redeem(ScanRedemptionRequest {
            store_slug: path.into_inner(),
            content_type,
            image: body.to_vec(),
        })
        .await?;
    Ok(HttpResponse::Ok().json(ScanResponse::from(scanned)))
}

#[cfg(test)]
#[path = "redemptions_tests.rs"]
mod tests;
