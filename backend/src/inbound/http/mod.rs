//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod admin;
pub mod catalogue;
pub mod coupons;
pub mod dto;
pub mod error;
pub mod health;
pub mod redemptions;
pub mod schemas;
pub mod state;
pub mod stats;
#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ApiResult;

/// Register every `/api/v1` handler. Mount inside a `/api/v1` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(coupons::generate_code)
        .service(coupons::issue_coupon)
        .service(coupons::coupon_qr)
        .service(redemptions::redeem_coupon)
        .service(redemptions::scan_coupon)
        .service(stats::system_stats)
        .service(stats::location_ranking)
        .service(stats::store_ranking)
        .service(stats::location_stats)
        .service(stats::store_stats)
        .service(catalogue::list_locations)
        .service(catalogue::list_location_stores)
        .service(admin::list_all_locations)
        .service(admin::create_location)
        .service(admin::update_location)
        .service(admin::deactivate_location)
        .service(admin::list_all_stores)
        .service(admin::create_store)
        .service(admin::update_store)
        .service(admin::deactivate_store)
        .service(admin::recent_coupons)
        .service(admin::coupon_details);
}
