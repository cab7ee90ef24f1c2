//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound HTTP path and the schema wrappers for
//! domain types. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Visit coupon API",
        description = "Issue visit coupons at locations and redeem them at partner stores."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::coupons::generate_code,
        crate::inbound::http::coupons::issue_coupon,
        crate::inbound::http::coupons::coupon_qr,
        crate::inbound::http::redemptions::redeem_coupon,
        crate::inbound::http::redemptions::scan_coupon,
        crate::inbound::http::stats::system_stats,
        crate::inbound::http::stats::location_ranking,
        crate::inbound::http::stats::store_ranking,
        crate::inbound::http::stats::location_stats,
        crate::inbound::http::stats::store_stats,
        crate::inbound::http::catalogue::list_locations,
        crate::inbound::http::catalogue::list_location_stores,
        crate::inbound::http::admin::list_all_locations,
        crate::inbound::http::admin::create_location,
        crate::inbound::http::admin::update_location,
        crate::inbound::http::admin::deactivate_location,
        crate::inbound::http::admin::list_all_stores,
        crate::inbound::http::admin::create_store,
        crate::inbound::http::admin::update_store,
        crate::inbound::http::admin::deactivate_store,
        crate::inbound::http::admin::recent_coupons,
        crate::inbound::http::admin::coupon_details,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "coupons", description = "Generator surface"),
        (name = "redemptions", description = "Validator surface"),
        (name = "stats", description = "Usage counters"),
        (name = "catalogue", description = "Locations and stores"),
        (name = "admin", description = "Catalogue maintenance and coupon ledger"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
