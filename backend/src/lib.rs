//! Visit coupon backend library.
//!
//! Hexagonal layout: `domain` holds the coupon lifecycle and its ports,
//! `outbound` the storage and QR adapters, `inbound` the HTTP surface.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
