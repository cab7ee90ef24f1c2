//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed coupon, catalogue and statistics types used
//! by the HTTP and persistence adapters, together with the services that
//! implement the driving ports. Keep types free of transport concerns.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - CouponCode, Coupon: the issued voucher and its one-way lifecycle.
//! - Location, Store: the catalogue a coupon is scoped to.
//! - CouponService, CouponReportingService, CatalogueService and
//!   RedemptionGateway: driving port implementations, bundled at start-up
//!   as CouponServices.

pub mod catalogue;
pub mod code_generator;
pub mod coupon;
pub mod coupon_code;
pub mod error;
pub mod ports;
pub mod qr_payload;
pub mod slug;
pub mod stats;
pub mod trace_id;

mod catalogue_service;
mod coupon_service;
mod redemption_gateway;
mod reporting_service;
mod services;
#[cfg(test)]
pub(crate) mod service_test_helpers;

pub use self::catalogue::{
    CatalogueValidationError, Location, LocationChanges, LocationDraft, LocationId, Store,
    StoreChanges, StoreDraft, StoreId,
};
pub use self::catalogue_service::CatalogueService;
pub use self::code_generator::{
    CodeGenerationError, CodeGenerator, CodeSource, DEFAULT_MAX_ATTEMPTS, RandomCodeSource,
};
pub use self::coupon::{Coupon, CouponRecord, CouponRecordError, CouponState, Redemption};
pub use self::coupon_code::{
    CODE_ALPHABET, CODE_LENGTH, CouponCode, CouponCodeError, normalize_code_input,
};
pub use self::coupon_service::CouponService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::qr_payload::{extract_code_candidate, looks_like_code};
pub use self::redemption_gateway::{DEFAULT_MAX_UPLOAD_BYTES, RedemptionGateway};
pub use self::reporting_service::CouponReportingService;
pub use self::services::{CouponServices, ServiceOptions};
pub use self::stats::{
    LocationStats, LocationUsage, StoreStats, StoreValidations, SystemStats, usage_rate,
};
pub use self::trace_id::TraceId;
