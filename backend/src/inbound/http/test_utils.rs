//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use mockable::DefaultClock;

use crate::domain::ports::{
    CouponRepository, FixtureQrDecoder, LocationRepository, StoreRepository,
};
use crate::domain::service_test_helpers::{sample_coupon, sample_location, sample_store};
use crate::domain::{Coupon, CouponServices, Location, ServiceOptions, Store};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::memory::InMemoryStore;
use crate::outbound::qr::QrCodeSvgRenderer;

/// Upload limit used by handler tests.
pub(crate) const TEST_UPLOAD_LIMIT: usize = 64 * 1024;

/// In-memory catalogue with two locations and one store each.
pub(crate) struct Seeded {
    pub(crate) state: HttpState,
    pub(crate) repo: InMemoryStore,
    pub(crate) gangnam: Location,
    pub(crate) jongno: Location,
    pub(crate) cafe: Store,
    pub(crate) bakery: Store,
}

impl Seeded {
    /// Store an unused coupon directly, bypassing the issuance endpoint.
    pub(crate) async fn issue(&self, code: &str, location: &Location) -> Coupon {
        let coupon = sample_coupon(code, location);
        CouponRepository::insert(&self.repo, &coupon)
            .await
            .expect("coupon stored");
        coupon
    }
}

/// Seed the catalogue; the scan decoder always reports `payload`.
pub(crate) async fn seeded_with_payload(payload: &str) -> Seeded {
    let repo = InMemoryStore::new();
    let gangnam = sample_location("loc-gangnam", "Gangnam");
    let jongno = sample_location("loc-jongno", "Jongno");
    let cafe = sample_store("store-cafe-gangnam", "Cafe Gangnam", &gangnam);
    let bakery = sample_store("store-bakery-jongno", "Bakery Jongno", &jongno);
    for location in [&gangnam, &jongno] {
        LocationRepository::insert(&repo, location)
            .await
            .expect("location stored");
    }
    for store in [&cafe, &bakery] {
        StoreRepository::insert(&repo, store)
            .await
            .expect("store stored");
    }

    let shared = Arc::new(repo.clone());
    let services = CouponServices::new(
        shared.clone(),
        shared.clone(),
        shared,
        Arc::new(FixtureQrDecoder {
            payload: payload.to_owned(),
        }),
        Arc::new(DefaultClock),
        ServiceOptions {
            max_upload_bytes: TEST_UPLOAD_LIMIT,
            ..ServiceOptions::default()
        },
    );
    Seeded {
        state: HttpState::new(services, Arc::new(QrCodeSvgRenderer::new())),
        repo,
        gangnam,
        jongno,
        cafe,
        bakery,
    }
}

pub(crate) async fn seeded() -> Seeded {
    seeded_with_payload("ZK8X2Q1B").await
}

/// Initialise the `/api/v1` scope over `state` with trace middleware.
pub(crate) async fn init_api(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::PayloadConfig::new(TEST_UPLOAD_LIMIT * 2))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure_api)),
    )
    .await
}
