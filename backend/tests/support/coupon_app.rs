//! In-process application over the in-memory store for integration suites.
//!
//! Each request runs on a fresh Actix system; the store lives behind `Arc`s
//! so data persists between requests.

use std::sync::Arc;

use actix_web::http::Method;
use actix_web::{App, test, web};
use mockable::DefaultClock;
use serde_json::Value;

use coupon_backend::Trace;
use coupon_backend::domain::{CouponServices, ServiceOptions};
use coupon_backend::inbound::http::configure_api;
use coupon_backend::inbound::http::state::HttpState;
use coupon_backend::outbound::memory::InMemoryStore;
use coupon_backend::outbound::qr::{QrCodeSvgRenderer, RqrrQrDecoder};

/// Body sent with a request.
pub(crate) enum Body {
    Empty,
    Json(Value),
    Image(Vec<u8>),
}

/// Status and decoded JSON body of a response.
#[derive(Debug)]
pub(crate) struct Reply {
    pub(crate) status: u16,
    pub(crate) body: Value,
}

#[derive(Clone)]
pub(crate) struct CouponApp {
    state: HttpState,
}

impl CouponApp {
    pub(crate) fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let services = CouponServices::new(
            store.clone(),
            store.clone(),
            store,
            Arc::new(RqrrQrDecoder::new()),
            Arc::new(DefaultClock),
            ServiceOptions::default(),
        );
        Self {
            state: HttpState::new(services, Arc::new(QrCodeSvgRenderer::new())),
        }
    }

    /// Send one request under `/api/v1`.
    pub(crate) fn send(&self, method: Method, path: &str, body: Body) -> Reply {
        let state = self.state.clone();
        let uri = format!("/api/v1{path}");
        actix_rt::System::new().block_on(async move {
            let app = test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .app_data(web::PayloadConfig::new(
                        ServiceOptions::default().max_upload_bytes * 2,
                    ))
                    .wrap(Trace)
                    .service(web::scope("/api/v1").configure(configure_api)),
            )
            .await;
            let request = test::TestRequest::default().method(method).uri(&uri);
            let request = match body {
                Body::Empty => request,
                Body::Json(value) => request.set_json(value),
                Body::Image(bytes) => request
                    .insert_header(("content-type", "image/png"))
                    .set_payload(bytes),
            };
            let response = test::call_service(&app, request.to_request()).await;
            let status = response.status().as_u16();
            let bytes = test::read_body(response).await;
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            Reply { status, body }
        })
    }

    pub(crate) fn get(&self, path: &str) -> Reply {
        self.send(Method::GET, path, Body::Empty)
    }

    pub(crate) fn post(&self, path: &str, body: Value) -> Reply {
        self.send(Method::POST, path, Body::Json(body))
    }

    /// Create a location and return its id.
    pub(crate) fn create_location(&self, slug: &str, name: &str) -> String {
        let reply = self.post(
            "/admin/locations",
            serde_json::json!({ "slug": slug, "name": name }),
        );
        assert_eq!(reply.status, 201, "location {slug} created: {:?}", reply.body);
        reply.body["id"]
            .as_str()
            .expect("location id")
            .to_owned()
    }

    pub(crate) fn create_store(&self, slug: &str, name: &str, location_id: &str) {
        let reply = self.post(
            "/admin/stores",
            serde_json::json!({ "slug": slug, "name": name, "locationId": location_id }),
        );
        assert_eq!(reply.status, 201, "store {slug} created: {:?}", reply.body);
    }

    /// Gangnam with a cafe, Jongno with a bakery.
    pub(crate) fn seed_catalogue(&self) {
        let gangnam = self.create_location("loc-gangnam", "Gangnam");
        let jongno = self.create_location("loc-jongno", "Jongno");
        self.create_store("store-cafe-gangnam", "Cafe Gangnam", &gangnam);
        self.create_store("store-bakery-jongno", "Bakery Jongno", &jongno);
    }

    pub(crate) fn issue(&self, location_slug: &str, code: &str) -> Reply {
        self.post(
            &format!("/locations/{location_slug}/coupons"),
            serde_json::json!({ "code": code }),
        )
    }

    pub(crate) fn redeem(&self, store_slug: &str, code: &str) -> Reply {
        self.post(
            &format!("/stores/{store_slug}/redemptions"),
            serde_json::json!({ "code": code }),
        )
    }
}
