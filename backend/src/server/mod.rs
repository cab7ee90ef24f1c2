//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::{CouponSettings, ServerConfig};
#[cfg(feature = "metrics")]
pub(crate) use metrics::make_metrics;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use coupon_backend::Trace;
#[cfg(debug_assertions)]
use coupon_backend::doc::ApiDoc;
use coupon_backend::inbound::http::configure_api;
use coupon_backend::inbound::http::health::{HealthState, live, ready};
use coupon_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    max_upload_bytes: usize,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        max_upload_bytes,
    } = deps;

    // The gateway answers 400 for uploads up to twice the limit; larger
    // bodies are cut off by actix with 413.
    let payload_limit = max_upload_bytes.saturating_mul(2);

    let api = web::scope("/api/v1").configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::PayloadConfig::new(payload_limit))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        options,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            max_upload_bytes: options.max_upload_bytes,
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(actix_web::middleware::Condition::from_option(
            prometheus.clone(),
        ));

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
