//! Optional Prometheus metrics middleware.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Request metrics exposed on `/metrics` under the `coupons` namespace.
///
/// # Errors
/// Returns [`std::io::Error`] when the collectors cannot be registered.
pub(crate) fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("coupons")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}
