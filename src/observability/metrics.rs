//! Metrics collection and exposition.
//!
//! # Metrics
//! - `showcase_http_requests_total` (counter): requests by method, status
//! - `showcase_http_request_duration_seconds` (histogram): latency by method
//! - `showcase_login_attempts_total` (counter): login outcomes
//! - `showcase_active_sessions` (gauge): sessions held in memory
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use ::metrics::{counter, gauge, histogram};
use axum::{extract::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with its own scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start_time: Instant) {
    counter!(
        "showcase_http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("showcase_http_request_duration_seconds", "method" => method.to_string())
        .record(start_time.elapsed().as_secs_f64());
}

/// `outcome` is one of `success`, `invalid`, `rate_limited`.
pub fn record_login(outcome: &'static str) {
    counter!("showcase_login_attempts_total", "outcome" => outcome).increment(1);
}

pub fn record_active_sessions(count: usize) {
    gauge!("showcase_active_sessions").set(count as f64);
}

/// Middleware recording the request counter and latency histogram.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), start_time);
    response
}
