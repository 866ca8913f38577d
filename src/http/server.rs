//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, security headers, metrics)
//! - Bind server to listener
//! - Serve the public catalog page when a static directory is configured
//! - Run background housekeeping until shutdown

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::admin_routes;
use crate::config::ShowcaseConfig;
use crate::http::products::product_routes;
use crate::http::request::{apply_request_id, make_request_span};
use crate::lifecycle::startup::spawn_ledger_sweeper;
use crate::observability::metrics;
use crate::security::{apply_security_headers, LoginRateLimiter, SessionManager};
use crate::store::ProductStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ShowcaseConfig>,
    pub store: Arc<ProductStore>,
    pub sessions: Arc<SessionManager>,
    pub login_limiter: Arc<LoginRateLimiter>,
}

impl AppState {
    /// Build the shared services around an opened store.
    pub fn new(config: ShowcaseConfig, store: ProductStore) -> Self {
        let sessions = SessionManager::new(&config.admin, &config.session);
        let login_limiter = LoginRateLimiter::new(&config.login_rate_limit);
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            sessions: Arc::new(sessions),
            login_limiter: Arc::new(login_limiter),
        }
    }
}

/// HTTP server for the showcase application.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server around the given state.
    pub fn new(state: AppState) -> Self {
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        spawn_ledger_sweeper(
            Arc::clone(&self.state.login_limiter),
            Duration::from_secs(self.state.config.login_rate_limit.window_secs),
            shutdown.resubscribe(),
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ShowcaseConfig {
        &self.state.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let mut router = Router::new()
        .route("/health", get(health))
        .merge(product_routes(&state))
        .merge(admin_routes());

    router = match &config.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.fallback(not_found),
    };

    let router = router
        .with_state(state)
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span));

    apply_security_headers(apply_request_id(router))
}

/// `GET /health`: liveness probe.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
