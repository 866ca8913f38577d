//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the product store (schema, migration, first-run seed)
//! - Assemble the shared application state
//! - Start background housekeeping
//!
//! # Design Decisions
//! - Fail fast: a store that cannot be opened is fatal
//! - The listener is bound by the caller, after state is ready

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::ShowcaseConfig;
use crate::http::AppState;
use crate::security::LoginRateLimiter;
use crate::store::{ProductStore, StoreError};

/// Open storage and build the state shared by every handler.
pub fn build_state(config: ShowcaseConfig) -> Result<AppState, StoreError> {
    let store = ProductStore::open(&config.database)?;
    tracing::info!(
        path = %config.database.path,
        products = store.count()?,
        "Product store ready"
    );
    if config.admin.password.is_empty() {
        tracing::warn!("Admin password is empty; logins will be refused");
    }
    Ok(AppState::new(config, store))
}

/// Periodically drop login-ledger entries that have aged out of the window.
pub fn spawn_ledger_sweeper(
    limiter: Arc<LoginRateLimiter>,
    interval: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    let interval = interval.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    limiter.prune();
                    tracing::debug!(clients = limiter.tracked_clients(), "Login ledger swept");
                }
                _ = shutdown.recv() => break,
            }
        }
    })
}
