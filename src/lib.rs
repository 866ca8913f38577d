//! Product showcase server library.
//!
//! A public product catalog backed by SQLite, with a session-authenticated
//! admin API for managing entries.

pub mod admin;
pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod release;
pub mod security;
pub mod store;

pub use config::ShowcaseConfig;
pub use http::{build_router, AppState, HttpServer};
pub use lifecycle::Shutdown;
