//! Admin authentication endpoints and the session guard.
//!
//! # Data Flow
//! ```text
//! POST /api/admin/login
//!     → security::LoginRateLimiter (429 when over the window)
//!     → security::SessionManager::login (401 on mismatch)
//!     → token in body + HttpOnly SameSite=Lax cookie
//!
//! Protected route
//!     → auth.rs require_admin (Bearer header, else cookie)
//!     → Session in request extensions → handler
//! ```

pub mod auth;
pub mod handlers;

use axum::{routing::post, Router};

use crate::http::server::AppState;
use self::handlers::{login, logout};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/admin/logout", post(logout))
}
