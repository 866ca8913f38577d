//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span, client IP)
//!     → products.rs / admin (handlers, session check on mutations)
//!     → response.rs (error → status + JSON body)
//!     → Send to client
//! ```

pub mod products;
pub mod request;
pub mod response;
pub mod server;

pub use request::{ClientIp, RequestIdExt, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{build_router, AppState, HttpServer};
