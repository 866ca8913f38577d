//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Login request:
//!     → rate_limit.rs (per-IP sliding window, refuse before credential check)
//!     → session.rs (credential match, token issue)
//!
//! Mutating API request:
//!     → session.rs (token lookup, lazy eviction of expired entries)
//!
//! Every response:
//!     → headers.rs (nosniff, frame deny, referrer policy, CSP)
//! ```
//!
//! # Design Decisions
//! - Each shared table sits behind its own mutex inside an owning service object
//! - Fail closed: unknown, oversized or expired tokens are all unauthenticated
//! - No trust in client input

pub mod headers;
pub mod rate_limit;
pub mod session;

pub use headers::apply_security_headers;
pub use rate_limit::LoginRateLimiter;
pub use session::{Session, SessionManager};
