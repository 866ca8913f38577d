//! Product catalog model and input validation.
//!
//! # Data Flow
//! ```text
//! JSON payload (untrusted)
//!     → validator.rs (trim, clamp, scheme-filter; reject on missing required field)
//!     → ProductDraft
//!     → store (persist)
//!     → Product (with id and timestamps)
//! ```

pub mod product;
pub mod validator;

pub use product::{Product, ProductDraft};
pub use validator::{limits, validate_product};
