//! Product persistence subsystem.
//!
//! # Data Flow
//! ```text
//! ProductDraft (validated)
//!     → sqlite.rs (single locked connection, one transaction per write)
//!     → products table (specs/features as JSON text)
//!     → Product (lists decoded, timestamps attached)
//! ```
//!
//! # Design Decisions
//! - Synchronous rusqlite; async callers hop through `spawn_blocking`
//! - Reads and writes share one mutex, trading read concurrency for simplicity
//! - Failures are typed so the HTTP layer can pick 404 vs 500

mod samples;
pub mod sqlite;

pub use sqlite::ProductStore;

/// Errors raised by the product store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("list column encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("product {0} not found")]
    NotFound(i64),

    #[error("product store lock poisoned")]
    Poisoned,
}
