//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply SHOWCASE_* env overrides)
//!     → validation.rs (semantic checks)
//!     → ShowcaseConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs, except the admin password
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use validation::{validate_config, ValidationError};
pub use schema::ShowcaseConfig;
pub use schema::{
    AdminConfig, DatabaseConfig, ListenerConfig, LoginRateLimitConfig, ObservabilityConfig,
    SecurityConfig, SessionConfig, TimeoutConfig,
};
