//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the showcase
//! server. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the showcase server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Product database settings.
    pub database: DatabaseConfig,

    /// Admin credentials.
    pub admin: AdminConfig,

    /// Admin session settings.
    pub session: SessionConfig,

    /// Login attempt limiting.
    pub login_rate_limit: LoginRateLimitConfig,

    /// Security hardening.
    pub security: SecurityConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Directory holding the public catalog page, served at `/`.
    pub static_dir: Option<String>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// SQLite product database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the database file. Parent directories are created on open.
    pub path: String,

    /// How long SQLite waits on a locked database file, in milliseconds.
    pub busy_timeout_ms: u64,

    /// Insert the sample catalog when the table is empty.
    pub seed_samples: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/products.db".to_string(),
            busy_timeout_ms: 5_000,
            seed_samples: true,
        }
    }
}

/// Admin credentials. The password has no default and must be supplied.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: String::new(),
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Admin session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Absolute session lifetime in seconds.
    pub ttl_secs: u64,

    /// Name of the session cookie.
    pub cookie_name: String,

    /// Tokens longer than this are rejected without a lookup.
    pub max_token_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 24 * 60 * 60,
            cookie_name: "admin_session".to_string(),
            max_token_len: 128,
        }
    }
}

/// Sliding-window limit on login attempts per client IP.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginRateLimitConfig {
    /// Attempts admitted per window.
    pub max_attempts: usize,

    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for LoginRateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_secs: 60,
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,

    /// Take the client IP from the first `X-Forwarded-For` entry when present.
    pub trust_forwarded_for: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
            trust_forwarded_for: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `tracing` filter, used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Start the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Metrics listener address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "showcase=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
