//! Sliding-window limiter for admin login attempts.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::config::LoginRateLimitConfig;
use crate::observability::metrics;
use crate::security::session::now_millis;

/// Per-client ledger of recent attempt timestamps (epoch milliseconds).
pub struct LoginRateLimiter {
    attempts: Mutex<HashMap<String, Vec<u64>>>,
    max_attempts: usize,
    window: Duration,
}

impl LoginRateLimiter {
    pub fn new(config: &LoginRateLimitConfig) -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
            max_attempts: config.max_attempts,
            window: Duration::from_secs(config.window_secs),
        }
    }

    /// Admit or refuse an attempt from `client`. Admitted attempts are recorded;
    /// refused ones are not.
    pub fn admit(&self, client: &str) -> bool {
        self.admit_at(client, now_millis())
    }

    pub fn admit_at(&self, client: &str, now_ms: u64) -> bool {
        let window_ms = self.window.as_millis() as u64;
        let mut attempts = self.attempts.lock().expect("login rate limiter mutex poisoned");
        let recent = attempts.entry(client.to_string()).or_default();
        recent.retain(|&t| now_ms.saturating_sub(t) < window_ms);

        if recent.len() >= self.max_attempts {
            tracing::warn!(client = %client, "Login rate limit exceeded");
            metrics::record_login("rate_limited");
            return false;
        }
        recent.push(now_ms);
        true
    }

    /// Drop clients whose every attempt has aged out of the window.
    pub fn prune(&self) {
        self.prune_at(now_millis());
    }

    pub fn prune_at(&self, now_ms: u64) {
        let window_ms = self.window.as_millis() as u64;
        let mut attempts = self.attempts.lock().expect("login rate limiter mutex poisoned");
        attempts.retain(|_, recent| {
            recent.retain(|&t| now_ms.saturating_sub(t) < window_ms);
            !recent.is_empty()
        });
    }

    /// Number of clients with a ledger entry.
    pub fn tracked_clients(&self) -> usize {
        self.attempts.lock().expect("login rate limiter mutex poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> LoginRateLimiter {
        LoginRateLimiter::new(&LoginRateLimitConfig::default())
    }

    #[test]
    fn test_sixth_attempt_in_window_is_refused() {
        let limiter = limiter();
        let start = 1_000_000;
        for i in 0..5 {
            assert!(limiter.admit_at("10.0.0.1", start + i * 1_000), "attempt {i}");
        }
        assert!(!limiter.admit_at("10.0.0.1", start + 5_000));
        assert!(!limiter.admit_at("10.0.0.1", start + 59_999));
    }

    #[test]
    fn test_window_slides() {
        let limiter = limiter();
        let start = 1_000_000;
        for _ in 0..5 {
            assert!(limiter.admit_at("10.0.0.1", start));
        }
        assert!(!limiter.admit_at("10.0.0.1", start + 30_000));
        assert!(limiter.admit_at("10.0.0.1", start + 60_000));
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = limiter();
        for _ in 0..5 {
            assert!(limiter.admit_at("10.0.0.1", 0));
        }
        assert!(!limiter.admit_at("10.0.0.1", 10));
        assert!(limiter.admit_at("10.0.0.2", 10));
    }

    #[test]
    fn test_refused_attempts_do_not_extend_lockout() {
        let limiter = limiter();
        for _ in 0..5 {
            assert!(limiter.admit_at("ip", 0));
        }
        for t in [10_000, 20_000, 50_000] {
            assert!(!limiter.admit_at("ip", t));
        }
        assert!(limiter.admit_at("ip", 60_000));
    }

    #[test]
    fn test_prune_drops_stale_clients() {
        let limiter = limiter();
        limiter.admit_at("old", 0);
        limiter.admit_at("fresh", 100_000);
        limiter.prune_at(120_000);
        assert_eq!(limiter.tracked_clients(), 1);
    }
}
