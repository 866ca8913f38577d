//! In-memory admin sessions with absolute expiry.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};

use crate::config::{AdminConfig, SessionConfig};
use crate::observability::metrics;

/// Server-held proof of a successful admin login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    pub username: String,
    /// Absolute deadline, epoch milliseconds.
    pub expires: u64,
}

/// Owns the session table and the admin credentials it checks against.
///
/// Constructed once per process and shared through the router state.
pub struct SessionManager {
    sessions: Mutex<HashMap<String, Session>>,
    username: String,
    password: String,
    ttl: Duration,
    max_token_len: usize,
}

impl SessionManager {
    pub fn new(admin: &AdminConfig, config: &SessionConfig) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            username: admin.username.clone(),
            password: admin.password.clone(),
            ttl: Duration::from_secs(config.ttl_secs),
            max_token_len: config.max_token_len,
        }
    }

    /// Session lifetime, used for the cookie max-age.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Check credentials and open a session on a match.
    pub fn login(&self, username: &str, password: &str) -> Option<Session> {
        self.login_at(username, password, now_millis())
    }

    pub fn login_at(&self, username: &str, password: &str, now_ms: u64) -> Option<Session> {
        if self.password.is_empty() {
            return None;
        }
        let username: String = username.trim().chars().take(64).collect();
        let password: String = password.chars().take(128).collect();

        let user_ok = constant_time_eq(username.as_bytes(), self.username.as_bytes());
        let pass_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());
        if !(user_ok && pass_ok) {
            return None;
        }
        Some(self.create_at(&username, now_ms))
    }

    fn create_at(&self, username: &str, now_ms: u64) -> Session {
        let session = Session {
            session_id: generate_token(),
            username: username.to_string(),
            expires: now_ms + self.ttl.as_millis() as u64,
        };
        let mut sessions = self.sessions.lock().expect("session table mutex poisoned");
        sessions.insert(session.session_id.clone(), session.clone());
        metrics::record_active_sessions(sessions.len());
        session
    }

    /// Resolve a token to a live session.
    pub fn authenticate(&self, token: &str) -> Option<Session> {
        self.authenticate_at(token, now_millis())
    }

    /// A session is live up to and including its `expires` instant.
    pub fn authenticate_at(&self, token: &str, now_ms: u64) -> Option<Session> {
        if token.is_empty() || token.len() > self.max_token_len {
            return None;
        }
        let mut sessions = self.sessions.lock().expect("session table mutex poisoned");
        evict_if_expired(&mut sessions, token, now_ms).cloned()
    }

    /// Explicitly end a session. Returns whether it existed.
    pub fn revoke(&self, token: &str) -> bool {
        let mut sessions = self.sessions.lock().expect("session table mutex poisoned");
        let removed = sessions.remove(token).is_some();
        metrics::record_active_sessions(sessions.len());
        removed
    }

    /// Number of sessions currently held, expired or not.
    pub fn len(&self) -> usize {
        self.sessions.lock().expect("session table mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Single eviction path for lookups: drop the entry if its deadline has
/// passed, otherwise hand it back.
fn evict_if_expired<'a>(
    sessions: &'a mut HashMap<String, Session>,
    token: &str,
    now_ms: u64,
) -> Option<&'a Session> {
    let expired = sessions.get(token)?.expires < now_ms;
    if expired {
        if let Some(session) = sessions.remove(token) {
            tracing::info!(username = %session.username, "Evicted expired admin session");
        }
        metrics::record_active_sessions(sessions.len());
        return None;
    }
    sessions.get(token)
}

/// 32 random bytes, URL-safe base64 without padding (43 characters).
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
