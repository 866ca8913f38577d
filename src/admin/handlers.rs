//! Admin login and logout.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::admin::auth::session_token;
use crate::http::request::ClientIp;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub session_id: String,
}

/// `POST /api/admin/login`
///
/// The rate limiter runs before the credential check, so a throttled client
/// learns nothing about the password.
pub async fn login(
    State(state): State<AppState>,
    ClientIp(client): ClientIp,
    body: Bytes,
) -> Result<Response, ApiError> {
    if !state.login_limiter.admit(&client) {
        return Err(ApiError::RateLimited);
    }

    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let username = text_field(&payload, "username");
    let password = text_field(&payload, "password");

    let Some(session) = state.sessions.login(&username, &password) else {
        tracing::warn!(client = %client, "Admin login failed");
        metrics::record_login("invalid");
        return Err(ApiError::InvalidCredentials);
    };

    tracing::info!(client = %client, username = %session.username, "Admin logged in");
    metrics::record_login("success");

    let cookie = format!(
        "{}={}; Max-Age={}; Path=/; SameSite=Lax; HttpOnly",
        state.config.session.cookie_name,
        session.session_id,
        state.sessions.ttl().as_secs(),
    );
    let body = LoginResponse {
        success: true,
        session_id: session.session_id,
    };
    Ok((AppendHeaders([(header::SET_COOKIE, cookie)]), Json(body)).into_response())
}

/// `POST /api/admin/logout`. Always succeeds; clears the cookie either way.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookie_name = &state.config.session.cookie_name;
    if let Some(token) = session_token(&headers, cookie_name) {
        if state.sessions.revoke(&token) {
            tracing::info!("Admin logged out");
        }
    }
    let cleared = format!("{cookie_name}=; Max-Age=0; Path=/; SameSite=Lax; HttpOnly");
    (
        AppendHeaders([(header::SET_COOKIE, cleared)]),
        Json(json!({ "success": true })),
    )
        .into_response()
}

/// Missing or `null` reads as empty; other non-strings use their JSON text.
fn text_field(payload: &Value, key: &str) -> String {
    match payload.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field() {
        let payload = json!({"username": "admin", "password": 1234, "x": null});
        assert_eq!(text_field(&payload, "username"), "admin");
        assert_eq!(text_field(&payload, "password"), "1234");
        assert_eq!(text_field(&payload, "x"), "");
        assert_eq!(text_field(&payload, "missing"), "");
        assert_eq!(text_field(&Value::Null, "username"), "");
    }
}
