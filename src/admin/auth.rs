//! Session check for admin-only routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Reject the request with 401 unless it carries a live session. The session
/// is attached to the request extensions for the handler.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(request.headers(), &state.config.session.cookie_name)
        .ok_or(ApiError::Unauthorized)?;

    let session = state
        .sessions
        .authenticate(&token)
        .ok_or(ApiError::Unauthorized)?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Token from `Authorization: Bearer <token>`, falling back to the session cookie.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }
    cookie_value(headers, cookie_name)
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer  tok-1 "));
        headers.insert(header::COOKIE, HeaderValue::from_static("admin_session=tok-2"));
        assert_eq!(session_token(&headers, "admin_session").as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_cookie_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; admin_session=tok-2; other=1"),
        );
        assert_eq!(session_token(&headers, "admin_session").as_deref(), Some("tok-2"));
    }

    #[test]
    fn test_empty_bearer_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(session_token(&headers, "admin_session"), None);
        headers.insert(header::COOKIE, HeaderValue::from_static("admin_session=c"));
        assert_eq!(session_token(&headers, "admin_session").as_deref(), Some("c"));
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("xadmin_session=nope"));
        assert_eq!(session_token(&headers, "admin_session"), None);
    }
}
