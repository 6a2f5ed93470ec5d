//! HTTP basic auth for the admin panel

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{info, warn};

use super::AdminState;

const REALM: &str = "Basic realm=\"AmiHelper admin\"";

/// Decode `Authorization: Basic ...` into (username, password)
pub fn parse_basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let encoded = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?
        .strip_prefix("Basic ")?;

    let decoded = B64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

type HmacSha256 = Hmac<Sha256>;

fn tag(key: &str, value: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes()).ok()?;
    mac.update(value.as_bytes());
    Some(mac)
}

/// Constant-time comparison of a supplied secret
pub fn secret_matches(supplied: &str, expected: &str) -> bool {
    match (tag(expected, supplied), tag(expected, expected)) {
        (Some(supplied), Some(expected)) => supplied
            .verify_slice(&expected.finalize().into_bytes())
            .is_ok(),
        _ => false,
    }
}

fn credentials_match(state: &AdminState, username: &str, password: &str) -> bool {
    let username_ok = secret_matches(username, &state.credentials.username);
    let password_ok = secret_matches(password, &state.credentials.password);
    username_ok & password_ok
}

/// Reject requests without the configured admin credentials
pub async fn require_basic_auth(
    State(state): State<AdminState>,
    req: Request,
    next: Next,
) -> Response {
    match parse_basic_credentials(req.headers()) {
        Some((username, password)) if credentials_match(&state, &username, &password) => {
            let method = req.method().clone();
            let path = req.uri().path().to_string();
            let response = next.run(req).await;
            info!(
                method = %method,
                path = %path,
                status = response.status().as_u16(),
                username = %username,
                "Admin panel request"
            );
            response
        }
        credentials => {
            warn!(
                path = %req.uri().path(),
                username = credentials.as_ref().map(|(u, _)| u.as_str()).unwrap_or("-"),
                "Admin panel authentication failed"
            );
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    let mut response = StatusCode::UNAUTHORIZED.into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(REALM));
    response
}
