//! HTTP middleware
//!
//! Admin routes are guarded by HTTP Basic authentication against the static
//! credentials from the `[admin]` config section.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};

use super::{responses::unauthorized, AppState};
use crate::config::AdminConfig;
use crate::errors::WebError;

/// Reject requests that do not carry the admin credentials
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match check_basic_auth(request.headers(), &state.config.admin) {
        Ok(username) => {
            debug!(
                method = %request.method(),
                uri = %request.uri(),
                user = %username,
                "Admin request authorized"
            );
            next.run(request).await
        }
        Err(WebError::InvalidAuth { message }) => {
            warn!(
                method = %request.method(),
                uri = %request.uri(),
                "Admin request rejected: {}", message
            );
            unauthorized(&message)
        }
        Err(e) => unauthorized(&e.to_string()),
    }
}

/// Validate an `Authorization: Basic ...` header, returning the username
pub fn check_basic_auth(headers: &HeaderMap, admin: &AdminConfig) -> Result<String, WebError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| WebError::invalid_auth("admin credentials required"))?
        .to_str()
        .map_err(|_| WebError::invalid_auth("malformed Authorization header"))?;

    let encoded = value
        .strip_prefix("Basic ")
        .ok_or_else(|| WebError::invalid_auth("only Basic authentication is supported"))?;
    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| WebError::invalid_auth("malformed Basic credentials"))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| WebError::invalid_auth("malformed Basic credentials"))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| WebError::invalid_auth("malformed Basic credentials"))?;

    if username == admin.username && password == admin.password {
        Ok(username.to_string())
    } else {
        Err(WebError::invalid_auth("invalid username or password"))
    }
}
