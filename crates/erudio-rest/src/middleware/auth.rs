//! Authentication middleware.

use crate::{responses::AppError, state::AppState};
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use erudio_core::ErudioError;
use tracing::{debug, warn};

const BEARER_PREFIX: &str = "Bearer ";

/// Returns the token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Requires a valid access token on every request it wraps.
///
/// A missing token is refused with 403; an invalid or expired one with 401.
/// Valid claims are added to the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = match bearer_token(request.headers()) {
        Some(token) => state.auth_service.validate_token(token).map_err(|e| {
            warn!(uri = %request.uri(), "Token validation failed: {}", e);
            AppError(e)
        })?,
        None => {
            debug!(uri = %request.uri(), "Request without bearer token");
            return Err(AppError(ErudioError::forbidden("Access denied: bearer token required")));
        }
    };

    debug!("Authenticated user: {}", claims.username());
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
