//! Authentication controller.

use crate::{
    extractors::{AcceptMedia, NegotiatedBody},
    middleware::bearer_token,
    responses::{render, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{post, put},
    Router,
};
use erudio_core::{ErrorResponse, ErudioError};
use erudio_service::{AccountCredentialsVO, TokenVO};
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", post(sign_in))
        .route("/refresh/:username", put(refresh_token))
}

fn invalid_client_request() -> AppError {
    AppError(ErudioError::forbidden("Invalid client request!"))
}

/// Sign in with a user name and password.
#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "auth",
    request_body = AccountCredentialsVO,
    responses(
        (status = 200, description = "Access and refresh tokens", body = TokenVO),
        (status = 401, description = "Bad credentials", body = ErrorResponse),
        (status = 403, description = "Missing credentials", body = ErrorResponse)
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    AcceptMedia(media): AcceptMedia,
    NegotiatedBody(body): NegotiatedBody<AccountCredentialsVO>,
) -> ApiResult {
    let credentials = body
        .filter(|c| !c.username.trim().is_empty() && !c.password.trim().is_empty())
        .ok_or_else(invalid_client_request)?;
    debug!("Sign-in request for: {}", credentials.username);

    let token = state.auth_service.sign_in(credentials).await?;
    render(media, StatusCode::OK, &token)
}

/// Exchange a refresh token, sent as a bearer token, for a new token pair.
#[utoipa::path(
    put,
    path = "/auth/refresh/{username}",
    tag = "auth",
    params(("username" = String, Path, description = "Account the refresh token belongs to")),
    responses(
        (status = 200, description = "New access and refresh tokens", body = TokenVO),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse),
        (status = 403, description = "Missing refresh token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    AcceptMedia(media): AcceptMedia,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> ApiResult {
    let refresh = bearer_token(&headers).ok_or_else(invalid_client_request)?;
    if username.trim().is_empty() {
        return Err(invalid_client_request());
    }
    debug!("Token refresh request for: {}", username);

    let token = state.auth_service.refresh_token(&username, refresh).await?;
    render(media, StatusCode::OK, &token)
}
