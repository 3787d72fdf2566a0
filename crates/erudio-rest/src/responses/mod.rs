//! Response rendering and the HTTP error type.

use crate::media::MediaType;
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use erudio_core::{ErrorResponse, ErudioError};
use erudio_hateoas::{hal, PagedModel, Representation};
use serde::Serialize;
use tracing::error;

/// Application error type for Axum.
///
/// The body is written as JSON; the error negotiation middleware re-encodes
/// it for the client's `Accept` header using the [`ErrorResponse`] stored in
/// the response extensions.
#[derive(Debug)]
pub struct AppError(pub ErudioError);

impl From<ErudioError> for AppError {
    fn from(err: ErudioError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let body = ErrorResponse::from_error(&self.0);
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T = Response> = Result<T, AppError>;

/// Writes `body` in the negotiated format.
pub fn render<T: Serialize + ?Sized>(media: MediaType, status: StatusCode, body: &T) -> ApiResult {
    let text = media.encode(body)?;
    Ok((
        status,
        [(CONTENT_TYPE, HeaderValue::from_static(media.content_type()))],
        text,
    )
        .into_response())
}

/// Writes one representation; JSON uses the HAL `_links` form.
pub fn render_item<R>(media: MediaType, status: StatusCode, item: &R) -> ApiResult
where
    R: Representation + Serialize,
{
    match media {
        MediaType::Json => render(media, status, &hal::item(item)?),
        MediaType::Xml | MediaType::Yaml => render(media, status, item),
    }
}

/// Writes a paged envelope; JSON uses `_embedded` and `_links`.
pub fn render_page<R>(media: MediaType, model: &PagedModel<R>) -> ApiResult
where
    R: Representation + Serialize,
{
    match media {
        MediaType::Json => render(media, StatusCode::OK, &hal::paged(model)?),
        MediaType::Xml | MediaType::Yaml => render(media, StatusCode::OK, model),
    }
}

/// Helper to create a no content (204) response.
#[must_use]
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
