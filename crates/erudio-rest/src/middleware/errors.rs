//! Error body negotiation.

use crate::media::MediaType;
use axum::{
    body::Body,
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue, Request,
    },
    middleware::Next,
    response::Response,
};
use erudio_core::ErrorResponse;
use tracing::warn;

/// Rewrites error bodies in the format the client asked for and records
/// the request path in `details`.
///
/// Only responses carrying an [`ErrorResponse`] extension are touched. An
/// unusable `Accept` header falls back to JSON.
pub async fn negotiate_errors(request: Request<Body>, next: Next) -> Response {
    let media = MediaType::from_accept(request.headers()).unwrap_or_default();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let Some(error) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };

    let error = error.with_details(format!("uri={path}"));
    match media.encode(&error) {
        Ok(text) => {
            let (mut parts, _) = response.into_parts();
            parts.headers.remove(CONTENT_LENGTH);
            parts
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(media.content_type()));
            Response::from_parts(parts, Body::from(text))
        }
        Err(e) => {
            warn!("Could not encode error body as {}: {}", media, e);
            response
        }
    }
}
