//! Response format extractor.

use crate::media::MediaType;
use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// The response format chosen from the `Accept` header.
///
/// Rejects with 406 when none of the accepted types can be produced.
#[derive(Debug, Clone, Copy)]
pub struct AcceptMedia(pub MediaType);

#[async_trait]
impl<S> FromRequestParts<S> for AcceptMedia
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(MediaType::from_accept(&parts.headers)?))
    }
}
