//! Request body extractor for every supported format.

use crate::media::MediaType;
use crate::responses::AppError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use erudio_core::ErudioError;
use serde::de::DeserializeOwned;

/// A request body decoded according to `Content-Type`.
///
/// Holds `None` when the body is empty or `null`; services turn that into
/// a "required object is null" error.
#[derive(Debug, Clone)]
pub struct NegotiatedBody<T>(pub Option<T>);

#[async_trait]
impl<T, S> FromRequest<S> for NegotiatedBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let media = MediaType::from_content_type(req.headers())?;
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ErudioError::validation(format!("Unreadable request body: {rejection}")))?;

        Ok(Self(media.decode(&bytes)?))
    }
}
