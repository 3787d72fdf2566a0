//! JWT claims extractor.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use erudio_core::ErudioError;
use erudio_security::Claims;

/// Extractor for authenticated user claims.
///
/// The authentication middleware validates the bearer token and stores the
/// claims in the request extensions; this reads them back.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| AppError(ErudioError::forbidden("Access denied: no authenticated user")))
    }
}
