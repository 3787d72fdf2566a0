//! Authentication-related DTOs.

use chrono::{DateTime, Utc};
use erudio_security::TokenPair;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Sign-in request.
#[derive(Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename = "AccountCredentialsVO")]
pub struct AccountCredentialsVO {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl AccountCredentialsVO {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for AccountCredentialsVO {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountCredentialsVO")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Issued tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename = "TokenVO", rename_all = "camelCase")]
pub struct TokenVO {
    pub username: String,
    pub authenticated: bool,
    pub created: DateTime<Utc>,
    /// Access token expiration.
    pub expiration: DateTime<Utc>,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenVO {
    fn from(tokens: TokenPair) -> Self {
        Self {
            username: tokens.username,
            authenticated: true,
            created: tokens.created,
            expiration: tokens.expiration,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}
