//! JWT claims structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Access token (short-lived, used for API requests).
    Access,
    /// Refresh token (long-lived, used to obtain new access tokens).
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

/// JWT claims structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (login name).
    pub sub: String,

    /// Permission descriptions granted to the subject.
    #[serde(default)]
    pub roles: Vec<String>,

    pub token_type: TokenType,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,

    /// Not before timestamp.
    pub nbf: i64,

    pub iss: String,

    pub aud: String,

    /// Unique identifier for this token.
    pub jti: String,
}

impl Claims {
    /// Creates claims of the given type, valid from now until `expires_at`.
    #[must_use]
    pub fn new(
        token_type: TokenType,
        username: &str,
        roles: Vec<String>,
        issuer: &str,
        audience: &str,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: username.to_string(),
            roles,
            token_type,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::now_v7().to_string(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.sub
    }

    /// Checks if the token is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Returns the expiration time.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    #[must_use]
    pub const fn is_access_token(&self) -> bool {
        matches!(self.token_type, TokenType::Access)
    }

    #[must_use]
    pub const fn is_refresh_token(&self) -> bool {
        matches!(self.token_type, TokenType::Refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_access_token_claims() {
        let expires = Utc::now() + Duration::hours(1);
        let claims = Claims::new(
            TokenType::Access,
            "leandro",
            vec!["ADMIN".to_string()],
            "issuer",
            "audience",
            expires,
        );

        assert!(claims.is_access_token());
        assert!(!claims.is_refresh_token());
        assert!(!claims.is_expired());
        assert_eq!(claims.username(), "leandro");
        assert!(claims.has_role("ADMIN"));
        assert!(!claims.has_role("MANAGER"));
        assert_eq!(claims.expires_at().timestamp(), expires.timestamp());
    }

    #[test]
    fn test_token_type_serialization() {
        assert_eq!(TokenType::Refresh.to_string(), "refresh");
        let claims = Claims::new(TokenType::Refresh, "u", Vec::new(), "i", "a", Utc::now());
        assert!(claims.is_refresh_token());
    }
}
