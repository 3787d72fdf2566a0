//! JWT token provider for creating and validating tokens.

use super::{Claims, TokenType};
use chrono::{DateTime, Duration, Utc};
use erudio_config::SecurityConfig;
use erudio_core::{ErudioError, ErudioResult};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, warn};

/// Access and refresh tokens issued together.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub username: String,
    pub access_token: String,
    pub refresh_token: String,
    pub created: DateTime<Utc>,
    /// Access token expiration.
    pub expiration: DateTime<Utc>,
}

/// JWT token provider service.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Issues an access and a refresh token for `username`.
    pub fn generate_tokens(&self, username: &str, roles: &[String]) -> ErudioResult<TokenPair> {
        let created = Utc::now();
        let expiration = expires_in(created, self.config.access_token_expiration())?;
        let refresh_expiration = expires_in(created, self.config.refresh_token_expiration())?;

        let access_token = self.sign(TokenType::Access, username, roles, expiration)?;
        let refresh_token = self.sign(TokenType::Refresh, username, roles, refresh_expiration)?;

        debug!("Generated tokens for user {}", username);
        Ok(TokenPair {
            username: username.to_string(),
            access_token,
            refresh_token,
            created,
            expiration,
        })
    }

    fn sign(
        &self,
        token_type: TokenType,
        username: &str,
        roles: &[String],
        expires_at: DateTime<Utc>,
    ) -> ErudioResult<String> {
        let claims = Claims::new(
            token_type,
            username,
            roles.to_vec(),
            &self.config.jwt_issuer,
            &self.config.jwt_audience,
            expires_at,
        );

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ErudioError::Internal(format!("Failed to generate {token_type} token: {e}")))
    }

    /// Validates a token and returns the claims.
    pub fn validate_token(&self, token: &str) -> ErudioResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!("Token validation failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => ErudioError::TokenExpired,
                ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                    ErudioError::InvalidToken("Invalid token signature".to_string())
                }
                ErrorKind::InvalidIssuer => ErudioError::InvalidToken("Invalid token issuer".to_string()),
                ErrorKind::InvalidAudience => ErudioError::InvalidToken("Invalid token audience".to_string()),
                _ => ErudioError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validates an access token specifically.
    pub fn validate_access_token(&self, token: &str) -> ErudioResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_access_token() {
            return Err(ErudioError::InvalidToken("Expected access token".to_string()));
        }

        Ok(claims)
    }

    /// Validates a refresh token specifically.
    pub fn validate_refresh_token(&self, token: &str) -> ErudioResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_refresh_token() {
            return Err(ErudioError::InvalidToken("Expected refresh token".to_string()));
        }

        Ok(claims)
    }
}

fn expires_in(from: DateTime<Utc>, lifetime: std::time::Duration) -> ErudioResult<DateTime<Utc>> {
    Duration::from_std(lifetime)
        .ok()
        .and_then(|lifetime| from.checked_add_signed(lifetime))
        .ok_or_else(|| {
            ErudioError::Configuration(format!("token lifetime of {}s is out of range", lifetime.as_secs()))
        })
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
