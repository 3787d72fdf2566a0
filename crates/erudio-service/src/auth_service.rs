//! Authentication service implementation.

use crate::dto::{AccountCredentialsVO, TokenVO};
use erudio_config::SecurityConfig;
use erudio_core::rules::not_blank;
use erudio_core::{check_field, ErudioError, ErudioResult, ValidateExt};
use erudio_domain::{Permission, User};
use erudio_repository::UserRepository;
use erudio_security::{Claims, PasswordHasher, TokenProvider};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges credentials for an access and a refresh token.
    async fn sign_in(&self, credentials: AccountCredentialsVO) -> ErudioResult<TokenVO>;

    /// Issues a new token pair for `username` from its refresh token.
    async fn refresh_token(&self, username: &str, refresh_token: &str) -> ErudioResult<TokenVO>;

    /// Validates an access token and returns claims.
    fn validate_token(&self, token: &str) -> ErudioResult<Claims>;

    /// Creates the account unless one with the same login name exists.
    /// Returns true when an account was created.
    async fn ensure_account(
        &self,
        username: &str,
        password: &str,
        permissions: &[String],
    ) -> ErudioResult<bool>;
}

/// Authentication service implementation.
pub struct AuthServiceImpl<R: UserRepository + ?Sized> {
    user_repository: Arc<R>,
    password_hasher: Arc<PasswordHasher>,
    token_provider: Arc<TokenProvider>,
}

impl<R: UserRepository + ?Sized> AuthServiceImpl<R> {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<R>,
        password_hasher: Arc<PasswordHasher>,
        security_config: Arc<SecurityConfig>,
    ) -> Self {
        let token_provider = Arc::new(TokenProvider::new(security_config));
        Self {
            user_repository,
            password_hasher,
            token_provider,
        }
    }

    fn issue(&self, user: &User) -> ErudioResult<TokenVO> {
        let tokens = self.token_provider.generate_tokens(&user.user_name, &user.roles())?;
        Ok(TokenVO::from(tokens))
    }
}

#[async_trait]
impl<R: UserRepository + ?Sized + 'static> AuthService for AuthServiceImpl<R> {
    async fn sign_in(&self, credentials: AccountCredentialsVO) -> ErudioResult<TokenVO> {
        debug!("Sign-in attempt for: {}", credentials.username);

        credentials.validate_request()?;
        check_field("username", not_blank(&credentials.username))?;

        let user = self
            .user_repository
            .find_by_username(&credentials.username)
            .await?
            .ok_or_else(|| {
                warn!("Sign-in failed: unknown user - {}", credentials.username);
                ErudioError::InvalidCredentials
            })?;

        if !self.password_hasher.verify(&credentials.password, &user.password)? {
            warn!("Sign-in failed: invalid password - {}", user.user_name);
            return Err(ErudioError::InvalidCredentials);
        }
        if self.password_hasher.needs_rehash(&user.password) {
            debug!("Stored hash for {} uses outdated parameters", user.user_name);
        }

        if !user.can_sign_in() {
            warn!("Sign-in refused: account unavailable - {}", user.user_name);
            return Err(ErudioError::forbidden("Account is disabled, locked, or expired"));
        }

        info!("User signed in: {}", user.user_name);
        self.issue(&user)
    }

    async fn refresh_token(&self, username: &str, refresh_token: &str) -> ErudioResult<TokenVO> {
        debug!("Refreshing token for: {}", username);

        let claims = self.token_provider.validate_refresh_token(refresh_token)?;
        if claims.username() != username {
            warn!("Refresh refused: token subject {} does not match {}", claims.username(), username);
            return Err(ErudioError::InvalidToken("Token subject does not match user".to_string()));
        }

        let user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| ErudioError::InvalidToken("User no longer exists".to_string()))?;

        if !user.can_sign_in() {
            return Err(ErudioError::forbidden("Account is disabled, locked, or expired"));
        }

        info!("Token refreshed for user: {}", user.user_name);
        self.issue(&user)
    }

    fn validate_token(&self, token: &str) -> ErudioResult<Claims> {
        self.token_provider.validate_access_token(token)
    }

    async fn ensure_account(
        &self,
        username: &str,
        password: &str,
        permissions: &[String],
    ) -> ErudioResult<bool> {
        if self.user_repository.find_by_username(username).await?.is_some() {
            debug!("Account already present: {}", username);
            return Ok(false);
        }

        let password_hash = self.password_hasher.hash(password)?;
        let permissions = permissions.iter().map(Permission::new).collect();
        let user = User::new(username, username, password_hash, permissions);
        self.user_repository.save(&user).await?;

        info!("Account created: {}", username);
        Ok(true)
    }
}

impl<R: UserRepository + ?Sized> std::fmt::Debug for AuthServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceImpl")
            .field("token_provider", &self.token_provider)
            .finish_non_exhaustive()
    }
}
