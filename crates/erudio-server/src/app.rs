//! Application assembly.

use axum::Router;
use erudio_config::{AppConfig, SecurityConfig};
use erudio_core::ErudioResult;
use erudio_repository::Repositories;
use erudio_rest::{create_router, AppState};
use erudio_security::PasswordHasher;
use tracing::{info, warn};

/// A ready-to-serve application.
pub struct App {
    pub router: Router,
    pub state: AppState,
}

impl App {
    /// Builds repositories, services, and the router from `config`.
    pub async fn build(config: &AppConfig) -> ErudioResult<Self> {
        let repositories = Repositories::from_config(&config.database).await?;
        Self::with_repositories(config, repositories, PasswordHasher::new()).await
    }

    /// Builds the application over existing repositories.
    pub async fn with_repositories(
        config: &AppConfig,
        repositories: Repositories,
        password_hasher: PasswordHasher,
    ) -> ErudioResult<Self> {
        let state = AppState::new(config, repositories, password_hasher)?;
        bootstrap_account(&state, &config.security).await?;

        let router = create_router(state.clone(), &config.server);
        Ok(Self { router, state })
    }

    /// Releases the database pool, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.state.repositories.pool {
            pool.close().await;
        }
    }
}

/// Creates the configured bootstrap account when it does not exist yet.
async fn bootstrap_account(state: &AppState, security: &SecurityConfig) -> ErudioResult<()> {
    match (&security.bootstrap_username, &security.bootstrap_password) {
        (Some(username), Some(password)) => {
            let created = state
                .auth_service
                .ensure_account(username, password, &security.bootstrap_permissions)
                .await?;
            if created {
                info!("Bootstrap account created: {}", username);
            }
        }
        (Some(username), None) => {
            warn!("Bootstrap user {} has no password configured; skipping", username);
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use erudio_service::AccountCredentialsVO;
    use tower::ServiceExt;

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.security.bootstrap_username = Some("leandro".to_string());
        config.security.bootstrap_password = Some("admin123".to_string());
        config
    }

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_cost(8 * 1024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_bootstrap_account_can_sign_in() {
        let app = App::with_repositories(&config(), Repositories::in_memory(), fast_hasher())
            .await
            .unwrap();

        let token = app
            .state
            .auth_service
            .sign_in(AccountCredentialsVO::new("leandro", "admin123"))
            .await
            .unwrap();
        assert!(token.authenticated);
        assert!(token.expiration > token.created);
    }

    #[tokio::test]
    async fn test_without_bootstrap_credentials_no_account_exists() {
        let app = App::with_repositories(&AppConfig::default(), Repositories::in_memory(), fast_hasher())
            .await
            .unwrap();

        let result = app
            .state
            .auth_service
            .sign_in(AccountCredentialsVO::new("leandro", "admin123"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_router_serves_health() {
        let app = App::with_repositories(&config(), Repositories::in_memory(), fast_hasher())
            .await
            .unwrap();

        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        app.close().await;
    }
}
