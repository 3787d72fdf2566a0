//! Configuration loader with layered sources.

use crate::{AppConfig, StorageBackend};
use config::{Config, ConfigError, Environment, File};
use erudio_core::ErudioError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

/// Environment variable selecting the `{environment}.toml` overlay.
pub const ENVIRONMENT_VAR: &str = "ERUDIO_ENVIRONMENT";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
    environment: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Uncommitted local overrides
    /// 4. Environment variables with the `ERUDIO__` prefix
    ///    (e.g. `ERUDIO__SERVER__PORT=9000`)
    pub fn new(config_dir: impl Into<String>) -> Result<Self, ErudioError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }
        let environment = std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::with_environment(config_dir, environment)
    }

    /// Creates a loader for an explicit environment name.
    pub fn with_environment(
        config_dir: impl Into<String>,
        environment: impl Into<String>,
    ) -> Result<Self, ErudioError> {
        let config_dir = config_dir.into();
        let environment = environment.into();
        let config = Self::load_config(&config_dir, &environment)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
            environment,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, ErudioError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), ErudioError> {
        let new_config = Self::load_config(&self.config_dir, &self.environment)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str, environment: &str) -> Result<AppConfig, ErudioError> {
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder().set_override("app.environment", environment).map_err(config_error)?;

        for name in ["default", environment, "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ERUDIO")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Checks cross-field constraints the type system cannot express.
pub fn validate_config(config: &AppConfig) -> Result<(), ErudioError> {
    if config.app.is_production() && config.security.jwt_secret == "change-me-in-production" {
        warn!("Using default JWT secret in production! This is a security risk.");
    }

    if config.database.backend == StorageBackend::Mysql && config.database.url.is_empty() {
        return Err(ErudioError::Configuration("Database URL is required".to_string()));
    }

    if config.pagination.default_page_size == 0 {
        return Err(ErudioError::Configuration(
            "pagination.default_page_size must be at least 1".to_string(),
        ));
    }

    if config.pagination.max_page_size < config.pagination.default_page_size {
        return Err(ErudioError::Configuration(
            "pagination.max_page_size must not be below default_page_size".to_string(),
        ));
    }

    match Url::parse(&config.server.base_url) {
        Ok(url) if !url.cannot_be_a_base() => {}
        _ => {
            return Err(ErudioError::Configuration(format!(
                "server.base_url must be an absolute URL, got '{}'",
                config.server.base_url
            )));
        }
    }

    Ok(())
}

fn config_error(err: ConfigError) -> ErudioError {
    ErudioError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[tokio::test]
    async fn test_layers_are_applied_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "default.toml",
            "[server]\nport = 9000\n\n[pagination]\ndefault_page_size = 10\n",
        );
        write(dir.path(), "test.toml", "[server]\nport = 9100\n");

        let loader = ConfigLoader::with_environment(dir.path().to_string_lossy(), "test").unwrap();
        let config = loader.get().await;
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.pagination.default_page_size, 10);
        assert_eq!(config.app.environment, "test");
    }

    #[tokio::test]
    async fn test_missing_directory_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let loader = ConfigLoader::with_environment(missing.to_string_lossy(), "development").unwrap();
        let config = loader.get().await;
        assert_eq!(config.server.port, 8888);
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.toml", "[server]\nport = 9000\n");
        let loader = ConfigLoader::with_environment(dir.path().to_string_lossy(), "development").unwrap();

        write(dir.path(), "default.toml", "[server]\nport = 9200\n");
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.server.port, 9200);
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = AppConfig::default();
        config.pagination.default_page_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_max_below_default() {
        let mut config = AppConfig::default();
        config.pagination.max_page_size = 5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_relative_base_url() {
        let mut config = AppConfig::default();
        config.server.base_url = "/api".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_memory_backend_needs_no_url() {
        let mut config = AppConfig::default();
        config.database.backend = StorageBackend::Memory;
        config.database.url = String::new();
        assert!(validate_config(&config).is_ok());

        config.database.backend = StorageBackend::Mysql;
        assert!(validate_config(&config).is_err());
    }
}
