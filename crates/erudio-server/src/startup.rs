//! Server startup utilities.

use erudio_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ______                ___
   / ____/______  ______/ (_)___
  / __/ / ___/ / / / __  / / __ \
 / /___/ /  / /_/ / /_/ / / /_/ /
/_____/_/   \__,_/\__,_/_/\____/

            REST API
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let base_url = config.server.base_url.trim_end_matches('/');
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("Storage:     {:?}", config.database.backend);
    info!("REST API:    {}/api", base_url);
    info!("Health:      {}/health", base_url);
    if config.server.swagger_enabled {
        info!("API Docs:    {}/swagger-ui", base_url);
    }
    info!("{}", separator);
}
