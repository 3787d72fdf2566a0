//! # Erudio Server
//!
//! Main entry point for the Erudio REST API.

use anyhow::Context;
use erudio_config::ConfigLoader;
use erudio_core::telemetry::init_tracing;
use erudio_server::{app::App, startup};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_loader = ConfigLoader::from_default_location().context("loading configuration")?;
    let config = config_loader.get().await;

    init_tracing(&config.observability.telemetry())?;
    startup::print_banner();
    info!("Starting Erudio server, version {}", env!("CARGO_PKG_VERSION"));

    let app = App::build(&config).await.context("building application")?;

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    startup::print_startup_info(&config);
    info!("Listening on http://{}", addr);

    let served = axum::serve(listener, app.router.clone())
        .with_graceful_shutdown(shutdown_signal())
        .await;

    app.close().await;
    if let Err(e) = &served {
        error!("Server error: {}", e);
    }
    served.context("serving HTTP")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
