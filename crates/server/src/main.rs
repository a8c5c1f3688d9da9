mod api;
mod assets;
mod config;
mod state;
mod utils;

use api::app_router;
use clap::Parser;
use config::{Cli, Settings};
use library::{validate_root, Catalog};
use state::AppState;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::from_cli(Cli::parse()).inspect_err(|err| {
        error!("Invalid configuration: {}", err);
    })?;
    validate_root(&settings.music_root).inspect_err(|err| {
        error!("Cannot serve {}: {}", settings.music_root.display(), err);
    })?;
    info!(
        "Serving tags from {} ({:?} traversal)",
        settings.music_root.display(),
        settings.traversal
    );
    if !settings.web_root.exists() {
        warn!(
            "Web root {} not found; static pages will return 404",
            settings.web_root.display()
        );
    }

    let catalog = Catalog::new(settings.music_root.clone(), settings.traversal);
    let state = AppState::new(catalog, settings.web_root.clone());
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    info!("Listening on {}", settings.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = match signal(SignalKind::terminate()) {
            Ok(signal) => signal,
            Err(err) => {
                warn!("Failed to install terminate signal handler: {}", err);
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", err);
        }
    }

    info!("Shutdown signal received.");
}
