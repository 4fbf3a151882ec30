//! Web server for the `SolarOps` admin dashboard

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use clap::Parser;
use solarops_core::{Config, Error, init_logging};
use solarops_web::build_app;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Command line interface for the dashboard server
#[derive(Debug, Parser)]
#[command(
    name = "solarops-web",
    version = env!("CARGO_PKG_VERSION"),
    about = "Server-rendered admin dashboard for the SolarOps backend"
)]
struct Cli {
    /// Configuration file path (defaults to ./solarops.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to bind (overrides server.host)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    port: Option<u16>,

    /// Backend base URL (overrides backend.base_url)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Admin bearer token (overrides backend.token)
    #[arg(long)]
    token: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.api_url {
            config.backend.base_url = url;
        }
        if let Some(token) = self.token {
            config.backend.token = Some(token);
        }
    }
}

#[tokio::main]
async fn main() -> solarops_core::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone();
    let (mut config, load_error) = match Config::load_from(config_path.as_deref()) {
        Ok(config) => (config, None),
        Err(e) if config_path.is_none() => (Config::default(), Some(e)),
        Err(e) => return Err(e),
    };
    cli.apply(&mut config);
    config.validate()?;

    init_logging(&config.logging)?;
    if let Some(e) = load_error {
        warn!("Failed to load config: {}, using defaults", e);
    }
    if config.backend.token.is_none() {
        warn!("No admin token configured; backend requests will be unauthenticated");
    }

    let app = build_app(config.clone())?;

    let host: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| Error::Configuration {
            message: format!("Invalid web server host '{}': {}", config.server.host, e),
        })?;
    let addr = SocketAddr::new(host, config.server.port);

    info!(
        backend = %config.backend.base_url,
        "Starting SolarOps dashboard on {}", addr
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        () = ctrl_c => info!("Received Ctrl+C, shutting down gracefully..."),
        () = terminate => info!("Received terminate signal, shutting down gracefully..."),
    }
}
