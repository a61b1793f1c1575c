use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use propcalc_server::logging::{enable_file_logging, init_logging};
use propcalc_server::{AppState, ServerConfig, app};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// HTTP service for property feasibility, rental ROI and loan repayment
/// calculations.
///
/// Settings are read from the optional config file, then overridden by any
/// flags given here.
#[derive(Debug, Parser)]
#[command(name = "propcalc-server")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (e.g. `0.0.0.0`).
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Log level or `EnvFilter` directive. `RUST_LOG` takes precedence.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(path) = self.log_file {
            config.log_file = Some(path);
        }
        Ok(config)
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;

    init_logging(&config.log_level)?;
    if let Some(path) = &config.log_file {
        enable_file_logging(path)?;
    }

    let addr = config.socket_addr()?;
    let state = Arc::new(AppState { config });

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "propcalc server listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}
