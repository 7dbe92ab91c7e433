// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ricart-section - shared section display service
//!
//! Prints every interaction reported by the process holding the section.

use std::path::{Path, PathBuf};

use clap::Parser;
use ricart_adapters::{Transport, UdpTransport};
use ricart_core::PeerAddress;
use ricart_section::{serve, OutputFormat};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "ricart-section",
    version,
    about = "Display service for the shared critical section"
)]
struct Args {
    /// Address to listen on (HOST:PORT or :PORT)
    #[arg(long, default_value = ":10000")]
    bind: PeerAddress,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let _log_guard = setup_logging(args.log_file.as_deref())?;

    let transport = match UdpTransport::bind(&args.bind).await {
        Ok(transport) => transport,
        Err(e) => {
            error!(error = %e, "failed to start section service");
            return Err(e.into());
        }
    };
    info!(addr = %transport.local_addr()?, "section service listening");

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let shutdown = async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
            _ = sigint.recv() => info!("Received SIGINT, shutting down..."),
        }
    };

    let mut stdout = std::io::stdout();
    serve(&transport, args.format, &mut stdout, shutdown).await?;
    Ok(())
}

fn setup_logging(
    log_file: Option<&Path>,
) -> std::io::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            std::fs::create_dir_all(dir)?;
            let name = path.file_name().ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("not a file path: {}", path.display()),
                )
            })?;

            let file_appender = tracing_appender::rolling::never(dir, name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_ansi(false).with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}
