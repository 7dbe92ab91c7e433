// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire the real adapters into a runtime and run it

use crate::args::Launch;
use crate::error::CliError;
use ricart_adapters::{
    StdinLineSource, TracedPeerAdapter, TracedSectionAdapter, TracedTransport, Transport,
    UdpPeerAdapter, UdpSectionAdapter, UdpTransport,
};
use ricart_engine::{Runtime, RuntimeConfig, RuntimeDeps};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};

/// Run one process until a signal arrives or a fatal error occurs
pub async fn run(launch: Launch) -> anyhow::Result<()> {
    let own = launch.own.clone();
    let transport = UdpTransport::bind(&own)
        .await
        .map_err(|e| CliError::bind_failed(&own, e))?;
    let section = UdpSectionAdapter::connect(&launch.settings.section)
        .await
        .map_err(CliError::section_unreachable)?;

    info!(
        pid = %launch.identity.id(),
        processes = launch.identity.count(),
        listen = %transport.local_addr()?,
        section = %section.target(),
        "process starting"
    );

    let runtime = Runtime::new(
        RuntimeDeps {
            transport: TracedTransport::new(transport),
            peers: TracedPeerAdapter::new(UdpPeerAdapter::new()),
            section: TracedSectionAdapter::new(section),
        },
        RuntimeConfig {
            identity: launch.identity,
            addresses: launch.addresses,
            hold: launch.settings.hold,
            request_keyword: launch.settings.request_keyword,
            event_buffer: launch.settings.event_buffer,
        },
    );
    runtime.spawn_listeners(StdinLineSource::new());
    runtime.run(shutdown_signal()).await?;

    info!("process stopped");
    Ok(())
}

async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            warn!(error = %e, "cannot watch SIGTERM, only Ctrl-C stops the process");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        _ = tokio::signal::ctrl_c() => info!("Received SIGINT, shutting down..."),
    }
}
