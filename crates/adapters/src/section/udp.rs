// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! UDP client for the section display service

use super::{SectionAdapter, SectionError};
use crate::transport::resolve;
use async_trait::async_trait;
use ricart_core::{PeerAddress, WireMessage};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;

/// Socket connected to the section service, resolved once at startup
#[derive(Clone)]
pub struct UdpSectionAdapter {
    socket: Arc<UdpSocket>,
    target: SocketAddr,
}

impl UdpSectionAdapter {
    pub async fn connect(addr: &PeerAddress) -> Result<Self, SectionError> {
        let unreachable = |reason: String| SectionError::Unreachable {
            addr: addr.to_string(),
            reason,
        };
        let target = resolve(addr).await.map_err(|e| unreachable(e.to_string()))?;
        let local = if target.is_ipv6() { "[::]:0" } else { "0.0.0.0:0" };
        let socket = UdpSocket::bind(local)
            .await
            .map_err(|e| unreachable(e.to_string()))?;
        socket
            .connect(target)
            .await
            .map_err(|e| unreachable(e.to_string()))?;
        Ok(Self {
            socket: Arc::new(socket),
            target,
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

#[async_trait]
impl SectionAdapter for UdpSectionAdapter {
    async fn send(&self, message: &WireMessage) -> Result<(), SectionError> {
        self.socket.send(&message.encode()).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "udp_tests.rs"]
mod tests;
