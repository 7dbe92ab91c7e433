// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! UDP peer channels

use super::{PeerAdapter, PeerChannel};
use crate::transport::{resolve, TransportError, MAX_DATAGRAM};
use async_trait::async_trait;
use ricart_core::PeerAddress;
use tokio::net::UdpSocket;

/// Dials each peer from a fresh ephemeral UDP socket
#[derive(Clone, Default)]
pub struct UdpPeerAdapter;

impl UdpPeerAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PeerAdapter for UdpPeerAdapter {
    async fn open(&self, peer: &PeerAddress) -> Result<Box<dyn PeerChannel>, TransportError> {
        let target = resolve(peer).await?;
        let local = if target.is_ipv6() { "[::]:0" } else { "0.0.0.0:0" };
        let socket = UdpSocket::bind(local)
            .await
            .map_err(|source| TransportError::Bind {
                addr: local.to_string(),
                source,
            })?;
        // Connected sockets drop datagrams from anyone but the peer
        socket.connect(target).await?;
        Ok(Box::new(UdpPeerChannel { socket }))
    }
}

struct UdpPeerChannel {
    socket: UdpSocket,
}

#[async_trait]
impl PeerChannel for UdpPeerChannel {
    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.socket.send(payload).await?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; MAX_DATAGRAM];
        let len = self.socket.recv(&mut buf).await?;
        buf.truncate(len);
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "udp_tests.rs"]
mod tests;
