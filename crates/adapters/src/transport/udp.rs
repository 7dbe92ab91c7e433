// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! UDP transport

use super::{Transport, TransportError, MAX_DATAGRAM};
use async_trait::async_trait;
use ricart_core::PeerAddress;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;

/// Listening UDP socket shared by the listener and the reply sender
#[derive(Clone)]
pub struct UdpTransport {
    socket: Arc<UdpSocket>,
}

impl UdpTransport {
    pub async fn bind(addr: &PeerAddress) -> Result<Self, TransportError> {
        let target = addr.bind_target();
        let socket = UdpSocket::bind(&target)
            .await
            .map_err(|source| TransportError::Bind {
                addr: target,
                source,
            })?;
        Ok(Self {
            socket: Arc::new(socket),
        })
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn recv(&self) -> Result<(Vec<u8>, SocketAddr), TransportError> {
        let mut buf = vec![0u8; MAX_DATAGRAM];
        let (len, from) = self.socket.recv_from(&mut buf).await?;
        buf.truncate(len);
        Ok((buf, from))
    }

    async fn send_to(&self, payload: &[u8], to: SocketAddr) -> Result<(), TransportError> {
        self.socket.send_to(payload, to).await?;
        Ok(())
    }

    fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.socket.local_addr()?)
    }
}

#[cfg(test)]
#[path = "udp_tests.rs"]
mod tests;
