// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Datagram transport for the process's own listen address

mod udp;

pub use udp::UdpTransport;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeTransport;

use async_trait::async_trait;
use ricart_core::PeerAddress;
use std::net::SocketAddr;
use thiserror::Error;

/// Largest datagram read in one receive
pub const MAX_DATAGRAM: usize = 1024;

/// Errors from datagram I/O
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("cannot resolve {0}")]
    Resolve(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A bound datagram endpoint that receives requests and sends replies
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    /// Wait for the next datagram
    async fn recv(&self) -> Result<(Vec<u8>, SocketAddr), TransportError>;

    /// Send one datagram
    async fn send_to(&self, payload: &[u8], to: SocketAddr) -> Result<(), TransportError>;

    fn local_addr(&self) -> Result<SocketAddr, TransportError>;
}

/// Resolve an address for dialing; the first resolved address wins
pub async fn resolve(addr: &PeerAddress) -> Result<SocketAddr, TransportError> {
    let target = addr.dial_target();
    let first = tokio::net::lookup_host(&target)
        .await
        .map_err(|e| TransportError::Resolve(format!("{}: {}", target, e)))?
        .next();
    first.ok_or(TransportError::Resolve(target))
}
