// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound request channels to peers

mod udp;

pub use udp::UdpPeerAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePeerAdapter, PeerCall};

use crate::transport::TransportError;
use async_trait::async_trait;
use ricart_core::PeerAddress;

/// Opens a private datagram channel to one peer
#[async_trait]
pub trait PeerAdapter: Clone + Send + Sync + 'static {
    async fn open(&self, peer: &PeerAddress) -> Result<Box<dyn PeerChannel>, TransportError>;
}

/// A channel bound to an ephemeral port and pinned to one peer
#[async_trait]
pub trait PeerChannel: Send {
    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError>;

    /// Wait for the next datagram from the peer
    async fn recv(&mut self) -> Result<Vec<u8>, TransportError>;
}
