// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::peer::{PeerAdapter, PeerChannel};
use crate::section::{SectionAdapter, SectionError};
use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use ricart_core::{PeerAddress, WireMessage};
use std::net::SocketAddr;
use tracing::Instrument;

/// Wrapper that adds tracing to any Transport
#[derive(Clone)]
pub struct TracedTransport<T> {
    inner: T,
}

impl<T> TracedTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T: Transport> Transport for TracedTransport<T> {
    async fn recv(&self) -> Result<(Vec<u8>, SocketAddr), TransportError> {
        let result = self.inner.recv().await;
        match &result {
            Ok((payload, from)) => tracing::trace!(%from, len = payload.len(), "datagram received"),
            Err(e) => tracing::warn!(error = %e, "receive failed"),
        }
        result
    }

    async fn send_to(&self, payload: &[u8], to: SocketAddr) -> Result<(), TransportError> {
        let span = tracing::debug_span!("transport.send", %to);
        async {
            let result = self.inner.send_to(payload, to).await;
            match &result {
                Ok(()) => tracing::debug!(payload = %String::from_utf8_lossy(payload), "sent"),
                Err(e) => tracing::warn!(error = %e, "send failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        self.inner.local_addr()
    }
}

/// Wrapper that adds tracing to any PeerAdapter
#[derive(Clone)]
pub struct TracedPeerAdapter<P> {
    inner: P,
}

impl<P> TracedPeerAdapter<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: PeerAdapter> PeerAdapter for TracedPeerAdapter<P> {
    async fn open(&self, peer: &PeerAddress) -> Result<Box<dyn PeerChannel>, TransportError> {
        let span = tracing::info_span!("peer.open", %peer);
        let start = std::time::Instant::now();
        let result = self.inner.open(peer).instrument(span.clone()).await;

        let _guard = span.enter();
        match result {
            Ok(channel) => {
                tracing::debug!("channel open");
                Ok(Box::new(TracedPeerChannel {
                    inner: channel,
                    peer: peer.to_string(),
                    start,
                }))
            }
            Err(e) => {
                tracing::warn!(error = %e, "open failed");
                Err(e)
            }
        }
    }
}

struct TracedPeerChannel {
    inner: Box<dyn PeerChannel>,
    peer: String,
    start: std::time::Instant,
}

#[async_trait]
impl PeerChannel for TracedPeerChannel {
    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        let span = tracing::info_span!("peer.send", peer = %self.peer);
        let result = self.inner.send(payload).instrument(span.clone()).await;
        let _guard = span.enter();
        match &result {
            Ok(()) => tracing::debug!(payload = %String::from_utf8_lossy(payload), "sent"),
            Err(e) => tracing::warn!(error = %e, "send failed"),
        }
        result
    }

    async fn recv(&mut self) -> Result<Vec<u8>, TransportError> {
        let span = tracing::info_span!("peer.recv", peer = %self.peer);
        let result = self.inner.recv().instrument(span.clone()).await;
        let _guard = span.enter();
        match &result {
            Ok(payload) => tracing::debug!(
                payload = %String::from_utf8_lossy(payload),
                elapsed_ms = self.start.elapsed().as_millis() as u64,
                "received"
            ),
            Err(e) => tracing::warn!(error = %e, "receive failed"),
        }
        result
    }
}

/// Wrapper that adds tracing to any SectionAdapter
#[derive(Clone)]
pub struct TracedSectionAdapter<S> {
    inner: S,
}

impl<S> TracedSectionAdapter<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: SectionAdapter> SectionAdapter for TracedSectionAdapter<S> {
    async fn send(&self, message: &WireMessage) -> Result<(), SectionError> {
        let span = tracing::info_span!("section.send", stamp = %message.stamp());
        let start = std::time::Instant::now();
        let result = self.inner.send(message).instrument(span.clone()).await;
        let elapsed = start.elapsed();

        let _guard = span.enter();
        match &result {
            Ok(()) => tracing::info!(
                wire = %message,
                elapsed_ms = elapsed.as_millis() as u64,
                "delivered"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "delivery failed"
            ),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
