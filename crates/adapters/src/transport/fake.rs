// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake transport for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Transport, TransportError};
use async_trait::async_trait;
use ricart_core::WireMessage;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// In-memory transport: tests inject inbound datagrams and inspect sends
#[derive(Clone)]
pub struct FakeTransport {
    local: SocketAddr,
    inbound_tx: mpsc::UnboundedSender<(Vec<u8>, SocketAddr)>,
    inbound_rx: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<(Vec<u8>, SocketAddr)>>>,
    sent: Arc<Mutex<Vec<(Vec<u8>, SocketAddr)>>>,
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 10001)))
    }
}

impl FakeTransport {
    pub fn new(local: SocketAddr) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        Self {
            local,
            inbound_tx,
            inbound_rx: Arc::new(tokio::sync::Mutex::new(inbound_rx)),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a datagram as if it arrived from `from`
    pub fn inject(&self, payload: impl Into<Vec<u8>>, from: SocketAddr) {
        // The receiver lives as long as self, so the send cannot fail
        let _ = self.inbound_tx.send((payload.into(), from));
    }

    /// Every datagram sent so far
    pub fn sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Sent datagrams that decode as wire messages
    pub fn sent_messages(&self) -> Vec<(WireMessage, SocketAddr)> {
        self.sent()
            .into_iter()
            .filter_map(|(payload, to)| WireMessage::decode(&payload).ok().map(|m| (m, to)))
            .collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn recv(&self) -> Result<(Vec<u8>, SocketAddr), TransportError> {
        let mut rx = self.inbound_rx.lock().await;
        match rx.recv().await {
            Some(datagram) => Ok(datagram),
            None => std::future::pending().await,
        }
    }

    async fn send_to(&self, payload: &[u8], to: SocketAddr) -> Result<(), TransportError> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((payload.to_vec(), to));
        Ok(())
    }

    fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        Ok(self.local)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
