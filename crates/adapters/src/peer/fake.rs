// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake peer adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PeerAdapter, PeerChannel};
use crate::transport::TransportError;
use async_trait::async_trait;
use ricart_core::PeerAddress;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Recorded peer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerCall {
    Open { peer: String },
    Send { peer: String, payload: Vec<u8> },
}

#[derive(Default)]
struct State {
    calls: Vec<PeerCall>,
    /// Replies waiting to be read, keyed by peer address
    replies: HashMap<String, VecDeque<Vec<u8>>>,
    unreachable: Vec<String>,
}

/// Fake peer adapter: replies are queued by the test, per peer
///
/// A channel with nothing queued waits, which models a peer that defers.
#[derive(Clone, Default)]
pub struct FakePeerAdapter {
    state: Arc<Mutex<State>>,
    arrived: Arc<Notify>,
}

impl FakePeerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PeerCall> {
        self.lock().calls.clone()
    }

    /// Payloads sent to `peer`, in order
    pub fn sent_to(&self, peer: &str) -> Vec<Vec<u8>> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                PeerCall::Send { peer: p, payload } if p == peer => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }

    /// Queue a datagram for the next read on a channel to `peer`
    pub fn reply_from(&self, peer: &str, payload: impl Into<Vec<u8>>) {
        self.lock()
            .replies
            .entry(peer.to_string())
            .or_default()
            .push_back(payload.into());
        self.arrived.notify_waiters();
    }

    /// Make `open` fail for `peer`
    pub fn set_unreachable(&self, peer: &str) {
        self.lock().unreachable.push(peer.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PeerAdapter for FakePeerAdapter {
    async fn open(&self, peer: &PeerAddress) -> Result<Box<dyn PeerChannel>, TransportError> {
        let peer = peer.to_string();
        let mut state = self.lock();
        state.calls.push(PeerCall::Open { peer: peer.clone() });
        if state.unreachable.contains(&peer) {
            return Err(TransportError::Resolve(peer));
        }
        Ok(Box::new(FakePeerChannel {
            peer,
            adapter: self.clone(),
        }))
    }
}

struct FakePeerChannel {
    peer: String,
    adapter: FakePeerAdapter,
}

#[async_trait]
impl PeerChannel for FakePeerChannel {
    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.adapter.lock().calls.push(PeerCall::Send {
            peer: self.peer.clone(),
            payload: payload.to_vec(),
        });
        Ok(())
    }

    async fn recv(&mut self) -> Result<Vec<u8>, TransportError> {
        loop {
            // Register before checking so a reply queued in between is not missed
            let arrived = self.adapter.arrived.notified();
            let next = self
                .adapter
                .lock()
                .replies
                .get_mut(&self.peer)
                .and_then(|queue| queue.pop_front());
            if let Some(payload) = next {
                return Ok(payload);
            }
            arrived.await;
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
