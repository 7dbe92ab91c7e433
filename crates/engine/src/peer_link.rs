// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request fan-out
//!
//! One round per own request: a link per peer sends `req<..>` and waits for
//! that peer's `reply<..>`. Each reply is forwarded to the serialization loop
//! before the link reports back, so the enter event queued at the end of the
//! round always follows every acknowledgment.

use ricart_adapters::{PeerAdapter, TransportError};
use ricart_core::{Event, PeerAddress, ProcessId, SectionLifecycle, Stamp, WireMessage};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("event channel closed")]
    EventsClosed,
}

/// Channel to one peer for one request
pub struct PeerLink<P> {
    adapter: P,
    pid: ProcessId,
    addr: PeerAddress,
    events: mpsc::Sender<Event>,
}

impl<P: PeerAdapter> PeerLink<P> {
    pub fn new(adapter: P, pid: ProcessId, addr: PeerAddress, events: mpsc::Sender<Event>) -> Self {
        Self {
            adapter,
            pid,
            addr,
            events,
        }
    }

    /// Send the request and wait, without timeout, for the peer's grant
    ///
    /// Datagrams that are malformed, not replies, or stamped by another pid
    /// are logged and skipped.
    pub async fn run(self, request: Stamp) -> Result<Stamp, LinkError> {
        let mut channel = self.adapter.open(&self.addr).await?;
        channel.send(&WireMessage::Request(request).encode()).await?;

        loop {
            let payload = channel.recv().await?;
            match WireMessage::decode(&payload) {
                Ok(WireMessage::Reply(stamp)) if stamp.pid == self.pid => {
                    self.events
                        .send(Event::PeerReply { stamp })
                        .await
                        .map_err(|_| LinkError::EventsClosed)?;
                    return Ok(stamp);
                }
                Ok(other) => tracing::warn!(
                    peer = %self.addr,
                    expected = %self.pid,
                    received = %other,
                    "unexpected message on peer link"
                ),
                Err(e) => tracing::warn!(peer = %self.addr, error = %e, "dropping malformed reply"),
            }
        }
    }
}

/// Fan a request out to every peer and queue the enter event once all grant
///
/// A link that fails stalls the round: the enter event is never queued.
pub async fn run_round<P: PeerAdapter>(
    adapter: P,
    peers: Vec<(ProcessId, PeerAddress)>,
    request: Stamp,
    events: mpsc::Sender<Event>,
) {
    let quorum = peers.len();
    let mut links = JoinSet::new();
    for (pid, addr) in peers {
        let link = PeerLink::new(adapter.clone(), pid, addr, events.clone());
        links.spawn(link.run(request));
    }

    let mut granted = 0usize;
    while let Some(joined) = links.join_next().await {
        match joined {
            Ok(Ok(_)) => granted += 1,
            Ok(Err(e)) => tracing::warn!(request = %request, error = %e, "peer link failed"),
            Err(e) => tracing::warn!(request = %request, error = %e, "peer link aborted"),
        }
    }

    if granted < quorum {
        tracing::warn!(request = %request, granted, quorum, "round stalled");
        return;
    }

    tracing::debug!(request = %request, quorum, "quorum reached");
    if events
        .send(Event::Section(SectionLifecycle::Enter))
        .await
        .is_err()
    {
        tracing::debug!("event channel closed before enter");
    }
}

#[cfg(test)]
#[path = "peer_link_tests.rs"]
mod tests;
