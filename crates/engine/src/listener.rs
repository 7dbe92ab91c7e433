// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tasks that turn inbound I/O into loop events

use ricart_adapters::{LineSource, Transport};
use ricart_core::{Event, ReplyTo, WireMessage};
use tokio::sync::mpsc;

/// Receive peer requests on the process's listen socket
///
/// Only `req<..>` is accepted here; replies travel on the requesting link's
/// own socket. Anything else is logged and dropped.
pub async fn listen<T: Transport>(transport: T, events: mpsc::Sender<Event>) {
    loop {
        let (payload, from) = match transport.recv().await {
            Ok(datagram) => datagram,
            Err(e) => {
                tracing::warn!(error = %e, "receive failed");
                continue;
            }
        };

        let event = match WireMessage::decode(&payload) {
            Ok(WireMessage::Request(stamp)) => Event::PeerRequest {
                stamp,
                reply_to: ReplyTo(from),
            },
            Ok(other) => {
                tracing::warn!(%from, kind = other.kind(), "unexpected message on listen socket");
                continue;
            }
            Err(e) => {
                tracing::warn!(%from, error = %e, "dropping malformed datagram");
                continue;
            }
        };

        if events.send(event).await.is_err() {
            tracing::debug!("event channel closed, listener stopping");
            return;
        }
    }
}

/// Forward local input lines to the loop until input ends
pub async fn read_input<L: LineSource>(mut input: L, events: mpsc::Sender<Event>) {
    loop {
        match input.next_line().await {
            Ok(Some(line)) => {
                if events.send(Event::LocalTrigger { line }).await.is_err() {
                    return;
                }
            }
            Ok(None) => {
                tracing::info!("local input closed");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "local input failed");
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
