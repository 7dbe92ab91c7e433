// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serialization loop
//!
//! The runtime owns the coordinator. Events are taken one at a time from a
//! single channel and handled to completion, reply sends included, before
//! the next one. Everything that blocks runs in spawned tasks that only
//! enqueue events.

use crate::listener::{listen, read_input};
use crate::{error::RuntimeError, Executor};
use ricart_adapters::{LineSource, PeerAdapter, SectionAdapter, Transport};
use ricart_core::{Coordinator, Event, PeerAddress, ProcessIdentity};
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::Instrument;

/// Runtime configuration
pub struct RuntimeConfig {
    pub identity: ProcessIdentity,
    /// Addresses of all processes, in pid order
    pub addresses: Vec<PeerAddress>,
    pub hold: Duration,
    pub request_keyword: String,
    pub event_buffer: usize,
}

/// Runtime adapter dependencies
pub struct RuntimeDeps<T, P, S> {
    pub transport: T,
    pub peers: P,
    pub section: S,
}

/// Runtime that coordinates the system
pub struct Runtime<T, P, S> {
    coordinator: Coordinator,
    executor: Executor<T, P, S>,
    transport: T,
    events_tx: mpsc::Sender<Event>,
    events_rx: mpsc::Receiver<Event>,
    faults_rx: mpsc::UnboundedReceiver<RuntimeError>,
}

impl<T, P, S> Runtime<T, P, S>
where
    T: Transport,
    P: PeerAdapter,
    S: SectionAdapter,
{
    pub fn new(deps: RuntimeDeps<T, P, S>, config: RuntimeConfig) -> Self {
        let (events_tx, events_rx) = mpsc::channel(config.event_buffer.max(1));
        let (faults_tx, faults_rx) = mpsc::unbounded_channel();

        let others = config
            .identity
            .others()
            .filter_map(|pid| {
                let addr = config.addresses.get(pid.get() as usize - 1)?;
                Some((pid, addr.clone()))
            })
            .collect();

        let transport = deps.transport.clone();
        let executor = Executor::new(deps, others, config.hold, events_tx.clone(), faults_tx);
        let coordinator =
            Coordinator::new(config.identity).with_request_keyword(config.request_keyword);

        Self {
            coordinator,
            executor,
            transport,
            events_tx,
            events_rx,
            faults_rx,
        }
    }

    /// Sender for injecting events into the loop
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.events_tx.clone()
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn executor(&self) -> &Executor<T, P, S> {
        &self.executor
    }

    /// Spawn the network listener and the local input reader
    pub fn spawn_listeners<L: LineSource>(&self, input: L) {
        tokio::spawn(listen(self.transport.clone(), self.sender()));
        tokio::spawn(read_input(input, self.sender()));
    }

    /// Handle one event to completion
    pub async fn handle_event(&mut self, event: Event) -> Result<(), RuntimeError> {
        let span = tracing::info_span!(
            "event",
            event = event.name(),
            pid = %self.coordinator.id()
        );

        async {
            let before = self.coordinator.state();
            let (next, effects) = self.coordinator.transition(event)?;
            self.coordinator = next;

            let after = self.coordinator.state();
            if before != after {
                tracing::info!(
                    from = %before,
                    to = %after,
                    clock = self.coordinator.clock(),
                    "state changed"
                );
            }

            self.executor.execute_all(effects).await;
            Ok::<(), RuntimeError>(())
        }
        .instrument(span)
        .await
    }

    /// Run until `shutdown` resolves or a fatal error occurs
    pub async fn run<F>(mut self, shutdown: F) -> Result<(), RuntimeError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!(
            pid = %self.coordinator.id(),
            processes = self.coordinator.identity().count(),
            "serialization loop started"
        );

        loop {
            tokio::select! {
                biased;

                Some(fault) = self.faults_rx.recv() => {
                    tracing::error!(error = %fault, "fatal fault");
                    return Err(fault);
                }

                event = self.events_rx.recv() => {
                    let event = event.ok_or(RuntimeError::EventsClosed)?;
                    if let Err(e) = self.handle_event(event).await {
                        tracing::error!(error = %e, "fatal error in serialization loop");
                        return Err(e);
                    }
                }

                _ = &mut shutdown => {
                    tracing::info!("serialization loop stopped");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
