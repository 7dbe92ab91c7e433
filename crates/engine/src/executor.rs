// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use crate::interaction::{run_interaction, GuardedSection};
use crate::peer_link::run_round;
use crate::{RuntimeDeps, RuntimeError};
use ricart_adapters::{PeerAdapter, SectionAdapter, Transport, TransportError};
use ricart_core::{Effect, Event, Notice, PeerAddress, ProcessId, SectionAccess, WireMessage};
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::Instrument;

/// Errors that can occur during effect execution
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("reply to {to} failed: {source}")]
    Reply {
        to: String,
        source: TransportError,
    },
}

/// Executes effects using the configured adapters
pub struct Executor<T, P, S> {
    transport: T,
    peers: P,
    section: S,
    /// Every other process, by pid
    others: Vec<(ProcessId, PeerAddress)>,
    hold: Duration,
    events: mpsc::Sender<Event>,
    faults: mpsc::UnboundedSender<RuntimeError>,
    /// Token for the current HELD period
    access: Mutex<Option<SectionAccess>>,
}

impl<T, P, S> Executor<T, P, S>
where
    T: Transport,
    P: PeerAdapter,
    S: SectionAdapter,
{
    pub fn new(
        deps: RuntimeDeps<T, P, S>,
        others: Vec<(ProcessId, PeerAddress)>,
        hold: Duration,
        events: mpsc::Sender<Event>,
        faults: mpsc::UnboundedSender<RuntimeError>,
    ) -> Self {
        Self {
            transport: deps.transport,
            peers: deps.peers,
            section: deps.section,
            others,
            hold,
            events,
            faults,
            access: Mutex::new(None),
        }
    }

    /// Execute a single effect with tracing
    pub async fn execute(&self, effect: Effect) -> Result<(), ExecuteError> {
        use ricart_core::TracedEffect;

        let span = tracing::debug_span!("effect", effect = effect.name());
        async move {
            tracing::debug!(fields = ?effect.fields(), "executing");
            let result = self.execute_inner(effect).await;
            if let Err(e) = &result {
                tracing::warn!(error = %e, "effect failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Execute effects in order; failures are logged and do not stop the batch
    pub async fn execute_all(&self, effects: Vec<Effect>) {
        for effect in effects {
            let _ = self.execute(effect).await;
        }
    }

    async fn execute_inner(&self, effect: Effect) -> Result<(), ExecuteError> {
        match effect {
            Effect::Emit(notice) => {
                emit(&notice);
                Ok(())
            }

            Effect::Broadcast { request } => {
                tracing::info!(
                    clock = request.clock,
                    pid = %request.pid,
                    peers = self.others.len(),
                    "requesting section"
                );
                tokio::spawn(run_round(
                    self.peers.clone(),
                    self.others.clone(),
                    request,
                    self.events.clone(),
                ));
                Ok(())
            }

            Effect::Reply {
                to,
                stamp,
                requester,
            } => {
                tracing::info!(requester = %requester, clock = stamp.clock, "granting");
                self.transport
                    .send_to(&WireMessage::Reply(stamp).encode(), to.0)
                    .await
                    .map_err(|source| ExecuteError::Reply {
                        to: to.to_string(),
                        source,
                    })
            }

            Effect::EnterSection { request } => {
                tracing::info!(request = %request, "entered critical section");
                let access = SectionAccess::grant(request);
                *self.access.lock().unwrap_or_else(|e| e.into_inner()) = Some(access.clone());
                tokio::spawn(run_interaction(
                    GuardedSection::new(self.section.clone(), access),
                    self.hold,
                    self.events.clone(),
                    self.faults.clone(),
                ));
                Ok(())
            }

            Effect::ExitSection => {
                let access = self.access.lock().unwrap_or_else(|e| e.into_inner()).take();
                if let Some(access) = access {
                    access.revoke();
                    tracing::info!(request = %access.request(), "left critical section");
                }
                Ok(())
            }
        }
    }

    /// Whether a section token is currently outstanding
    pub fn holds_access(&self) -> bool {
        self.access
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(SectionAccess::is_usable)
    }
}

fn emit(notice: &Notice) {
    match notice {
        Notice::TriggerIgnored { state } => tracing::warn!(%state, "request ignored"),
        Notice::LocalEvent { clock } => tracing::info!(clock, "local event"),
        Notice::RequestDeferred { requester, queued } => {
            tracing::info!(%requester, queued, "request deferred")
        }
        Notice::Acknowledged {
            from,
            acks,
            quorum,
        } => tracing::info!(%from, acks, quorum, "acknowledged"),
        Notice::Released { flushed } => tracing::info!(flushed, "deferred replies flushed"),
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
