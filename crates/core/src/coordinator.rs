// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mutual-exclusion coordinator state machine
//!
//! Ricart–Agrawala arbitration over Lamport stamps. The coordinator is a pure
//! value: each event produces a new coordinator plus the effects the runtime
//! must carry out. It never performs I/O itself.

use crate::clock::{LamportClock, Stamp};
use crate::deferred::{DeferredQueue, DeferredReply};
use crate::effect::{Effect, Notice};
use crate::event::{Event, ReplyTo, SectionLifecycle};
use crate::id::{ProcessId, ProcessIdentity};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Keyword that asks for the section when typed on the local input
pub const DEFAULT_REQUEST_KEYWORD: &str = "x";

/// Interest of this process in the critical section
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Not interested
    Free,
    /// Request broadcast, quorum not yet complete
    Waiting,
    /// Inside the critical section
    Held,
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::Free => write!(f, "free"),
            ProcessState::Waiting => write!(f, "waiting"),
            ProcessState::Held => write!(f, "held"),
        }
    }
}

/// Broken protocol invariants; never recoverable
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("section enter while {state}")]
    UnexpectedEnter { state: ProcessState },
    #[error("section enter with {acks} of {quorum} acknowledgments")]
    QuorumIncomplete { acks: usize, quorum: usize },
    #[error("section leave while {state}")]
    UnexpectedLeave { state: ProcessState },
}

/// Coordinator state, owned by the serialization loop
#[derive(Clone, Debug)]
pub struct Coordinator {
    identity: ProcessIdentity,
    request_keyword: String,
    clock: LamportClock,
    state: ProcessState,
    /// Clock of the latest own request; `None` until the first one
    last_request: Option<u64>,
    /// Peers that granted the outstanding request
    acks: BTreeSet<ProcessId>,
    deferred: DeferredQueue,
}

impl Coordinator {
    pub fn new(identity: ProcessIdentity) -> Self {
        Self {
            identity,
            request_keyword: DEFAULT_REQUEST_KEYWORD.to_string(),
            clock: LamportClock::new(),
            state: ProcessState::Free,
            last_request: None,
            acks: BTreeSet::new(),
            deferred: DeferredQueue::new(),
        }
    }

    pub fn with_request_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.request_keyword = keyword.into();
        self
    }

    pub fn identity(&self) -> ProcessIdentity {
        self.identity
    }

    pub fn id(&self) -> ProcessId {
        self.identity.id()
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn clock(&self) -> u64 {
        self.clock.value()
    }

    pub fn last_request(&self) -> Option<u64> {
        self.last_request
    }

    /// Stamp of the latest own request, if any was ever made
    pub fn request_stamp(&self) -> Option<Stamp> {
        self.last_request.map(|clock| Stamp::new(clock, self.id()))
    }

    pub fn deferred(&self) -> &DeferredQueue {
        &self.deferred
    }

    pub fn acks(&self) -> usize {
        self.acks.len()
    }

    pub fn quorum_complete(&self) -> bool {
        self.acks.len() >= self.identity.quorum()
    }

    pub fn is_held(&self) -> bool {
        self.state == ProcessState::Held
    }

    /// Arbitration rule for an incoming request, evaluated against current state
    ///
    /// FREE grants anything. WAITING grants only requests that precede our own.
    /// HELD grants nothing.
    pub fn should_grant(&self, incoming: Stamp) -> bool {
        match self.state {
            ProcessState::Free => true,
            ProcessState::Waiting => match self.request_stamp() {
                Some(own) => incoming.precedes(&own),
                None => true,
            },
            ProcessState::Held => false,
        }
    }

    /// Pure state transition function
    pub fn transition(&self, event: Event) -> Result<(Coordinator, Vec<Effect>), CoordinatorError> {
        let mut next = self.clone();
        let mut effects = Vec::new();

        match event {
            Event::LocalTrigger { line } => next.on_local_line(line.trim(), &mut effects),

            Event::PeerRequest { stamp, reply_to } => {
                next.clock.observe(stamp.clock);
                if next.should_grant(stamp) {
                    let reply = next.reply(reply_to, stamp);
                    effects.push(reply);
                } else {
                    next.deferred.push(DeferredReply {
                        requester: stamp,
                        reply_to,
                    });
                    effects.push(Effect::Emit(Notice::RequestDeferred {
                        requester: stamp,
                        queued: next.deferred.len(),
                    }));
                }
            }

            Event::PeerReply { stamp } => {
                next.clock.observe(stamp.clock);
                let is_peer = stamp.pid != next.id()
                    && stamp.pid.get() >= 1
                    && stamp.pid.get() as usize <= next.identity.count();
                if next.state == ProcessState::Waiting && is_peer && next.acks.insert(stamp.pid) {
                    effects.push(Effect::Emit(Notice::Acknowledged {
                        from: stamp.pid,
                        acks: next.acks.len(),
                        quorum: next.identity.quorum(),
                    }));
                }
            }

            Event::Section(SectionLifecycle::Enter) => {
                if next.state != ProcessState::Waiting {
                    return Err(CoordinatorError::UnexpectedEnter { state: next.state });
                }
                if !next.quorum_complete() {
                    return Err(CoordinatorError::QuorumIncomplete {
                        acks: next.acks.len(),
                        quorum: next.identity.quorum(),
                    });
                }
                let request = next
                    .request_stamp()
                    .ok_or(CoordinatorError::UnexpectedEnter { state: next.state })?;
                next.state = ProcessState::Held;
                effects.push(Effect::EnterSection { request });
            }

            Event::Section(SectionLifecycle::Leave) => {
                if next.state != ProcessState::Held {
                    return Err(CoordinatorError::UnexpectedLeave { state: next.state });
                }
                next.state = ProcessState::Free;
                next.acks.clear();
                effects.push(Effect::ExitSection);

                let pending = next.deferred.drain();
                let flushed = pending.len();
                for deferred in pending {
                    let reply = next.reply(deferred.reply_to, deferred.requester);
                    effects.push(reply);
                }
                effects.push(Effect::Emit(Notice::Released { flushed }));
            }
        }

        Ok((next, effects))
    }

    fn on_local_line(&mut self, line: &str, effects: &mut Vec<Effect>) {
        if line == self.request_keyword {
            if self.state != ProcessState::Free {
                effects.push(Effect::Emit(Notice::TriggerIgnored { state: self.state }));
                return;
            }
            let clock = self.clock.tick();
            self.last_request = Some(clock);
            self.acks.clear();
            self.state = ProcessState::Waiting;
            effects.push(Effect::Broadcast {
                request: Stamp::new(clock, self.id()),
            });
        } else if line == self.id().to_string() {
            let clock = self.clock.tick();
            effects.push(Effect::Emit(Notice::LocalEvent { clock }));
        }
    }

    /// Build a reply stamped with a freshly ticked clock
    fn reply(&mut self, to: ReplyTo, requester: Stamp) -> Effect {
        let clock = self.clock.tick();
        Effect::Reply {
            to,
            stamp: Stamp::new(clock, self.id()),
            requester,
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
