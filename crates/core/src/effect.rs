// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects and notices produced by coordinator transitions

use crate::clock::Stamp;
use crate::coordinator::ProcessState;
use crate::event::ReplyTo;
use crate::id::ProcessId;
use serde::Serialize;

/// Side effects the coordinator requests from the runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Emit a notice for observers (logs, tests)
    Emit(Notice),
    /// Send `req<stamp>` to every other process through fresh peer links
    Broadcast { request: Stamp },
    /// Send `reply<stamp>` to a requester
    Reply {
        to: ReplyTo,
        stamp: Stamp,
        requester: Stamp,
    },
    /// Hand the section to the interaction, tagged with the request stamp
    EnterSection { request: Stamp },
    /// Revoke section access
    ExitSection,
}

/// Notable coordinator outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum Notice {
    /// The request keyword arrived while a request was already underway
    TriggerIgnored { state: ProcessState },
    /// A local event advanced the clock
    LocalEvent { clock: u64 },
    /// A peer request was queued until release
    RequestDeferred { requester: Stamp, queued: usize },
    /// A peer acknowledged our outstanding request
    Acknowledged {
        from: ProcessId,
        acks: usize,
        quorum: usize,
    },
    /// The section was released and deferred replies flushed
    Released { flushed: usize },
}

impl Notice {
    pub fn name(&self) -> &'static str {
        match self {
            Notice::TriggerIgnored { .. } => "trigger:ignored",
            Notice::LocalEvent { .. } => "clock:local",
            Notice::RequestDeferred { .. } => "request:deferred",
            Notice::Acknowledged { .. } => "request:acknowledged",
            Notice::Released { .. } => "section:released",
        }
    }
}

/// Span name and structured fields for an effect
pub trait TracedEffect {
    fn name(&self) -> &'static str;
    fn fields(&self) -> Vec<(&'static str, String)>;
}

impl TracedEffect for Effect {
    fn name(&self) -> &'static str {
        match self {
            Effect::Emit(_) => "emit",
            Effect::Broadcast { .. } => "broadcast",
            Effect::Reply { .. } => "reply",
            Effect::EnterSection { .. } => "enter_section",
            Effect::ExitSection => "exit_section",
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Emit(notice) => vec![("notice", notice.name().to_string())],
            Effect::Broadcast { request } => vec![
                ("clock", request.clock.to_string()),
                ("pid", request.pid.to_string()),
            ],
            Effect::Reply {
                to,
                stamp,
                requester,
            } => vec![
                ("to", to.to_string()),
                ("clock", stamp.clock.to_string()),
                ("requester", requester.to_string()),
            ],
            Effect::EnterSection { request } => vec![("request", request.to_string())],
            Effect::ExitSection => vec![],
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
