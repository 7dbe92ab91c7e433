// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events consumed by the serialization loop
//!
//! Every input the coordinator reacts to arrives as one of these, from the
//! local input source, the network listener, the peer links, or the section
//! interaction.

use crate::clock::Stamp;
use std::net::SocketAddr;

/// Where the answer to a peer request must be sent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplyTo(pub SocketAddr);

impl std::fmt::Display for ReplyTo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Enter/leave notifications for the critical section
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionLifecycle {
    /// Every peer link of the current round has been acknowledged
    Enter,
    /// The section interaction has finished
    Leave,
}

/// Events that drive coordinator transitions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A line typed on the local input, forwarded verbatim
    LocalTrigger { line: String },
    /// A peer asks for the section
    PeerRequest { stamp: Stamp, reply_to: ReplyTo },
    /// A peer granted our outstanding request
    PeerReply { stamp: Stamp },
    /// Critical-section lifecycle
    Section(SectionLifecycle),
}

impl Event {
    /// Short name for log spans
    pub fn name(&self) -> &'static str {
        match self {
            Event::LocalTrigger { .. } => "local_trigger",
            Event::PeerRequest { .. } => "peer_request",
            Event::PeerReply { .. } => "peer_reply",
            Event::Section(SectionLifecycle::Enter) => "section_enter",
            Event::Section(SectionLifecycle::Leave) => "section_leave",
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
