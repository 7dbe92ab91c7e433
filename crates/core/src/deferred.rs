// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replies withheld while this process holds or has priority for the section

use crate::clock::Stamp;
use crate::event::ReplyTo;

/// A grant owed to a peer, answered when the section is released
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeferredReply {
    pub requester: Stamp,
    pub reply_to: ReplyTo,
}

/// Pending grants, released all at once on exit
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeferredQueue {
    entries: Vec<DeferredReply>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reply: DeferredReply) {
        self.entries.push(reply);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeferredReply> {
        self.entries.iter()
    }

    /// Take every entry, leaving the queue empty
    pub fn drain(&mut self) -> Vec<DeferredReply> {
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
#[path = "deferred_tests.rs"]
mod tests;
