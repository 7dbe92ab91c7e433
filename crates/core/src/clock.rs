// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lamport logical clock and request stamps
//!
//! The clock is owned by the coordinator and only touched from the
//! serialization loop, so it needs no interior synchronization.

use crate::id::ProcessId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Largest clock value accepted from the wire
///
/// Fits a signed 64-bit counter, and leaves room for the receiver to keep
/// advancing past any value it observes.
pub const MAX_CLOCK: u64 = i64::MAX as u64;

/// Scalar Lamport clock
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LamportClock {
    value: u64,
}

impl LamportClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value without advancing
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Advance for a local event or an outgoing message
    pub fn tick(&mut self) -> u64 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    /// Merge a clock value carried by an inbound message
    pub fn observe(&mut self, received: u64) -> u64 {
        self.value = self.value.max(received).saturating_add(1);
        self.value
    }
}

/// A (clock, pid) pair identifying a request or reply
///
/// Ordering is lexicographic: lower clock first, ties broken by lower pid.
/// A lower stamp has priority for the critical section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stamp {
    pub clock: u64,
    pub pid: ProcessId,
}

impl Stamp {
    pub fn new(clock: u64, pid: ProcessId) -> Self {
        Self { clock, pid }
    }

    /// True if this stamp wins arbitration against `other`
    pub fn precedes(&self, other: &Stamp) -> bool {
        self < other
    }
}

impl Ord for Stamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.clock
            .cmp(&other.clock)
            .then_with(|| self.pid.cmp(&other.pid))
    }
}

impl PartialOrd for Stamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Stamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.clock, self.pid)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
