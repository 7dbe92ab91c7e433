// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process identifiers
//!
//! Ids are dense integers `1..=N`, assigned from the position of a process
//! in the shared address list.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Identifier of one peer process
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessId(pub u32);

impl ProcessId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProcessId {
    fn from(id: u32) -> Self {
        ProcessId(id)
    }
}

/// Errors when building a process identity
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("invalid id: {0}")]
    NotNumeric(String),
    #[error("invalid id: {id} (expected 1..={count})")]
    OutOfRange { id: String, count: usize },
    #[error("no processes configured")]
    Empty,
}

/// Own id together with the size of the fixed peer set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessIdentity {
    id: ProcessId,
    count: usize,
}

impl ProcessIdentity {
    pub fn new(id: ProcessId, count: usize) -> Result<Self, IdentityError> {
        if count == 0 {
            return Err(IdentityError::Empty);
        }
        if id.0 == 0 || id.0 as usize > count {
            return Err(IdentityError::OutOfRange {
                id: id.to_string(),
                count,
            });
        }
        Ok(Self { id, count })
    }

    /// Parse the id as given on the command line
    pub fn parse(raw: &str, count: usize) -> Result<Self, IdentityError> {
        let id = u32::from_str(raw.trim()).map_err(|_| IdentityError::NotNumeric(raw.to_string()))?;
        Self::new(ProcessId(id), count).map_err(|e| match e {
            IdentityError::OutOfRange { count, .. } => IdentityError::OutOfRange {
                id: raw.to_string(),
                count,
            },
            other => other,
        })
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    /// Total number of processes, including this one
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of acknowledgments needed before entering the section
    pub fn quorum(&self) -> usize {
        self.count - 1
    }

    /// Ids of every other process
    pub fn others(&self) -> impl Iterator<Item = ProcessId> + '_ {
        (1..=self.count as u32)
            .map(ProcessId)
            .filter(move |p| *p != self.id)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
