// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use ricart_core::{ParseError, WireMessage};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("expected a cs message, got {0}")]
    NotSection(&'static str),
}

/// One interaction reported by a section holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRecord {
    pub pid: u32,
    pub clock: u64,
    pub text: String,
}

impl SectionRecord {
    pub fn decode(payload: &[u8]) -> Result<Self, RecordError> {
        match WireMessage::decode(payload)? {
            WireMessage::Section { stamp, text } => Ok(Self {
                pid: stamp.pid.get(),
                clock: stamp.clock,
                text,
            }),
            other => Err(RecordError::NotSection(other.kind())),
        }
    }
}

impl fmt::Display for SectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[PID: {}, Clock: {}] {}", self.pid, self.clock, self.text)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
