// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake section adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{SectionAdapter, SectionError};
use async_trait::async_trait;
use ricart_core::WireMessage;
use std::sync::{Arc, Mutex};

/// Records every interaction; clones share one log, so several processes
/// in a test can write to the same section
#[derive(Clone, Default)]
pub struct FakeSectionAdapter {
    messages: Arc<Mutex<Vec<WireMessage>>>,
}

impl FakeSectionAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded interactions
    pub fn messages(&self) -> Vec<WireMessage> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Recorded interactions as `(pid, text)` pairs
    pub fn texts(&self) -> Vec<(u32, String)> {
        self.messages()
            .into_iter()
            .filter_map(|message| match message {
                WireMessage::Section { stamp, text } => Some((stamp.pid.get(), text)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl SectionAdapter for FakeSectionAdapter {
    async fn send(&self, message: &WireMessage) -> Result<(), SectionError> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.clone());
        Ok(())
    }
}
