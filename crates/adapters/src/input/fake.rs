// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake line source for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{InputError, LineSource};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Lines typed by the test through a [`FakeLineSource::handle`]
///
/// Input ends when every handle is gone and [`FakeLineSource::close`] has
/// been called.
pub struct FakeLineSource {
    tx: Option<mpsc::UnboundedSender<String>>,
    rx: mpsc::UnboundedReceiver<String>,
}

impl Default for FakeLineSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeLineSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx: Some(tx), rx }
    }

    /// Source that yields `lines` and then ends
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut source = Self::new();
        if let Some(tx) = &source.tx {
            for line in lines {
                let _ = tx.send(line.into());
            }
        }
        source.close();
        source
    }

    /// Sender for typing lines after the source has been handed off
    pub fn handle(&self) -> Option<mpsc::UnboundedSender<String>> {
        self.tx.clone()
    }

    /// Drop the source's own sender
    pub fn close(&mut self) {
        self.tx = None;
    }
}

#[async_trait]
impl LineSource for FakeLineSource {
    async fn next_line(&mut self) -> Result<Option<String>, InputError> {
        Ok(self.rx.recv().await)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
