// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local operator input, one line at a time

mod stdin;

pub use stdin::StdinLineSource;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLineSource;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait LineSource: Send + 'static {
    /// Next line without its terminator; `None` at end of input
    async fn next_line(&mut self) -> Result<Option<String>, InputError>;
}
