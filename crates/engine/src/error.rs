// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine runtime

use ricart_adapters::SectionError;
use ricart_core::{AccessError, CoordinatorError};
use thiserror::Error;

/// Errors that stop the runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("protocol invariant violated: {0}")]
    Coordinator(#[from] CoordinatorError),
    #[error("protocol invariant violated: {0}")]
    Access(#[from] AccessError),
    #[error("section error: {0}")]
    Section(#[from] SectionError),
    #[error("event channel closed")]
    EventsClosed,
}
