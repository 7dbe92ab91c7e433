// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client side of the section display service

mod udp;

pub use udp::UdpSectionAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeSectionAdapter;

use async_trait::async_trait;
use ricart_core::WireMessage;
use thiserror::Error;

/// Errors from section service operations
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("section service unreachable at {addr}: {reason}")]
    Unreachable { addr: String, reason: String },
    #[error("send to section service failed: {0}")]
    Send(#[from] std::io::Error),
}

/// Adapter for the shared resource guarded by the protocol
#[async_trait]
pub trait SectionAdapter: Clone + Send + Sync + 'static {
    /// Deliver one `cs<..>(..)` interaction
    async fn send(&self, message: &WireMessage) -> Result<(), SectionError>;
}
