// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: datagram sockets, peers, the section service
//! and local input

pub mod input;
pub mod peer;
pub mod section;
pub mod traced;
pub mod transport;

pub use input::{InputError, LineSource, StdinLineSource};
pub use peer::{PeerAdapter, PeerChannel, UdpPeerAdapter};
pub use section::{SectionAdapter, SectionError, UdpSectionAdapter};
pub use traced::{TracedPeerAdapter, TracedSectionAdapter, TracedTransport};
pub use transport::{resolve, Transport, TransportError, UdpTransport};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use input::FakeLineSource;
#[cfg(any(test, feature = "test-support"))]
pub use peer::{FakePeerAdapter, PeerCall};
#[cfg(any(test, feature = "test-support"))]
pub use section::FakeSectionAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use transport::FakeTransport;
