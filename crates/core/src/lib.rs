// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ricart-core: protocol core for Ricart–Agrawala mutual exclusion
//!
//! This crate provides:
//! - Lamport clocks and request stamps
//! - The coordinator state machine (pure, effect-returning)
//! - The datagram codec shared by peers and the section service
//! - Process identity, addresses and settings

pub mod access;
pub mod address;
pub mod clock;
pub mod config;
pub mod deferred;
pub mod id;
pub mod message;

// State machine (order matters for dependencies)
pub mod event;
pub mod effect;
pub mod coordinator;

// Re-exports
pub use access::{AccessError, AccessState, SectionAccess};
pub use address::{AddressError, PeerAddress};
pub use clock::{LamportClock, Stamp, MAX_CLOCK};
pub use config::{ConfigError, Overrides, Settings, CONFIG_ENV};
pub use coordinator::{Coordinator, CoordinatorError, ProcessState, DEFAULT_REQUEST_KEYWORD};
pub use deferred::{DeferredQueue, DeferredReply};
pub use effect::{Effect, Notice, TracedEffect};
pub use event::{Event, ReplyTo, SectionLifecycle};
pub use id::{IdentityError, ProcessId, ProcessIdentity};
pub use message::{ParseError, WireMessage};
