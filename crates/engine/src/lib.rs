// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Ricart execution engine: serialization loop, peer links and section access

mod error;
mod executor;
pub mod interaction;
mod listener;
mod peer_link;
mod runtime;

pub use error::RuntimeError;
pub use executor::{ExecuteError, Executor};
pub use listener::{listen, read_input};
pub use peer_link::{run_round, LinkError, PeerLink};
pub use runtime::{Runtime, RuntimeConfig, RuntimeDeps};
