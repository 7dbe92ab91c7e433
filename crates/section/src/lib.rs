// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Shared section display service
//!
//! Receives `cs<CLOCK,PID>(TEXT)` datagrams from the processes holding the
//! section and prints one line per interaction.

mod output;
mod record;
mod server;

pub use output::{render, OutputFormat};
pub use record::{RecordError, SectionRecord};
pub use server::{serve, ServeError};
