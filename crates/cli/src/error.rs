// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Startup errors an operator can fix
//!
//! Each one names what failed, the underlying cause, and a hint or two.

use ricart_adapters::{SectionError, TransportError};
use ricart_core::{AddressError, ConfigError, IdentityError, PeerAddress};
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub details: Vec<String>,
    pub hints: Vec<String>,
    cause: Box<dyn Error + Send + Sync>,
}

impl CliError {
    fn new<E: Error + Send + Sync + 'static>(message: impl Into<String>, cause: E) -> Self {
        Self {
            message: message.into(),
            details: Vec::new(),
            hints: Vec::new(),
            cause: Box::new(cause),
        }
    }

    fn detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;
        for detail in &self.details {
            writeln!(f, "  -> {}", detail)?;
        }
        for hint in &self.hints {
            writeln!(f, "hint: {}", hint)?;
        }
        Ok(())
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

/// Builders for the startup failures an operator can fix.
impl CliError {
    /// The id argument is not a position in the address list.
    pub fn invalid_id(error: IdentityError, count: usize) -> Self {
        let message = match &error {
            IdentityError::NotNumeric(id) | IdentityError::OutOfRange { id, .. } => {
                format!("invalid id: {}", id)
            }
            IdentityError::Empty => error.to_string(),
        };
        CliError::new(message, error)
            .detail(format!(
                "{} address(es) given, so valid ids are 1..={}",
                count, count
            ))
            .hint("pass the 1-based position of this process's own address")
            .hint("usage: ricart [OPTIONS] <ID> <ADDRESS>...")
    }

    /// An address on the command line could not be parsed.
    pub fn bad_address(raw: &str, error: AddressError) -> Self {
        let detail = error.to_string();
        CliError::new(format!("invalid address '{}'", raw), error)
            .detail(detail)
            .hint("write addresses as HOST:PORT, or :PORT for all interfaces")
    }

    /// Configuration could not be loaded or failed validation.
    pub fn config(error: ConfigError) -> Self {
        let hint = match &error {
            ConfigError::Read { path, .. } => format!(
                "check that {} exists, or unset RICART_CONFIG",
                path.display()
            ),
            ConfigError::Parse { .. } => {
                "known keys are section, hold, request_keyword and event_buffer".to_string()
            }
            ConfigError::Invalid { key, .. } => format!("fix the value of '{}'", key),
        };
        let detail = error.to_string();
        CliError::new("invalid configuration", error)
            .detail(detail)
            .hint(hint)
    }

    /// The own listen socket could not be bound.
    pub fn bind_failed(addr: &PeerAddress, error: TransportError) -> Self {
        let detail = error.to_string();
        CliError::new(format!("cannot listen on {}", addr), error)
            .detail(detail)
            .detail("another process may already be using this port")
            .hint("check the address at this process's id position")
    }

    /// The section display service address could not be resolved.
    pub fn section_unreachable(error: SectionError) -> Self {
        let detail = error.to_string();
        CliError::new("section service unreachable", error)
            .detail(detail)
            .hint("start it first: ricart-section --bind <ADDRESS>")
            .hint("point --section at the address it listens on")
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
