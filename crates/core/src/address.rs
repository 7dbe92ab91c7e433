// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Network addresses of peers and of the section service
//!
//! Accepts `host:port` and the `:port` shorthand. The shorthand listens on
//! every interface and dials loopback.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("malformed address '{0}': expected HOST:PORT or :PORT")]
    Malformed(String),
    #[error("invalid port in address '{0}'")]
    InvalidPort(String),
}

/// A peer address as configured, before name resolution
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeerAddress {
    host: Option<String>,
    port: u16,
}

impl PeerAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: Some(host.into()),
            port,
        }
    }

    /// The `:port` shorthand
    pub fn any(port: u16) -> Self {
        Self { host: None, port }
    }

    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let raw = raw.trim();
        let (host, port) = raw
            .rsplit_once(':')
            .ok_or_else(|| AddressError::Malformed(raw.to_string()))?;
        let port = u16::from_str(port).map_err(|_| AddressError::InvalidPort(raw.to_string()))?;
        let host = host.trim_start_matches('[').trim_end_matches(']');
        let host = if host.is_empty() {
            None
        } else if host.contains(char::is_whitespace) {
            return Err(AddressError::Malformed(raw.to_string()));
        } else {
            Some(host.to_string())
        };
        Ok(Self { host, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Address to bind when this is the own listen address
    pub fn bind_target(&self) -> String {
        match &self.host {
            Some(host) => join(host, self.port),
            None => format!("0.0.0.0:{}", self.port),
        }
    }

    /// Address to send to when this is a remote endpoint
    pub fn dial_target(&self) -> String {
        match &self.host {
            Some(host) => join(host, self.port),
            None => format!("127.0.0.1:{}", self.port),
        }
    }
}

fn join(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

impl std::fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.host {
            Some(host) => write!(f, "{}", join(host, self.port)),
            None => write!(f, ":{}", self.port),
        }
    }
}

impl FromStr for PeerAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PeerAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PeerAddress> for String {
    fn from(value: PeerAddress) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "address_tests.rs"]
mod tests;
