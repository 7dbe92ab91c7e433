// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text wire format exchanged between peers and with the section service
//!
//! - `req<CLOCK,PID>` asks for permission to enter the section
//! - `reply<CLOCK,PID>` grants it, stamped by the replying process
//! - `cs<CLOCK,PID>(TEXT)` is an interaction sent to the section service

use crate::clock::{Stamp, MAX_CLOCK};
use crate::id::ProcessId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("payload is not valid UTF-8")]
    NotUtf8,
    #[error("unknown message kind: {0:?}")]
    UnknownKind(String),
    #[error("malformed {kind} message: {payload:?}")]
    Malformed { kind: &'static str, payload: String },
}

/// A decoded datagram
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WireMessage {
    Request(Stamp),
    Reply(Stamp),
    Section { stamp: Stamp, text: String },
}

impl WireMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            WireMessage::Request(_) => "req",
            WireMessage::Reply(_) => "reply",
            WireMessage::Section { .. } => "cs",
        }
    }

    pub fn stamp(&self) -> Stamp {
        match self {
            WireMessage::Request(stamp) | WireMessage::Reply(stamp) => *stamp,
            WireMessage::Section { stamp, .. } => *stamp,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(bytes).map_err(|_| ParseError::NotUtf8)?;
        Self::parse(text)
    }

    pub fn parse(payload: &str) -> Result<Self, ParseError> {
        let trimmed = payload.trim_end_matches(['\r', '\n']);
        let (kind, rest) = trimmed
            .split_once('<')
            .ok_or_else(|| ParseError::UnknownKind(trimmed.to_string()))?;

        match kind {
            "req" => parse_bare("req", trimmed, rest).map(WireMessage::Request),
            "reply" => parse_bare("reply", trimmed, rest).map(WireMessage::Reply),
            "cs" => {
                let malformed = || ParseError::Malformed {
                    kind: "cs",
                    payload: trimmed.to_string(),
                };
                let (stamp, tail) = rest.split_once('>').ok_or_else(malformed)?;
                let stamp = parse_stamp(stamp).ok_or_else(malformed)?;
                let text = tail
                    .strip_prefix('(')
                    .and_then(|t| t.strip_suffix(')'))
                    .ok_or_else(malformed)?;
                Ok(WireMessage::Section {
                    stamp,
                    text: text.to_string(),
                })
            }
            other => Err(ParseError::UnknownKind(other.to_string())),
        }
    }
}

fn parse_bare(kind: &'static str, payload: &str, rest: &str) -> Result<Stamp, ParseError> {
    rest.strip_suffix('>')
        .and_then(parse_stamp)
        .ok_or_else(|| ParseError::Malformed {
            kind,
            payload: payload.to_string(),
        })
}

fn parse_stamp(body: &str) -> Option<Stamp> {
    let (clock, pid) = body.split_once(',')?;
    let clock = clock
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|clock| *clock <= MAX_CLOCK)?;
    let pid = pid.trim().parse::<u32>().ok()?;
    Some(Stamp::new(clock, ProcessId(pid)))
}

impl std::fmt::Display for WireMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireMessage::Request(stamp) => write!(f, "req<{}>", stamp),
            WireMessage::Reply(stamp) => write!(f, "reply<{}>", stamp),
            WireMessage::Section { stamp, text } => write!(f, "cs<{}>({})", stamp, text),
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
