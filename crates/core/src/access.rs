// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot capability for talking to the critical section
//!
//! A token is granted when the coordinator enters HELD and revoked when it
//! leaves. Clones share state, so revoking through any clone expires all of
//! them.

use crate::clock::Stamp;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    Usable,
    Expired,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("critical section used outside the held window (request {request})")]
    Expired { request: Stamp },
}

/// Capability to address the critical section during one HELD period
#[derive(Clone, Debug)]
pub struct SectionAccess {
    request: Stamp,
    state: Arc<Mutex<AccessState>>,
}

impl SectionAccess {
    pub fn grant(request: Stamp) -> Self {
        Self {
            request,
            state: Arc::new(Mutex::new(AccessState::Usable)),
        }
    }

    /// Stamp of the request this token was granted for
    pub fn request(&self) -> Stamp {
        self.request
    }

    pub fn state(&self) -> AccessState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_usable(&self) -> bool {
        self.state() == AccessState::Usable
    }

    /// Confirm the token may be used right now
    pub fn check(&self) -> Result<Stamp, AccessError> {
        match self.state() {
            AccessState::Usable => Ok(self.request),
            AccessState::Expired => Err(AccessError::Expired {
                request: self.request,
            }),
        }
    }

    /// Expire the token; further checks fail
    pub fn revoke(&self) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = AccessState::Expired;
    }
}

#[cfg(test)]
#[path = "access_tests.rs"]
mod tests;
