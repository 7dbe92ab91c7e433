// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work done while the section is held

use crate::RuntimeError;
use ricart_adapters::SectionAdapter;
use ricart_core::{Event, SectionAccess, SectionLifecycle, WireMessage};
use std::time::Duration;
use tokio::sync::mpsc;

pub const BEGIN_TEXT: &str = "interaction with cs begins";
pub const END_TEXT: &str = "interaction with cs ends";

/// Section adapter gated by an access token
///
/// Every send checks the token first; messages are stamped with the request
/// that won the section.
pub struct GuardedSection<S> {
    section: S,
    access: SectionAccess,
}

impl<S: SectionAdapter> GuardedSection<S> {
    pub fn new(section: S, access: SectionAccess) -> Self {
        Self { section, access }
    }

    pub async fn send(&self, text: &str) -> Result<(), RuntimeError> {
        let stamp = self.access.check()?;
        let message = WireMessage::Section {
            stamp,
            text: text.to_string(),
        };
        self.section.send(&message).await?;
        Ok(())
    }
}

/// Reference interaction: announce, hold, announce, then release
///
/// Delivery failures are logged and do not end the interaction early. Using
/// an expired token is reported on `faults` and the section is not released.
pub async fn run_interaction<S: SectionAdapter>(
    section: GuardedSection<S>,
    hold: Duration,
    events: mpsc::Sender<Event>,
    faults: mpsc::UnboundedSender<RuntimeError>,
) {
    if !deliver(&section, BEGIN_TEXT, &faults).await {
        return;
    }
    tokio::time::sleep(hold).await;
    if !deliver(&section, END_TEXT, &faults).await {
        return;
    }

    if events
        .send(Event::Section(SectionLifecycle::Leave))
        .await
        .is_err()
    {
        tracing::debug!("event channel closed before leave");
    }
}

/// Returns false when the interaction must stop
async fn deliver<S: SectionAdapter>(
    section: &GuardedSection<S>,
    text: &str,
    faults: &mpsc::UnboundedSender<RuntimeError>,
) -> bool {
    match section.send(text).await {
        Ok(()) => true,
        Err(RuntimeError::Section(e)) => {
            tracing::error!(error = %e, text, "section delivery failed");
            true
        }
        Err(e) => {
            let _ = faults.send(e);
            false
        }
    }
}

#[cfg(test)]
#[path = "interaction_tests.rs"]
mod tests;
