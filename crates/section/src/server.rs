// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Receive loop of the display service

use crate::{render, OutputFormat, SectionRecord};
use ricart_adapters::Transport;
use std::future::Future;
use std::io::Write;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Print every section datagram until `shutdown` resolves
///
/// Datagrams already queued are drained before shutdown is honored.
/// Returns the number of records written.
pub async fn serve<T, W, F>(
    transport: &T,
    format: OutputFormat,
    out: &mut W,
    shutdown: F,
) -> Result<u64, ServeError>
where
    T: Transport,
    W: Write,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut written = 0;

    loop {
        tokio::select! {
            biased;

            datagram = transport.recv() => {
                let (payload, from) = match datagram {
                    Ok(datagram) => datagram,
                    Err(e) => {
                        warn!(error = %e, "receive failed");
                        continue;
                    }
                };

                match SectionRecord::decode(&payload) {
                    Ok(record) => {
                        debug!(%from, pid = record.pid, clock = record.clock, "record");
                        writeln!(out, "{}", render(&record, format))?;
                        out.flush()?;
                        written += 1;
                    }
                    Err(e) => warn!(%from, error = %e, "skipping malformed datagram"),
                }
            }

            _ = &mut shutdown => {
                info!(records = written, "display stopped");
                return Ok(written);
            }
        }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
