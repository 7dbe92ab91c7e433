// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line arguments and startup resolution

use crate::error::CliError;
use clap::Parser;
use ricart_core::{IdentityError, Overrides, PeerAddress, ProcessIdentity, Settings};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "ricart",
    version,
    about = "Ricart - distributed mutual exclusion over UDP"
)]
pub struct Cli {
    /// Id of this process: the 1-based position of its own address
    pub id: String,

    /// Address of every process in id order (HOST:PORT or :PORT)
    #[arg(required = true)]
    pub addresses: Vec<String>,

    /// Settings file (defaults to $RICART_CONFIG, then the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address of the section display service
    #[arg(long)]
    pub section: Option<String>,

    /// How long to hold the section, e.g. "5s" or "250ms"
    #[arg(long, value_parser = humantime::parse_duration)]
    pub hold: Option<Duration>,

    /// Input line that requests the section
    #[arg(long)]
    pub keyword: Option<String>,
}

/// Everything a node needs, validated
#[derive(Debug)]
pub struct Launch {
    pub identity: ProcessIdentity,
    pub addresses: Vec<PeerAddress>,
    /// Listen address: the entry at the own id's position
    pub own: PeerAddress,
    pub settings: Settings,
}

/// Pick the address at `identity`'s 1-based position
fn own_address(
    raw_id: &str,
    identity: &ProcessIdentity,
    addresses: &[PeerAddress],
) -> Result<PeerAddress, CliError> {
    (identity.id().get() as usize)
        .checked_sub(1)
        .and_then(|index| addresses.get(index))
        .cloned()
        .ok_or_else(|| {
            CliError::invalid_id(
                IdentityError::OutOfRange {
                    id: raw_id.to_string(),
                    count: addresses.len(),
                },
                addresses.len(),
            )
        })
}

impl Cli {
    /// Validate arguments and merge them over the configured settings
    pub fn resolve(&self, env_config: Option<PathBuf>) -> Result<Launch, CliError> {
        let identity = ProcessIdentity::parse(&self.id, self.addresses.len())
            .map_err(|e| CliError::invalid_id(e, self.addresses.len()))?;

        let addresses = self
            .addresses
            .iter()
            .map(|raw| PeerAddress::parse(raw).map_err(|e| CliError::bad_address(raw, e)))
            .collect::<Result<Vec<_>, _>>()?;
        let own = own_address(&self.id, &identity, &addresses)?;

        let section = match &self.section {
            Some(raw) => {
                Some(PeerAddress::parse(raw).map_err(|e| CliError::bad_address(raw, e))?)
            }
            None => None,
        };

        let overrides = Overrides {
            section,
            hold: self.hold,
            request_keyword: self.keyword.clone(),
        };
        let settings = Settings::load(self.config.as_deref(), env_config.as_deref())
            .and_then(|settings| settings.apply(overrides))
            .map_err(CliError::config)?;

        Ok(Launch {
            identity,
            addresses,
            own,
            settings,
        })
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
