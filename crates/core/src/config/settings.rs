// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process settings
//!
//! Loaded from an optional TOML file and then overridden by command-line
//! flags. Every field has a default, so an empty file is valid.

use crate::address::PeerAddress;
use crate::coordinator::DEFAULT_REQUEST_KEYWORD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming a settings file
pub const CONFIG_ENV: &str = "RICART_CONFIG";

/// Where the section display service listens unless told otherwise
pub const DEFAULT_SECTION: (&str, u16) = ("127.0.0.1", 10000);

const DEFAULT_HOLD: Duration = Duration::from_secs(5);
const DEFAULT_EVENT_BUFFER: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid setting '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Section display service address
    pub section: PeerAddress,
    /// How long the reference interaction keeps the section
    #[serde(with = "humantime_serde")]
    pub hold: Duration,
    /// Local input line that requests the section
    pub request_keyword: String,
    /// Capacity of the serialization loop's event channel
    pub event_buffer: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            section: PeerAddress::new(DEFAULT_SECTION.0, DEFAULT_SECTION.1),
            hold: DEFAULT_HOLD,
            request_keyword: DEFAULT_REQUEST_KEYWORD.to_string(),
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

/// Values given on the command line; `None` keeps the file or default value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub section: Option<PeerAddress>,
    pub hold: Option<Duration>,
    pub request_keyword: Option<String>,
}

impl Settings {
    /// Parse settings from TOML text; `origin` is only used in errors
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: e.message().to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// `<config_dir>/ricart/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ricart").join("config.toml"))
    }

    /// Load settings from the first source that applies
    ///
    /// An explicit path (flag, then environment) must exist. The per-user
    /// default file is read only if present. Otherwise defaults are used.
    pub fn load(explicit: Option<&Path>, env: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit.or(env) {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides on top of loaded settings
    pub fn apply(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(section) = overrides.section {
            self.section = section;
        }
        if let Some(hold) = overrides.hold {
            self.hold = hold;
        }
        if let Some(keyword) = overrides.request_keyword {
            self.request_keyword = keyword;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let keyword = self.request_keyword.trim();
        if keyword.is_empty() {
            return Err(ConfigError::Invalid {
                key: "request_keyword",
                reason: "must not be empty".to_string(),
            });
        }
        if keyword != self.request_keyword {
            return Err(ConfigError::Invalid {
                key: "request_keyword",
                reason: "must not have surrounding whitespace".to_string(),
            });
        }
        if keyword.parse::<u32>().is_ok() {
            return Err(ConfigError::Invalid {
                key: "request_keyword",
                reason: "must not be numeric (numbers are local clock events)".to_string(),
            });
        }
        if self.event_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "event_buffer",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
