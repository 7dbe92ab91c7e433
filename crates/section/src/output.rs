// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for displayed records

use crate::SectionRecord;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render one record as a single output line
pub fn render(record: &SectionRecord, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => record.to_string(),
        OutputFormat::Json => match serde_json::to_string(record) {
            Ok(json) => json,
            Err(_) => record.to_string(),
        },
    }
}
