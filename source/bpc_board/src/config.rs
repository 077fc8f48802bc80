// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum row count for a usable board; anything smaller cannot hold a
/// default-length component plus a jumper landing.
pub const MIN_ROWS: i32 = 5;

/// Board-level configuration: everything else about the geometry is fixed by
/// the breadboard family (see the column constants in [`crate::board`]).
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Number of rows of board holes (and of rail holes).
    pub rows: i32,
    /// Permitted jumper Manhattan lengths, ascending and deduplicated.
    pub wire_lengths: Vec<i32>,
}

#[derive(Clone, Debug, Diagnostic, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("board must have at least {MIN_ROWS} rows, got {0}")]
    #[diagnostic(code("bpc.config.rows"))]
    TooFewRows(i32),
    #[error("wire lengths must contain at least one value >= 2")]
    #[diagnostic(code("bpc.config.wire_lengths"))]
    NoUsableWireLength,
}

impl Config {
    pub fn new(rows: i32, wire_lengths: impl IntoIterator<Item = i32>) -> Result<Self, ConfigError> {
        if rows < MIN_ROWS {
            return Err(ConfigError::TooFewRows(rows));
        }
        let mut wire_lengths: Vec<i32> = wire_lengths.into_iter().filter(|&l| l >= 1).collect();
        wire_lengths.sort_unstable();
        wire_lengths.dedup();
        if !wire_lengths.iter().any(|&l| l >= 2) {
            return Err(ConfigError::NoUsableWireLength);
        }
        Ok(Self { rows, wire_lengths })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 30,
            wire_lengths: vec![1, 3, 5],
        }
    }
}
