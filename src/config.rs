// In: src/config.rs

//! The single source of truth for the tunable heuristics of the column kernels.
//!
//! `EngineConfig` is created once at the application boundary (e.g. from a JSON
//! document). `Column::get_permutation_with` takes it by reference to choose
//! between partial and full sorting; `Column::get_permutation` uses
//! `EngineConfig::default()`. The seeds only initialize fresh accumulator
//! arrays for the hashing kernels.

use serde::{Deserialize, Serialize};

use crate::error::ColumnError;

/// The unified configuration for the vexcol kernels.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// A top-`limit` request is served by a partial sort only when
    /// `limit <= rows / partial_sort_divisor`; otherwise the full sort runs.
    /// Partial selection only pays off when `limit` is a small fraction of the
    /// rows. `0` disables partial sorting entirely.
    #[serde(default = "default_partial_sort_divisor")]
    pub partial_sort_divisor: usize,

    /// Seed for freshly allocated xxHash64 accumulator arrays.
    #[serde(default)]
    pub default_hash_seed: u64,

    /// Seed for freshly allocated CRC32 accumulator arrays.
    #[serde(default)]
    pub default_crc_seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            partial_sort_divisor: default_partial_sort_divisor(),
            default_hash_seed: 0,
            default_crc_seed: 0,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ColumnError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decides whether a top-`limit` request over `rows` rows is served by a
    /// partial sort.
    pub fn use_partial_sort(&self, limit: usize, rows: usize) -> bool {
        if limit == 0 || self.partial_sort_divisor == 0 {
            return false;
        }
        (limit as f64) <= (rows as f64) / (self.partial_sort_divisor as f64)
    }

    /// A hash accumulator array of `rows` slots, each holding the default seed.
    pub fn new_hash_accumulators(&self, rows: usize) -> Vec<u64> {
        vec![self.default_hash_seed; rows]
    }

    /// A CRC accumulator array of `rows` slots, each holding the default seed.
    pub fn new_crc_accumulators(&self, rows: usize) -> Vec<u32> {
        vec![self.default_crc_seed; rows]
    }
}

/// Helper for `serde` to provide a default for `partial_sort_divisor`.
fn default_partial_sort_divisor() -> usize {
    8
}
