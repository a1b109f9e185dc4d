// In: src/error.rs

//! This module defines the single, unified error type for the entire vexcol library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every variant here is a *recoverable* failure: the operation that produced it
//! has had no visible effect on its target column. Caller-contract violations
//! (a permutation shorter than the limit the caller asked for, a permutation
//! entry that is not a row) are not represented here; they panic.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ColumnError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    // =========================================================================
    // === Bound & Shape Errors (caller supplied bad input data)
    // =========================================================================
    #[error(
        "Parameters start = {start}, length = {length} are out of bound for a source of {source_len} rows"
    )]
    RangeError {
        start: usize,
        length: usize,
        source_len: usize,
    },

    #[error("Size of {what} ({actual}) doesn't match size of column ({expected})")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Row index {index} is out of bound for a column of {len} rows")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Run-end offsets decrease at row {row}")]
    InvalidOffsets { row: usize },

    // =========================================================================
    // === Domain Errors
    // =========================================================================
    #[error("Unsupported domain for this operation: {0}")]
    UnsupportedDomain(String),

    // =========================================================================
    // === Key / Arena Codec Errors
    // =========================================================================
    #[error("Buffer too short: needed {needed} bytes, {available} available")]
    BufferTooShort { needed: usize, available: usize },

    #[error("Key slot for row {row} overflows: needed {needed} bytes, {remaining} remaining")]
    KeySlotOverflow {
        row: usize,
        needed: usize,
        remaining: usize,
    },

    // =========================================================================
    // === Configuration Errors
    // =========================================================================
    #[error("Engine configuration error: {0}")]
    Config(String),
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<serde_json::Error> for ColumnError {
    fn from(err: serde_json::Error) -> Self {
        ColumnError::Config(err.to_string())
    }
}

impl ColumnError {
    /// Shorthand for the very common "auxiliary array has the wrong length" case.
    pub(crate) fn size_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        ColumnError::SizeMismatch {
            what,
            expected,
            actual,
        }
    }
}

/// Checks that an auxiliary per-row array matches the column's row count.
pub(crate) fn check_rows(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ColumnError::size_mismatch(what, expected, actual));
    }
    Ok(())
}
