//! This module serves as the public API for all null-map handling in the
//! column core.
//!
//! The core never owns nullability. A wrapping nullable column supplies a
//! byte-per-row null map (`0` = value present, non-zero = null) wherever a
//! kernel needs to be null-aware, and the kernels treat it as read-only input.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Scanning helpers over caller-owned null maps.
pub mod null_map;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================

pub use null_map::{contains_null, count_nulls, is_null};
