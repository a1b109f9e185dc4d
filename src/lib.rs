//! This file is the root of the `vexcol` crate: the fixed-width column core of
//! a vectorized analytic engine.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of the library (`column`, `kernels`, etc.)
//!     so the Rust compiler knows they exist.
//! 2.  Re-exporting the types callers need to drive a column, so they can
//!     `use vexcol::{Column, NanHint}` without knowing the module layout.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
pub mod observability; // Make macros available throughout the crate

pub mod column;
pub mod config;
pub mod error;
pub mod kernels;
pub mod null_handling;
pub mod traits;
pub mod types;
pub mod utils;

#[doc(hidden)]
pub use log as __log;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use column::Column;
pub use config::EngineConfig;
pub use error::{ColumnError, Result};
pub use kernels::{Arena, KeySlot, Permutation, FILTER_BLOCK_ROWS};
pub use traits::NativeType;
pub use types::{DomainTag, NanHint, NativeKind, PackedDateTime, PackedKind, SortDirection};
