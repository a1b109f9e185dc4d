//! This module is the home of the column kernels.
//!
//! Each submodule adds one family of bulk operations to `Column<T>` through an
//! inherent `impl` block, so callers only ever see methods on the column:
//!
//! * `filter`: mask-driven compaction, copying or in place.
//! * `sort`: permutations, applying them, and batch comparison.
//! * `replicate`: run-length expansion through cumulative offsets.
//! * `hash`: per-row streaming, xxHash64 and CRC32 hashing.
//! * `arena`: the key codec, per row and vectorized.

pub mod arena;
pub mod filter;
pub mod hash;
pub mod replicate;
pub mod sort;

pub use arena::{Arena, KeySlot};
pub use filter::FILTER_BLOCK_ROWS;
pub use sort::Permutation;
