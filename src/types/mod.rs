//! This module defines the core, strongly-typed data representations used
//! throughout the column core.
//!
//! It includes the canonical `DomainTag` enum naming each logical element
//! domain, the ordering directives used by the sort kernels, and the decoder for
//! packed temporal values.

pub mod domain;
pub mod order;
pub mod packed_datetime;

// Re-export the main type(s) for easier access.
pub use domain::{DomainTag, NativeKind};
pub use order::{NanHint, SortDirection};
pub use packed_datetime::{PackedDateTime, PackedKind};
