//! This module defines the canonical, type-safe representation of the logical
//! element domains a fixed-width column can hold.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ColumnError;

/// How the bits of a native element are interpreted arithmetically.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NativeKind {
    SignedInt,
    UnsignedInt,
    Float,
}

/// The logical domain of a column.
///
/// Several domains share one physical representation: `Boolean` is stored as a
/// `u8`, `Ipv4` as a `u32`, `Ipv6` as a `u128`, and the legacy packed `Date` and
/// `DateTime` encodings as an `i64`. The tag only changes behavior where the
/// domain's canonical form differs from its bits (checksum hashing of packed
/// temporal values); everywhere else the raw bit pattern is authoritative.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DomainTag {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    Float32,
    Float64,
    Ipv4,
    Ipv6,
    Date,
    DateTime,
}

impl DomainTag {
    /// Width in bytes of one element of this domain.
    pub fn width(&self) -> usize {
        match self {
            Self::Boolean | Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 | Self::Ipv4 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 | Self::Date | Self::DateTime => 8,
            Self::Int128 | Self::UInt128 | Self::Ipv6 => 16,
        }
    }

    /// The arithmetic interpretation of the physical representation.
    pub fn native_kind(&self) -> NativeKind {
        match self {
            Self::Int8
            | Self::Int16
            | Self::Int32
            | Self::Int64
            | Self::Int128
            | Self::Date
            | Self::DateTime => NativeKind::SignedInt,
            Self::Float32 | Self::Float64 => NativeKind::Float,
            Self::Boolean
            | Self::UInt8
            | Self::UInt16
            | Self::UInt32
            | Self::UInt64
            | Self::UInt128
            | Self::Ipv4
            | Self::Ipv6 => NativeKind::UnsignedInt,
        }
    }

    /// Returns `true` if the bits encode a packed legacy date or date-time.
    pub fn is_packed_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    /// Checks that this domain can be stored in a column whose native element
    /// has the given width and kind.
    pub fn check_storage(&self, width: usize, kind: NativeKind) -> Result<(), ColumnError> {
        if self.width() != width || self.native_kind() != kind {
            return Err(ColumnError::UnsupportedDomain(format!(
                "{} ({} bytes, {:?}) cannot be stored in a {}-byte {:?} column",
                self,
                self.width(),
                self.native_kind(),
                width,
                kind
            )));
        }
        Ok(())
    }
}

/// Provides the canonical string representation for a `DomainTag`.
impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
