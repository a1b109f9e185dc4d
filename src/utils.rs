//! Low-level byte helpers for the key codec.
//!
//! All conversions go through `bytemuck`; this crate contains no `unsafe` code.

use bytemuck::Pod;

use crate::error::ColumnError;

/// Reads one `T` from the front of `bytes`, regardless of alignment, and
/// returns it with the remaining bytes.
pub fn read_unaligned<T: Pod>(bytes: &[u8]) -> Result<(T, &[u8]), ColumnError> {
    let width = std::mem::size_of::<T>();
    if bytes.len() < width {
        return Err(ColumnError::BufferTooShort {
            needed: width,
            available: bytes.len(),
        });
    }
    let (head, tail) = bytes.split_at(width);
    Ok((bytemuck::pod_read_unaligned(head), tail))
}
