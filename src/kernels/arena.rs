//! This module contains the key codec: packing rows into byte sequences for
//! grouping and hash-join keys, and unpacking them back into columns.
//!
//! A value is always written as its `size_of::<T>()` native-order bytes with no
//! alignment. The nullable variants prefix each row with one flag byte (`0`
//! valid, `1` null) and write the value bytes only for valid rows.
//!
//! The vectorized entry points validate every precondition up front, so on
//! error neither the key slots nor the column have been touched.

use crate::column::Column;
use crate::error::{ColumnError, Result};
use crate::null_handling::is_null;
use crate::traits::NativeType;
use crate::utils::read_unaligned;

const NULL_FLAG: u8 = 1;
const VALID_FLAG: u8 = 0;

//==================================================================================
// 1. Arena and Key Slots
//==================================================================================

/// A bump-style byte store for serialized keys.
pub trait Arena {
    /// Appends `len` bytes to the arena and returns them for writing.
    fn alloc_continue(&mut self, len: usize) -> &mut [u8];
}

impl Arena for Vec<u8> {
    fn alloc_continue(&mut self, len: usize) -> &mut [u8] {
        let start = self.len();
        self.resize(start + len, 0);
        &mut self[start..]
    }
}

/// A caller-owned, pre-sized key buffer and the number of bytes already
/// written into it.
#[derive(Debug)]
pub struct KeySlot<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> KeySlot<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes still free at the end of the slot.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.len
    }

    /// The key written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Appends `bytes`. The caller has checked `remaining()`.
    #[inline]
    fn put(&mut self, bytes: &[u8]) {
        let end = self.len + bytes.len();
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
    }
}

//==================================================================================
// 2. Private Core Logic
//==================================================================================

fn check_num_rows(num_rows: usize, rows: usize) -> Result<()> {
    if num_rows > rows {
        return Err(ColumnError::size_mismatch("num_rows", rows, num_rows));
    }
    Ok(())
}

fn check_at_least(what: &'static str, needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        return Err(ColumnError::size_mismatch(what, needed, actual));
    }
    Ok(())
}

/// Bytes row `row` occupies in a nullable key.
#[inline]
fn nullable_width<T: NativeType>(null_map: &[u8], row: usize) -> usize {
    if is_null(null_map, row) {
        1
    } else {
        1 + T::WIDTH
    }
}

fn check_slot(keys: &[KeySlot<'_>], row: usize, needed: usize) -> Result<()> {
    let remaining = keys[row].remaining();
    if remaining < needed {
        return Err(ColumnError::KeySlotOverflow {
            row,
            needed,
            remaining,
        });
    }
    Ok(())
}

fn check_input(keys: &[&[u8]], row: usize, needed: usize) -> Result<()> {
    let available = keys[row].len();
    if available < needed {
        return Err(ColumnError::BufferTooShort { needed, available });
    }
    Ok(())
}

//==================================================================================
// 3. Public API
//==================================================================================

impl<T: NativeType> Column<T> {
    /// Appends row `row`'s bytes to `arena` and returns the written bytes.
    ///
    /// # Panics
    /// If `row >= len()`.
    pub fn serialize_value_into_arena<'a, A: Arena>(&self, row: usize, arena: &'a mut A) -> &'a [u8] {
        let bytes = self.get_data_at(row);
        let dest = arena.alloc_continue(bytes.len());
        dest.copy_from_slice(bytes);
        dest
    }

    /// Reads one value from the front of `pos`, appends it, and returns the
    /// bytes after it.
    ///
    /// # Errors
    /// `BufferTooShort` if `pos` holds fewer than `size_of::<T>()` bytes; the
    /// column is unchanged.
    pub fn deserialize_and_insert_from_arena<'a>(&mut self, pos: &'a [u8]) -> Result<&'a [u8]> {
        let (value, rest) = read_unaligned::<T>(pos)?;
        self.data.push(value);
        Ok(rest)
    }

    /// Upper bound on the bytes one row occupies when serialized.
    pub fn get_max_row_byte_size(&self) -> usize {
        T::WIDTH
    }

    /// Appends the bytes of rows `0..num_rows` to `keys[0..num_rows]`.
    ///
    /// # Errors
    /// `SizeMismatch` if `num_rows > len()` or `keys.len() < num_rows`;
    /// `KeySlotOverflow` if any slot lacks room.
    pub fn serialize_vec(&self, keys: &mut [KeySlot<'_>], num_rows: usize) -> Result<()> {
        check_num_rows(num_rows, self.len())?;
        check_at_least("keys", num_rows, keys.len())?;
        for row in 0..num_rows {
            check_slot(keys, row, T::WIDTH)?;
        }

        for (row, key) in keys[..num_rows].iter_mut().enumerate() {
            key.put(self.get_data_at(row));
        }
        Ok(())
    }

    /// Like [`Column::serialize_vec`], but each row gets a flag byte first and
    /// null rows carry no value bytes.
    ///
    /// # Errors
    /// As `serialize_vec`, plus `SizeMismatch` if `null_map.len() < num_rows`.
    pub fn serialize_vec_with_null_map(
        &self,
        keys: &mut [KeySlot<'_>],
        num_rows: usize,
        null_map: &[u8],
    ) -> Result<()> {
        check_num_rows(num_rows, self.len())?;
        check_at_least("keys", num_rows, keys.len())?;
        check_at_least("null map", num_rows, null_map.len())?;
        for row in 0..num_rows {
            check_slot(keys, row, nullable_width::<T>(null_map, row))?;
        }

        for (row, key) in keys[..num_rows].iter_mut().enumerate() {
            if is_null(null_map, row) {
                key.put(&[NULL_FLAG]);
            } else {
                key.put(&[VALID_FLAG]);
                key.put(self.get_data_at(row));
            }
        }
        Ok(())
    }

    /// Reads one value from the front of each of `keys[0..num_rows]`, appends
    /// them in order, and advances each cursor past the consumed bytes.
    ///
    /// # Errors
    /// `SizeMismatch` if `keys.len() < num_rows`; `BufferTooShort` if any
    /// cursor holds fewer than `size_of::<T>()` bytes.
    pub fn deserialize_vec(&mut self, keys: &mut [&[u8]], num_rows: usize) -> Result<()> {
        check_at_least("keys", num_rows, keys.len())?;
        for row in 0..num_rows {
            check_input(keys, row, T::WIDTH)?;
        }

        self.data.reserve(num_rows);
        for key in keys[..num_rows].iter_mut() {
            let (value, rest) = read_unaligned::<T>(*key)?;
            self.data.push(value);
            *key = rest;
        }
        Ok(())
    }

    /// Appends `num_rows` values whose nullness is given by `null_map`. Null
    /// rows append the zero value and leave their cursor where it is; valid
    /// rows consume `size_of::<T>()` bytes.
    ///
    /// The cursors hold bare values here: the flag bytes written by
    /// [`Column::serialize_vec_with_null_map`] are consumed by the caller,
    /// which reads them to build `null_map`.
    ///
    /// # Errors
    /// `SizeMismatch` if `keys` or `null_map` has fewer than `num_rows`
    /// entries; `BufferTooShort` if a valid row's cursor is short.
    pub fn deserialize_vec_with_null_map(
        &mut self,
        keys: &mut [&[u8]],
        num_rows: usize,
        null_map: &[u8],
    ) -> Result<()> {
        check_at_least("keys", num_rows, keys.len())?;
        check_at_least("null map", num_rows, null_map.len())?;
        for row in 0..num_rows {
            if !is_null(null_map, row) {
                check_input(keys, row, T::WIDTH)?;
            }
        }

        self.data.reserve(num_rows);
        for (row, key) in keys[..num_rows].iter_mut().enumerate() {
            if is_null(null_map, row) {
                self.data.push(T::zero());
            } else {
                let (value, rest) = read_unaligned::<T>(*key)?;
                self.data.push(value);
                *key = rest;
            }
        }
        Ok(())
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(bufs: &mut [Vec<u8>]) -> Vec<KeySlot<'_>> {
        bufs.iter_mut().map(|b| KeySlot::new(b.as_mut_slice())).collect()
    }

    #[test]
    fn test_arena_single_row_round_trip() {
        let col = Column::from_vec(vec![-1i32, 0x0102_0304]);
        let mut arena: Vec<u8> = Vec::new();
        let written = col.serialize_value_into_arena(1, &mut arena).to_vec();
        assert_eq!(written, 0x0102_0304i32.to_ne_bytes());
        col.serialize_value_into_arena(0, &mut arena);
        assert_eq!(arena.len(), 8);

        let mut out = Column::<i32>::new();
        let rest = out.deserialize_and_insert_from_arena(&arena).unwrap();
        let rest = out.deserialize_and_insert_from_arena(rest).unwrap();
        assert!(rest.is_empty());
        assert_eq!(out.data(), &[0x0102_0304, -1]);
        assert_eq!(col.get_max_row_byte_size(), 4);
    }

    #[test]
    fn test_deserialize_short_buffer() {
        let mut col = Column::<u64>::new();
        let err = col.deserialize_and_insert_from_arena(&[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            ColumnError::BufferTooShort {
                needed: 8,
                available: 3
            }
        );
        assert!(col.is_empty());
    }

    #[test]
    fn test_serialize_vec_with_null_map_layout() {
        let col = Column::from_vec(vec![7u64, 0]);
        let mut bufs = vec![vec![0u8; 16], vec![0u8; 16]];
        let mut keys = slots(&mut bufs);
        col.serialize_vec_with_null_map(&mut keys, 2, &[0, 1]).unwrap();

        let mut expected = vec![0u8];
        expected.extend_from_slice(&7u64.to_ne_bytes());
        assert_eq!(keys[0].as_bytes(), expected.as_slice());
        assert_eq!(keys[0].len(), 9);
        assert_eq!(keys[1].as_bytes(), &[1]);
        assert_eq!(keys[1].len(), 1);
    }

    #[test]
    fn test_vec_round_trip_with_null_map() {
        let col = Column::from_vec(vec![1.5f32, f32::NAN, -0.0, f32::INFINITY]);
        let null_map = [0u8, 0, 1, 0];
        let mut bufs = vec![vec![0u8; 5]; 4];
        let mut keys = slots(&mut bufs);
        col.serialize_vec_with_null_map(&mut keys, 4, &null_map).unwrap();

        // Strip the flag bytes the way a key reader does.
        let mut flags = Vec::new();
        let mut cursors: Vec<&[u8]> = keys
            .iter()
            .map(|k| {
                let (flag, rest) = k.as_bytes().split_at(1);
                flags.push(flag[0]);
                rest
            })
            .collect();
        assert_eq!(flags, null_map);

        let mut out = Column::<f32>::new();
        out.deserialize_vec_with_null_map(&mut cursors, 4, &flags).unwrap();
        assert!(cursors.iter().all(|c| c.is_empty()));
        assert_eq!(out.data()[0], 1.5);
        assert!(out.data()[1].is_nan());
        assert_eq!(out.data()[2].to_bits(), 0);
        assert_eq!(out.data()[3], f32::INFINITY);
    }

    #[test]
    fn test_serialize_vec_round_trip() {
        let col = Column::from_vec(vec![i128::MIN, 0, i128::MAX]);
        let mut bufs = vec![vec![0u8; 16]; 3];
        let mut keys = slots(&mut bufs);
        col.serialize_vec(&mut keys, 3).unwrap();

        let mut cursors: Vec<&[u8]> = keys.iter().map(|k| k.as_bytes()).collect();
        let mut out = Column::<i128>::new();
        out.deserialize_vec(&mut cursors, 3).unwrap();
        assert_eq!(out, col);
    }

    #[test]
    fn test_serialize_vec_prefix_only() {
        let col = Column::from_vec(vec![1u8, 2, 3]);
        let mut bufs = vec![vec![0u8; 1]; 2];
        let mut keys = slots(&mut bufs);
        col.serialize_vec(&mut keys, 2).unwrap();
        assert_eq!(keys[0].as_bytes(), &[1]);
        assert_eq!(keys[1].as_bytes(), &[2]);
    }

    #[test]
    fn test_serialize_vec_overflow_is_all_or_nothing() {
        let col = Column::from_vec(vec![1u32, 2]);
        let mut bufs = vec![vec![0u8; 4], vec![0u8; 3]];
        let mut keys = slots(&mut bufs);
        let err = col.serialize_vec(&mut keys, 2).unwrap_err();
        assert_eq!(
            err,
            ColumnError::KeySlotOverflow {
                row: 1,
                needed: 4,
                remaining: 3
            }
        );
        assert!(keys.iter().all(|k| k.is_empty()));
    }

    #[test]
    fn test_serialize_vec_size_checks() {
        let col = Column::from_vec(vec![1u16]);
        let mut bufs = vec![vec![0u8; 8]; 2];
        let mut keys = slots(&mut bufs);
        assert!(matches!(
            col.serialize_vec(&mut keys, 2),
            Err(ColumnError::SizeMismatch { what: "num_rows", .. })
        ));
        assert!(matches!(
            col.serialize_vec_with_null_map(&mut keys, 1, &[]),
            Err(ColumnError::SizeMismatch { what: "null map", .. })
        ));
    }

    #[test]
    fn test_deserialize_vec_short_cursor_is_all_or_nothing() {
        let a = 5u32.to_ne_bytes();
        let b = [1u8, 2];
        let mut cursors: Vec<&[u8]> = vec![a.as_slice(), b.as_slice()];
        let mut col = Column::<u32>::new();
        let err = col.deserialize_vec(&mut cursors, 2).unwrap_err();
        assert_eq!(
            err,
            ColumnError::BufferTooShort {
                needed: 4,
                available: 2
            }
        );
        assert!(col.is_empty());
        assert_eq!(cursors[0].len(), 4);
    }

    #[test]
    fn test_deserialize_null_rows_consume_nothing() {
        let tail = [9u8, 9];
        let mut cursors: Vec<&[u8]> = vec![&tail[..0], &tail[..]];
        let mut col = Column::<i16>::new();
        col.deserialize_vec_with_null_map(&mut cursors, 2, &[1, 1]).unwrap();
        assert_eq!(col.data(), &[0, 0]);
        assert_eq!(cursors[1], &[9, 9]);
    }

    #[test]
    fn test_key_slot_accessors() {
        let mut buf = [0u8; 4];
        let mut slot = KeySlot::new(&mut buf);
        assert!(slot.is_empty());
        slot.put(&[1, 2]);
        assert_eq!(slot.len(), 2);
        assert_eq!(slot.remaining(), 2);
        assert_eq!(slot.as_bytes(), &[1, 2]);
    }
}
