//! This module contains the per-row content hashing kernels used to route rows
//! into partitions and to build hash-table keys.
//!
//! Each kernel folds one column into a caller-owned accumulator array, one slot
//! per row, so a multi-column key is hashed by calling the kernel once per
//! column over the same array. Rows flagged in the optional null map keep their
//! accumulator untouched.

use std::hash::Hasher;

use crate::column::Column;
use crate::error::{check_rows, Result};
use crate::null_handling::is_null;
use crate::traits::NativeType;
use crate::types::{DomainTag, NativeKind, PackedDateTime};

//==================================================================================
// 1. Private Core Logic
//==================================================================================

/// Checks the optional null map against the row count.
fn check_null_map(null_map: Option<&[u8]>, rows: usize) -> Result<()> {
    match null_map {
        Some(map) => check_rows("null map", rows, map.len()),
        None => Ok(()),
    }
}

#[inline]
fn crc_update(crc: u32, bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new_with_initial(crc);
    hasher.update(bytes);
    hasher.finalize()
}

//==================================================================================
// 2. Public API
//==================================================================================

impl<T: NativeType> Column<T> {
    /// Feeds the raw bytes of row `row` into a streaming hasher.
    ///
    /// # Panics
    /// If `row >= len()`.
    pub fn update_hash_with_value<H: Hasher>(&self, row: usize, hasher: &mut H) {
        hasher.write(self.get_data_at(row));
    }

    /// For every non-null row, replaces `hashes[row]` with the xxHash64 of the
    /// row's bytes seeded by the previous `hashes[row]`.
    ///
    /// # Errors
    /// `SizeMismatch` if `hashes` or `null_map` does not have `len()` entries.
    pub fn update_hashes_with_value(&self, hashes: &mut [u64], null_map: Option<&[u8]>) -> Result<()> {
        check_rows("hashes", self.len(), hashes.len())?;
        check_null_map(null_map, self.len())?;

        for (row, hash) in hashes.iter_mut().enumerate() {
            if null_map.is_some_and(|map| is_null(map, row)) {
                continue;
            }
            *hash = xxhash_rust::xxh64::xxh64(self.get_data_at(row), *hash);
        }
        Ok(())
    }

    /// For every non-null row, replaces `crcs[row]` with the CRC32 of the row's
    /// bytes continued from the previous `crcs[row]`.
    ///
    /// When the column stores 64-bit signed integers and `domain` is `Date` or
    /// `DateTime`, each value is decoded as a [`PackedDateTime`] and its
    /// canonical text is hashed instead of its bits, so equal instants hash
    /// equally whatever their unused bits hold.
    ///
    /// # Errors
    /// `SizeMismatch` if `crcs` or `null_map` does not have `len()` entries.
    pub fn update_crcs_with_value(
        &self,
        crcs: &mut [u32],
        domain: DomainTag,
        null_map: Option<&[u8]>,
    ) -> Result<()> {
        check_rows("crcs", self.len(), crcs.len())?;
        check_null_map(null_map, self.len())?;

        let temporal =
            T::WIDTH == 8 && T::KIND == NativeKind::SignedInt && domain.is_packed_temporal();
        let mut text = String::with_capacity(19);

        for (row, crc) in crcs.iter_mut().enumerate() {
            if null_map.is_some_and(|map| is_null(map, row)) {
                continue;
            }
            let bytes = self.get_data_at(row);
            if temporal {
                let packed: i64 = bytemuck::pod_read_unaligned(bytes);
                PackedDateTime::from_i64(packed).render_into(&mut text);
                *crc = crc_update(*crc, text.as_bytes());
            } else {
                *crc = crc_update(*crc, bytes);
            }
        }
        Ok(())
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColumnError;
    use std::collections::hash_map::DefaultHasher;

    #[test]
    fn test_update_hash_with_value_matches_raw_bytes() {
        let col = Column::from_vec(vec![7u32, 9]);
        let mut a = DefaultHasher::new();
        col.update_hash_with_value(1, &mut a);

        let mut b = DefaultHasher::new();
        b.write(&9u32.to_ne_bytes());
        assert_eq!(a.finish(), b.finish());
    }

    #[test]
    fn test_xxh64_is_seeded_by_slot() {
        let col = Column::from_vec(vec![42i64, 42]);
        let mut hashes = vec![0u64, 1];
        col.update_hashes_with_value(&mut hashes, None).unwrap();

        let bytes = 42i64.to_ne_bytes();
        assert_eq!(hashes[0], xxhash_rust::xxh64::xxh64(&bytes, 0));
        assert_eq!(hashes[1], xxhash_rust::xxh64::xxh64(&bytes, 1));
        assert_ne!(hashes[0], hashes[1]);
    }

    #[test]
    fn test_null_rows_untouched() {
        let col = Column::from_vec(vec![1u8, 2, 3]);
        let null_map = [0u8, 1, 0];

        let mut hashes = vec![5u64; 3];
        col.update_hashes_with_value(&mut hashes, Some(&null_map)).unwrap();
        assert_eq!(hashes[1], 5);
        assert_ne!(hashes[0], 5);

        let mut crcs = vec![5u32; 3];
        col.update_crcs_with_value(&mut crcs, DomainTag::UInt8, Some(&null_map))
            .unwrap();
        assert_eq!(crcs[1], 5);
        assert_ne!(crcs[2], 5);
    }

    #[test]
    fn test_crc_matches_crc32fast() {
        let col = Column::from_vec(vec![-3i16]);
        let mut crcs = vec![0u32];
        col.update_crcs_with_value(&mut crcs, DomainTag::Int16, None).unwrap();
        assert_eq!(crcs[0], crc32fast::hash(&(-3i16).to_ne_bytes()));
    }

    #[test]
    fn test_temporal_crc_hashes_text() {
        let date = PackedDateTime::date(2021, 3, 7).to_i64();
        let col = Column::from_vec(vec![date]);

        let mut crcs = vec![0u32];
        col.update_crcs_with_value(&mut crcs, DomainTag::Date, None).unwrap();
        assert_eq!(crcs[0], crc32fast::hash(b"2021-03-07"));

        let mut raw = vec![0u32];
        col.update_crcs_with_value(&mut raw, DomainTag::Int64, None).unwrap();
        assert_eq!(raw[0], crc32fast::hash(&date.to_ne_bytes()));
    }

    #[test]
    fn test_equivalent_temporal_values_hash_equally() {
        let a = PackedDateTime::datetime(1999, 12, 31, 23, 59, 58).to_i64();
        let b = PackedDateTime::datetime(1999, 12, 31, 23, 59, 58).to_i64();
        let c = PackedDateTime::datetime(1999, 12, 31, 23, 59, 59).to_i64();
        let col = Column::from_vec(vec![a, b, c]);

        let mut crcs = vec![0u32; 3];
        col.update_crcs_with_value(&mut crcs, DomainTag::DateTime, None)
            .unwrap();
        assert_eq!(crcs[0], crcs[1]);
        assert_ne!(crcs[1], crcs[2]);
        assert_eq!(crcs[0], crc32fast::hash(b"1999-12-31 23:59:58"));
    }

    #[test]
    fn test_unknown_packed_kind_leaves_crc() {
        let col = Column::from_vec(vec![0i64]);
        let mut crcs = vec![77u32];
        col.update_crcs_with_value(&mut crcs, DomainTag::Date, None).unwrap();
        assert_eq!(crcs[0], 77);
    }

    #[test]
    fn test_hash_size_mismatch() {
        let col = Column::from_vec(vec![1.0f32, 2.0]);
        let mut hashes = vec![0u64; 3];
        assert!(matches!(
            col.update_hashes_with_value(&mut hashes, None),
            Err(ColumnError::SizeMismatch { what: "hashes", .. })
        ));

        let mut crcs = vec![0u32; 2];
        assert!(matches!(
            col.update_crcs_with_value(&mut crcs, DomainTag::Float32, Some(&[0])),
            Err(ColumnError::SizeMismatch { what: "null map", .. })
        ));
    }
}
