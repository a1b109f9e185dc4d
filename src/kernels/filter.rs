//! This module contains the mask-driven compaction (filter) kernels.
//!
//! Both entry points share one block-skipping scan. Rows are processed in
//! blocks of 64; each block's byte mask is folded into a `u64` bitmask, then:
//!
//! * an all-zero block is skipped without touching the data,
//! * an all-one block is bulk-copied,
//! * a mixed block copies only the rows whose bits are set.
//!
//! The trailing partial block is handled row by row. Runs of consecutive rows
//! tend to pass or fail a predicate together, which is what makes the block
//! checks pay off; the result is the same as a plain row-by-row scan.

use bitvec::prelude::*;

use crate::column::Column;
use crate::error::{check_rows, Result};
use crate::traits::NativeType;

/// Rows per mask block; one bit per row in a `u64`.
pub const FILTER_BLOCK_ROWS: usize = 64;

//==================================================================================
// 1. Private Core Logic
//==================================================================================

/// Per-call block statistics, reported through `log_metric!`.
#[derive(Debug, Default, Clone, Copy)]
struct BlockStats {
    skipped: usize,
    copied: usize,
    mixed: usize,
}

/// Folds up to 64 mask bytes into a bitmask, bit `i` set when `mask[i] != 0`.
#[inline]
fn block_bits(mask: &[u8]) -> u64 {
    debug_assert!(mask.len() <= FILTER_BLOCK_ROWS);
    mask.iter()
        .enumerate()
        .fold(0u64, |bits, (i, &flag)| bits | (u64::from(flag != 0) << i))
}

/// Appends every row of `data` whose mask byte is non-zero to `out`.
fn filter_into<T: Copy>(data: &[T], mask: &[u8], out: &mut Vec<T>) -> BlockStats {
    let mut stats = BlockStats::default();

    let data_blocks = data.chunks_exact(FILTER_BLOCK_ROWS);
    let mask_blocks = mask.chunks_exact(FILTER_BLOCK_ROWS);
    let data_tail = data_blocks.remainder();
    let mask_tail = mask_blocks.remainder();

    for (data_block, mask_block) in data_blocks.zip(mask_blocks) {
        let bits = block_bits(mask_block);
        if bits == 0 {
            stats.skipped += 1;
        } else if bits == u64::MAX {
            out.extend_from_slice(data_block);
            stats.copied += 1;
        } else {
            out.extend(bits.view_bits::<Lsb0>().iter_ones().map(|idx| data_block[idx]));
            stats.mixed += 1;
        }
    }

    out.extend(
        data_tail
            .iter()
            .zip(mask_tail)
            .filter(|(_, &keep)| keep != 0)
            .map(|(&value, _)| value),
    );

    stats
}

/// Compacts `data` so its prefix holds the kept rows in order; returns the
/// number of kept rows. The write cursor never passes the read cursor, so the
/// compaction is safe to do over the same buffer.
fn filter_in_place_slice<T: Copy>(data: &mut [T], mask: &[u8]) -> (usize, BlockStats) {
    let mut stats = BlockStats::default();
    let mut write = 0usize;

    let full_blocks = data.len() / FILTER_BLOCK_ROWS;
    for block in 0..full_blocks {
        let base = block * FILTER_BLOCK_ROWS;
        let bits = block_bits(&mask[base..base + FILTER_BLOCK_ROWS]);
        if bits == 0 {
            stats.skipped += 1;
        } else if bits == u64::MAX {
            data.copy_within(base..base + FILTER_BLOCK_ROWS, write);
            write += FILTER_BLOCK_ROWS;
            stats.copied += 1;
        } else {
            for idx in bits.view_bits::<Lsb0>().iter_ones() {
                data[write] = data[base + idx];
                write += 1;
            }
            stats.mixed += 1;
        }
    }

    for row in full_blocks * FILTER_BLOCK_ROWS..data.len() {
        if mask[row] != 0 {
            data[write] = data[row];
            write += 1;
        }
    }

    (write, stats)
}

//==================================================================================
// 2. Public API
//==================================================================================

impl<T: NativeType> Column<T> {
    /// Returns a new column holding only the rows whose mask byte is non-zero,
    /// in their original order. `size_hint` pre-sizes the result (defaults to
    /// the full row count).
    ///
    /// # Errors
    /// `SizeMismatch` if `mask.len() != len()`.
    pub fn filter(&self, mask: &[u8], size_hint: Option<usize>) -> Result<Column<T>> {
        check_rows("filter", self.len(), mask.len())?;

        let capacity = size_hint.filter(|&hint| hint > 0).unwrap_or(self.len());
        let mut result = self.empty_like(capacity);
        let stats = filter_into(&self.data, mask, &mut result.data);

        log_metric!(
            "event" = "filter",
            "rows" = self.len(),
            "kept" = result.len(),
            "blocks_skipped" = stats.skipped,
            "blocks_copied" = stats.copied,
            "blocks_mixed" = stats.mixed,
        );
        Ok(result)
    }

    /// Compacts the column in place to the rows whose mask byte is non-zero and
    /// returns the new row count. The allocation is kept.
    ///
    /// # Errors
    /// `SizeMismatch` if `mask.len() != len()`; the column is left unchanged.
    pub fn filter_in_place(&mut self, mask: &[u8]) -> Result<usize> {
        check_rows("filter", self.len(), mask.len())?;

        let rows = self.len();
        let (new_len, stats) = filter_in_place_slice(&mut self.data, mask);
        self.data.truncate(new_len);

        log_metric!(
            "event" = "filter_in_place",
            "rows" = rows,
            "kept" = new_len,
            "blocks_skipped" = stats.skipped,
            "blocks_copied" = stats.copied,
            "blocks_mixed" = stats.mixed,
        );
        Ok(new_len)
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
