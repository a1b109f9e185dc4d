//! This module contains the permutation engine: computing row orderings,
//! applying them, and the batch three-way comparison used by multi-key sorts.
//!
//! Orderings are expressed as permutations of row indices; the column's own
//! storage is never moved by `get_permutation`.

use std::cmp::Ordering;

use crate::column::Column;
use crate::config::EngineConfig;
use crate::error::{check_rows, Result};
use crate::traits::NativeType;
use crate::types::{NanHint, SortDirection};

/// A reordering of row indices.
pub type Permutation = Vec<usize>;

//==================================================================================
// 1. Private Core Logic
//==================================================================================

/// Sorts `perm` by the values it points at. With `limit > 0` only the first
/// `limit` positions are guaranteed to be in order.
fn sort_indices<T: NativeType>(
    data: &[T],
    perm: &mut [usize],
    reverse: bool,
    limit: usize,
    nan_hint: NanHint,
) {
    let cmp = |a: &usize, b: &usize| -> Ordering {
        let ord = T::compare(data[*a], data[*b], nan_hint);
        if reverse {
            ord.reverse()
        } else {
            ord
        }
    };

    if limit > 0 && limit < perm.len() {
        perm.select_nth_unstable_by(limit - 1, cmp);
        perm[..limit].sort_unstable_by(cmp);
    } else {
        perm.sort_unstable_by(cmp);
    }
}

/// First position at or after `from` holding a zero byte (`want_zero`) or a
/// non-zero byte (`!want_zero`); `bytes.len()` if there is none.
#[inline]
fn find_byte(bytes: &[u8], from: usize, want_zero: bool) -> usize {
    if from >= bytes.len() {
        return bytes.len();
    }
    bytes[from..]
        .iter()
        .position(|&b| (b == 0) == want_zero)
        .map_or(bytes.len(), |pos| from + pos)
}

//==================================================================================
// 2. Public API
//==================================================================================

impl<T: NativeType> Column<T> {
    /// Computes the permutation that orders the rows, using the default
    /// [`EngineConfig`].
    ///
    /// See [`Column::get_permutation_with`].
    pub fn get_permutation(&self, reverse: bool, limit: usize, nan_hint: NanHint) -> Permutation {
        self.get_permutation_with(&EngineConfig::default(), reverse, limit, nan_hint)
    }

    /// Computes the permutation that orders the rows ascending (or descending
    /// when `reverse`), with NaNs placed by `nan_hint`.
    ///
    /// When `limit` is non-zero and small relative to the row count (see
    /// [`EngineConfig::use_partial_sort`]), only the first `limit` positions
    /// are sorted; the rest hold the remaining rows in unspecified order.
    /// Otherwise every position is sorted. Ties are broken arbitrarily.
    pub fn get_permutation_with(
        &self,
        config: &EngineConfig,
        reverse: bool,
        limit: usize,
        nan_hint: NanHint,
    ) -> Permutation {
        let rows = self.len();
        let mut perm: Permutation = (0..rows).collect();
        if rows == 0 {
            return perm;
        }

        let partial = config.use_partial_sort(limit, rows);
        let effective_limit = if partial { limit } else { 0 };
        sort_indices(&self.data, &mut perm, reverse, effective_limit, nan_hint);

        log_metric!(
            "event" = "get_permutation",
            "rows" = rows,
            "limit" = limit,
            "strategy" = if partial { "partial" } else { "full" },
            "reverse" = reverse,
        );
        perm
    }

    /// Gathers rows in permutation order into a new column.
    ///
    /// `limit == 0` takes every row; otherwise `min(limit, len())` rows.
    ///
    /// # Panics
    /// If `perm` is shorter than the number of rows requested, or holds an
    /// index that is not a row. Both mean the caller built the permutation
    /// wrong, which no input data can cause.
    pub fn permute(&self, perm: &[usize], limit: usize) -> Column<T> {
        let rows = self.len();
        let limit = if limit == 0 { rows } else { limit.min(rows) };

        assert!(
            perm.len() >= limit,
            "Size of permutation ({}) is less than required ({})",
            perm.len(),
            limit
        );

        let data = perm[..limit].iter().map(|&row| self.data[row]).collect();
        self.derive(data)
    }

    /// Compares every not-yet-settled row against `rhs_value`.
    ///
    /// A row is unsettled while `cmp_res[row] == 0`. For each unsettled row,
    /// with `res` the three-way comparison of the row's value to `rhs_value`:
    ///
    /// * `cmp_res[row]` becomes `1` when `res != 0` (this key decided the order),
    /// * `move_filter[row]` becomes `1` when `res * direction < 0`, i.e. the row
    ///   must be placed before the reference row in the requested direction.
    ///
    /// Settled rows are skipped run by run and their bytes are left untouched.
    ///
    /// # Errors
    /// `SizeMismatch` if either buffer's length differs from `len()`.
    pub fn compare_internal(
        &self,
        rhs_value: T,
        direction: SortDirection,
        nan_hint: NanHint,
        cmp_res: &mut [u8],
        move_filter: &mut [u8],
    ) -> Result<()> {
        let rows = self.len();
        check_rows("compare result", rows, cmp_res.len())?;
        check_rows("move filter", rows, move_filter.len())?;

        let sign = direction.sign();
        let mut begin = find_byte(cmp_res, 0, true);
        while begin < rows {
            let end = find_byte(cmp_res, begin + 1, false);
            for row in begin..end {
                let res = match T::compare(self.data[row], rhs_value, nan_hint) {
                    Ordering::Less => -1,
                    Ordering::Equal => 0,
                    Ordering::Greater => 1,
                };
                cmp_res[row] = u8::from(res != 0);
                move_filter[row] = u8::from(res * sign < 0);
            }
            begin = find_byte(cmp_res, end + 1, true);
        }
        Ok(())
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
