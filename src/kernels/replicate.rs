//! Run-length expansion through cumulative run-end offsets.
//!
//! Used by operators that fan one input row out to many output rows (e.g. the
//! probe side of a join emitting one row per match).

use crate::column::Column;
use crate::error::{check_rows, ColumnError, Result};
use crate::traits::NativeType;

impl<T: NativeType> Column<T> {
    /// Repeats row `i` `offsets[i] - offsets[i - 1]` times (with
    /// `offsets[-1] = 0`). The result has `offsets.last()` rows.
    ///
    /// # Errors
    /// `SizeMismatch` if `offsets.len() != len()`; `InvalidOffsets` if the
    /// offsets decrease anywhere.
    pub fn replicate(&self, offsets: &[u64]) -> Result<Column<T>> {
        check_rows("offsets", self.len(), offsets.len())?;
        if self.is_empty() {
            return Ok(self.empty_like(0));
        }

        let mut counts = Vec::with_capacity(offsets.len());
        let mut prev = 0u64;
        for (row, &end) in offsets.iter().enumerate() {
            let count = end
                .checked_sub(prev)
                .ok_or(ColumnError::InvalidOffsets { row })?;
            counts.push(count as usize);
            prev = end;
        }

        let mut result = self.empty_like(prev as usize);
        for (&value, count) in self.data.iter().zip(counts) {
            let new_len = result.data.len() + count;
            result.data.resize(new_len, value);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replicate_runs() {
        let col = Column::from_vec(vec![10i32, 20]);
        let out = col.replicate(&[2, 5]).unwrap();
        assert_eq!(out.data(), &[10, 10, 20, 20, 20]);
    }

    #[test]
    fn test_replicate_zero_length_runs() {
        let col = Column::from_vec(vec![1u8, 2, 3]);
        let out = col.replicate(&[0, 2, 2]).unwrap();
        assert_eq!(out.data(), &[2, 2]);
    }

    #[test]
    fn test_replicate_identity() {
        let col = Column::from_vec(vec![1.5f64, -2.0, 3.25]);
        let out = col.replicate(&[1, 2, 3]).unwrap();
        assert_eq!(out, col);
    }

    #[test]
    fn test_replicate_errors() {
        let col = Column::from_vec(vec![1u16, 2]);
        assert!(matches!(
            col.replicate(&[1]),
            Err(ColumnError::SizeMismatch { what: "offsets", .. })
        ));
        assert_eq!(
            col.replicate(&[3, 1]),
            Err(ColumnError::InvalidOffsets { row: 1 })
        );
    }

    #[test]
    fn test_replicate_empty() {
        let col = Column::<i64>::new();
        assert!(col.replicate(&[]).unwrap().is_empty());
    }
}
