//! Stateless scans over byte-per-row null maps.

/// Returns `true` if the row is flagged null.
#[inline]
pub fn is_null(null_map: &[u8], row: usize) -> bool {
    null_map[row] != 0
}

/// Returns `true` if any row in the map is flagged null.
pub fn contains_null(null_map: &[u8]) -> bool {
    null_map.iter().any(|&flag| flag != 0)
}

/// Number of rows flagged null.
pub fn count_nulls(null_map: &[u8]) -> usize {
    null_map.iter().filter(|&&flag| flag != 0).count()
}
