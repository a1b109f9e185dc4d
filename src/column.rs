//! The fixed-width column container.
//!
//! A `Column<T>` owns one contiguous `Vec<T>` of a single native domain plus a
//! `DomainTag` naming the logical domain those bits represent. Row `i` is
//! element `i`; there is no padding, no header and no gaps. The raw byte view
//! returned by [`Column::get_raw_data`] is the only layout contract external
//! format converters may rely on.
//!
//! Every mutating operation validates all of its preconditions before it
//! grows the buffer, so a returned error means the column is unchanged.
//! Cloning always deep-copies the storage.

use crate::error::{check_rows, ColumnError, Result};
use crate::null_handling;
use crate::traits::NativeType;
use crate::types::DomainTag;

#[derive(Debug, Clone, PartialEq)]
pub struct Column<T: NativeType> {
    pub(crate) data: Vec<T>,
    pub(crate) domain: DomainTag,
}

impl<T: NativeType> Default for Column<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NativeType> From<Vec<T>> for Column<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: NativeType> FromIterator<T> for Column<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: NativeType> Column<T> {
    //==============================================================================
    // 1. Construction
    //==============================================================================

    /// An empty column tagged with the native type's default domain.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            domain: T::DEFAULT_DOMAIN,
        }
    }

    /// A column of `len` rows, each holding the zero bit pattern.
    pub fn with_len(len: usize) -> Self {
        Self {
            data: vec![T::zero(); len],
            domain: T::DEFAULT_DOMAIN,
        }
    }

    /// An empty column with room for `capacity` rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            domain: T::DEFAULT_DOMAIN,
        }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data,
            domain: T::DEFAULT_DOMAIN,
        }
    }

    pub fn from_slice(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Re-tags the column with a logical domain sharing `T`'s representation.
    ///
    /// # Errors
    /// `UnsupportedDomain` if the domain's width or kind differs from `T`'s.
    pub fn with_domain(mut self, domain: DomainTag) -> Result<Self> {
        domain.check_storage(T::WIDTH, T::KIND)?;
        self.domain = domain;
        Ok(self)
    }

    /// An empty column with the same domain tag as `self`.
    pub(crate) fn empty_like(&self, capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            domain: self.domain,
        }
    }

    /// Wraps `data` with the same domain tag as `self`.
    pub(crate) fn derive(&self, data: Vec<T>) -> Self {
        Self {
            data,
            domain: self.domain,
        }
    }

    //==============================================================================
    // 2. Accessors
    //==============================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    #[inline]
    pub fn domain(&self) -> DomainTag {
        self.domain
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable element access. The row count cannot change through this view.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<T> {
        self.data.get(row).copied()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Bytes occupied by the live rows.
    pub fn byte_size(&self) -> usize {
        self.data.len() * T::WIDTH
    }

    /// Bytes reserved by the buffer, live or not.
    pub fn allocated_bytes(&self) -> usize {
        self.data.capacity() * T::WIDTH
    }

    /// All elements as packed native-order bytes, `len() * size_of::<T>()` long.
    pub fn get_raw_data(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// The raw bytes of exactly one element.
    ///
    /// # Panics
    /// If `row >= len()`, like slice indexing.
    pub fn get_data_at(&self, row: usize) -> &[u8] {
        bytemuck::bytes_of(&self.data[row])
    }

    //==============================================================================
    // 3. Resizing
    //==============================================================================

    /// Truncates or grows to `len` rows. New rows hold the zero bit pattern;
    /// truncation keeps the allocation.
    pub fn resize(&mut self, len: usize) {
        self.data.resize(len, T::zero());
    }

    /// Reserves room for at least `additional` more rows.
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// A new column of `len` rows: the first `min(self.len(), len)` rows are a
    /// verbatim copy, the rest hold the zero bit pattern.
    ///
    /// For packed temporal domains the zero pattern is not a valid instant; it
    /// is carried through as-is.
    pub fn clone_resized(&self, len: usize) -> Self {
        let count = self.data.len().min(len);
        let mut data = Vec::with_capacity(len);
        data.extend_from_slice(&self.data[..count]);
        data.resize(len, T::zero());
        self.derive(data)
    }

    /// Removes up to `n` trailing rows.
    pub fn pop_back(&mut self, n: usize) {
        let new_len = self.data.len().saturating_sub(n);
        self.data.truncate(new_len);
    }

    //==============================================================================
    // 4. Bulk Insertion
    //==============================================================================

    #[inline]
    pub fn insert_value(&mut self, value: T) {
        self.data.push(value);
    }

    /// Appends the zero value.
    #[inline]
    pub fn insert_default(&mut self) {
        self.data.push(T::zero());
    }

    /// Appends `count` zero values.
    pub fn insert_many_defaults(&mut self, count: usize) {
        let new_len = self.data.len() + count;
        self.data.resize(new_len, T::zero());
    }

    /// Appends `src[start..start + length]` verbatim.
    ///
    /// # Errors
    /// `RangeError` if `start + length` overflows or exceeds `src.len()`.
    pub fn insert_range_from(&mut self, src: &Column<T>, start: usize, length: usize) -> Result<()> {
        let end = match start.checked_add(length) {
            Some(end) if end <= src.len() => end,
            _ => {
                return Err(ColumnError::RangeError {
                    start,
                    length,
                    source_len: src.len(),
                })
            }
        };
        self.data.extend_from_slice(&src.data[start..end]);
        Ok(())
    }

    /// Appends `src[indices[i]]` for each `i`, in order. Indices may repeat.
    ///
    /// # Errors
    /// `IndexOutOfBounds` for the first index that is not a row of `src`.
    pub fn insert_indices_from(&mut self, src: &Column<T>, indices: &[u32]) -> Result<()> {
        let src_len = src.len();
        if let Some(&bad) = indices.iter().find(|&&idx| idx as usize >= src_len) {
            return Err(ColumnError::IndexOutOfBounds {
                index: bad as usize,
                len: src_len,
            });
        }
        self.data.reserve(indices.len());
        self.data.extend(indices.iter().map(|&idx| src.data[idx as usize]));
        Ok(())
    }

    /// Appends `length` copies of `src[position]`.
    ///
    /// # Errors
    /// `IndexOutOfBounds` if `position` is not a row of `src`.
    pub fn insert_many_from(&mut self, src: &Column<T>, position: usize, length: usize) -> Result<()> {
        let value = src.get(position).ok_or(ColumnError::IndexOutOfBounds {
            index: position,
            len: src.len(),
        })?;
        let new_len = self.data.len() + length;
        self.data.resize(new_len, value);
        Ok(())
    }

    //==============================================================================
    // 5. Null Data Normalization
    //==============================================================================

    /// Resets every row flagged null to the zero value, so that hidden values
    /// under nulls cannot influence later hashing or comparison.
    ///
    /// # Errors
    /// `SizeMismatch` if `null_map.len() != len()`.
    pub fn replace_column_null_data(&mut self, null_map: &[u8]) -> Result<()> {
        check_rows("null map", self.data.len(), null_map.len())?;
        if !null_handling::contains_null(null_map) {
            return Ok(());
        }
        for (value, &flag) in self.data.iter_mut().zip(null_map) {
            if flag != 0 {
                *value = T::zero();
            }
        }
        Ok(())
    }
}
