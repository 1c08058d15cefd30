//! Compressed sparse row storage for ragged per-entity lists.
//!
//! Every ragged relation in the mesh (entity→vertex lists, derived incidence
//! maps, per-face weight vectors) is stored as one contiguous value buffer
//! plus a per-row offset table. Row `i` occupies `values[offsets[i]..offsets[i+1]]`.
//! This replaces fixed-width padded arrays: no wasted slots and no ambiguity
//! between "unused slot" and "valid index 0".

use std::ops::Range;

/// Immutable ragged rows backed by a CSR (offsets + flat values) pair.
///
/// # Invariants
/// - `offsets` is non-empty, starts at 0, is non-decreasing, and its last
///   entry equals `values.len()`.
/// - Row count is `offsets.len() - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Csr<T> {
    offsets: Vec<u32>,
    values: Vec<T>,
}

impl<T> Default for Csr<T> {
    fn default() -> Self {
        Self {
            offsets: vec![0],
            values: Vec::new(),
        }
    }
}

impl<T> Csr<T> {
    /// Assemble from raw CSR arrays.
    ///
    /// Used by builders that compute exact row extents up front (prefix sums
    /// over per-row counts) and then fill the value buffer in place.
    pub fn from_parts(offsets: Vec<u32>, values: Vec<T>) -> Self {
        debug_assert!(!offsets.is_empty());
        debug_assert_eq!(offsets[0], 0);
        debug_assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        debug_assert_eq!(*offsets.last().unwrap() as usize, values.len());
        Self { offsets, values }
    }

    /// Assemble from explicit per-row lists.
    pub fn from_rows<R>(rows: &[R]) -> Self
    where
        R: AsRef<[T]>,
        T: Copy,
    {
        let mut offsets = Vec::with_capacity(rows.len() + 1);
        offsets.push(0u32);
        let total: usize = rows.iter().map(|r| r.as_ref().len()).sum();
        let mut values = Vec::with_capacity(total);
        for row in rows {
            values.extend_from_slice(row.as_ref());
            offsets.push(values.len() as u32);
        }
        Self { offsets, values }
    }

    /// Number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Length of row `i`.
    #[inline]
    pub fn row_len(&self, i: usize) -> usize {
        (self.offsets[i + 1] - self.offsets[i]) as usize
    }

    /// The flat value range occupied by row `i`.
    ///
    /// Parallel arrays sharing this CSR's layout (e.g. per-cell-local normals
    /// aligned with the cell→face map) are indexed through this range.
    #[inline]
    pub fn row_range(&self, i: usize) -> Range<usize> {
        self.offsets[i] as usize..self.offsets[i + 1] as usize
    }

    /// The entries of row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.values[self.row_range(i)]
    }

    /// All values, flattened in row order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The offset table (`row_count + 1` entries).
    #[inline]
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Total number of stored entries.
    #[inline]
    pub fn total_len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over rows as slices, in row order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.row_count()).map(move |i| self.row(i))
    }
}
