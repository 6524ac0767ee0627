//! `SparseCsc`: the compressed-sparse-column container every kernel operates on.
//!
//! Column-major storage: `col_ptr` has length `n_cols + 1`, `row_idx` and
//! `values` each have length `nnz = col_ptr[n_cols]`. Row indices within a
//! column are kept strictly ascending; this invariant is what lets
//! `GaussSeidel` and `EliminationOperators` binary-search a column for its
//! diagonal entry and what every kernel downstream relies on when merging
//! sorted runs.

use crate::error::{LamgError, Result};
use crate::types::Precision;

/// A real-valued sparse matrix in compressed-sparse-column layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseCsc {
    /// Number of rows.
    pub n_rows: usize,
    /// Number of columns.
    pub n_cols: usize,
    /// Column pointers, length `n_cols + 1`.
    pub col_ptr: Vec<usize>,
    /// Row indices, length `nnz`, strictly ascending within each column.
    pub row_idx: Vec<usize>,
    /// Stored values, parallel to `row_idx`.
    pub values: Vec<Precision>,
}

impl SparseCsc {
    /// Number of stored (explicit) non-zeros.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// An empty `n_rows x n_cols` matrix with no stored entries.
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        SparseCsc {
            n_rows,
            n_cols,
            col_ptr: vec![0; n_cols + 1],
            row_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Row indices and values stored in column `j`.
    pub fn col(&self, j: usize) -> (&[usize], &[Precision]) {
        let start = self.col_ptr[j];
        let end = self.col_ptr[j + 1];
        (&self.row_idx[start..end], &self.values[start..end])
    }

    /// Look up `A[i,j]`, returning `0.0` if the entry is not stored.
    ///
    /// Uses binary search since row indices within a column are sorted.
    pub fn get(&self, i: usize, j: usize) -> Precision {
        let (rows, vals) = self.col(j);
        match rows.binary_search(&i) {
            Ok(pos) => vals[pos],
            Err(_) => 0.0,
        }
    }

    /// Find the stored diagonal entry `A[j,j]` by scanning column `j`.
    ///
    /// Mirrors the source's assumption that the diagonal, if present, is not
    /// at a fixed offset within the column — both presence and absence of
    /// the diagonal occur across the kernels in this crate, so callers that
    /// require it (`GaussSeidel`, `EliminationOperators`) must check.
    pub fn diagonal(&self, j: usize) -> Option<Precision> {
        let (rows, vals) = self.col(j);
        rows.binary_search(&j).ok().map(|pos| vals[pos])
    }

    /// Validate the CSC invariants from the data model: `col_ptr[0] == 0`,
    /// monotone `col_ptr`, matching `row_idx`/`values` lengths, ascending
    /// row indices within each column, and in-bounds row indices.
    pub fn check_invariants(&self, kernel: &'static str) -> Result<()> {
        if self.col_ptr.len() != self.n_cols + 1 {
            return Err(LamgError::shape(
                kernel,
                format!(
                    "col_ptr length {} does not match n_cols+1={}",
                    self.col_ptr.len(),
                    self.n_cols + 1
                ),
            ));
        }
        if self.col_ptr[0] != 0 {
            return Err(LamgError::shape(kernel, "col_ptr[0] must be 0"));
        }
        if self.row_idx.len() != self.values.len() {
            return Err(LamgError::shape(
                kernel,
                format!(
                    "row_idx length {} does not match values length {}",
                    self.row_idx.len(),
                    self.values.len()
                ),
            ));
        }
        let nnz = *self.col_ptr.last().unwrap();
        if nnz != self.row_idx.len() {
            return Err(LamgError::shape(
                kernel,
                format!("col_ptr[n_cols]={nnz} does not match nnz={}", self.row_idx.len()),
            ));
        }
        for j in 0..self.n_cols {
            if self.col_ptr[j] > self.col_ptr[j + 1] {
                return Err(LamgError::shape(kernel, format!("col_ptr is not monotone at column {j}")));
            }
            let (rows, _) = self.col(j);
            for w in rows.windows(2) {
                if w[0] >= w[1] {
                    return Err(LamgError::shape(
                        kernel,
                        format!("row indices in column {j} are not strictly ascending"),
                    ));
                }
            }
            if let Some(&last) = rows.last() {
                if last >= self.n_rows {
                    return Err(LamgError::shape(
                        kernel,
                        format!("row index {last} out of bounds in column {j} (n_rows={})", self.n_rows),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Require a square matrix, returning `n`.
    pub fn require_square(&self, kernel: &'static str) -> Result<usize> {
        if self.n_rows != self.n_cols {
            return Err(LamgError::shape(
                kernel,
                format!("matrix must be square, got {}x{}", self.n_rows, self.n_cols),
            ));
        }
        Ok(self.n_rows)
    }

    /// Build a `SparseCsc` from unsorted, possibly-duplicated `(row, col, value)`
    /// triplets. Duplicate `(row, col)` pairs are summed, matching the usual
    /// COO-to-CSC convention.
    pub fn from_triplets(n_rows: usize, n_cols: usize, triplets: &[(usize, usize, Precision)]) -> Self {
        let mut by_col: Vec<Vec<(usize, Precision)>> = vec![Vec::new(); n_cols];
        for &(r, c, v) in triplets {
            by_col[c].push((r, v));
        }

        let mut col_ptr = Vec::with_capacity(n_cols + 1);
        let mut row_idx = Vec::new();
        let mut values = Vec::new();
        col_ptr.push(0);

        for col in by_col.iter_mut() {
            col.sort_by_key(|&(r, _)| r);
            let mut iter = col.drain(..).peekable();
            while let Some((r, v)) = iter.next() {
                let mut sum = v;
                while let Some(&(r2, v2)) = iter.peek() {
                    if r2 == r {
                        sum += v2;
                        iter.next();
                    } else {
                        break;
                    }
                }
                row_idx.push(r);
                values.push(sum);
            }
            col_ptr.push(row_idx.len());
        }

        SparseCsc { n_rows, n_cols, col_ptr, row_idx, values }
    }

    /// Flatten back into `(row, col, value)` triplets in storage order.
    pub fn to_triplets(&self) -> Vec<(usize, usize, Precision)> {
        let mut out = Vec::with_capacity(self.nnz());
        for j in 0..self.n_cols {
            let (rows, vals) = self.col(j);
            for (&r, &v) in rows.iter().zip(vals) {
                out.push((r, j, v));
            }
        }
        out
    }
}

/// Incrementally builds a `SparseCsc` one column at a time, growing its
/// backing storage by a fixed factor rather than reallocating the final
/// matrix in place (the pointer-validity hazard the source's `mxRealloc`
/// calls are prone to, per the design notes). Callers push entries for
/// column `j` via [`CscBuilder::push`] in ascending row order, then call
/// [`CscBuilder::end_column`] before starting the next column.
pub struct CscBuilder {
    n_rows: usize,
    n_cols: usize,
    col_ptr: Vec<usize>,
    row_idx: Vec<usize>,
    values: Vec<Precision>,
    growth_factor: f64,
}

impl CscBuilder {
    /// Start a new builder with the given initial capacity hint and growth
    /// factor (e.g. 1.2 for `EliminationOperators`, 1.4 for `GalerkinElimination`).
    pub fn with_capacity(n_rows: usize, n_cols: usize, capacity: usize, growth_factor: f64) -> Self {
        let mut col_ptr = Vec::with_capacity(n_cols + 1);
        col_ptr.push(0);
        CscBuilder {
            n_rows,
            n_cols,
            col_ptr,
            row_idx: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            growth_factor,
        }
    }

    /// Current number of entries pushed so far (== nnz if the builder is finished).
    pub fn len(&self) -> usize {
        self.row_idx.len()
    }

    /// Whether any entries have been pushed.
    pub fn is_empty(&self) -> bool {
        self.row_idx.is_empty()
    }

    /// Reserved capacity; grows by `growth_factor` (ceil, +1 if that doesn't
    /// move the needle) whenever a push would exceed it. Exposed so kernels
    /// can log growth events the way the source's reallocation sites do.
    pub fn capacity(&self) -> usize {
        self.row_idx.capacity()
    }

    /// Append an entry to the column currently being built. Row indices must
    /// be pushed in ascending order within a column; this is the caller's
    /// responsibility (callers already iterate `A`'s sorted columns).
    pub fn push(&mut self, row: usize, value: Precision) {
        if self.row_idx.len() >= self.row_idx.capacity() {
            let old = self.row_idx.capacity().max(1);
            let mut new_cap = (old as f64 * self.growth_factor).ceil() as usize;
            if new_cap == old {
                new_cap += 1;
            }
            log::trace!("CscBuilder growing capacity {old} -> {new_cap}");
            self.row_idx.reserve(new_cap - old);
            self.values.reserve(new_cap - old);
        }
        self.row_idx.push(row);
        self.values.push(value);
    }

    /// Close out the column currently being built, recording the end offset.
    pub fn end_column(&mut self) {
        self.col_ptr.push(self.row_idx.len());
    }

    /// Consume the builder, producing the finished matrix. `col_ptr` must
    /// have exactly `n_cols + 1` entries (i.e. `end_column` was called once
    /// per column).
    pub fn finish(self) -> SparseCsc {
        debug_assert_eq!(self.col_ptr.len(), self.n_cols + 1);
        SparseCsc {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            col_ptr: self.col_ptr,
            row_idx: self.row_idx,
            values: self.values,
        }
    }
}
