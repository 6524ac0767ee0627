//! `AffinityMatrix`: edge-wise squared-cosine similarity over test vectors.
//!
//! Grounded in `affinitymatrix.cpp`: norms are precomputed once per row of
//! `X`, then for every stored edge `(i,j)` of `W` the squared inner product
//! of rows `X_i`, `X_j` is divided by the product of their norms.

use crate::error::{LamgError, Result};
use crate::matrix::sparse::SparseCsc;
use crate::types::Precision;

const KERNEL: &str = "affinity_matrix";

/// `X` is n rows by p columns, stored column-major (`x[k][i]` = row `i`,
/// test vector `k`) so that a row can be read without copying when p is small.
pub struct TestVectors<'a> {
    n_rows: usize,
    columns: &'a [Vec<Precision>],
}

impl<'a> TestVectors<'a> {
    /// Wrap `p` length-`n` columns as a row-addressable test-vector matrix.
    pub fn new(n_rows: usize, columns: &'a [Vec<Precision>]) -> Result<Self> {
        for (k, col) in columns.iter().enumerate() {
            if col.len() != n_rows {
                return Err(LamgError::shape(
                    KERNEL,
                    format!("X column {k} has length {} but expected {n_rows}", col.len()),
                ));
            }
        }
        Ok(TestVectors { n_rows, columns })
    }

    fn inner_product(&self, i: usize, j: usize) -> Precision {
        self.columns.iter().map(|col| col[i] * col[j]).sum()
    }

    fn norm_squared(&self, i: usize) -> Precision {
        self.columns.iter().map(|col| col[i] * col[i]).sum()
    }
}

/// Compute `C[i,j] = (<X_i,X_j>)^2 / (||X_i||^2 * ||X_j||^2)` over `W`'s
/// sparsity pattern. `C` has the same pattern as `W`; entries are in `[0,1]`
/// when every row of `X` is non-zero. Rows of `X` with zero norm cause a
/// division by zero, per the contract: the caller is responsible for not
/// passing such `X`.
pub fn affinity_matrix(w: &SparseCsc, x: &TestVectors) -> Result<SparseCsc> {
    w.check_invariants(KERNEL)?;
    w.require_square(KERNEL)?;
    if x.n_rows != w.n_rows {
        return Err(LamgError::shape(
            KERNEL,
            format!("X has {} rows but W is {}x{}", x.n_rows, w.n_rows, w.n_cols),
        ));
    }

    let norm_sq: Vec<Precision> = (0..w.n_rows).map(|i| x.norm_squared(i)).collect();

    let mut col_ptr = Vec::with_capacity(w.n_cols + 1);
    let mut row_idx = Vec::with_capacity(w.nnz());
    let mut values = Vec::with_capacity(w.nnz());
    col_ptr.push(0);

    for j in 0..w.n_cols {
        let (rows, _) = w.col(j);
        for &i in rows {
            let ip = x.inner_product(i, j);
            let c = (ip * ip) / (norm_sq[i] * norm_sq[j]);
            row_idx.push(i);
            values.push(c);
        }
        col_ptr.push(row_idx.len());
    }

    Ok(SparseCsc { n_rows: w.n_rows, n_cols: w.n_cols, col_ptr, row_idx, values })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_seed_case_1() {
        // W: full 3x3 minus diagonal. X rows: [1,0],[1,0],[0,1].
        let w = SparseCsc::from_triplets(
            3,
            3,
            &[(1, 0, 1.0), (2, 0, 1.0), (0, 1, 1.0), (2, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0)],
        );
        let columns = vec![vec![1.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]];
        let x = TestVectors::new(3, &columns).unwrap();
        let c = affinity_matrix(&w, &x).unwrap();

        assert!((c.get(0, 1) - 1.0).abs() < 1e-12);
        assert!((c.get(0, 2) - 0.0).abs() < 1e-12);
        assert!((c.get(1, 2) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn preserves_sparsity_pattern() {
        let w = SparseCsc::from_triplets(2, 2, &[(0, 1, 1.0), (1, 0, 1.0)]);
        let columns = vec![vec![1.0, 2.0]];
        let x = TestVectors::new(2, &columns).unwrap();
        let c = affinity_matrix(&w, &x).unwrap();
        assert_eq!(c.col_ptr, w.col_ptr);
        assert_eq!(c.row_idx, w.row_idx);
    }

    #[test]
    fn rejects_row_count_mismatch() {
        let w = SparseCsc::zeros(3, 3);
        let columns = vec![vec![1.0, 2.0]];
        let x = TestVectors::new(2, &columns).unwrap();
        assert!(affinity_matrix(&w, &x).is_err());
    }
}
