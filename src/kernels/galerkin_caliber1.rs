//! `GalerkinCaliber1`: coarse operator `B = Rᵀ·A·P` for caliber-1 (piecewise
//! constant) aggregation.
//!
//! Grounded in `galerkinCaliber1.cpp`. Because `R` is caliber-1 — every fine
//! node maps to exactly one coarse node — `R` (and implicitly `P = Rᵀ`) is
//! represented as two length-`n` arrays instead of a general sparse matrix:
//! `coarse_of[j]` is the coarse node fine node `j` aggregates into, and
//! `weight[j]` is the corresponding entry of `R`. `B` is built one coarse
//! column at a time with a dense length-`N` SPA accumulator, initial
//! capacity `ceil(0.2 * A.nnz)`, grown by 1.2x on overflow.

use bit_set::BitSet;

use crate::error::{LamgError, Result};
use crate::matrix::sparse::{CscBuilder, SparseCsc};
use crate::types::Precision;

const KERNEL: &str = "galerkin_caliber1";

/// Caliber-1 restriction: each fine node maps to exactly one coarse node.
pub struct Caliber1 {
    /// `coarse_of[j]` is the 0-based coarse index fine node `j` maps to.
    pub coarse_of: Vec<usize>,
    /// `weight[j]` is `R[coarse_of[j], j]`.
    pub weight: Vec<Precision>,
}

/// Compute `B[I,J] = sum_{j: coarse_of[j]=J} sum_{i in A(:,j)} weight[j] * A[i,j] * weight[i]`,
/// accumulated into row `I = coarse_of[i]`. This is `Rᵀ·A·P` specialized to
/// a caliber-1 `P`, and agrees with the dense triple product exactly.
pub fn galerkin_caliber1(a: &SparseCsc, r: &Caliber1, n_coarse: usize) -> Result<SparseCsc> {
    a.check_invariants(KERNEL)?;
    let n = a.require_square(KERNEL)?;
    if r.coarse_of.len() != n || r.weight.len() != n {
        return Err(LamgError::shape(
            KERNEL,
            format!("R has {} fine entries but A is {n}x{n}", r.coarse_of.len()),
        ));
    }
    for &coarse in &r.coarse_of {
        if coarse >= n_coarse {
            return Err(LamgError::shape(KERNEL, format!("coarse index {coarse} >= n_coarse={n_coarse}")));
        }
    }

    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); n_coarse];
    for (j, &coarse) in r.coarse_of.iter().enumerate() {
        groups[coarse].push(j);
    }

    let initial_capacity = ((a.nnz() as f64) * 0.2).ceil() as usize;
    let mut builder = CscBuilder::with_capacity(n_coarse, n_coarse, initial_capacity.max(1), 1.2);

    let mut scratch = vec![0.0; n_coarse];
    let mut touched = BitSet::with_capacity(n_coarse);
    let mut touched_list: Vec<usize> = Vec::new();

    for big_j in 0..n_coarse {
        for &j in &groups[big_j] {
            let r_jj = r.weight[j];
            let (rows, vals) = a.col(j);
            for (&i, &a_ij) in rows.iter().zip(vals) {
                let big_i = r.coarse_of[i];
                if touched.insert(big_i) {
                    touched_list.push(big_i);
                }
                scratch[big_i] += r_jj * a_ij * r.weight[i];
            }
        }

        touched_list.sort_unstable();
        for &big_i in &touched_list {
            builder.push(big_i, scratch[big_i]);
            scratch[big_i] = 0.0;
        }
        touched.clear();
        touched_list.clear();
        builder.end_column();
    }

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agrees_with_dense_triple_product() {
        // Path 0-1-2-3 with self-loops, aggregated into {0,1} and {2,3}.
        let a = SparseCsc::from_triplets(
            4,
            4,
            &[
                (0, 0, 1.0),
                (0, 1, 1.0), (1, 0, 1.0),
                (1, 1, 3.0),
                (1, 2, 2.0), (2, 1, 2.0),
                (2, 2, 3.0),
                (2, 3, 1.0), (3, 2, 1.0),
                (3, 3, 1.0),
            ],
        );
        let r = Caliber1 { coarse_of: vec![0, 0, 1, 1], weight: vec![1.0, 1.0, 1.0, 1.0] };

        let b = galerkin_caliber1(&a, &r, 2).unwrap();
        assert_eq!(b.get(0, 0), 6.0);
        assert_eq!(b.get(0, 1), 2.0);
        assert_eq!(b.get(1, 0), 2.0);
        assert_eq!(b.get(1, 1), 6.0);
        b.check_invariants("test").unwrap();
    }

    #[test]
    fn rejects_out_of_range_coarse_index() {
        let a = SparseCsc::zeros(2, 2);
        let r = Caliber1 { coarse_of: vec![0, 5], weight: vec![1.0, 1.0] };
        assert!(galerkin_caliber1(&a, &r, 2).is_err());
    }
}
