//! `MedianCol`: per-column median of a vector restricted to a column's sparsity pattern.
//!
//! Grounded in `medianCol.cpp`: for each column, the non-zero rows' `x`
//! values are gathered into a scratch vector and partitioned at the
//! `size/2` position with `nth_element`; Rust's `select_nth_unstable_by` is
//! the same operation without a full sort.

use crate::error::{LamgError, Result};
use crate::matrix::sparse::SparseCsc;
use crate::types::Precision;

const KERNEL: &str = "median_col";

/// For each column `j` of `a`, compute `y[j] = median({x[i] : a[i,j] != 0})`,
/// using the upper-median convention (the `⌊k/2⌋`-th order statistic,
/// 0-based) for even-sized columns. Empty columns map to `0.0`.
pub fn median_col(a: &SparseCsc, x: &[Precision]) -> Result<Vec<Precision>> {
    a.check_invariants(KERNEL)?;
    if x.len() != a.n_rows {
        return Err(LamgError::shape(
            KERNEL,
            format!("x has length {} but A has {} rows", x.len(), a.n_rows),
        ));
    }

    let mut y = vec![0.0; a.n_cols];
    let mut scratch: Vec<Precision> = Vec::new();
    for j in 0..a.n_cols {
        let (rows, _) = a.col(j);
        if rows.is_empty() {
            continue;
        }
        scratch.clear();
        scratch.extend(rows.iter().map(|&i| x[i]));
        let mid = scratch.len() / 2;
        let (_, median, _) = scratch.select_nth_unstable_by(mid, |p, q| p.partial_cmp(q).unwrap());
        y[j] = *median;
    }
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_seed_case_3() {
        // A = identity-plus-path on 3 nodes: col0={0,1}, col1={0,1,2}, col2={1,2}
        let a = SparseCsc::from_triplets(
            3,
            3,
            &[
                (0, 0, 1.0),
                (1, 0, 1.0),
                (0, 1, 1.0),
                (1, 1, 1.0),
                (2, 1, 1.0),
                (1, 2, 1.0),
                (2, 2, 1.0),
            ],
        );
        let x = vec![10.0, 20.0, 30.0];
        let y = median_col(&a, &x).unwrap();
        assert_eq!(y, vec![20.0, 30.0, 30.0]);
    }

    #[test]
    fn empty_column_is_zero() {
        let a = SparseCsc::zeros(2, 2);
        let y = median_col(&a, &[1.0, 2.0]).unwrap();
        assert_eq!(y, vec![0.0, 0.0]);
    }

    #[test]
    fn invariant_under_row_permutation_within_column() {
        let a1 = SparseCsc::from_triplets(3, 1, &[(0, 0, 1.0), (1, 0, 1.0), (2, 0, 1.0)]);
        let a2 = SparseCsc::from_triplets(3, 1, &[(2, 0, 1.0), (0, 0, 1.0), (1, 0, 1.0)]);
        let x = vec![5.0, 1.0, 9.0];
        assert_eq!(median_col(&a1, &x).unwrap(), median_col(&a2, &x).unwrap());
    }

    #[test]
    fn rejects_mismatched_vector_length() {
        let a = SparseCsc::zeros(3, 3);
        assert!(median_col(&a, &[1.0, 2.0]).is_err());
    }

    fn rows_and_shuffle_keys() -> impl proptest::strategy::Strategy<Value = (Vec<usize>, Vec<f64>)> {
        use proptest::prelude::*;
        prop::collection::hash_set(0usize..20, 1..15)
            .prop_map(|set| {
                let mut rows: Vec<usize> = set.into_iter().collect();
                rows.sort_unstable();
                rows
            })
            .prop_flat_map(|rows| {
                let len = rows.len();
                (Just(rows), prop::collection::vec(0.0f64..1.0, len))
            })
    }

    /// Reorders `rows` by sorting alongside independently-generated `keys`,
    /// producing an arbitrary permutation of `rows` to feed `SparseCsc::from_triplets`.
    fn permute(rows: &[usize], keys: &[f64]) -> Vec<usize> {
        let mut paired: Vec<(f64, usize)> = keys.iter().copied().zip(rows.iter().copied()).collect();
        paired.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        paired.into_iter().map(|(_, r)| r).collect()
    }

    proptest::proptest! {
        #[test]
        fn median_is_invariant_under_row_permutation(
            (rows, keys) in rows_and_shuffle_keys(),
            x in proptest::collection::vec(-1000.0f64..1000.0, 20),
        ) {
            let sorted: Vec<(usize, usize, Precision)> = rows.iter().map(|&r| (r, 0, 1.0)).collect();
            let shuffled: Vec<(usize, usize, Precision)> =
                permute(&rows, &keys).into_iter().map(|r| (r, 0, 1.0)).collect();

            let a1 = SparseCsc::from_triplets(20, 1, &sorted);
            let a2 = SparseCsc::from_triplets(20, 1, &shuffled);
            proptest::prop_assert_eq!(median_col(&a1, &x).unwrap(), median_col(&a2, &x).unwrap());
        }
    }
}
