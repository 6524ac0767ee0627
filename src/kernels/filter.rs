//! `FilterSmallEntries`: thresholded sparsity filter.
//!
//! Grounded in `filterSmallEntries.cpp`, which dispatches `f`/`g` through
//! function pointers chosen once at entry (`identityValue`/`absValue`,
//! `maxBound`/`minBound`). Per the design notes, that dispatch is modeled
//! here as a closed enum resolved once before the loop, not as an indirect
//! call inside it.

use crate::error::{LamgError, Result};
use crate::matrix::sparse::SparseCsc;
use crate::types::{AbsFlag, BoundType, Precision};

const KERNEL: &str = "filter_small_entries";

fn f(value: Precision, flag: AbsFlag) -> Precision {
    match flag {
        AbsFlag::Value => value,
        AbsFlag::Abs => value.abs(),
    }
}

fn g(b_i: Precision, b_j: Precision, bound: BoundType) -> Precision {
    match bound {
        BoundType::Min => b_i.min(b_j),
        BoundType::Max => b_i.max(b_j),
    }
}

/// Keep entry `(i,j)` of `a` iff `f(A[i,j]) >= delta * g(b[j], b[i])`.
///
/// Output has the same shape as `a`; the output's `nnz` never exceeds
/// `a.nnz()` since the output allocation needs no growth beyond the input's.
pub fn filter_small_entries(
    a: &SparseCsc,
    b: &[Precision],
    delta: Precision,
    abs_flag: AbsFlag,
    bound_type: BoundType,
) -> Result<SparseCsc> {
    a.check_invariants(KERNEL)?;
    if b.len() != a.n_cols {
        return Err(LamgError::shape(
            KERNEL,
            format!("b has length {} but A has {} columns", b.len(), a.n_cols),
        ));
    }

    let mut col_ptr = Vec::with_capacity(a.n_cols + 1);
    let mut row_idx = Vec::with_capacity(a.nnz());
    let mut values = Vec::with_capacity(a.nnz());
    col_ptr.push(0);

    for j in 0..a.n_cols {
        let (rows, vals) = a.col(j);
        for (&i, &v) in rows.iter().zip(vals) {
            let bound = delta * g(b[j], b[i], bound_type);
            if f(v, abs_flag) >= bound {
                row_idx.push(i);
                values.push(v);
            }
        }
        col_ptr.push(row_idx.len());
    }

    Ok(SparseCsc { n_rows: a.n_rows, n_cols: a.n_cols, col_ptr, row_idx, values })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path3_weights_1_2_1() -> SparseCsc {
        // 0 -1- 1 -2- 2, symmetric.
        SparseCsc::from_triplets(3, 3, &[(0, 1, 1.0), (1, 0, 1.0), (1, 2, 2.0), (2, 1, 2.0)])
    }

    #[test]
    fn matches_seed_case_2() {
        let a = path3_weights_1_2_1();
        let b = vec![1.0, 1.0, 1.0];
        let filtered = filter_small_entries(&a, &b, 1.5, AbsFlag::Value, BoundType::Max).unwrap();
        assert_eq!(filtered.nnz(), 2); // the two (1,2)/(2,1) weight-2 entries
        assert_eq!(filtered.get(0, 1), 0.0);
        assert_eq!(filtered.get(1, 2), 2.0);
    }

    #[test]
    fn nnz_never_grows() {
        let a = path3_weights_1_2_1();
        let b = vec![0.0, 0.0, 0.0];
        let filtered = filter_small_entries(&a, &b, 0.0, AbsFlag::Value, BoundType::Min).unwrap();
        assert!(filtered.nnz() <= a.nnz());
    }

    #[test]
    fn abs_flag_uses_magnitude() {
        let a = SparseCsc::from_triplets(2, 2, &[(0, 1, -5.0), (1, 0, -5.0)]);
        let b = vec![1.0, 1.0];
        let kept = filter_small_entries(&a, &b, 2.0, AbsFlag::Abs, BoundType::Max).unwrap();
        assert_eq!(kept.nnz(), 2);
        let dropped = filter_small_entries(&a, &b, 2.0, AbsFlag::Value, BoundType::Max).unwrap();
        assert_eq!(dropped.nnz(), 0);
    }

    #[test]
    fn rejects_bound_length_mismatch() {
        let a = path3_weights_1_2_1();
        assert!(filter_small_entries(&a, &[1.0], 1.0, AbsFlag::Value, BoundType::Max).is_err());
    }

    proptest::proptest! {
        #[test]
        fn nnz_never_exceeds_input_nnz(
            entries in proptest::collection::vec((0usize..8, 0usize..8, -50.0f64..50.0), 0..40),
            b in proptest::collection::vec(-10.0f64..10.0, 8),
            delta in 0.0f64..5.0,
            abs_flag in proptest::prop_oneof![proptest::strategy::Just(AbsFlag::Value), proptest::strategy::Just(AbsFlag::Abs)],
            bound_type in proptest::prop_oneof![proptest::strategy::Just(BoundType::Min), proptest::strategy::Just(BoundType::Max)],
        ) {
            let a = SparseCsc::from_triplets(8, 8, &entries);
            let filtered = filter_small_entries(&a, &b, delta, abs_flag, bound_type).unwrap();
            proptest::prop_assert!(filtered.nnz() <= a.nnz());
            proptest::prop_assert!(filtered.n_rows == a.n_rows && filtered.n_cols == a.n_cols);
        }
    }
}
