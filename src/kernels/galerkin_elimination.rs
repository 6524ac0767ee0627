//! `GalerkinElimination`: coarse operator `B = Rᵀ·A·R` contribution from
//! eliminated (low-degree) fine nodes, folded onto the retained C graph.
//!
//! Grounded in `galerkinElimination.cpp`. Unlike [`crate::kernels::galerkin_caliber1`],
//! `R` here is a genuine sparse matrix (the output of
//! [`crate::kernels::elimination::elimination_operators`]): column `m` of `R`
//! gives the C-node weights an eliminated F-node was folded into. For each
//! C-column `cc`, every `A`-neighbor `i` of the corresponding fine node either
//! contributes directly (if `i` is itself a C-node) or is redistributed across
//! `R`'s column for `i` (if `i` was eliminated). Same SPA-over-dense-scratch
//! pattern as the other Galerkin kernel, initial capacity `ceil(0.2 * A.nnz)`,
//! grown 1.4x on overflow (the source allows more growth headroom here since
//! elimination fill-in is less predictable than caliber-1 aggregation).

use bit_set::BitSet;

use crate::error::{LamgError, Result};
use crate::matrix::sparse::{CscBuilder, SparseCsc};
use crate::types::EliminationStatus;

const KERNEL: &str = "galerkin_elimination";

/// Fold eliminated-node contributions into the coarse operator.
///
/// - `a`: fine graph, `n x n`.
/// - `r`: restriction from [`elimination_operators`](crate::kernels::elimination::elimination_operators), `nc x nf`.
/// - `status`: length `n`, `EliminationStatus::LowDegree` marks an eliminated fine node.
/// - `c`: 1-based fine-node ids of the `nc` retained (C) nodes, in coarse order.
/// - `index`: length `n`; for a C-node, its 1-based coarse position; for an
///   eliminated node, its 1-based column position in `r`.
pub fn galerkin_elimination(
    a: &SparseCsc,
    r: &SparseCsc,
    status: &[EliminationStatus],
    c: &[usize],
    index: &[usize],
) -> Result<SparseCsc> {
    a.check_invariants(KERNEL)?;
    let n = a.require_square(KERNEL)?;
    r.check_invariants(KERNEL)?;
    if status.len() != n {
        return Err(LamgError::shape(KERNEL, format!("status has length {} but n={n}", status.len())));
    }
    if index.len() != n {
        return Err(LamgError::shape(KERNEL, format!("index has length {} but n={n}", index.len())));
    }
    let nc = c.len();
    if r.n_rows != nc {
        return Err(LamgError::shape(KERNEL, format!("R has {} rows but C has {nc} entries", r.n_rows)));
    }

    let initial_capacity = ((a.nnz() as f64) * 0.2).ceil() as usize;
    let mut builder = CscBuilder::with_capacity(nc, nc, initial_capacity.max(1), 1.4);

    let mut scratch = vec![0.0; nc];
    let mut touched = BitSet::with_capacity(nc);
    let mut touched_list: Vec<usize> = Vec::new();

    for cc in 0..nc {
        let c_node = c[cc];
        if c_node == 0 || c_node > n {
            return Err(LamgError::shape(KERNEL, format!("C[{cc}]={c_node} out of range")));
        }
        let j0 = c_node - 1;

        let (rows, vals) = a.col(j0);
        for (&i, &a_ij) in rows.iter().zip(vals) {
            if status[i] != EliminationStatus::LowDegree {
                let pos = index[i];
                if pos == 0 || pos > nc {
                    return Err(LamgError::shape(KERNEL, format!("index[{i}]={pos} is not a valid C position")));
                }
                let target = pos - 1;
                if touched.insert(target) {
                    touched_list.push(target);
                }
                scratch[target] += a_ij;
            } else {
                let m_pos = index[i];
                if m_pos == 0 || m_pos > r.n_cols {
                    return Err(LamgError::shape(KERNEL, format!("index[{i}]={m_pos} is not a valid R column")));
                }
                let m = m_pos - 1;
                let (r_rows, r_vals) = r.col(m);
                for (&r_row, &r_val) in r_rows.iter().zip(r_vals) {
                    if r_row >= nc {
                        return Err(LamgError::shape(KERNEL, format!("R row {r_row} out of range for {nc} C-nodes")));
                    }
                    if touched.insert(r_row) {
                        touched_list.push(r_row);
                    }
                    scratch[r_row] += a_ij * r_val;
                }
            }
        }

        touched_list.sort_unstable();
        for &target in &touched_list {
            builder.push(target, scratch[target]);
            scratch[target] = 0.0;
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
    use crate::kernels::elimination::elimination_operators;

    #[test]
    fn folds_eliminated_node_onto_both_neighbors() {
        // Path 0-1-2: node 1 (0-based) eliminated between C-nodes 0 and 2.
        let a = SparseCsc::from_triplets(
            3,
            3,
            &[
                (0, 0, 4.0),
                (1, 0, 1.0), (0, 1, 1.0),
                (1, 1, 8.0),
                (2, 1, 2.0), (1, 2, 2.0),
                (2, 2, 5.0),
            ],
        );
        let f = vec![2]; // node 1 (0-based), 1-based id 2
        let c_index = vec![1, 0, 2];
        let elim = elimination_operators(&a, &f, &c_index).unwrap();

        let status = vec![EliminationStatus::NotEliminated, EliminationStatus::LowDegree, EliminationStatus::NotEliminated];
        let c = vec![1, 3]; // 1-based ids of C-nodes (node0, node2)
        let index = vec![1, 1, 2]; // node0 -> C pos 1; node1 -> R col 1; node2 -> C pos 2

        let b = galerkin_elimination(&a, &elim.r, &status, &c, &index).unwrap();
        b.check_invariants("test").unwrap();

        // R[:,0] = [-1/8, -2/8]; B[0,0] should include A[0,0]=4 (direct) plus
        // the elimination contribution A[1,0]*R[0,0] = 1*(-1/8) = -1/8.
        assert!((b.get(0, 0) - (4.0 - 1.0 / 8.0)).abs() < 1e-12);
        // B[1,0] picks up A[1,0]*R[1,0] = 1*(-2/8) = -2/8 only (no direct A[2,0]).
        assert!((b.get(1, 0) - (-2.0 / 8.0)).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_index() {
        let a = SparseCsc::from_triplets(2, 2, &[(0, 1, 1.0), (1, 0, 1.0)]);
        let r = SparseCsc::zeros(1, 1);
        let status = vec![EliminationStatus::NotEliminated, EliminationStatus::LowDegree];
        let c = vec![1];
        let index = vec![1, 7]; // column 7 doesn't exist in R
        assert!(galerkin_elimination(&a, &r, &status, &c, &index).is_err());
    }
}
