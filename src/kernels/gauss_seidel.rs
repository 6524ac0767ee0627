//! `GaussSeidel`: forward-sweep relaxation smoother.
//!
//! Grounded in `gsrelax.cpp`. `A` is symmetric and stored by column, so row
//! `i` is read by scanning column `i` rather than maintaining a separate CSR
//! copy — the diagonal `A[i,i]` is found in the same scan used to propagate
//! the update to `i`'s neighbors. Multiple right-hand sides are relaxed
//! together, one sweep at a time, since they share `A`'s structure.

use crate::error::{LamgError, Result};
use crate::matrix::sparse::SparseCsc;
use crate::types::Precision;

const KERNEL: &str = "gauss_seidel";

/// Output of [`gauss_seidel`]: the updated solution and residual, replacing
/// the caller's inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussSeidelOutput {
    /// Updated solution, `n x p`.
    pub x: Vec<Vec<Precision>>,
    /// Updated residual, `n x p`.
    pub r: Vec<Vec<Precision>>,
}

/// Run `num_sweeps` forward Gauss-Seidel sweeps in place on `x`/`r`, the
/// caller's current solution and residual for `a·x = b` (so `r` already
/// equals `b - a·x` on entry; this kernel never reconstructs it from a
/// right-hand side). Each sweep visits rows `0..n` in increasing order;
/// within a row, the update uses whichever neighbor values are current
/// (Gauss-Seidel, not Jacobi). `a`'s diagonal must be stored explicitly for
/// every row — a missing diagonal is an error rather than a skipped update.
/// With `num_sweeps == 0`, `x` and `r` are returned unchanged.
pub fn gauss_seidel(
    a: &SparseCsc,
    x: &[Vec<Precision>],
    r: &[Vec<Precision>],
    num_sweeps: usize,
) -> Result<GaussSeidelOutput> {
    a.check_invariants(KERNEL)?;
    let n = a.require_square(KERNEL)?;
    if x.len() != r.len() {
        return Err(LamgError::shape(KERNEL, format!("X has {} columns but R has {}", x.len(), r.len())));
    }
    for (k, col) in x.iter().enumerate() {
        if col.len() != n {
            return Err(LamgError::shape(KERNEL, format!("X column {k} has length {} but n={n}", col.len())));
        }
    }
    for (k, col) in r.iter().enumerate() {
        if col.len() != n {
            return Err(LamgError::shape(KERNEL, format!("R column {k} has length {} but n={n}", col.len())));
        }
    }

    let k_count = x.len();
    let mut x = x.to_vec();
    let mut r = r.to_vec();

    for sweep in 0..num_sweeps {
        for i in 0..n {
            let (rows, vals) = a.col(i);
            let mut a_ii: Option<Precision> = None;
            for (&row, &val) in rows.iter().zip(vals) {
                if row == i {
                    a_ii = Some(val);
                }
            }
            let a_ii = a_ii.ok_or_else(|| LamgError::shape(KERNEL, format!("row {i} has no stored diagonal entry")))?;

            for k in 0..k_count {
                let delta = r[k][i] / a_ii;
                x[k][i] += delta;
                r[k][i] = 0.0;
                for (&row, &val) in rows.iter().zip(vals) {
                    if row != i {
                        r[k][row] -= delta * val;
                    }
                }
            }
        }
        log::trace!("gauss_seidel: completed sweep {}/{num_sweeps}", sweep + 1);
    }

    Ok(GaussSeidelOutput { x, r })
}
