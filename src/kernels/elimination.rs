//! `EliminationOperators`: builds the restriction matrix `R` and diagonal
//! rescaling `q` for an F/C graph partition.
//!
//! Grounded in `eliminationOperators.cpp`: each F-column of `A` yields one
//! column of `R`, scaled by `-1/A[j,j]` after the column is collected (the
//! source scales in a second pass over the just-written range rather than
//! inline, since the diagonal may be encountered anywhere in the column).
//! Initial capacity `ceil(2.5 * nf)`, growth factor 1.2, per the design notes.

use crate::error::{LamgError, Result};
use crate::matrix::sparse::{CscBuilder, SparseCsc};
use crate::types::Precision;

const KERNEL: &str = "elimination_operators";

/// Output of [`elimination_operators`].
#[derive(Debug, Clone, PartialEq)]
pub struct EliminationOperators {
    /// Restriction matrix, `nc x nf`.
    pub r: SparseCsc,
    /// Diagonal rescaling, length `nf`: `q[ff] = 1 / A[j,j]`.
    pub q: Vec<Precision>,
}

/// Build `R` and `q` from `a`, the 1-based F sequence, and `c_index` (length
/// `n`, the 1-based position of each node in C, or 0 if the node is in F).
///
/// Entries `A[i,j]` with `c_index[i] == 0` (F-F edges) are dropped, under the
/// precondition — established by [`crate::kernels::low_degree::low_degree_sweep`]
/// — that F is independent in `a`'s graph. This function does not check that
/// precondition (doing so would cost an `O(nnz)` scan the source never pays);
/// violating it silently loses those entries rather than erroring, matching
/// the source's documented behavior.
pub fn elimination_operators(a: &SparseCsc, f: &[usize], c_index: &[usize]) -> Result<EliminationOperators> {
    a.check_invariants(KERNEL)?;
    let n = a.require_square(KERNEL)?;
    if c_index.len() != n {
        return Err(LamgError::shape(KERNEL, format!("c_index has length {} but n={n}", c_index.len())));
    }
    let nf = f.len();
    if nf > n {
        return Err(LamgError::shape(KERNEL, format!("F has {nf} entries but n={n}")));
    }
    let nc = n - nf;

    let initial_capacity = (nf as f64 * 2.5).ceil() as usize;
    let mut builder = CscBuilder::with_capacity(nc, nf, initial_capacity.max(1), 1.2);
    let mut q = vec![0.0; nf];

    for (ff, &f_node) in f.iter().enumerate() {
        if f_node == 0 || f_node > n {
            return Err(LamgError::shape(KERNEL, format!("F[{ff}]={f_node} out of range")));
        }
        let j = f_node - 1;

        let (rows, vals) = a.col(j);
        let mut diagonal: Option<Precision> = None;
        let mut entries: Vec<(usize, Precision)> = Vec::new();
        for (&i, &a_ij) in rows.iter().zip(vals) {
            if i == j {
                diagonal = Some(a_ij);
            } else if c_index[i] > 0 {
                entries.push((c_index[i] - 1, a_ij));
            }
            // c_index[i] == 0: F-F edge, dropped per the documented precondition.
        }

        let a_jj = diagonal.ok_or_else(|| {
            LamgError::shape(KERNEL, format!("F-node {f_node} (column {j}) has no stored diagonal entry"))
        })?;
        q[ff] = 1.0 / a_jj;
        let scale = -q[ff];

        for (row, value) in entries {
            builder.push(row, value * scale);
        }
        builder.end_column();
    }

    Ok(EliminationOperators { r: builder.finish(), q })
}
