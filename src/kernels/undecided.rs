//! `UndecidedNodes`: bin candidate nodes by their strongest open connection.
//!
//! Grounded in `undecidedNodes.cpp`: each candidate's strongest edge to an
//! "open" neighbor is found by scanning its column; candidates with no open
//! neighbor are dropped entirely; the retained range `[min, max]` is then
//! sliced into `num_bins` equal-width half-open buckets (last one closed).

use crate::error::{LamgError, Result};
use crate::matrix::sparse::SparseCsc;
use crate::types::Precision;

const KERNEL: &str = "undecided_nodes";

/// Bin `candidates` (1-based node ids) by the weight of their strongest edge
/// to a node with `is_open[node] == true`. Returns `num_bins` buckets of
/// 1-based node ids, ordered bin 0 = weakest strongest-neighbor weight.
/// Candidates with no open neighbor are dropped. Returns an empty sequence
/// if no candidate is retained.
pub fn undecided_nodes(
    a: &SparseCsc,
    candidates: &[usize],
    is_open: &[bool],
    num_bins: usize,
) -> Result<Vec<Vec<usize>>> {
    a.check_invariants(KERNEL)?;
    a.require_square(KERNEL)?;
    if num_bins == 0 {
        return Err(LamgError::range(KERNEL, "num_bins", num_bins, "must be > 0"));
    }
    if is_open.len() != a.n_rows {
        return Err(LamgError::shape(
            KERNEL,
            format!("is_open has length {} but A has {} rows", is_open.len(), a.n_rows),
        ));
    }

    let mut retained: Vec<(usize, Precision)> = Vec::new(); // (1-based id, A_max)
    for &cand in candidates {
        if cand == 0 || cand > a.n_rows {
            return Err(LamgError::shape(KERNEL, format!("candidate id {cand} out of range")));
        }
        let j = cand - 1;
        let (rows, vals) = a.col(j);
        let mut a_max: Option<Precision> = None;
        for (&i, &v) in rows.iter().zip(vals) {
            if is_open[i] {
                a_max = Some(match a_max {
                    Some(cur) => cur.max(v),
                    None => v,
                });
            }
        }
        if let Some(a_max) = a_max {
            retained.push((cand, a_max));
        }
    }

    if retained.is_empty() {
        return Ok(Vec::new());
    }

    let min = retained.iter().map(|&(_, v)| v).fold(Precision::INFINITY, Precision::min);
    let max = retained.iter().map(|&(_, v)| v).fold(Precision::NEG_INFINITY, Precision::max);

    let h = if (max - min).abs() < 1e-15 { 1.0 } else { num_bins as Precision / (max - min) };

    let mut bins = vec![Vec::new(); num_bins];
    for (id, a_max) in retained {
        let mut bin = ((a_max - min) * h).floor() as isize;
        if bin < 0 {
            bin = 0;
        }
        let mut bin = bin as usize;
        if bin >= num_bins {
            bin = num_bins - 1;
        }
        bins[bin].push(id);
    }
    Ok(bins)
}
