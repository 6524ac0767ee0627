//! `AggregationSweep`: greedy energy-ratio-bounded pairing of nodes with seeds.
//!
//! Grounded in `aggregationsweep.cpp`: bins are visited from the highest
//! index to the lowest (the strongest-connection bins first), each
//! undecided node's admissible seed candidates are filtered by an
//! energy-ratio bound, and the admissible candidate with the highest
//! affinity is chosen, with ties going to whichever was encountered first.

use crate::error::{LamgError, Result};
use crate::matrix::sparse::SparseCsc;
use crate::types::{AggregationStatus, Precision};

const KERNEL: &str = "aggregation_sweep";

/// Everything `AggregationSweep` mutates, returned as fresh copies — the
/// caller's buffers are left untouched, matching the crate's general
/// "kernels own their outputs" policy.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationOutput {
    /// Updated per-node status.
    pub status: Vec<AggregationStatus>,
    /// Updated aggregate sizes.
    pub aggregate_size: Vec<usize>,
    /// Updated aggregate count.
    pub num_aggregates: usize,
    /// Updated test vectors (seed rows copied onto newly absorbed nodes).
    pub x: Vec<Vec<Precision>>,
}

/// Run one aggregation sweep over `bins` (highest index to lowest), pairing
/// undecided nodes with an admissible seed chosen from their open affinity
/// neighbors. `x` holds `K` test vectors as length-`n` columns; `x2` is
/// derived as the elementwise square of `x` rather than required as a
/// separate argument, since it is a pure function of `x`.
#[allow(clippy::too_many_arguments)]
pub fn aggregation_sweep(
    bins: &[Vec<usize>],
    x: &[Vec<Precision>],
    status: &[AggregationStatus],
    aggregate_size: &[usize],
    num_aggregates: usize,
    c: &SparseCsc,
    d: &[Precision],
    w: &SparseCsc,
    ratio_max: Precision,
    max_coarsening_ratio: Precision,
) -> Result<AggregationOutput> {
    let n = w.require_square(KERNEL)?;
    c.check_invariants(KERNEL)?;
    c.require_square(KERNEL)?;
    if c.n_rows != n {
        return Err(LamgError::shape(KERNEL, format!("C is {}x{} but W is {n}x{n}", c.n_rows, c.n_cols)));
    }
    if status.len() != n {
        return Err(LamgError::shape(KERNEL, format!("status has length {} but n={n}", status.len())));
    }
    if aggregate_size.len() != n {
        return Err(LamgError::shape(KERNEL, format!("aggregate_size has length {} but n={n}", aggregate_size.len())));
    }
    if d.len() != n {
        return Err(LamgError::shape(KERNEL, format!("D has length {} but n={n}", d.len())));
    }
    for (k, col) in x.iter().enumerate() {
        if col.len() != n {
            return Err(LamgError::shape(KERNEL, format!("X column {k} has length {} but n={n}", col.len())));
        }
    }

    let k_count = x.len();
    let mut x = x.to_vec();
    let mut status = status.to_vec();
    let mut aggregate_size = aggregate_size.to_vec();
    let mut num_aggregates = num_aggregates;
    let stop_threshold = n as Precision * max_coarsening_ratio;

    'bins: for bin in bins.iter().rev() {
        for &node in bin {
            if node == 0 || node > n {
                return Err(LamgError::shape(KERNEL, format!("candidate id {node} out of range")));
            }
            let i = node - 1;
            if status[i] != AggregationStatus::Undecided {
                continue;
            }

            let (c_rows, c_vals) = c.col(i);
            let ci: Vec<(usize, Precision)> = c_rows
                .iter()
                .zip(c_vals)
                .filter(|&(&j, _)| status[j].is_open())
                .map(|(&j, &v)| (j, v))
                .collect();
            if ci.is_empty() {
                continue;
            }

            let (w_rows, w_vals) = w.col(i);
            let d_i = d[i];
            let d2 = d_i / 2.0;

            let mut r = vec![0.0; k_count];
            let mut q = vec![0.0; k_count];
            for (&j, &w_ij) in w_rows.iter().zip(w_vals) {
                for k in 0..k_count {
                    let xjk = x[k][j];
                    r[k] += w_ij * xjk;
                    q[k] += w_ij * xjk * xjk;
                }
            }

            let mut e = vec![0.0; k_count];
            for k in 0..k_count {
                let y_k = r[k] / d_i;
                e[k] = (d2 * y_k - r[k]) * y_k + q[k];
            }

            let mut best: Option<(usize, Precision)> = None;
            for &(j, affinity) in &ci {
                let mut admissible = true;
                for k in 0..k_count {
                    let xjk = x[k][j];
                    let ec_k = (d2 * xjk - r[k]) * xjk + q[k];
                    let mu_k = ec_k / (e[k] + 1e-15);
                    if mu_k > ratio_max {
                        admissible = false;
                        break;
                    }
                }
                if !admissible {
                    continue;
                }
                match best {
                    Some((_, best_affinity)) if best_affinity >= affinity => {}
                    _ => best = Some((j, affinity)),
                }
            }

            if let Some((s, _)) = best {
                for k in 0..k_count {
                    x[k][i] = x[k][s];
                }
                status[s] = AggregationStatus::Seed;
                status[i] = AggregationStatus::Absorbed(s);
                let new_size = aggregate_size[s] + 1;
                aggregate_size[i] = new_size;
                aggregate_size[s] = new_size;
                num_aggregates -= 1;
            } else {
                log::trace!("aggregation_sweep: node {node} has no admissible seed this pass");
            }
        }

        if num_aggregates as Precision <= stop_threshold {
            log::debug!(
                "aggregation_sweep stopping early: num_aggregates={num_aggregates} <= {stop_threshold}"
            );
            break 'bins;
        }
    }

    Ok(AggregationOutput { status, aggregate_size, num_aggregates, x })
}
