//! `LowDegreeSweep`: independent-set sweep for elimination partitioning.
//!
//! Grounded in `lowdegreesweep.cpp`. `A`'s diagonal (if stored) is treated
//! like any other entry and is skipped only by the `j != i` guard, matching
//! the source's comment "ignore diagonal elements" — it does not special-case
//! an explicitly-stored self-loop beyond that.

use crate::error::{LamgError, Result};
use crate::matrix::sparse::SparseCsc;
use crate::types::EliminationStatus;

const KERNEL: &str = "low_degree_sweep";

/// For each `candidate` (1-based, in order), if still unmarked: mark it
/// `LowDegree` and every other neighbor `NotEliminated`, unless one of its
/// neighbors is already `LowDegree`, in which case it becomes `NotEliminated`
/// instead. The resulting `LowDegree` set is independent in `a`'s graph.
pub fn low_degree_sweep(
    status: &[EliminationStatus],
    a: &SparseCsc,
    candidates: &[usize],
) -> Result<Vec<EliminationStatus>> {
    a.check_invariants(KERNEL)?;
    let n = a.require_square(KERNEL)?;
    if status.len() != n {
        return Err(LamgError::shape(KERNEL, format!("status has length {} but n={n}", status.len())));
    }

    let mut status = status.to_vec();
    for &cand in candidates {
        if cand == 0 || cand > n {
            return Err(LamgError::shape(KERNEL, format!("candidate id {cand} out of range")));
        }
        let i = cand - 1;
        if status[i] != EliminationStatus::Unmarked {
            continue;
        }

        let (rows, _) = a.col(i);
        let has_low_degree_neighbor = rows.iter().any(|&j| j != i && status[j] == EliminationStatus::LowDegree);

        if has_low_degree_neighbor {
            status[i] = EliminationStatus::NotEliminated;
        } else {
            status[i] = EliminationStatus::LowDegree;
            for &j in rows {
                if j != i {
                    status[j] = EliminationStatus::NotEliminated;
                }
            }
        }
    }
    Ok(status)
}
