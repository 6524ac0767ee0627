//! Common types shared across the coarsening kernels.

use std::fmt;

use crate::error::{LamgError, Result};

/// Floating-point precision used throughout the core. Fixed to `f64` to match
/// the numerical tolerances (`1e-15`) baked into the kernels.
pub type Precision = f64;

/// Index type for array positions. Kept as `usize` internally; 1-based
/// external identifiers (F, C, bins, candidates) convert to/from this at the
/// boundary of each kernel, never in the middle of a loop.
pub type Index = usize;

/// Per-node status during aggregation coarsening.
///
/// `status[i] <= 0` means "open" (undecided or a seed); `status[i] > 0` means
/// "absorbed into the aggregate rooted at seed `status[i] - 1`" (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AggregationStatus {
    /// Node has not yet been assigned to any aggregate.
    Undecided,
    /// Node is the representative of its own aggregate.
    Seed,
    /// Node has been absorbed into the aggregate rooted at this 0-based seed index.
    Absorbed(usize),
}

impl AggregationStatus {
    /// Decode the raw integer coding used by the original MEX interface:
    /// negative = undecided, zero = seed, positive k = absorbed into seed `k - 1`.
    pub fn from_code(code: i64) -> Self {
        if code < 0 {
            AggregationStatus::Undecided
        } else if code == 0 {
            AggregationStatus::Seed
        } else {
            AggregationStatus::Absorbed((code - 1) as usize)
        }
    }

    /// Encode back to the raw integer coding.
    pub fn to_code(self) -> i64 {
        match self {
            AggregationStatus::Undecided => -1,
            AggregationStatus::Seed => 0,
            AggregationStatus::Absorbed(seed) => seed as i64 + 1,
        }
    }

    /// True for undecided or seed nodes (`status <= 0`), the set `AggregationSweep`
    /// treats as open when scanning bins and building `Ci`.
    pub fn is_open(self) -> bool {
        matches!(self, AggregationStatus::Undecided | AggregationStatus::Seed)
    }
}

/// Per-node status during elimination coarsening, matching `elimination.h`'s
/// coding (`LOW_DEGREE=1, HIGH_DEGREE=2, ZERO_DEGREE=3, NOT_ELIMINATED=4`,
/// with 0 meaning unmarked).
///
/// `LowDegreeSweep` only ever writes [`EliminationStatus::LowDegree`] and
/// [`EliminationStatus::NotEliminated`]; `HighDegree` and `ZeroDegree` are
/// part of the status domain the wider elimination path (including the
/// external driver that decides which nodes are even candidates) is defined
/// over, so the enum is closed over all four rather than just the two this
/// crate's kernels produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EliminationStatus {
    /// Not yet classified.
    Unmarked,
    /// Selected for elimination (the F set).
    LowDegree,
    /// Has too many neighbors to eliminate cheaply.
    HighDegree,
    /// Isolated node (no neighbors).
    ZeroDegree,
    /// Excluded from elimination this round (e.g. adjacent to a low-degree node).
    NotEliminated,
}

impl EliminationStatus {
    /// Decode the raw `{0,1,2,3,4}` coding. Codes outside that range are an
    /// external-input error, not a bug to panic on, matching every other
    /// kernel's `Result`-based failure reporting.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(EliminationStatus::Unmarked),
            1 => Ok(EliminationStatus::LowDegree),
            2 => Ok(EliminationStatus::HighDegree),
            3 => Ok(EliminationStatus::ZeroDegree),
            4 => Ok(EliminationStatus::NotEliminated),
            other => Err(LamgError::range("elimination_status", "code", other, "must be in 0..=4")),
        }
    }

    /// Encode back to the raw `{0,1,2,3,4}` coding.
    pub fn to_code(self) -> i64 {
        match self {
            EliminationStatus::Unmarked => 0,
            EliminationStatus::LowDegree => 1,
            EliminationStatus::HighDegree => 2,
            EliminationStatus::ZeroDegree => 3,
            EliminationStatus::NotEliminated => 4,
        }
    }
}

/// Whether [`crate::kernels::filter::filter_small_entries`] compares raw
/// values or their absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbsFlag {
    /// Compare `A[i,j]` directly.
    Value,
    /// Compare `|A[i,j]|`.
    Abs,
}

/// Whether the per-edge bound in [`crate::kernels::filter::filter_small_entries`]
/// is the max or the min of the two endpoint bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundType {
    /// `g(b_i, b_j) = min(b_i, b_j)`.
    Min,
    /// `g(b_i, b_j) = max(b_i, b_j)`.
    Max,
}

/// Tunable parameters for the aggregation coarsening path, bundled together
/// for ergonomic call sites (the kernels themselves still take plain scalar
/// arguments, matching the source's flat MEX argument lists).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoarseningParams {
    /// Number of bins `UndecidedNodes` partitions candidates into.
    pub num_bins: usize,
    /// Maximum admissible energy ratio μ for a candidate seed.
    pub ratio_max: Precision,
    /// Stop aggregating once `num_aggregates <= n * max_coarsening_ratio`.
    pub max_coarsening_ratio: Precision,
}

impl Default for CoarseningParams {
    fn default() -> Self {
        CoarseningParams {
            num_bins: 10,
            ratio_max: 2.0,
            max_coarsening_ratio: 0.5,
        }
    }
}

impl fmt::Display for CoarseningParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CoarseningParams {{ num_bins: {}, ratio_max: {}, max_coarsening_ratio: {} }}",
            self.num_bins, self.ratio_max, self.max_coarsening_ratio
        )
    }
}
