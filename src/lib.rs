//! # Lean Algebraic Multigrid Coarsening Kernels
//!
//! This crate implements the numerical core of Lean Algebraic Multigrid
//! (LAMG) graph coarsening: the nine kernels that build one level of the
//! multigrid hierarchy from a weighted graph Laplacian, plus the sparse
//! container and serialization they operate on.
//!
//! ## Key Pieces
//!
//! - **`SparseCsc`**: compressed-sparse-column storage shared by every kernel.
//! - **Aggregation path**: `AffinityMatrix`, `FilterSmallEntries`, `MedianCol`,
//!   `UndecidedNodes`, `AggregationSweep` build aggregates from node affinities.
//! - **Elimination path**: `LowDegreeSweep`, `EliminationOperators` retire
//!   low-degree nodes directly instead of aggregating them.
//! - **Galerkin projection**: `GalerkinCaliber1`, `GalerkinElimination` build
//!   the coarse operator `Rᵀ·A·P` for each path.
//! - **`GaussSeidel`**: the forward-sweep relaxation smoother run between levels.
//!
//! ## Quick Start
//!
//! ```rust
//! use lamg_core::{SparseCsc, kernels::median_col};
//!
//! let a = SparseCsc::from_triplets(2, 2, &[(0, 0, 1.0), (1, 1, 1.0)]);
//! let x = vec![3.0, 5.0];
//! let y = median_col(&a, &x)?;
//! assert_eq!(y[0], 3.0); // column 0's only non-zero row is row 0
//! # Ok::<(), lamg_core::LamgError>(())
//! ```
//!
//! ## Conventions
//!
//! Node identifiers that cross a kernel boundary (F/C sequences, bin
//! contents, candidate lists) are 1-based, matching the MEX interfaces this
//! crate's kernels are ported from; everything internal to a kernel is
//! 0-based array indexing. Every kernel validates shape and range
//! preconditions up front and reports failures through [`LamgError`] rather
//! than panicking.

#![warn(missing_docs, clippy::all)]
#![allow(clippy::float_cmp)] // Numerical code often requires exact comparisons

pub mod error;
pub mod kernels;
pub mod matrix;
pub mod types;

pub use error::{LamgError, Result};
pub use kernels::{
    affinity_matrix, aggregation_sweep, elimination_operators, filter_small_entries,
    galerkin_caliber1, galerkin_elimination, gauss_seidel, low_degree_sweep, median_col,
    undecided_nodes, AggregationOutput, Caliber1, EliminationOperators, GaussSeidelOutput, TestVectors,
};
pub use matrix::{read_matrix_market, write_matrix_market, CscBuilder, SparseCsc};
pub use types::{
    AbsFlag, AggregationStatus, BoundType, CoarseningParams, EliminationStatus, Index, Precision,
};

/// Version of this crate, as set in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging for the coarsening kernels with a default configuration.
///
/// Call this once at the start of an application that wants to see the
/// kernels' `log::trace!`/`log::debug!` growth and early-exit diagnostics.
#[cfg(feature = "std")]
pub fn init() {
    #[cfg(feature = "env_logger")]
    env_logger::try_init().ok();
}
