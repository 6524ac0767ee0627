//! Error types for the LAMG coarsening kernels.
//!
//! Every kernel validates its inputs before doing any allocation and reports
//! failures through [`LamgError`]. The source's error taxonomy names five
//! kinds (shape, type, count, enumeration, range), but count and enumeration
//! errors belong to a MEX/FFI boundary this crate doesn't have: argument
//! arity is fixed at compile time (no variadic argument lists to miscount),
//! and `abs_flag`/`bound_type` are closed Rust enums rather than
//! runtime-checked tags (so there's no "unrecognized value" to reject). Only
//! the three kinds an in-process kernel can actually raise are modeled here.
//!
//! Each variant carries the name of the kernel that raised it so that
//! `to_string()` always reads as `"<kernel>: <detail>"`.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LamgError>;

/// Errors raised by the coarsening kernels.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LamgError {
    /// A matrix was not square when the kernel requires it, or two arguments
    /// disagree on `n`, or a vector's length does not match the matrix dimension.
    #[error("{kernel}: shape error: {detail}")]
    Shape {
        /// Kernel that raised the error.
        kernel: &'static str,
        /// Human-readable detail.
        detail: String,
    },

    /// An input was not of the expected kind (e.g. a malformed field while
    /// parsing a Matrix Market file).
    #[error("{kernel}: type error: {detail}")]
    Type {
        /// Kernel that raised the error.
        kernel: &'static str,
        /// Human-readable detail.
        detail: String,
    },

    /// A numeric argument fell outside its required range (e.g. `num_bins <= 0`).
    #[error("{kernel}: range error: {field} = {value}, {constraint}")]
    Range {
        /// Kernel that raised the error.
        kernel: &'static str,
        /// Name of the offending field.
        field: &'static str,
        /// The out-of-range value, rendered for diagnostics.
        value: String,
        /// Description of the required range.
        constraint: &'static str,
    },
}

impl LamgError {
    /// Build a [`LamgError::Shape`] error.
    pub fn shape(kernel: &'static str, detail: impl Into<String>) -> Self {
        LamgError::Shape { kernel, detail: detail.into() }
    }

    /// Build a [`LamgError::Type`] error.
    pub fn type_err(kernel: &'static str, detail: impl Into<String>) -> Self {
        LamgError::Type { kernel, detail: detail.into() }
    }

    /// Build a [`LamgError::Range`] error.
    pub fn range(
        kernel: &'static str,
        field: &'static str,
        value: impl std::fmt::Display,
        constraint: &'static str,
    ) -> Self {
        LamgError::Range { kernel, field, value: value.to_string(), constraint }
    }
}
