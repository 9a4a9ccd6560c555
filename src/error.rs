//! Error types for the strict numeric primitives.
//!
//! Only the low-level utilities (FFT, Gaussian smoothing, linear regression)
//! fail loudly. The higher-level phase engine and extrema detectors treat
//! degenerate rows and columns as empty data and produce zero-valued output,
//! since partial results remain useful to callers.

use thiserror::Error;

/// Error raised when a numeric primitive's preconditions are violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KymoError {
    /// The input violates a documented precondition, e.g. an FFT length
    /// that is not a power of two, or a series shorter than the smoothing
    /// kernel.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The normal equations of a least-squares fit are singular: fewer
    /// than two points, or no spread in the x values.
    #[error("degenerate fit: {0}")]
    DegenerateFit(String),
}
