//! Parallel iteration abstraction.
//!
//! The per-column phase transform and the per-row profile extraction are
//! pure functions of read-only input, so they parallelize trivially. This
//! module provides conditional parallel/sequential iteration based on the
//! `parallel` feature flag: with the feature enabled, rayon drives the
//! iteration; without it, the same code runs sequentially (useful for WASM
//! and for debugging).

/// Macro for conditionally parallel iteration over ranges and owned
/// collections.
///
/// When the `parallel` feature is enabled, uses `into_par_iter()`.
/// Otherwise, uses `into_iter()` for sequential execution.
///
/// # Examples
///
/// ```ignore
/// use crate::iter_maybe_parallel;
///
/// let phases: Vec<_> = iter_maybe_parallel!((0..width))
///     .map(|x| transform_column(x))
///     .collect();
/// ```
#[macro_export]
macro_rules! iter_maybe_parallel {
    ($expr:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::IntoParallelIterator;

            IntoParallelIterator::into_par_iter($expr)
        }
        #[cfg(not(feature = "parallel"))]
        {
            IntoIterator::into_iter($expr)
        }
    }};
}

pub use iter_maybe_parallel;
