//! # kymo-core
//!
//! Core algorithms for kymograph oscillation analysis.
//!
//! Given a time-space intensity map extracted along a line of interest
//! across an image stack, this crate derives oscillation phase, wave
//! counts, peaks and trend lines:
//! - Gabor-wavelet phase maps with a per-column scale schedule
//!   ([`phase::phase_map`], [`phase::phase_profile_map`])
//! - Unwrapped phase profiles and trimmed-range wave counts
//!   ([`phase::PhaseResult`])
//! - Local extrema detection, tolerance-interval and slope-window
//!   ([`extrema`])
//! - Gaussian smoothing with mirror boundary extension ([`smoothing`])
//! - Radix-2 DFT and pointwise complex helpers ([`fft`])
//! - Incremental least-squares regression and outlier filtering
//!   ([`regression`])
//!
//! ## Data Layout
//!
//! Kymographs are column-major [`grid::Grid`]s: row `t` is one time point
//! scanned along space, column `x` is the intensity time series of one
//! spatial position. A sample below [`grid::SENTINEL`] marks the end of a
//! column's valid data; image display, ROI handling and plotting are the
//! caller's concern.

#![allow(clippy::needless_range_loop)]

pub mod parallel;

pub mod error;
pub mod extrema;
pub mod fft;
pub mod grid;
pub mod helpers;
pub mod phase;
pub mod regression;
pub mod smoothing;

// Re-export commonly used items
pub use error::KymoError;
pub use extrema::{slope_extrema, tolerance_extrema, tolerance_extrema_refined, Extremum};
pub use grid::{Grid, SENTINEL};
pub use helpers::RunningStats;
pub use phase::{
    gabor_phase, phase_map, phase_profile_map, phase_trace, wave_count_of, BoundaryMode,
    PhaseMapParams, PhaseResult, ScaleSchedule,
};
pub use regression::{filter_outliers, LinearModel, LinearRegression};
pub use smoothing::GaussianKernel;
