//! Incremental least-squares linear regression.
//!
//! [`LinearRegression`] accumulates sufficient statistics in O(1) per point
//! and solves the 2x2 normal-equations system lazily. It backs the
//! detrending helper and the slope-window extrema detector.

use crate::error::KymoError;
use crate::helpers::{RunningStats, NUMERICAL_EPS};

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearModel {
    /// Evaluate the line at `x`.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Evaluate the line at every sample of `x`.
    pub fn predict_series(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&xi| self.predict(xi)).collect()
    }

    /// Signed residual `y - predict(x)`.
    #[inline]
    pub fn residual(&self, x: f64, y: f64) -> f64 {
        y - self.predict(x)
    }
}

/// Accumulates (x, y) pairs and fits `y = a * x + b` on demand.
///
/// The fit is cached and invalidated whenever a new point is added.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    sx: f64,
    sxx: f64,
    sy: f64,
    sxy: f64,
    count: usize,
    cached: Option<LinearModel>,
}

impl LinearRegression {
    /// Create an empty regression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a regression over paired samples.
    ///
    /// Extra samples in the longer slice are ignored.
    pub fn from_pairs(x: &[f64], y: &[f64]) -> Self {
        let mut regression = Self::new();
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            regression.add(xi, yi);
        }
        regression
    }

    /// Accumulate one (x, y) pair in O(1) and invalidate the cached fit.
    pub fn add(&mut self, x: f64, y: f64) {
        self.sx += x;
        self.sxx += x * x;
        self.sy += y;
        self.sxy += x * y;
        self.count += 1;
        self.cached = None;
    }

    /// Number of accumulated points.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Discard all accumulated points.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Solve the normal equations, caching the result.
    ///
    /// Fails with [`KymoError::DegenerateFit`] when fewer than two points
    /// were added or all x values coincide (singular system).
    pub fn fit(&mut self) -> Result<LinearModel, KymoError> {
        if let Some(model) = self.cached {
            return Ok(model);
        }
        if self.count < 2 {
            return Err(KymoError::DegenerateFit(format!(
                "need at least 2 points, got {}",
                self.count
            )));
        }
        let n = self.count as f64;
        let det = n * self.sxx - self.sx * self.sx;
        if det.abs() < NUMERICAL_EPS {
            return Err(KymoError::DegenerateFit(
                "no spread in x values".to_string(),
            ));
        }
        let model = LinearModel {
            slope: (n * self.sxy - self.sx * self.sy) / det,
            intercept: (self.sxx * self.sy - self.sx * self.sxy) / det,
        };
        self.cached = Some(model);
        Ok(model)
    }
}

/// Filter out pairs that deviate strongly from a fitted line.
///
/// A pair is an outlier when its absolute residual exceeds
/// `tolerance` times the mean absolute residual over all pairs. Retained
/// pairs are returned in their original order as `(x, y)` vectors.
pub fn filter_outliers(
    model: &LinearModel,
    x: &[f64],
    y: &[f64],
    tolerance: f64,
) -> (Vec<f64>, Vec<f64>) {
    let mut stats = RunningStats::new();
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        stats.add(model.residual(xi, yi).abs());
    }
    let threshold = tolerance * stats.mean();

    let mut kept_x = Vec::new();
    let mut kept_y = Vec::new();
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        if model.residual(xi, yi).abs() <= threshold {
            kept_x.push(xi);
            kept_y.push(yi);
        }
    }
    (kept_x, kept_y)
}
