//! Small numeric helpers shared across the crate.
//!
//! Range generation, sub-series extraction, outlier trimming and linear
//! detrending operate on plain `&[f64]` series and return fresh vectors.

use crate::regression::LinearRegression;

/// Small epsilon for numerical comparisons (e.g., singularity checks).
pub const NUMERICAL_EPS: f64 = 1e-10;

/// Generate the values `start, start + step, ...` up to and including `end`.
///
/// Returns an empty vector when `end < start` or `step <= 0`.
pub fn range(start: f64, end: f64, step: f64) -> Vec<f64> {
    if end < start || step <= 0.0 {
        return Vec::new();
    }
    let len = ((end - start) / step).floor() as usize + 1;
    (0..len).map(|i| start + step * i as f64).collect()
}

/// Generate the integer-spaced values `start, start + 1, ..., end`.
pub fn index_range(start: f64, end: f64) -> Vec<f64> {
    range(start, end, 1.0)
}

/// Natural logarithm of every sample.
pub fn log_series(series: &[f64]) -> Vec<f64> {
    series.iter().map(|&v| v.ln()).collect()
}

/// Copy of `series[start..end)`, with `end` clamped to the series length.
///
/// Returns an empty vector when `start >= end`.
pub fn sub_series(series: &[f64], start: usize, end: usize) -> Vec<f64> {
    let end = end.min(series.len());
    if start >= end {
        return Vec::new();
    }
    series[start..end].to_vec()
}

/// Trim leading and trailing outliers from a series.
///
/// Samples at either end deviating more than `tolerance` standard
/// deviations from the series mean are dropped; interior samples are never
/// removed. When the two trims meet, as for a two-sample series whose ends
/// are both outliers, the result is empty.
pub fn trim_outliers(series: &[f64], tolerance: f64) -> Vec<f64> {
    if series.is_empty() {
        return Vec::new();
    }
    let mut stats = RunningStats::new();
    for &value in series {
        stats.add(value);
    }
    let threshold = tolerance * stats.standard_deviation();
    let mean = stats.mean();

    let mut start = 0;
    while start < series.len() - 1 && (series[start] - mean).abs() > threshold {
        start += 1;
    }
    let mut end = series.len();
    while end > 1 && (series[end - 1] - mean).abs() > threshold {
        end -= 1;
    }
    if start == 0 && end == series.len() {
        series.to_vec()
    } else {
        sub_series(series, start, end)
    }
}

/// Remove the least-squares line from a series (e.g. photobleaching decay).
///
/// The line is fit against the sample indices. Series too short or too flat
/// for a fit are returned unchanged.
pub fn detrend(series: &[f64]) -> Vec<f64> {
    let mut regression = LinearRegression::new();
    for (i, &value) in series.iter().enumerate() {
        regression.add(i as f64, value);
    }
    match regression.fit() {
        Ok(model) => series
            .iter()
            .enumerate()
            .map(|(i, &value)| value - model.predict(i as f64))
            .collect(),
        Err(_) => series.to_vec(),
    }
}

/// Incremental accumulator for count, mean, variance and standard deviation.
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl RunningStats {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one sample in O(1).
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.sum_sq += value * value;
        self.count += 1;
    }

    /// Number of accumulated samples.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sample mean, or 0 when empty.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Population variance, or 0 when empty.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        ((self.sum_sq - self.sum * self.sum / n) / n).max(0.0)
    }

    /// Population standard deviation.
    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }
}
