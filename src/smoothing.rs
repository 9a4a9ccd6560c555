//! Discrete Gaussian smoothing for 1D intensity series.
//!
//! Kymograph rows are noisy single-pixel scans; a narrow Gaussian
//! pre-filter stabilizes the wavelet transform without shifting phase
//! (the kernel is symmetric and sums to one).

use crate::error::KymoError;

/// Normalized discrete Gaussian convolution kernel.
///
/// The radius is `ceil(2 * sigma)`, giving `1 + 2 * radius` weights that
/// sum to one. Immutable after construction.
#[derive(Debug, Clone)]
pub struct GaussianKernel {
    radius: usize,
    weights: Vec<f64>,
}

impl GaussianKernel {
    /// Build a kernel for the given standard deviation.
    ///
    /// Fails with [`KymoError::InvalidInput`] when `sigma` is not a positive
    /// finite number.
    pub fn new(sigma: f64) -> Result<Self, KymoError> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(KymoError::InvalidInput(format!(
                "Gaussian sigma must be positive, got {sigma}"
            )));
        }
        let radius = (2.0 * sigma).ceil() as usize;
        let mut weights = Vec::with_capacity(1 + 2 * radius);
        let mut total = 0.0;
        for i in -(radius as isize)..=(radius as isize) {
            let weight = (-0.5 * (i * i) as f64 / (sigma * sigma)).exp();
            weights.push(weight);
            total += weight;
        }
        for weight in &mut weights {
            *weight /= total;
        }
        Ok(Self { radius, weights })
    }

    /// Kernel radius.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Kernel width, `1 + 2 * radius`.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the kernel is empty (never true for a constructed kernel).
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Convolve a series with the kernel using mirror boundary extension.
    ///
    /// The head and tail reflect the valid samples (`data[-1-k]` reads
    /// `data[k]`, `data[n+k]` reads `data[n-1-k]`), so the convolution never
    /// reads outside `data`. The result has the same length as the input;
    /// the input is not mutated.
    ///
    /// Fails with [`KymoError::InvalidInput`] when the series is shorter
    /// than the kernel.
    pub fn smooth(&self, data: &[f64]) -> Result<Vec<f64>, KymoError> {
        let n = data.len();
        if n < self.weights.len() {
            return Err(KymoError::InvalidInput(format!(
                "series of {} samples is shorter than the {}-wide kernel",
                n,
                self.weights.len()
            )));
        }
        let radius = self.radius as isize;
        let result = (0..n as isize)
            .map(|i| {
                let mut value = 0.0;
                for j in -radius..=radius {
                    let p = i + j;
                    let index = if p < 0 {
                        (-1 - p) as usize
                    } else if p >= n as isize {
                        (2 * n as isize - 1 - p) as usize
                    } else {
                        p as usize
                    };
                    value += data[index] * self.weights[(j + radius) as usize];
                }
                value
            })
            .collect();
        Ok(result)
    }
}
