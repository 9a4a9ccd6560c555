//! Radix-2 discrete Fourier transform and pointwise complex helpers.
//!
//! Used by auxiliary frequency-domain analyses of intensity traces. The
//! transform is the classic recursive Cooley-Tukey decimation in time and
//! requires a power-of-two length; [`real_spectrum`] pads arbitrary real
//! series for callers that only need a quick periodogram-style view.

use crate::error::KymoError;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Forward DFT of a complex series.
///
/// Fails with [`KymoError::InvalidInput`] when the length is zero or not a
/// power of two.
pub fn transform(x: &[Complex64]) -> Result<Vec<Complex64>, KymoError> {
    let n = x.len();
    if n == 0 || !n.is_power_of_two() {
        return Err(KymoError::InvalidInput(format!(
            "FFT length {n} is not a power of two"
        )));
    }
    Ok(fft_recursive(x))
}

/// Inverse DFT: `conjugate(transform(conjugate(x))) / n`.
///
/// Fails with [`KymoError::InvalidInput`] when the length is zero or not a
/// power of two.
pub fn inverse(x: &[Complex64]) -> Result<Vec<Complex64>, KymoError> {
    let transformed = transform(&conjugate(x))?;
    Ok(scale(&conjugate(&transformed), 1.0 / x.len() as f64))
}

/// Recursive Cooley-Tukey kernel; the caller guarantees a power-of-two length.
fn fft_recursive(x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    if n == 1 {
        return vec![x[0]];
    }

    let even: Vec<Complex64> = (0..n / 2).map(|k| x[2 * k]).collect();
    let odd: Vec<Complex64> = (0..n / 2).map(|k| x[2 * k + 1]).collect();
    let q = fft_recursive(&even);
    let r = fft_recursive(&odd);

    let mut y = vec![Complex64::new(0.0, 0.0); n];
    for k in 0..n / 2 {
        let angle = -2.0 * PI * k as f64 / n as f64;
        let twiddle = Complex64::new(angle.cos(), angle.sin());
        let t = twiddle * r[k];
        y[k] = q[k] + t;
        y[k + n / 2] = q[k] - t;
    }
    y
}

/// Pointwise complex conjugate.
pub fn conjugate(x: &[Complex64]) -> Vec<Complex64> {
    x.iter().map(|c| c.conj()).collect()
}

/// Pointwise product of two series of equal length.
///
/// Extra samples in the longer series are ignored.
pub fn multiply(x: &[Complex64], y: &[Complex64]) -> Vec<Complex64> {
    x.iter().zip(y.iter()).map(|(&a, &b)| a * b).collect()
}

/// Multiply every sample by a real factor.
pub fn scale(x: &[Complex64], factor: f64) -> Vec<Complex64> {
    x.iter().map(|&c| c * factor).collect()
}

/// Real parts of the DFT of a real series, padded to the next power of two.
///
/// The padding value is the series mean, which avoids a step at the end of
/// the data. An empty input yields an empty output.
pub fn real_spectrum(series: &[f64]) -> Vec<f64> {
    if series.is_empty() {
        return Vec::new();
    }
    let mut fft_size = 1;
    while fft_size < series.len() {
        fft_size *= 2;
    }
    let mean = series.iter().sum::<f64>() / series.len() as f64;
    let mut buffer: Vec<Complex64> = series.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    buffer.resize(fft_size, Complex64::new(mean, 0.0));
    fft_recursive(&buffer).iter().map(|c| c.re).collect()
}
