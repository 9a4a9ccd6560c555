//! Gabor-wavelet phase transform for kymographs.
//!
//! Every column of a kymograph [`Grid`] is the intensity time series of one
//! spatial position; its oscillation phase at each time point is the
//! argument of the inner product with a scale-matched Gabor wavelet (a
//! cosine/sine pair under a Gaussian envelope, angular frequency 6). From
//! the resulting phase map the engine derives reference-subtracted phase
//! profiles and per-time-point wave counts.
//!
//! Degenerate rows and columns (sentinel at index 0, short series) produce
//! zero-valued output rather than errors; only configuration errors fail
//! fast.

use crate::error::KymoError;
use crate::grid::Grid;
use crate::iter_maybe_parallel;
use crate::smoothing::GaussianKernel;
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;
use std::cmp::Ordering;
use std::f64::consts::PI;

/// Angular frequency of the analyzing wavelet.
const OMEGA0: f64 = 6.0;

/// Number of reflected virtual samples on each side in mirrored mode.
const MIRROR_SUPPORT: usize = 30;

/// Samples trimmed from either tail of a sorted profile before taking its
/// range as a wave-count estimate.
const WAVE_COUNT_CUTOFF: usize = 2;

/// Center-frequency constant of the angular-frequency-6 wavelet:
/// `4 * PI / (6 + sqrt(2 + 36))`. A wavelet at scale `s` is tuned to
/// oscillations of period `s * fourier_period()`.
pub fn fourier_period() -> f64 {
    4.0 * PI / (OMEGA0 + (2.0 + OMEGA0 * OMEGA0).sqrt())
}

/// Boundary handling of the wavelet inner product near the ends of a
/// column's valid data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Sum only over the valid samples. The Gaussian envelope is clipped
    /// at the boundaries, biasing phases near the edges.
    Truncated,
    /// Additionally include up to 30 virtual samples reflected from each
    /// boundary, tapering under the envelope. Changes output near the row
    /// boundaries only.
    Mirrored,
}

/// Piecewise-linear schedule mapping a column index to a wavelet scale.
///
/// The voice number is `sigma0` up to column `x0`, `sigma1` from column
/// `x1` on, and linearly interpolated in between; the scale is
/// `2^(octave_number - 1 + voice / voices_per_octave) / fourier_period()`.
#[derive(Debug, Clone, Copy)]
pub struct ScaleSchedule {
    x0: f64,
    x1: f64,
    sigma0: f64,
    sigma1: f64,
    octave_number: f64,
    voices_per_octave: f64,
}

impl ScaleSchedule {
    /// Extract the schedule part of a parameter set.
    pub fn from_params(params: &PhaseMapParams) -> Self {
        Self {
            x0: params.x0,
            x1: params.x1,
            sigma0: params.sigma0,
            sigma1: params.sigma1,
            octave_number: params.octave_number,
            voices_per_octave: params.voices_per_octave,
        }
    }

    /// Voice number at column `x`.
    pub fn voice(&self, x: f64) -> f64 {
        if x <= self.x0 {
            self.sigma0
        } else if x >= self.x1 {
            self.sigma1
        } else {
            self.sigma0 + (x - self.x0) * (self.sigma1 - self.sigma0) / (self.x1 - self.x0)
        }
    }

    /// Wavelet scale at column `x`.
    pub fn scale(&self, x: f64) -> f64 {
        (self.octave_number - 1.0 + self.voice(x) / self.voices_per_octave).exp2()
            / fourier_period()
    }
}

/// Configuration of the phase transform.
///
/// All values are validated by range before use; out-of-range values fail
/// fast with [`KymoError::InvalidInput`].
#[derive(Debug, Clone)]
pub struct PhaseMapParams {
    /// Octave of the wavelet scale schedule.
    pub octave_number: f64,
    /// Subdivision of each octave.
    pub voices_per_octave: f64,
    /// Sigma of the Gaussian pre-filter applied to every row.
    pub gauss_sigma: f64,
    /// Column up to which the voice number stays at `sigma0`.
    pub x0: f64,
    /// Column from which the voice number stays at `sigma1`.
    pub x1: f64,
    /// Voice number at and before `x0`.
    pub sigma0: f64,
    /// Voice number at and after `x1`.
    pub sigma1: f64,
    /// Reference column for the phase-profile map.
    pub subtraction_point: usize,
    /// Boundary handling of the wavelet inner product.
    pub boundary_mode: BoundaryMode,
}

impl Default for PhaseMapParams {
    /// Defaults matching routine somite-clock kymographs: octave 4 with 50
    /// voices, a narrow pre-filter, and a voice ramp from 5 to 20 between
    /// columns 100 and 400.
    fn default() -> Self {
        Self {
            octave_number: 4.0,
            voices_per_octave: 50.0,
            gauss_sigma: 0.5,
            x0: 100.0,
            x1: 400.0,
            sigma0: 5.0,
            sigma1: 20.0,
            subtraction_point: 0,
            boundary_mode: BoundaryMode::Truncated,
        }
    }
}

impl PhaseMapParams {
    /// Range-check all numeric fields.
    pub fn validate(&self) -> Result<(), KymoError> {
        for (name, value) in [
            ("octave_number", self.octave_number),
            ("voices_per_octave", self.voices_per_octave),
            ("gauss_sigma", self.gauss_sigma),
            ("x0", self.x0),
            ("x1", self.x1),
            ("sigma0", self.sigma0),
            ("sigma1", self.sigma1),
        ] {
            if !value.is_finite() {
                return Err(KymoError::InvalidInput(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.gauss_sigma <= 0.0 {
            return Err(KymoError::InvalidInput(format!(
                "gauss_sigma must be positive, got {}",
                self.gauss_sigma
            )));
        }
        if self.voices_per_octave <= 0.0 {
            return Err(KymoError::InvalidInput(format!(
                "voices_per_octave must be positive, got {}",
                self.voices_per_octave
            )));
        }
        if self.x0 > self.x1 {
            return Err(KymoError::InvalidInput(format!(
                "x0 ({}) must not exceed x1 ({})",
                self.x0, self.x1
            )));
        }
        Ok(())
    }
}

/// Phase map of a kymograph plus the per-column valid lengths.
///
/// `phase[(t, x)]` is the instantaneous phase in `(-PI, PI]` of column `x`
/// at time `t` where `t < data_sizes[x]`, and `0.0` past the valid data.
#[derive(Debug, Clone)]
pub struct PhaseResult {
    pub phase: Grid,
    pub data_sizes: Vec<usize>,
}

impl PhaseResult {
    /// Number of leading columns with valid data at row `t`.
    pub fn row_valid_length(&self, t: usize) -> usize {
        self.data_sizes
            .iter()
            .position(|&size| size <= t)
            .unwrap_or(self.data_sizes.len())
    }

    /// Unwrapped phase profile of row `t`.
    ///
    /// Takes the row's values up to its valid length and removes apparent
    /// discontinuities: whenever a consecutive difference reaches half of
    /// PI in magnitude, a multiple of PI is subtracted cumulatively.
    ///
    /// Note the unwrap step works in units of PI, not 2 * PI, preserving the
    /// behavior of the original analysis; half-cycle jumps are corrected
    /// alongside full wraps. Pinned by `test_unwrap_corrects_half_cycle`.
    pub fn profile(&self, t: usize) -> Vec<f64> {
        if t >= self.phase.nrows() {
            return Vec::new();
        }
        let len = self.row_valid_length(t);
        let mut profile: Vec<f64> = (0..len).map(|x| self.phase[(t, x)]).collect();
        for i in 1..profile.len() {
            let jump = (profile[i] - profile[i - 1]) / PI;
            if jump.abs() >= 0.5 {
                profile[i] -= PI * jump.round();
            }
        }
        profile
    }

    /// Trimmed-range wave-count estimate for row `t`.
    ///
    /// The profile is sorted and the range between the two tails, with
    /// [`WAVE_COUNT_CUTOFF`] minus one samples trimmed from each end, is
    /// divided by 2 * PI. Robust to a couple of outlier samples; rows with
    /// profiles no longer than the cutoff yield 0.
    pub fn wave_count(&self, t: usize) -> f64 {
        wave_count_of(&self.profile(t))
    }

    /// Wave counts for every row.
    pub fn wave_counts(&self) -> Vec<f64> {
        (0..self.phase.nrows()).map(|t| self.wave_count(t)).collect()
    }
}

/// Trimmed-range wave count of an unwrapped profile.
pub fn wave_count_of(profile: &[f64]) -> f64 {
    let len = profile.len();
    if len <= WAVE_COUNT_CUTOFF {
        return 0.0;
    }
    let mut sorted = profile.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    (sorted[len - WAVE_COUNT_CUTOFF] - sorted[WAVE_COUNT_CUTOFF - 1]) / (2.0 * PI)
}

/// Instantaneous Gabor phase of `data[..data_size]` at position `t`.
///
/// Computes `atan2` of the imaginary and real inner products with the
/// wavelet `exp(-u^2 / 2) * (cos(6u) - i sin(6u))`, `u = (i - t) / scale`.
/// The result lies in `(-PI, PI]`. Degenerate input (`data_size` 0 or past
/// the slice, non-positive scale) yields 0.
pub fn gabor_phase(
    data: &[f64],
    data_size: usize,
    scale: f64,
    t: usize,
    mode: BoundaryMode,
) -> f64 {
    if data_size == 0 || data_size > data.len() || !(scale > 0.0) {
        return 0.0;
    }
    let mut w_re = 0.0;
    let mut w_im = 0.0;
    let mut accumulate = |position: isize, sample: f64| {
        let u = (position as f64 - t as f64) / scale;
        let envelope = (-u * u / 2.0).exp();
        w_re += sample * (OMEGA0 * u).cos() * envelope;
        w_im -= sample * (OMEGA0 * u).sin() * envelope;
    };

    if mode == BoundaryMode::Mirrored {
        let support = MIRROR_SUPPORT.min(data_size);
        // Virtual sample at -1-k reflects data[k].
        for k in 0..support {
            accumulate(-1 - k as isize, data[k]);
        }
        // Virtual sample at data_size+k reflects data[data_size-1-k].
        for k in 0..support {
            accumulate((data_size + k) as isize, data[data_size - 1 - k]);
        }
    }
    for (i, &sample) in data[..data_size].iter().enumerate() {
        accumulate(i as isize, sample);
    }

    let phase = w_im.atan2(w_re);
    // atan2 returns -PI for a negative-zero imaginary part; fold it onto PI
    // so the result stays in (-PI, PI].
    if phase <= -PI {
        phase + 2.0 * PI
    } else {
        phase
    }
}

/// Phase of a single intensity trace at every position.
///
/// Convenience wrapper around [`gabor_phase`] for callers analyzing one
/// series without building a grid; the whole slice is taken as valid.
pub fn phase_trace(data: &[f64], scale: f64, mode: BoundaryMode) -> Vec<f64> {
    (0..data.len())
        .map(|t| gabor_phase(data, data.len(), scale, t, mode))
        .collect()
}

/// Compute the phase map of a kymograph.
///
/// Every row is smoothed with a Gaussian pre-filter, then every column's
/// valid prefix (up to the first sample below [`crate::grid::SENTINEL`]) is
/// transformed with the wavelet at its scheduled scale. Cells past a
/// column's valid data stay 0. Columns are processed independently, in
/// parallel when the `parallel` feature is enabled.
///
/// Fails fast on invalid configuration; degenerate data never fails.
pub fn phase_map(kymograph: &Grid, params: &PhaseMapParams) -> Result<PhaseResult, KymoError> {
    params.validate()?;
    let (height, width) = kymograph.shape();
    let kernel = GaussianKernel::new(params.gauss_sigma)?;

    // Pre-filter along space; rows shorter than the kernel stay unsmoothed.
    let mut smoothed = kymograph.clone();
    for t in 0..height {
        if let Ok(row) = kernel.smooth(&smoothed.row(t)) {
            smoothed.set_row(t, &row);
        }
    }

    let schedule = ScaleSchedule::from_params(params);
    let columns: Vec<(Vec<f64>, usize)> = iter_maybe_parallel!((0..width))
        .map(|x| {
            let column = smoothed.column(x);
            let data_size = smoothed.data_size(x);
            let scale = schedule.scale(x as f64);
            let mut phases = vec![0.0; height];
            for t in 0..data_size {
                phases[t] = gabor_phase(column, data_size, scale, t, params.boundary_mode);
            }
            (phases, data_size)
        })
        .collect();

    let mut phase = Grid::zeros(height, width);
    let mut data_sizes = Vec::with_capacity(width);
    for (x, (phases, data_size)) in columns.into_iter().enumerate() {
        phase.column_mut(x).copy_from_slice(&phases);
        data_sizes.push(data_size);
    }
    Ok(PhaseResult { phase, data_sizes })
}

/// Compute the phase-difference ("phase profile") map of a kymograph.
///
/// Like [`phase_map`], but every valid cell holds the signed difference to
/// the phase at the reference column `subtraction_point` in the same row,
/// re-wrapped into `[-PI, PI)`. Cells past a column's valid data stay 0.
pub fn phase_profile_map(
    kymograph: &Grid,
    params: &PhaseMapParams,
) -> Result<PhaseResult, KymoError> {
    if params.subtraction_point >= kymograph.ncols() {
        return Err(KymoError::InvalidInput(format!(
            "subtraction_point {} out of range for {} columns",
            params.subtraction_point,
            kymograph.ncols()
        )));
    }
    let result = phase_map(kymograph, params)?;
    let (height, width) = result.phase.shape();

    let mut referenced = Grid::zeros(height, width);
    for t in 0..height {
        let reference = result.phase[(t, params.subtraction_point)];
        for x in 0..width {
            if t < result.data_sizes[x] {
                referenced[(t, x)] = wrap_signed(result.phase[(t, x)] - reference);
            }
        }
    }
    Ok(PhaseResult {
        phase: referenced,
        data_sizes: result.data_sizes,
    })
}

/// Reduce a phase difference into `[-PI, PI)` via `+PI, mod 2 PI, -PI`.
/// A difference equivalent to PI maps to -PI.
fn wrap_signed(difference: f64) -> f64 {
    (difference + PI).rem_euclid(2.0 * PI) - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SENTINEL;

    fn tuned_params(voice: f64) -> PhaseMapParams {
        // Constant-scale schedule; wavelet period is 2^(3 + voice / 50).
        PhaseMapParams {
            sigma0: voice,
            sigma1: voice,
            x0: 0.0,
            x1: 0.0,
            ..PhaseMapParams::default()
        }
    }

    /// Kymograph of a traveling wave: temporal period `p_t`, spatial
    /// period `p_s`, offset well above the sentinel.
    fn traveling_wave(height: usize, width: usize, p_t: f64, p_s: f64) -> Grid {
        let mut grid = Grid::zeros(height, width);
        for x in 0..width {
            for t in 0..height {
                let angle = 2.0 * PI * (t as f64 / p_t - x as f64 / p_s);
                grid[(t, x)] = 100.0 + 50.0 * angle.sin();
            }
        }
        grid
    }

    #[test]
    fn test_fourier_period_constant() {
        // 4 pi / (6 + sqrt(38))
        assert!((fourier_period() - 1.033043).abs() < 1e-5);
    }

    #[test]
    fn test_scale_schedule_piecewise() {
        let params = PhaseMapParams::default();
        let schedule = ScaleSchedule::from_params(&params);
        assert_eq!(schedule.voice(0.0), 5.0);
        assert_eq!(schedule.voice(100.0), 5.0);
        assert_eq!(schedule.voice(400.0), 20.0);
        assert_eq!(schedule.voice(500.0), 20.0);
        assert!((schedule.voice(250.0) - 12.5).abs() < 1e-12);
        // Scale is monotone along the ramp.
        assert!(schedule.scale(250.0) > schedule.scale(100.0));
        assert!(schedule.scale(400.0) > schedule.scale(250.0));
    }

    #[test]
    fn test_params_validation() {
        let mut params = PhaseMapParams::default();
        assert!(params.validate().is_ok());
        params.gauss_sigma = 0.0;
        assert!(matches!(params.validate(), Err(KymoError::InvalidInput(_))));

        let mut params = PhaseMapParams::default();
        params.x0 = 5.0;
        params.x1 = 1.0;
        assert!(params.validate().is_err());

        let mut params = PhaseMapParams::default();
        params.voices_per_octave = -1.0;
        assert!(params.validate().is_err());

        let mut params = PhaseMapParams::default();
        params.sigma1 = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_gabor_phase_range() {
        let data: Vec<f64> = (0..64).map(|i| 100.0 + (i as f64 * 0.7).sin() * 30.0).collect();
        for mode in [BoundaryMode::Truncated, BoundaryMode::Mirrored] {
            for t in 0..64 {
                let phase = gabor_phase(&data, 64, 8.0, t, mode);
                assert!(
                    phase > -PI && phase <= PI,
                    "phase {phase} at t={t} out of range"
                );
            }
        }
    }

    #[test]
    fn test_gabor_phase_degenerate() {
        assert_eq!(gabor_phase(&[], 0, 8.0, 0, BoundaryMode::Truncated), 0.0);
        assert_eq!(gabor_phase(&[1.0], 5, 8.0, 0, BoundaryMode::Truncated), 0.0);
        assert_eq!(gabor_phase(&[1.0, 2.0], 2, 0.0, 0, BoundaryMode::Truncated), 0.0);
    }

    #[test]
    fn test_phase_advances_with_time() {
        // A sinusoid tuned to the wavelet scale yields a phase that advances
        // by about 2 pi / p per time step in the interior.
        let p = 12.0;
        let scale = p / fourier_period();
        let data: Vec<f64> = (0..96)
            .map(|t| 100.0 + 50.0 * (2.0 * PI * t as f64 / p).sin())
            .collect();
        let phases = phase_trace(&data, scale, BoundaryMode::Mirrored);
        for t in 30..66 {
            let mut step = phases[t + 1] - phases[t];
            if step <= -PI {
                step += 2.0 * PI;
            }
            assert!(
                (step - 2.0 * PI / p).abs() < 0.05,
                "step {step} at t={t}, expected {}",
                2.0 * PI / p
            );
        }
    }

    #[test]
    fn test_boundary_modes_agree_in_interior() {
        let p = 12.0;
        let scale = p / fourier_period();
        let data: Vec<f64> = (0..96)
            .map(|t| 100.0 + 50.0 * (2.0 * PI * t as f64 / p).sin())
            .collect();
        let truncated = phase_trace(&data, scale, BoundaryMode::Truncated);
        let mirrored = phase_trace(&data, scale, BoundaryMode::Mirrored);
        // Compare modulo 2 pi: near the branch cut one mode may report just
        // below pi and the other just above -pi for the same angle.
        for t in 44..52 {
            let diff = wrap_signed(truncated[t] - mirrored[t]);
            assert!(
                diff.abs() < 1e-2,
                "interior t={t}: {} vs {}",
                truncated[t],
                mirrored[t]
            );
        }
        // Near the boundary the modes genuinely differ.
        let edge_diff: f64 = (0..4)
            .map(|t| wrap_signed(truncated[t] - mirrored[t]).abs())
            .sum();
        assert!(edge_diff > 1e-6);
    }

    #[test]
    fn test_phase_map_sentinel_truncation() {
        let mut grid = traveling_wave(40, 8, 10.0, 4.0);
        // Columns 4-6 turn to background after t = 25; the band is wide
        // enough that the row pre-filter cannot smear valid intensity into
        // the middle column.
        for t in 25..40 {
            for x in 4..7 {
                grid[(t, x)] = SENTINEL - 1.0;
            }
        }
        let result = phase_map(&grid, &tuned_params(10.0)).unwrap();
        assert_eq!(result.data_sizes[5], 25);
        for t in 25..40 {
            assert_eq!(result.phase[(t, 5)], 0.0);
        }
        assert_eq!(result.row_valid_length(10), 8);
        assert_eq!(result.row_valid_length(30), 5);
    }

    #[test]
    fn test_phase_map_empty_column_is_zero() {
        let mut grid = traveling_wave(30, 4, 10.0, 4.0);
        for t in 0..30 {
            for x in 1..4 {
                grid[(t, x)] = 0.0;
            }
        }
        let result = phase_map(&grid, &tuned_params(10.0)).unwrap();
        assert_eq!(result.data_sizes[2], 0);
        assert_eq!(result.data_sizes[3], 0);
        assert!(result.phase.column(2).iter().all(|&v| v == 0.0));
        assert_eq!(result.row_valid_length(0), 2);
        assert_eq!(result.wave_count(0), 0.0); // profile of 2 samples <= cutoff
    }

    #[test]
    fn test_phase_map_rejects_bad_config() {
        let grid = traveling_wave(20, 4, 10.0, 4.0);
        let mut params = tuned_params(10.0);
        params.gauss_sigma = -1.0;
        assert!(phase_map(&grid, &params).is_err());
    }

    #[test]
    fn test_phase_profile_map_reference_column_is_zero() {
        let grid = traveling_wave(64, 16, 9.19, 8.0);
        let mut params = tuned_params(10.0);
        params.subtraction_point = 3;
        let result = phase_profile_map(&grid, &params).unwrap();
        for t in 0..64 {
            assert_eq!(result.phase[(t, 3)], 0.0);
        }
        // All values re-wrapped into [-PI, PI).
        for x in 0..16 {
            for t in 0..64 {
                let v = result.phase[(t, x)];
                assert!(v >= -PI - 1e-12 && v < PI + 1e-12);
            }
        }
    }

    #[test]
    fn test_wrap_signed_half_open_range() {
        // The +PI / mod 2 PI / -PI reduction is half-open on the right: a
        // difference equivalent to PI lands on -PI.
        assert_eq!(wrap_signed(0.0), 0.0);
        assert_eq!(wrap_signed(PI), -PI);
        assert_eq!(wrap_signed(-PI), -PI);
        assert!((wrap_signed(3.0 * PI) - (-PI)).abs() < 1e-12);
        assert!((wrap_signed(2.5 * PI) - 0.5 * PI).abs() < 1e-12);
        assert!((wrap_signed(-2.5 * PI) - (-0.5 * PI)).abs() < 1e-12);
    }

    #[test]
    fn test_phase_profile_map_subtraction_point_out_of_range() {
        let grid = traveling_wave(16, 4, 10.0, 4.0);
        let mut params = tuned_params(10.0);
        params.subtraction_point = 4;
        assert!(matches!(
            phase_profile_map(&grid, &params),
            Err(KymoError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unwrap_corrects_full_wrap() {
        // Raw row phases wrap from just below PI to just above -PI.
        let raw = vec![2.8, 3.1, -3.0, -2.7];
        let result = PhaseResult {
            phase: Grid::from_rows(&[raw]),
            data_sizes: vec![1; 4],
        };
        let profile = result.profile(0);
        // The -3.0 sample jumps by -6.1 = -1.94 pi; round(-1.94) = -2, so
        // 2 pi is added back and the profile keeps climbing.
        assert!((profile[2] - (-3.0 + 2.0 * PI)).abs() < 1e-12);
        assert!(profile.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_unwrap_corrects_half_cycle() {
        // Pins the literal pi-based unwrap rule: a jump of 0.7 pi is
        // "corrected" by a full pi even though it is no 2 pi wraparound.
        let raw = vec![0.0, 0.7 * PI];
        let result = PhaseResult {
            phase: Grid::from_rows(&[raw]),
            data_sizes: vec![1; 2],
        };
        let profile = result.profile(0);
        assert!((profile[1] - (0.7 * PI - PI)).abs() < 1e-12);
    }

    #[test]
    fn test_unwrap_leaves_small_steps() {
        let raw = vec![0.0, 0.3, 0.6, 0.9];
        let result = PhaseResult {
            phase: Grid::from_rows(&[raw.clone()]),
            data_sizes: vec![1; 4],
        };
        assert_eq!(result.profile(0), raw);
    }

    #[test]
    fn test_wave_count_trimmed_range() {
        let profile = [0.0, PI / 2.0, PI, 3.0 * PI / 2.0, 2.0 * PI];
        // sorted[3] - sorted[1] over 2 pi
        assert!((wave_count_of(&profile) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_wave_count_short_profile_is_zero() {
        assert_eq!(wave_count_of(&[]), 0.0);
        assert_eq!(wave_count_of(&[1.0]), 0.0);
        assert_eq!(wave_count_of(&[1.0, 9.0]), 0.0);
    }

    #[test]
    fn test_wave_count_robust_to_tail_outliers() {
        let mut profile: Vec<f64> = (0..50).map(|i| i as f64 * 0.2).collect();
        let clean = wave_count_of(&profile);
        profile[0] = -1000.0;
        profile[49] = 1000.0;
        let spiked = wave_count_of(&profile);
        // One outlier per tail moves the estimate by a single trim slot only.
        assert!((clean - spiked).abs() < 0.1, "{clean} vs {spiked}");
    }
}
