//! Local extrema detection in 1D intensity series.
//!
//! Two independent algorithms are provided:
//! - a tolerance-interval scanner ([`tolerance_extrema`]) that accepts an
//!   index when the surrounding samples stay inside a tolerance band, with
//!   an optional parabola-refined variant reporting sub-sample positions;
//! - a slope-window scanner ([`slope_extrema`]) that regresses the slope on
//!   either side of a candidate, suited to interactive peak counting.
//!
//! Both are defensive: degenerate input (short series, empty windows)
//! yields an empty result rather than an error.

use crate::regression::LinearRegression;
use nalgebra::{Matrix3, Vector3};

/// One detected extremum: position along the series and intensity there.
///
/// Positions are integer-valued except for the parabola-refined variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub position: f64,
    pub value: f64,
}

/// Find local minima (or maxima) using the tolerance-interval scan.
///
/// An interior index is accepted when every neighbor, expanding left and
/// right, stays at or above the candidate value until it exceeds
/// `candidate + tolerance * (global_max - global_min)`; finding a smaller
/// neighbor first rejects the candidate. Within a plateau of tied samples
/// every tied index is reported.
///
/// With `find_maxima` the series is negated, scanned for minima, and the
/// intensities (not the positions) are negated back.
pub fn tolerance_extrema(series: &[f64], tolerance: f64, find_maxima: bool) -> Vec<Extremum> {
    scan_extrema(series, tolerance, find_maxima, false)
}

/// Parabola-refined variant of [`tolerance_extrema`].
///
/// For each accepted candidate a parabola is least-squares fit over the
/// stable interval and its vertex is reported as a sub-sample-accurate
/// position. Falls back to the plain sample when the interval degenerates
/// to a point or the fit is singular.
pub fn tolerance_extrema_refined(
    series: &[f64],
    tolerance: f64,
    find_maxima: bool,
) -> Vec<Extremum> {
    scan_extrema(series, tolerance, find_maxima, true)
}

fn scan_extrema(series: &[f64], tolerance: f64, find_maxima: bool, refine: bool) -> Vec<Extremum> {
    if series.len() < 3 {
        return Vec::new();
    }
    let working: Vec<f64> = if find_maxima {
        series.iter().map(|&v| -v).collect()
    } else {
        series.to_vec()
    };
    let (global_min, global_max) = min_max(&working);

    let mut extrema = Vec::new();
    for index in 1..working.len() - 1 {
        let band = working[index] + tolerance * (global_max - global_min);
        let Some((left, right)) = minimum_interval(&working, index, band) else {
            continue;
        };
        let extremum = if refine {
            fitted_minimum(&working, left, right).unwrap_or(Extremum {
                position: index as f64,
                value: working[index],
            })
        } else {
            Extremum {
                position: index as f64,
                value: working[index],
            }
        };
        extrema.push(extremum);
    }

    if find_maxima {
        for extremum in &mut extrema {
            extremum.value = -extremum.value;
        }
    }
    extrema
}

/// Find maxima (or minima) by comparing regressed slopes in a window on
/// either side of each candidate.
///
/// A candidate at `i` is kept when the slope over `[i - window, i]` rises
/// at least `minimal_slope` and the slope over `[i, i + window]` falls
/// below `-minimal_slope` (mirrored for minima). Candidates closer than
/// `4 * window` to the previous one are merged, keeping the stronger.
/// Output positions are strictly increasing.
pub fn slope_extrema(
    series: &[f64],
    window: usize,
    minimal_slope: f64,
    find_maxima: bool,
) -> Vec<Extremum> {
    let n = series.len();
    if window == 0 || n < 2 * window + 1 {
        return Vec::new();
    }
    let factor = if find_maxima { 1.0 } else { -1.0 };

    let mut positions: Vec<usize> = Vec::new();
    for i in window..n - window {
        // A singular slope fit just disqualifies the candidate.
        let Ok(left) = slope(series, i - window, i) else {
            continue;
        };
        let Ok(right) = slope(series, i, i + window) else {
            continue;
        };
        if left * factor < minimal_slope || right * factor >= -minimal_slope {
            continue;
        }
        if let Some(last) = positions.last_mut() {
            if i - *last < 4 * window {
                if series[*last] * factor < series[i] * factor {
                    *last = i;
                }
                continue;
            }
        }
        positions.push(i);
    }

    positions
        .into_iter()
        .map(|i| Extremum {
            position: i as f64,
            value: series[i],
        })
        .collect()
}

/// Expand the stable interval around a minimum candidate.
///
/// Returns `None` when a strictly smaller neighbor is reached before the
/// tolerance band is exceeded.
fn minimum_interval(series: &[f64], index: usize, band: f64) -> Option<(usize, usize)> {
    let mut left = index;
    while left > 0 {
        let neighbor = series[left - 1];
        if neighbor < series[index] {
            return None;
        }
        if neighbor > band {
            break;
        }
        left -= 1;
    }
    let mut right = index;
    while right < series.len() - 1 {
        let neighbor = series[right + 1];
        if neighbor < series[index] {
            return None;
        }
        if neighbor > band {
            break;
        }
        right += 1;
    }
    Some((left, right))
}

/// Least-squares parabola over `[left, right]`, reporting the vertex.
fn fitted_minimum(series: &[f64], mut left: usize, mut right: usize) -> Option<Extremum> {
    if left + 1 == right {
        if series[left] > series[right] {
            left = right;
        } else {
            right = left;
        }
    }
    if left == right {
        return Some(Extremum {
            position: left as f64,
            value: series[left],
        });
    }

    let total = (right + 1 - left) as f64;
    let (mut x1, mut x2, mut x3, mut x4) = (0.0, 0.0, 0.0, 0.0);
    let (mut y, mut yx1, mut yx2) = (0.0, 0.0, 0.0);
    for i in left..=right {
        let x = i as f64;
        x1 += x;
        x2 += x * x;
        x3 += x * x * x;
        x4 += x * x * x * x;
        y += series[i];
        yx1 += series[i] * x;
        yx2 += series[i] * x * x;
    }
    x1 /= total;
    x2 /= total;
    x3 /= total;
    x4 /= total;
    y /= total;
    yx1 /= total;
    yx2 /= total;

    let normal = Matrix3::new(x4, x3, x2, x3, x2, x1, x2, x1, 1.0);
    let rhs = Vector3::new(yx2, yx1, y);
    let abc = normal.lu().solve(&rhs)?;
    let (a, b, c) = (abc[0], abc[1], abc[2]);
    if a.abs() < f64::EPSILON {
        return None;
    }
    let vertex = -b / (2.0 * a);
    Some(Extremum {
        position: vertex,
        value: a * vertex * vertex + b * vertex + c,
    })
}

fn slope(series: &[f64], from: usize, to: usize) -> Result<f64, crate::error::KymoError> {
    let mut regression = LinearRegression::new();
    for i in from..=to.min(series.len() - 1) {
        regression.add(i as f64, series[i]);
    }
    Ok(regression.fit()?.slope)
}

fn min_max(series: &[f64]) -> (f64, f64) {
    let mut min = series[0];
    let mut max = series[0];
    for &v in &series[1..] {
        if v < min {
            min = v;
        } else if v > max {
            max = v;
        }
    }
    (min, max)
}
