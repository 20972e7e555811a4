//! Haar step-wavelet convolution
//!
//! The coefficient at position `k` compares the window of `h` samples
//! starting at `k` (the high window) with the `h` samples ending just before
//! `k` (the low window), where `h` is the step half size. A step in the
//! signal at `k` produces an extremum of the coefficient sequence at `k`.
//!
//! Windows that run past either end of the signal are completed by mirroring
//! (see [`reflect_index`]). With that padding the two windows coincide at
//! `k = 0`, so the first coefficient is always zero.

use super::boundary::reflect_index;
use crate::error::{HaarSegError, Result, require_len, require_non_empty};

/// Convolve `signal` with a Haar step of half width `step_half_size`
///
/// Writes one coefficient per sample into `result`, which must have the
/// same length as `signal`. When `weights` is given the weighted estimator
/// is used (see [`haar_convolve_weighted`]).
///
/// # Errors
/// * `InvalidScale` if `step_half_size` exceeds the signal length
/// * `PreconditionViolation` for an empty signal, a zero step, or buffers
///   whose length differs from the signal
pub fn haar_convolve(
    signal: &[f64],
    weights: Option<&[f64]>,
    step_half_size: usize,
    result: &mut [f64],
) -> Result<()> {
    match weights {
        Some(weights) => haar_convolve_weighted(signal, weights, step_half_size, result),
        None => haar_convolve_unweighted(signal, step_half_size, result),
    }
}

/// Unweighted Haar convolution
///
/// The raw difference `sum(high) - sum(low)` is updated in O(1) per sample:
/// moving from `k - 1` to `k` adds the sample entering the high window and
/// the sample leaving the low window, and subtracts the sample at `k - 1`
/// twice since it moves from the high window to the low one. The result is
/// normalised by `sqrt(2h)`.
pub fn haar_convolve_unweighted(
    signal: &[f64],
    step_half_size: usize,
    result: &mut [f64],
) -> Result<()> {
    let n = signal.len();
    check_scale(n, step_half_size)?;
    require_len(result.len(), n, "coefficient buffer")?;

    let h = step_half_size as isize;
    result[0] = 0.0;
    for k in 1..n {
        let high_end = reflect_index(k as isize + h - 1, n);
        let low_end = reflect_index(k as isize - h - 1, n);
        result[k] = result[k - 1] + signal[high_end] + signal[low_end] - 2.0 * signal[k - 1];
    }

    let step_norm = ((2 * step_half_size) as f64).sqrt();
    for value in result.iter_mut().skip(1) {
        *value /= step_norm;
    }

    Ok(())
}

/// Weighted Haar convolution
///
/// Tracks the weight sum and the weighted value sum of both half windows.
/// The low window value sum is kept negated, so each coefficient is the sum
/// of the two weighted means, i.e. `mean(high) - mean(low)`.
///
/// The means are scaled by `sqrt(h / 2)` with integer halving of `h`. For an
/// even step and unit weights this reproduces the unweighted coefficients;
/// for an odd step they differ by `sqrt(floor(h/2) / (h/2))`, and a step of
/// one yields all zeros. Zero weight sums over a window produce NaN.
pub fn haar_convolve_weighted(
    signal: &[f64],
    weights: &[f64],
    step_half_size: usize,
    result: &mut [f64],
) -> Result<()> {
    let n = signal.len();
    check_scale(n, step_half_size)?;
    require_len(weights.len(), n, "weight buffer")?;
    require_len(result.len(), n, "coefficient buffer")?;

    let mut high_weight_sum = 0.0;
    let mut high_value_sum = 0.0;
    for (&x, &w) in signal.iter().zip(weights).take(step_half_size) {
        high_weight_sum += w;
        high_value_sum += w * x;
    }
    // at k = 0 the mirrored low window holds the same samples
    let mut low_weight_sum = high_weight_sum;
    let mut low_value_sum = -high_value_sum;

    let scale = ((step_half_size / 2) as f64).sqrt();
    let h = step_half_size as isize;

    result[0] = 0.0;
    for k in 1..n {
        let high_end = reflect_index(k as isize + h - 1, n);
        let low_end = reflect_index(k as isize - h - 1, n);
        let leaving = signal[k - 1] * weights[k - 1];

        low_value_sum += signal[low_end] * weights[low_end] - leaving;
        high_value_sum += signal[high_end] * weights[high_end] - leaving;
        low_weight_sum += weights[k - 1] - weights[low_end];
        high_weight_sum += weights[high_end] - weights[k - 1];

        result[k] = (low_value_sum / low_weight_sum + high_value_sum / high_weight_sum) * scale;
    }

    Ok(())
}

fn check_scale(len: usize, step_half_size: usize) -> Result<()> {
    require_non_empty(len, "signal")?;
    if step_half_size == 0 {
        return Err(HaarSegError::PreconditionViolation(
            "step half size must be at least 1".to_string(),
        ));
    }
    if step_half_size > len {
        return Err(HaarSegError::InvalidScale {
            scale: step_half_size,
            len,
        });
    }
    Ok(())
}
