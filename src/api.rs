//! Host-facing entry points
//!
//! Each function chains core stages over buffers owned by the caller and
//! adds no logic of its own. Coefficient buffers must have the signal's
//! length; breakpoint lists should be created with
//! [`BreakpointList::with_capacity`] sized to the signal so they are filled
//! without reallocating.

use crate::error::Result;
use crate::signal_processing::{
    BreakpointList, adjust_breaks, find_local_peaks, haar_convolve, hard_threshold, pulse_convolve,
    unify_levels, validate_positions,
};

/// Unweighted Haar convolution followed by extremum detection
pub fn conv_and_find_peaks(
    signal: &[f64],
    step_half_size: usize,
    coefficients: &mut [f64],
    peaks: &mut BreakpointList,
) -> Result<()> {
    haar_convolve(signal, None, step_half_size, coefficients)?;
    find_local_peaks(coefficients, peaks);
    Ok(())
}

/// Weighted Haar convolution followed by extremum detection
pub fn weighted_conv_and_find_peaks(
    signal: &[f64],
    weights: &[f64],
    step_half_size: usize,
    coefficients: &mut [f64],
    peaks: &mut BreakpointList,
) -> Result<()> {
    haar_convolve(signal, Some(weights), step_half_size, coefficients)?;
    find_local_peaks(coefficients, peaks);
    Ok(())
}

/// Threshold the candidates of one level and merge them into a base level
///
/// `addon_peaks` is thresholded in place against `addon_coefficients`, then
/// merged with `base_peaks` into `unified`. Both lists must be ascending and
/// lie in `1..addon_coefficients.len()`; `base_peaks` is checked here since it
/// may come straight from the caller.
pub fn threshold_and_unify(
    addon_coefficients: &[f64],
    addon_peaks: &mut BreakpointList,
    base_peaks: &[usize],
    threshold: f64,
    window: usize,
    unified: &mut BreakpointList,
) -> Result<()> {
    validate_positions(base_peaks, addon_coefficients.len())?;
    hard_threshold(addon_coefficients, threshold, addon_peaks)?;
    unify_levels(base_peaks, addon_peaks, window, unified);
    Ok(())
}

/// One-sample breakpoint refinement
pub fn adjust_breakpoints(
    signal: &[f64],
    breakpoints: &[usize],
    refined: &mut BreakpointList,
) -> Result<()> {
    adjust_breaks(signal, breakpoints, refined)
}

/// Running box-sum convolution
pub fn pulse_conv(
    signal: &[f64],
    pulse_size: usize,
    pulse_height: f64,
    result: &mut [f64],
) -> Result<()> {
    pulse_convolve(signal, pulse_size, pulse_height, result)
}
