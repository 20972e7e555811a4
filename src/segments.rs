//! Piecewise-constant reconstruction from a breakpoint list.

use serde::Serialize;

use crate::error::{Result, require_non_empty};
use crate::signal_processing::breakpoints::validate_positions;
use crate::signal_processing::math::mean;
use crate::signal_processing::pulse_convolve;

/// A run of samples sharing one mean value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    /// First sample of the segment
    pub start: usize,
    /// One past the last sample
    pub end: usize,
    /// Mean of the signal over `start..end`
    pub mean: f64,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Split `signal` at `breakpoints` and compute the mean of every segment
///
/// The segments cover `0..signal.len()` without gaps, one more than the
/// number of breakpoints.
pub fn segment_means(signal: &[f64], breakpoints: &[usize]) -> Result<Vec<Segment>> {
    require_non_empty(signal.len(), "signal")?;
    validate_positions(breakpoints, signal.len())?;

    let mut segments = Vec::with_capacity(breakpoints.len() + 1);
    let mut start = 0;
    for end in breakpoints
        .iter()
        .copied()
        .chain(std::iter::once(signal.len()))
    {
        segments.push(Segment {
            start,
            end,
            mean: mean(&signal[start..end]),
        });
        start = end;
    }
    Ok(segments)
}

/// Expand segments back into a piecewise-constant signal of length `len`
///
/// Samples not covered by any segment are left at zero.
pub fn reconstruct(segments: &[Segment], len: usize) -> Vec<f64> {
    let mut values = vec![0.0; len];
    for segment in segments {
        let end = segment.end.min(len);
        if segment.start < end {
            values[segment.start..end].fill(segment.mean);
        }
    }
    values
}

/// Local means over a sliding window of `window` samples
///
/// Uses the pulse convolution with a height of `1 / window`, so it shares
/// its mirrored edges and window placement.
pub fn window_means(signal: &[f64], window: usize) -> Result<Vec<f64>> {
    let mut result = vec![0.0; signal.len()];
    let height = 1.0 / window as f64;
    pulse_convolve(signal, window, height, &mut result)?;
    Ok(result)
}
