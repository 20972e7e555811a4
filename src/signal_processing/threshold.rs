use super::breakpoints::BreakpointList;
use crate::error::{HaarSegError, Result};

/// Hard-threshold peak candidates in place
///
/// Keeps the candidates whose coefficient is at least `threshold` in
/// magnitude, preserving their order.
///
/// # Errors
/// `PreconditionViolation` if a candidate lies outside `coefficients`; the
/// list is left untouched in that case.
pub fn hard_threshold(
    coefficients: &[f64],
    threshold: f64,
    peaks: &mut BreakpointList,
) -> Result<()> {
    if let Some(&last) = peaks.last() {
        if last >= coefficients.len() {
            return Err(HaarSegError::PreconditionViolation(format!(
                "peak {last} outside coefficient buffer of length {}",
                coefficients.len()
            )));
        }
    }
    peaks.retain(|&k| {
        let value = coefficients[k];
        value >= threshold || value <= -threshold
    });
    Ok(())
}
