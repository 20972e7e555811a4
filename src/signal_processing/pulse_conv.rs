use super::boundary::reflect_index;
use crate::error::{HaarSegError, Result, require_len, require_non_empty};

/// Convolve a signal with a rectangular pulse
///
/// Output `i` is `pulse_height` times the sum of the `pulse_size` samples in
/// `[i - ceil(s/2), i + floor(s/2) - 1]`, with out-of-range samples taken
/// from the mirrored signal. The window is centred on `i` for an even pulse
/// and sits one sample left of centre for an odd one.
///
/// The first value is accumulated directly; every later value adds the
/// sample entering the window and drops the one leaving it, so the whole
/// sequence costs O(n) regardless of the pulse size.
///
/// # Errors
/// * `InvalidScale` if `pulse_size` exceeds the signal length
/// * `PreconditionViolation` for an empty signal, a zero pulse size, or a
///   result buffer whose length differs from the signal
pub fn pulse_convolve(
    signal: &[f64],
    pulse_size: usize,
    pulse_height: f64,
    result: &mut [f64],
) -> Result<()> {
    let n = signal.len();
    require_non_empty(n, "signal")?;
    if pulse_size == 0 {
        return Err(HaarSegError::PreconditionViolation(
            "pulse size must be at least 1".to_string(),
        ));
    }
    if pulse_size > n {
        return Err(HaarSegError::InvalidScale {
            scale: pulse_size,
            len: n,
        });
    }
    require_len(result.len(), n, "result buffer")?;

    let half_up = pulse_size.div_ceil(2);
    let half_down = pulse_size / 2;

    // mirrored window [-half_down, half_up - 1] around the first sample
    let head_sum: f64 = signal[..half_up].iter().sum();
    let mirrored_sum: f64 = signal[..half_down].iter().sum();
    result[0] = (head_sum + mirrored_sum) * pulse_height;

    let s = pulse_size as isize;
    for i in 1..n {
        let head = (half_down + i - 1) as isize;
        let entering = signal[reflect_index(head, n)];
        let leaving = signal[reflect_index(head - s, n)];
        result[i] = result[i - 1] + (entering - leaving) * pulse_height;
    }

    Ok(())
}
