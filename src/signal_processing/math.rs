/// Scale factor turning a median absolute deviation into a Gaussian sigma
pub const MAD_TO_SIGMA: f64 = 0.6745;

/// Arithmetic mean, NaN for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of squared deviations from the mean
///
/// Two passes: the mean first, then the deviations. Returns 0 for an empty
/// slice.
pub fn sum_squared_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|&x| (x - m) * (x - m)).sum()
}

/// Median of `values`, reordering the slice in the process
///
/// Even-length input averages the two middle elements. Returns `None` for
/// an empty slice.
pub fn median_in_place(values: &mut [f64]) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    let (lower, upper, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;
    if n % 2 == 1 {
        return Some(upper);
    }
    let lower_max = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((lower_max + upper) / 2.0)
}

/// Robust noise estimate from finest-scale wavelet coefficients
///
/// `median(|c|) / 0.6745`, which estimates the standard deviation of
/// Gaussian noise while ignoring the few large coefficients produced by real
/// breakpoints.
pub fn mad_noise_sigma(coefficients: &[f64]) -> Option<f64> {
    let mut magnitudes: Vec<f64> = coefficients.iter().map(|c| c.abs()).collect();
    median_in_place(&mut magnitudes).map(|m| m / MAD_TO_SIGMA)
}
