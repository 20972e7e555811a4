use haarseg::signal_processing::reflect_index;
use haarseg::signal_processing::sum_squared_deviation;
use haarseg::simulation::{SignalSpec, StepSegment, generate_noisy_step_signal};

/// Noisy piecewise-constant signal from `(length, level)` pairs
/// Returns the samples and the true breakpoints
pub fn noisy_steps(
    segments: &[(usize, f64)],
    noise_sigma: f64,
    seed: u64,
) -> (Vec<f64>, Vec<usize>) {
    let spec = SignalSpec::new(
        segments
            .iter()
            .map(|&(length, level)| StepSegment::new(length, level))
            .collect(),
    )
    .with_noise(noise_sigma)
    .with_seed(seed);
    generate_noisy_step_signal(&spec)
}

/// Haar coefficients straight from the window definition
/// O(n * h), used as a reference for the running-sum implementation
pub fn brute_force_haar(signal: &[f64], weights: Option<&[f64]>, h: usize) -> Vec<f64> {
    let n = signal.len();
    let weight = |i: usize| weights.map_or(1.0, |w| w[i]);

    (0..n)
        .map(|k| {
            let window = |from: isize| {
                (from..from + h as isize).fold((0.0, 0.0), |(value_sum, weight_sum), i| {
                    let j = reflect_index(i, n);
                    (value_sum + weight(j) * signal[j], weight_sum + weight(j))
                })
            };
            let (low_sum, low_weight) = window(k as isize - h as isize);
            let (high_sum, high_weight) = window(k as isize);
            match weights {
                None => (high_sum - low_sum) / ((2 * h) as f64).sqrt(),
                Some(_) => {
                    (high_sum / high_weight - low_sum / low_weight) * ((h / 2) as f64).sqrt()
                }
            }
        })
        .collect()
}

/// How many true breakpoints have a detection within `tolerance`
pub fn matched_breakpoints(found: &[usize], truth: &[usize], tolerance: usize) -> usize {
    truth
        .iter()
        .filter(|&&t| found.iter().any(|&f| f.abs_diff(t) <= tolerance))
        .count()
}

/// Summed squared deviation of every segment from its own mean
pub fn total_sse(signal: &[f64], breakpoints: &[usize]) -> f64 {
    let mut start = 0;
    let mut total = 0.0;
    for &end in breakpoints.iter().chain(std::iter::once(&signal.len())) {
        total += sum_squared_deviation(&signal[start..end]);
        start = end;
    }
    total
}
