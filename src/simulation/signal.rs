use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// A run of `length` probes at a constant `level`
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct StepSegment {
    pub length: usize,
    pub level: f64,
}

impl StepSegment {
    pub fn new(length: usize, level: f64) -> Self {
        Self { length, level }
    }
}

/// Piecewise-constant signal with additive Gaussian noise
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SignalSpec {
    pub segments: Vec<StepSegment>,
    pub noise_sigma: f64,
    pub seed: Option<u64>,
}

impl SignalSpec {
    pub fn new(segments: Vec<StepSegment>) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    pub fn with_noise(mut self, noise_sigma: f64) -> Self {
        self.noise_sigma = noise_sigma;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn len(&self) -> usize {
        self.segments.iter().map(|segment| segment.length).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Lay out the segments back to back
///
/// Returns the noiseless signal and the true breakpoints, i.e. the first
/// index of every segment after the first. Empty segments add nothing.
pub fn generate_step_signal(segments: &[StepSegment]) -> (Vec<f64>, Vec<usize>) {
    let total = segments.iter().map(|segment| segment.length).sum();
    let mut signal = Vec::with_capacity(total);
    let mut breakpoints = Vec::new();

    for segment in segments.iter().filter(|segment| segment.length > 0) {
        if !signal.is_empty() {
            breakpoints.push(signal.len());
        }
        signal.resize(signal.len() + segment.length, segment.level);
    }

    (signal, breakpoints)
}

/// Add zero-mean Gaussian noise with standard deviation `sigma`
pub fn apply_gaussian_noise(signal: &mut [f64], sigma: f64, rng: &mut ChaCha8Rng) {
    if sigma <= 0.0 {
        return;
    }
    let Ok(normal) = Normal::new(0.0, sigma) else {
        log::warn!("Skipping noise with invalid sigma {}", sigma);
        return;
    };

    for sample in signal.iter_mut() {
        *sample += normal.sample(rng);
    }
}

pub fn generate_noisy_step_signal(spec: &SignalSpec) -> (Vec<f64>, Vec<usize>) {
    let (mut signal, breakpoints) = generate_step_signal(&spec.segments);
    let mut rng = create_rng(spec.seed);
    apply_gaussian_noise(&mut signal, spec.noise_sigma, &mut rng);
    (signal, breakpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_processing::math::{mean, sum_squared_deviation};

    #[test]
    fn test_step_layout() {
        let segments = vec![
            StepSegment::new(3, 1.0),
            StepSegment::new(0, 9.0),
            StepSegment::new(2, -1.0),
            StepSegment::new(1, 4.0),
        ];
        let (signal, breakpoints) = generate_step_signal(&segments);
        assert_eq!(signal, vec![1.0, 1.0, 1.0, -1.0, -1.0, 4.0]);
        assert_eq!(breakpoints, vec![3, 5]);
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let spec = SignalSpec::new(vec![StepSegment::new(100, 0.0)])
            .with_noise(0.5)
            .with_seed(42);
        let (a, _) = generate_noisy_step_signal(&spec);
        let (b, _) = generate_noisy_step_signal(&spec);
        assert_eq!(a, b);

        let (c, _) = generate_noisy_step_signal(&spec.clone().with_seed(43));
        assert_ne!(a, c);
    }

    #[test]
    fn test_noise_level() {
        let spec = SignalSpec::new(vec![StepSegment::new(20_000, 3.0)])
            .with_noise(2.0)
            .with_seed(7);
        let (signal, _) = generate_noisy_step_signal(&spec);
        let std_dev = (sum_squared_deviation(&signal) / signal.len() as f64).sqrt();
        assert!((mean(&signal) - 3.0).abs() < 0.1);
        assert!((std_dev - 2.0).abs() < 0.1, "std_dev {}", std_dev);
    }

    #[test]
    fn test_zero_sigma_leaves_signal_untouched() {
        let mut signal = vec![1.0; 10];
        apply_gaussian_noise(&mut signal, 0.0, &mut create_rng(Some(1)));
        assert_eq!(signal, vec![1.0; 10]);
    }

    #[test]
    fn test_spec_from_toml() {
        let spec: SignalSpec = toml::from_str(
            "noise_sigma = 0.2\nseed = 5\n\n[[segments]]\nlength = 10\nlevel = 0.0\n\n[[segments]]\nlength = 20\nlevel = 1.5\n",
        )
        .unwrap();
        assert_eq!(spec.len(), 30);
        assert_eq!(spec.seed, Some(5));
        assert_eq!(spec.segments[1], StepSegment::new(20, 1.5));
    }
}
