mod signal;

pub use signal::{
    SignalSpec, StepSegment, apply_gaussian_noise, create_rng, generate_noisy_step_signal,
    generate_step_signal,
};
