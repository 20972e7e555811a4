pub mod generate;

pub use generate::{brute_force_haar, matched_breakpoints, noisy_steps, total_sse};
