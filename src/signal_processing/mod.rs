pub mod boundary;
pub mod breakpoint_refiner;
pub mod breakpoints;
pub mod haar_conv;
pub mod level_merge;
pub mod math;
pub mod peak_detector;
pub mod pulse_conv;
pub mod threshold;

pub use boundary::reflect_index;
pub use breakpoint_refiner::adjust_breaks;
pub use breakpoints::{BreakpointList, validate_positions};
pub use haar_conv::{haar_convolve, haar_convolve_unweighted, haar_convolve_weighted};
pub use level_merge::unify_levels;
pub use math::{mad_noise_sigma, sum_squared_deviation};
pub use peak_detector::find_local_peaks;
pub use pulse_conv::pulse_convolve;
pub use threshold::hard_threshold;
