mod test_signals;

use approx::assert_relative_eq;
use haarseg::api::{
    adjust_breakpoints, conv_and_find_peaks, pulse_conv, threshold_and_unify,
    weighted_conv_and_find_peaks,
};
use haarseg::config::{LevelConfig, SegmentationConfig, ThresholdPolicy};
use haarseg::processing::HaarSegmenter;
use haarseg::signal_processing::{BreakpointList, haar_convolve};
use haarseg::HaarSegError;

fn fixed_threshold(value: f64) -> SegmentationConfig {
    SegmentationConfig {
        threshold: ThresholdPolicy::Fixed { value },
        ..SegmentationConfig::default()
    }
}

/// Drive the host entry points level by level, the way a caller would
fn segment_with_api(signal: &[f64], threshold: f64) -> Vec<usize> {
    let n = signal.len();
    let mut coefficients = vec![0.0; n];
    let mut peaks = BreakpointList::with_capacity(n);
    let mut accumulated = BreakpointList::with_capacity(n);
    let mut unified = BreakpointList::with_capacity(n);

    for level in LevelConfig::default().levels() {
        let step = LevelConfig::step_half_size(level);
        if step > n {
            break;
        }
        conv_and_find_peaks(signal, step, &mut coefficients, &mut peaks).unwrap();
        threshold_and_unify(
            &coefficients,
            &mut peaks,
            &accumulated,
            threshold,
            LevelConfig::merge_window(level),
            &mut unified,
        )
        .unwrap();
        std::mem::swap(&mut accumulated, &mut unified);
    }

    let mut refined = BreakpointList::with_capacity(n);
    adjust_breakpoints(signal, &accumulated, &mut refined).unwrap();
    refined.into_vec()
}

#[test]
fn test_single_step_through_api() {
    let mut signal = vec![0.0; 100];
    signal[50..].fill(10.0);
    assert_eq!(segment_with_api(&signal, 1.0), vec![50]);
}

#[test]
fn test_step_round_trip_at_odd_scale() {
    let mut signal = vec![0.0; 100];
    signal[50..].fill(10.0);
    let mut coefficients = vec![0.0; 100];
    let mut peaks = BreakpointList::with_capacity(100);
    let mut unified = BreakpointList::with_capacity(100);
    let mut refined = BreakpointList::with_capacity(100);

    conv_and_find_peaks(&signal, 5, &mut coefficients, &mut peaks).unwrap();
    assert_eq!(coefficients[0], 0.0);
    threshold_and_unify(&coefficients, &mut peaks, &[], 1.0, 0, &mut unified).unwrap();
    adjust_breakpoints(&signal, &unified, &mut refined).unwrap();
    assert_eq!(refined.as_slice(), &[50]);
}

#[test]
fn test_api_chain_matches_segmenter() {
    let (signal, _) = test_signals::noisy_steps(&[(120, 0.0), (80, 2.0), (150, -1.0)], 0.4, 3);
    let segmenter = HaarSegmenter::new(fixed_threshold(1.5)).unwrap();
    let result = segmenter.segment(&signal, None).unwrap();
    assert_eq!(result.breakpoints.as_slice(), segment_with_api(&signal, 1.5).as_slice());
}

#[test]
fn test_convolution_matches_window_definition() {
    let (signal, _) = test_signals::noisy_steps(&[(37, 1.0), (21, -2.0), (45, 0.5)], 0.3, 17);
    let weights: Vec<f64> = (0..signal.len()).map(|i| 0.5 + (i * 7 % 10) as f64 / 10.0).collect();
    let mut coefficients = vec![0.0; signal.len()];

    for h in [1, 2, 3, 8, 13, 64, signal.len()] {
        haar_convolve(&signal, None, h, &mut coefficients).unwrap();
        let expected = test_signals::brute_force_haar(&signal, None, h);
        for (got, want) in coefficients.iter().zip(&expected) {
            assert_relative_eq!(*got, *want, epsilon = 1e-9);
        }

        haar_convolve(&signal, Some(&weights), h, &mut coefficients).unwrap();
        let expected = test_signals::brute_force_haar(&signal, Some(&weights), h);
        for (got, want) in coefficients.iter().zip(&expected) {
            assert_relative_eq!(*got, *want, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_weighted_peaks_on_clean_steps() {
    let (signal, truth) = test_signals::noisy_steps(&[(60, 0.0), (70, 4.0), (70, -2.0)], 0.0, 0);
    let weights: Vec<f64> = (0..signal.len()).map(|i| 0.5 + (i * 3 % 7) as f64 / 7.0).collect();
    let mut coefficients = vec![0.0; signal.len()];
    let mut peaks = BreakpointList::with_capacity(signal.len());
    let mut unified = BreakpointList::with_capacity(signal.len());

    weighted_conv_and_find_peaks(&signal, &weights, 16, &mut coefficients, &mut peaks).unwrap();
    threshold_and_unify(&coefficients, &mut peaks, &[], 1.0, 8, &mut unified).unwrap();
    assert_eq!(unified.as_slice(), truth.as_slice());

    let segmenter = HaarSegmenter::new(fixed_threshold(1.0)).unwrap();
    let weighted = segmenter.segment(&signal, Some(&weights)).unwrap();
    let unweighted = segmenter.segment(&signal, None).unwrap();
    assert_eq!(weighted.breakpoints.as_slice(), truth.as_slice());
    assert_eq!(unweighted.breakpoints.as_slice(), truth.as_slice());
}

#[test]
fn test_unit_weights_match_unweighted_segmentation() {
    let (signal, _) = test_signals::noisy_steps(&[(200, 0.0), (100, 1.5), (200, 0.5)], 0.3, 21);
    let ones = vec![1.0; signal.len()];
    let segmenter = HaarSegmenter::new(SegmentationConfig::default()).unwrap();

    let weighted = segmenter.segment(&signal, Some(&ones)).unwrap();
    let unweighted = segmenter.segment(&signal, None).unwrap();
    assert_eq!(weighted.breakpoints, unweighted.breakpoints);
}

#[test]
fn test_pulse_conv_smooths_steps() {
    let (signal, _) = test_signals::noisy_steps(&[(20, 0.0), (20, 6.0)], 0.0, 0);
    let mut smoothed = vec![0.0; signal.len()];
    pulse_conv(&signal, 4, 0.25, &mut smoothed).unwrap();

    // window of four centred on each sample, mirrored at the ends
    assert_relative_eq!(smoothed[0], 0.0);
    assert_relative_eq!(smoothed[19], 1.5);
    assert_relative_eq!(smoothed[20], 3.0);
    assert_relative_eq!(smoothed[21], 4.5);
    assert_relative_eq!(smoothed[39], 6.0);
}

#[test]
fn test_entry_points_reject_bad_buffers() {
    let signal = [1.0, 2.0, 3.0];
    let mut coefficients = vec![0.0; 3];
    let mut peaks = BreakpointList::with_capacity(3);

    assert!(matches!(
        conv_and_find_peaks(&signal, 4, &mut coefficients, &mut peaks),
        Err(HaarSegError::InvalidScale { scale: 4, len: 3 })
    ));
    assert!(matches!(
        conv_and_find_peaks(&signal, 1, &mut [0.0; 2], &mut peaks),
        Err(HaarSegError::PreconditionViolation(_))
    ));
    assert!(matches!(
        weighted_conv_and_find_peaks(&signal, &[1.0], 1, &mut coefficients, &mut peaks),
        Err(HaarSegError::PreconditionViolation(_))
    ));

    let mut refined = BreakpointList::with_capacity(3);
    assert!(adjust_breakpoints(&signal, &[0], &mut refined).is_err());
    assert!(adjust_breakpoints(&signal, &[2, 1], &mut refined).is_err());
    assert!(pulse_conv(&signal, 4, 1.0, &mut coefficients).is_err());
}
