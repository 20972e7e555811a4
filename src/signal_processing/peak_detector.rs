use super::breakpoints::BreakpointList;

/// Pending plateau start while scanning for extrema
///
/// A run of equal values is an extremum only if it is entered and left in
/// opposite directions. The run's first index is held here until the exit
/// direction is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlateauSuspect {
    None,
    /// Plateau of positive values entered from below
    Max(usize),
    /// Plateau of negative values entered from above
    Min(usize),
}

/// Find local extrema of a coefficient sequence
///
/// Detects local maxima among positive values and local minima among
/// negative values. Zero values are never reported, nor are the first and
/// last index. A plateau is reported once, at its first index, when it is
/// entered rising and left falling (or the reverse for minima).
///
/// `peaks` is cleared and refilled in ascending order.
///
/// # Arguments
/// * `coefficients` - Wavelet coefficients to scan
/// * `peaks` - Output list, reused across calls
pub fn find_local_peaks(coefficients: &[f64], peaks: &mut BreakpointList) {
    peaks.clear();
    let n = coefficients.len();
    if n < 3 {
        return;
    }

    let mut suspect = PlateauSuspect::None;
    for k in 1..n - 1 {
        let prev = coefficients[k - 1];
        let value = coefficients[k];
        let next = coefficients[k + 1];

        if value > 0.0 {
            if value > prev && value > next {
                peaks.push(k);
            } else if value > prev && value == next {
                suspect = PlateauSuspect::Max(k);
            } else if value == prev && value > next {
                if let PlateauSuspect::Max(start) = suspect {
                    peaks.push(start);
                    suspect = PlateauSuspect::None;
                }
            } else if value == prev && value < next {
                suspect = PlateauSuspect::None;
            }
        } else if value < 0.0 {
            if value < prev && value < next {
                peaks.push(k);
            } else if value < prev && value == next {
                suspect = PlateauSuspect::Min(k);
            } else if value == prev && value < next {
                if let PlateauSuspect::Min(start) = suspect {
                    peaks.push(start);
                    suspect = PlateauSuspect::None;
                }
            } else if value == prev && value > next {
                suspect = PlateauSuspect::None;
            }
        }
    }
}
