use super::breakpoints::{BreakpointList, validate_positions};
use super::math::sum_squared_deviation;
use crate::error::{Result, require_non_empty};

/// Candidate shifts, in tie-break order
const OFFSETS: [isize; 3] = [-1, 0, 1];

/// Refine breakpoint positions by one-sample moves
///
/// Each breakpoint is tried one sample to the left, in place, and one sample
/// to the right, and the position giving the smallest summed squared
/// deviation of the two adjacent segments from their means is kept. On equal
/// scores the leftmost offset wins. A move that would empty a one-sample
/// segment is not tried.
///
/// Breakpoints are processed left to right. The left segment starts at the
/// already refined previous breakpoint and the right segment ends at the
/// next breakpoint's original position, so every segment keeps at least one
/// sample and the total squared deviation never increases. The cost is
/// linear in the signal length since each segment is visited by at most two
/// breakpoints.
///
/// `refined` is cleared and receives one position per input breakpoint.
///
/// # Errors
/// `PreconditionViolation` for an empty signal or a breakpoint list that is
/// not strictly ascending within `1..signal.len()`.
pub fn adjust_breaks(
    signal: &[f64],
    breakpoints: &[usize],
    refined: &mut BreakpointList,
) -> Result<()> {
    let n = signal.len();
    require_non_empty(n, "signal")?;
    validate_positions(breakpoints, n)?;

    refined.clear();
    let mut left_edge = 0;
    for (i, &position) in breakpoints.iter().enumerate() {
        let right_edge = breakpoints.get(i + 1).copied().unwrap_or(n);
        let left_len = position - left_edge;
        let right_len = right_edge - position;

        let mut best_score = f64::INFINITY;
        let mut best_offset = 0;
        for offset in OFFSETS {
            // never empty a single-sample segment
            if (offset == -1 && left_len == 1) || (offset == 1 && right_len == 1) {
                continue;
            }
            let split = position.checked_add_signed(offset).unwrap_or(position);
            let score = sum_squared_deviation(&signal[left_edge..split])
                + sum_squared_deviation(&signal[split..right_edge]);
            if score < best_score {
                best_score = score;
                best_offset = offset;
            }
        }

        let moved = position.checked_add_signed(best_offset).unwrap_or(position);
        refined.push(moved);
        left_edge = moved;
    }

    Ok(())
}
