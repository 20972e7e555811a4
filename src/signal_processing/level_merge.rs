use super::breakpoints::BreakpointList;

/// Merge breakpoints found at two decomposition levels
///
/// Every `base` breakpoint is kept. An `addon` breakpoint is dropped when it
/// falls in `[b - window, b + window]` around a base breakpoint `b`, where it
/// is taken to be the same event seen at another scale.
///
/// The tolerance is applied asymmetrically during the scan: for each base
/// breakpoint all remaining addon entries up to `b + window` are consumed,
/// and only those strictly below `b - window` are emitted. Addon entries left
/// after the last base breakpoint are appended.
///
/// Both inputs must be ascending. `joined` is cleared and refilled.
pub fn unify_levels(base: &[usize], addon: &[usize], window: usize, joined: &mut BreakpointList) {
    joined.clear();

    let mut addon_iter = addon.iter().copied().peekable();
    for &b in base {
        let lower = b.saturating_sub(window);
        while let Some(a) = addon_iter.next_if(|&a| a <= b.saturating_add(window)) {
            if a < lower {
                joined.push(a);
            }
        }
        joined.push(b);
    }
    for a in addon_iter {
        joined.push(a);
    }
}
