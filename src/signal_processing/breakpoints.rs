use std::ops::Deref;

use crate::error::{HaarSegError, Result};

/// Ordered list of breakpoint positions
///
/// Each position marks the first sample of a new segment. Positions are
/// strictly increasing and lie in `1..len` for a signal of length `len`;
/// the signal edges are implicit segment boundaries and never stored.
///
/// The list is owned by the caller. Pipeline stages clear it and append to
/// it, so a list created with [`BreakpointList::with_capacity`] sized to the
/// signal length is reused across calls without reallocating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakpointList {
    positions: Vec<usize>,
}

impl BreakpointList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list able to hold `capacity` positions
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
        }
    }

    /// Build a list from caller-supplied positions, validating them against
    /// a signal of length `signal_len`
    pub fn from_positions(positions: Vec<usize>, signal_len: usize) -> Result<Self> {
        validate_positions(&positions, signal_len)?;
        Ok(Self { positions })
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.positions
    }

    pub fn capacity(&self) -> usize {
        self.positions.capacity()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.positions
    }

    pub(crate) fn push(&mut self, position: usize) {
        debug_assert!(
            self.positions.last().is_none_or(|&last| last < position),
            "breakpoint {position} breaks ascending order"
        );
        self.positions.push(position);
    }

    pub(crate) fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&usize) -> bool,
    {
        self.positions.retain(keep);
    }
}

impl Deref for BreakpointList {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.positions
    }
}

impl AsRef<[usize]> for BreakpointList {
    fn as_ref(&self) -> &[usize] {
        &self.positions
    }
}

/// Check that `positions` is strictly increasing and inside `1..signal_len`
pub fn validate_positions(positions: &[usize], signal_len: usize) -> Result<()> {
    let mut previous = 0;
    for &position in positions {
        if position == 0 || position >= signal_len {
            return Err(HaarSegError::PreconditionViolation(format!(
                "breakpoint {position} outside 1..{signal_len}"
            )));
        }
        if position <= previous {
            return Err(HaarSegError::PreconditionViolation(format!(
                "breakpoint {position} does not follow {previous} in ascending order"
            )));
        }
        previous = position;
    }
    Ok(())
}
