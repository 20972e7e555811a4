/// Map a possibly out-of-range index back into `0..len` by mirroring
///
/// Indices below zero map to `-i - 1`; indices at or beyond `len` map to
/// `len - 1 - (i - len)`. The edge sample is repeated, so `-1` maps to `0`
/// and `len` maps to `len - 1`.
///
/// A single reflection is applied, which covers `-len..2 * len`. Both
/// convolvers stay inside that range as long as their window does not
/// exceed the signal length.
#[inline]
pub fn reflect_index(index: isize, len: usize) -> usize {
    let n = len as isize;
    debug_assert!(
        index >= -n && index < 2 * n,
        "index {index} out of single-reflection range for length {len}"
    );
    if index < 0 {
        (-index - 1) as usize
    } else if index >= n {
        (2 * n - 1 - index) as usize
    } else {
        index as usize
    }
}
