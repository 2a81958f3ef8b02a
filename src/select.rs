//! Preview and still-capture size selection.

use core::cmp::Ordering;

use crate::error::GeometryError;
use crate::size::Size;

/// Pick the preview size that best covers `desired`.
///
/// `choices` must be in ascending area order, as returned by
/// [`SizeMap::sizes`](crate::SizeMap::sizes) or [`sort_by_area`].
///
/// `desired` is first rotated to landscape, because camera sizes are always
/// reported landscape. The smallest choice covering it on both axes wins. If
/// none does, the largest choice is returned. Among equal-area choices the
/// earlier one wins.
///
/// ```
/// use zencamera::{optimal_size, Size};
///
/// let s = |w, h| Size::new(w, h).unwrap();
/// let choices = [s(100, 100), s(200, 200), s(400, 400)];
/// assert_eq!(optimal_size(s(150, 150), &choices), Ok(s(200, 200)));
/// assert_eq!(optimal_size(s(500, 500), &choices), Ok(s(400, 400)));
/// ```
pub fn optimal_size(desired: Size, choices: &[Size]) -> Result<Size, GeometryError> {
    let target = desired.landscape();
    if let Some(&size) = choices
        .iter()
        .find(|s| s.width() >= target.width() && s.height() >= target.height())
    {
        return Ok(size);
    }
    let largest = choices.last().copied().ok_or(GeometryError::EmptyCandidateSet)?;
    tracing::debug!(%desired, %largest, "no size covers the viewport, using largest");
    Ok(largest)
}

/// The largest choice, used for still capture.
///
/// `choices` must be in ascending area order.
pub fn largest_size(choices: &[Size]) -> Result<Size, GeometryError> {
    choices.last().copied().ok_or(GeometryError::EmptyCandidateSet)
}

/// Stable sort by area, ascending. Equal-area sizes keep their input order.
pub fn sort_by_area(sizes: &mut [Size]) {
    sizes.sort_by(Size::cmp_area);
}

/// Whether `sizes` is in ascending area order.
pub fn is_sorted_by_area(sizes: &[Size]) -> bool {
    sizes
        .windows(2)
        .all(|w| w[0].cmp_area(&w[1]) != Ordering::Greater)
}
