//! Supported sizes grouped by aspect ratio.
//!
//! Rebuilt whenever the active camera is (re)opened: supported sizes depend
//! on the camera, not on the device.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::error::GeometryError;
use crate::size::{AspectRatio, Size};

/// Groups [`Size`]s by the [`AspectRatio`] they reduce to.
///
/// Each bucket is a set (no duplicates) kept in ascending area order, so
/// [`sizes`](Self::sizes) can be handed straight to
/// [`optimal_size`](crate::optimal_size). Ratios iterate in ascending ratio
/// order, which makes every fallback decision deterministic.
///
/// ```
/// use zencamera::{AspectRatio, Size, SizeMap};
///
/// let mut map = SizeMap::new();
/// assert!(map.add(Size::new(1920, 1080).unwrap()));
/// assert!(map.add(Size::new(1280, 720).unwrap()));
/// assert!(!map.add(Size::new(1280, 720).unwrap()));
///
/// let sizes = map.sizes(AspectRatio::RATIO_16_9);
/// assert_eq!(sizes[0], Size::new(1280, 720).unwrap());
/// assert!(map.sizes(AspectRatio::RATIO_4_3).is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SizeMap {
    ratios: BTreeMap<AspectRatio, Vec<Size>>,
}

impl SizeMap {
    /// Empty map.
    pub const fn new() -> Self {
        Self {
            ratios: BTreeMap::new(),
        }
    }

    /// Add a size under the ratio it reduces to.
    ///
    /// Returns `false` if the size was already present.
    pub fn add(&mut self, size: Size) -> bool {
        let bucket = self.ratios.entry(AspectRatio::of(size)).or_default();
        // Within one ratio, area identifies the size uniquely.
        match bucket.binary_search_by(|probe| probe.cmp_area(&size)) {
            Ok(_) => false,
            Err(pos) => {
                bucket.insert(pos, size);
                true
            }
        }
    }

    /// All ratios with at least one size, in ascending ratio order.
    pub fn ratios(&self) -> impl ExactSizeIterator<Item = AspectRatio> + '_ {
        self.ratios.keys().copied()
    }

    /// Sizes for `ratio` in ascending area order. Empty when the ratio is absent.
    pub fn sizes(&self, ratio: AspectRatio) -> &[Size] {
        self.ratios.get(&ratio).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any size reduces to `ratio`.
    pub fn contains_ratio(&self, ratio: AspectRatio) -> bool {
        self.ratios.contains_key(&ratio)
    }

    /// Number of distinct ratios.
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    /// Whether no size has been added.
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.ratios.clear();
    }

    /// Pick the ratio to use when `current` may no longer be supported.
    ///
    /// Keeps `current` if present, else `default` if present, else the ratio
    /// whose sizes cover the most pixels in total (earliest ratio on ties).
    /// Fails only when the map is empty.
    pub fn resolve_ratio(
        &self,
        current: AspectRatio,
        default: AspectRatio,
    ) -> Result<AspectRatio, GeometryError> {
        if self.contains_ratio(current) {
            return Ok(current);
        }
        if self.contains_ratio(default) {
            tracing::debug!(%current, %default, "aspect ratio unsupported, using default");
            return Ok(default);
        }
        let mut best: Option<(AspectRatio, u64)> = None;
        for (&ratio, sizes) in &self.ratios {
            let pixels: u64 = sizes.iter().map(|s| s.area()).sum();
            if best.is_none_or(|(_, p)| pixels > p) {
                best = Some((ratio, pixels));
            }
        }
        let (ratio, _) = best.ok_or(GeometryError::UnsupportedAspectRatio)?;
        tracing::debug!(
            %current,
            %default,
            fallback = %ratio,
            "aspect ratio unsupported, using fallback"
        );
        Ok(ratio)
    }
}

impl Extend<Size> for SizeMap {
    fn extend<I: IntoIterator<Item = Size>>(&mut self, iter: I) {
        for size in iter {
            self.add(size);
        }
    }
}

impl FromIterator<Size> for SizeMap {
    fn from_iter<I: IntoIterator<Item = Size>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: u32, h: u32) -> Size {
        Size::new(w, h).unwrap()
    }

    fn ratio(x: u32, y: u32) -> AspectRatio {
        AspectRatio::new(x, y).unwrap()
    }

    #[test]
    fn add_twice_reports_duplicate() {
        let mut map = SizeMap::new();
        assert!(map.add(size(10, 10)));
        assert!(!map.add(size(10, 10)));
        assert_eq!(map.sizes(AspectRatio::SQUARE), &[size(10, 10)]);
    }

    #[test]
    fn different_ratios_land_in_different_buckets() {
        let mut map = SizeMap::new();
        map.add(size(10, 10));
        map.add(size(10, 20));
        map.add(size(20, 40));
        map.add(size(30, 10));
        assert_eq!(map.len(), 3);
        assert_eq!(map.sizes(ratio(1, 2)), &[size(10, 20), size(20, 40)]);
        assert_eq!(map.sizes(ratio(3, 1)), &[size(30, 10)]);
    }

    #[test]
    fn every_size_reduces_to_its_key() {
        let map: SizeMap = [
            (640, 480),
            (1280, 720),
            (1920, 1080),
            (320, 240),
            (1440, 1080),
            (176, 144),
            (1080, 1080),
        ]
        .into_iter()
        .map(|(w, h)| size(w, h))
        .collect();
        for r in map.ratios() {
            for &s in map.sizes(r) {
                assert!(r.matches(s), "{s} stored under {r}");
            }
        }
    }

    #[test]
    fn buckets_sorted_by_area_regardless_of_insertion_order() {
        let mut map = SizeMap::new();
        for (w, h) in [(1920, 1080), (640, 360), (3840, 2160), (1280, 720)] {
            map.add(size(w, h));
        }
        assert_eq!(
            map.sizes(AspectRatio::RATIO_16_9),
            &[
                size(640, 360),
                size(1280, 720),
                size(1920, 1080),
                size(3840, 2160)
            ]
        );
    }

    #[test]
    fn ratios_iterate_ascending() {
        let map: SizeMap = [size(1920, 1080), size(640, 480), size(100, 100)]
            .into_iter()
            .collect();
        let ratios: Vec<_> = map.ratios().collect();
        assert_eq!(
            ratios,
            [
                AspectRatio::SQUARE,
                AspectRatio::RATIO_4_3,
                AspectRatio::RATIO_16_9
            ]
        );
    }

    #[test]
    fn absent_ratio_is_empty_not_error() {
        let map = SizeMap::new();
        assert!(map.sizes(AspectRatio::RATIO_4_3).is_empty());
        assert!(!map.contains_ratio(AspectRatio::RATIO_4_3));
    }

    #[test]
    fn clear_empties() {
        let mut map: SizeMap = [size(640, 480)].into_iter().collect();
        assert!(!map.is_empty());
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.ratios().count(), 0);
    }

    #[test]
    fn resolve_keeps_current() {
        let map: SizeMap = [size(640, 480), size(1280, 720)].into_iter().collect();
        assert_eq!(
            map.resolve_ratio(AspectRatio::RATIO_16_9, AspectRatio::RATIO_4_3),
            Ok(AspectRatio::RATIO_16_9)
        );
    }

    #[test]
    fn resolve_prefers_default() {
        let map: SizeMap = [size(640, 480), size(1920, 1080)].into_iter().collect();
        assert_eq!(
            map.resolve_ratio(AspectRatio::SQUARE, AspectRatio::RATIO_4_3),
            Ok(AspectRatio::RATIO_4_3)
        );
    }

    #[test]
    fn resolve_falls_back_to_most_pixels() {
        // 16:9 bucket has more pixels than 1:1.
        let map: SizeMap = [size(100, 100), size(1280, 720)].into_iter().collect();
        assert_eq!(
            map.resolve_ratio(ratio(3, 2), AspectRatio::RATIO_4_3),
            Ok(AspectRatio::RATIO_16_9)
        );
    }

    #[test]
    fn resolve_tie_goes_to_smaller_ratio() {
        let map: SizeMap = [size(200, 100), size(100, 200)].into_iter().collect();
        assert_eq!(
            map.resolve_ratio(AspectRatio::SQUARE, AspectRatio::RATIO_4_3),
            Ok(ratio(1, 2))
        );
    }

    #[test]
    fn resolve_empty_map_fails() {
        assert_eq!(
            SizeMap::new().resolve_ratio(AspectRatio::RATIO_4_3, AspectRatio::RATIO_4_3),
            Err(GeometryError::UnsupportedAspectRatio)
        );
    }
}
