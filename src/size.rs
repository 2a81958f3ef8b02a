//! Sizes and aspect ratios.
//!
//! Both are immutable value types. A [`Size`] is a pixel resolution as the
//! camera reports it; an [`AspectRatio`] is the same proportion reduced to
//! lowest terms, used as the grouping key for [`SizeMap`](crate::SizeMap).
//!
//! # Example
//!
//! ```
//! use zencamera::{AspectRatio, Size};
//!
//! let ratio = AspectRatio::new(1920, 1080).unwrap();
//! assert_eq!((ratio.x(), ratio.y()), (16, 9));
//! assert!(ratio.matches(Size::new(1280, 720).unwrap()));
//! assert_eq!("16:9".parse::<AspectRatio>().unwrap(), ratio);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::error::GeometryError;

/// Width × height in pixels. Both dimensions are non-zero.
///
/// Equality is exact. Sizes are *ordered* by area, but only through
/// [`cmp_area`](Self::cmp_area): two different shapes can share an area, so
/// `Size` does not implement `Ord`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SizeRepr")
)]
pub struct Size {
    width: u32,
    height: u32,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SizeRepr {
    width: u32,
    height: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<SizeRepr> for Size {
    type Error = GeometryError;

    fn try_from(r: SizeRepr) -> Result<Self, Self::Error> {
        Size::new(r.width, r.height)
    }
}

impl Size {
    /// Create a size. Fails with [`GeometryError::InvalidDimensions`] if
    /// either dimension is zero.
    pub const fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Total pixel count.
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Compare by area only. Different shapes with equal area compare `Equal`.
    pub fn cmp_area(&self, other: &Self) -> Ordering {
        self.area().cmp(&other.area())
    }

    /// Swap width and height.
    pub const fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Whether width ≥ height.
    pub const fn is_landscape(self) -> bool {
        self.width >= self.height
    }

    /// This size rotated so that width ≥ height.
    ///
    /// Camera-reported sizes are always landscape, whatever the device
    /// orientation.
    pub const fn landscape(self) -> Self {
        if self.is_landscape() {
            self
        } else {
            self.transposed()
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Proportion between width and height, always stored in lowest terms.
///
/// Ordered by ratio value (`x / y`), computed exactly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RatioRepr")
)]
pub struct AspectRatio {
    x: u32,
    y: u32,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RatioRepr {
    x: u32,
    y: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RatioRepr> for AspectRatio {
    type Error = GeometryError;

    fn try_from(r: RatioRepr) -> Result<Self, Self::Error> {
        AspectRatio::new(r.x, r.y)
    }
}

impl AspectRatio {
    /// 4:3, the usual default for still photography sensors.
    pub const RATIO_4_3: Self = Self { x: 4, y: 3 };
    /// 16:9.
    pub const RATIO_16_9: Self = Self { x: 16, y: 9 };
    /// 1:1.
    pub const SQUARE: Self = Self { x: 1, y: 1 };

    /// Reduce `width:height` by their greatest common divisor.
    pub const fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidDimensions);
        }
        let g = gcd(width, height);
        Ok(Self {
            x: width / g,
            y: height / g,
        })
    }

    /// The ratio a size reduces to.
    pub const fn of(size: Size) -> Self {
        let g = gcd(size.width, size.height);
        Self {
            x: size.width / g,
            y: size.height / g,
        }
    }

    /// Reduced width term.
    pub const fn x(self) -> u32 {
        self.x
    }

    /// Reduced height term.
    pub const fn y(self) -> u32 {
        self.y
    }

    /// Whether `size` reduces to exactly this ratio.
    pub fn matches(self, size: Size) -> bool {
        Self::of(size) == self
    }

    /// `x / y`.
    pub fn to_float(self) -> f32 {
        self.x as f32 / self.y as f32
    }

    /// Swap the terms: 16:9 becomes 9:16.
    ///
    /// Used to reconcile a landscape sensor ratio with a portrait viewport
    /// when the display is rotated by 90° or 270°.
    pub const fn inverse(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

impl Ord for AspectRatio {
    fn cmp(&self, other: &Self) -> Ordering {
        // x1/y1 vs x2/y2 without rounding. Both are reduced, so Equal implies ==.
        let lhs = self.x as u64 * other.y as u64;
        let rhs = other.x as u64 * self.y as u64;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for AspectRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Size> for AspectRatio {
    fn from(size: Size) -> Self {
        Self::of(size)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

impl FromStr for AspectRatio {
    type Err = GeometryError;

    /// Parse `"x:y"`, e.g. `"16:9"`. Surrounding whitespace is ignored and the
    /// result is reduced, so `"32:18"` equals `"16:9"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.trim().split_once(':').ok_or(GeometryError::ParseRatio)?;
        let x = x.trim().parse::<u32>().map_err(|_| GeometryError::ParseRatio)?;
        let y = y.trim().parse::<u32>().map_err(|_| GeometryError::ParseRatio)?;
        Self::new(x, y)
    }
}

/// Euclid. `gcd(0, 0) == 0`; callers reject zero dimensions first.
pub(crate) const fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let c = b;
        b = a % b;
        a = c;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    fn size(w: u32, h: u32) -> Size {
        Size::new(w, h).unwrap()
    }

    #[test]
    fn reduces_by_gcd() {
        let r = AspectRatio::new(1, 2).unwrap();
        assert_eq!((r.x(), r.y()), (1, 2));
        let r = AspectRatio::new(2, 4).unwrap();
        assert_eq!((r.x(), r.y()), (1, 2));
        let r = AspectRatio::new(391, 713).unwrap();
        assert_eq!((r.x(), r.y()), (17, 31));
    }

    #[test]
    fn reduced_terms_are_coprime() {
        let mut failures = Vec::new();
        for w in 1..=120u32 {
            for h in 1..=120u32 {
                let r = AspectRatio::new(w, h).unwrap();
                if gcd(r.x(), r.y()) != 1 {
                    failures.push(alloc::format!("{w}x{h} -> {r} not reduced"));
                }
                if !r.matches(size(w, h)) {
                    failures.push(alloc::format!("{r} does not match {w}x{h}"));
                }
            }
        }
        assert!(failures.is_empty(), "{}", failures.join("\n"));
    }

    #[test]
    fn equality_after_reduction() {
        assert_eq!(AspectRatio::new(2, 4), AspectRatio::new(1, 2));
        assert_ne!(AspectRatio::new(1, 2), AspectRatio::new(2, 3));
    }

    #[test]
    fn matches_checks_reduced_form() {
        let ratio = AspectRatio::new(3, 4).unwrap();
        assert!(ratio.matches(size(6, 8)));
        assert!(!ratio.matches(size(1, 2)));
        assert!(!ratio.matches(size(8, 6)));
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(AspectRatio::new(0, 3), Err(GeometryError::InvalidDimensions));
        assert_eq!(AspectRatio::new(4, 0), Err(GeometryError::InvalidDimensions));
        assert_eq!(Size::new(0, 0), Err(GeometryError::InvalidDimensions));
        assert_eq!(Size::new(640, 0), Err(GeometryError::InvalidDimensions));
    }

    #[test]
    fn ordering_by_value() {
        let four_three = AspectRatio::RATIO_4_3;
        let sixteen_nine = AspectRatio::RATIO_16_9;
        assert!(four_three < sixteen_nine);
        assert!(AspectRatio::SQUARE < four_three);
        assert_eq!(
            AspectRatio::new(8, 6).unwrap().cmp(&four_three),
            Ordering::Equal
        );
    }

    #[test]
    fn ordering_is_exact_for_close_ratios() {
        // Differ only past f32 precision.
        let a = AspectRatio::new(16_777_216, 16_777_215).unwrap();
        let b = AspectRatio::new(16_777_215, 16_777_214).unwrap();
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn distinct_ratios_stay_distinct() {
        let mut set = BTreeSet::new();
        for x in 1..=100u32 {
            set.insert(AspectRatio::new(x, 1).unwrap());
        }
        assert_eq!(set.len(), 100);
    }

    #[test]
    fn inverse_swaps_terms() {
        assert_eq!(
            AspectRatio::RATIO_16_9.inverse(),
            AspectRatio::new(9, 16).unwrap()
        );
        assert_eq!(AspectRatio::SQUARE.inverse(), AspectRatio::SQUARE);
    }

    #[test]
    fn to_float() {
        assert_eq!(AspectRatio::new(2, 4).unwrap().to_float(), 0.5);
        assert!((AspectRatio::RATIO_4_3.to_float() - 1.333_333_3).abs() < 1e-6);
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(AspectRatio::new(1, 2).unwrap().to_string(), "1:2");
        assert_eq!(size(1920, 1080).to_string(), "1920x1080");
        assert_eq!(" 32 : 18 ".parse::<AspectRatio>(), Ok(AspectRatio::RATIO_16_9));
        assert_eq!("16/9".parse::<AspectRatio>(), Err(GeometryError::ParseRatio));
        assert_eq!("a:9".parse::<AspectRatio>(), Err(GeometryError::ParseRatio));
        assert_eq!("0:9".parse::<AspectRatio>(), Err(GeometryError::InvalidDimensions));
    }

    #[test]
    fn area_ordering_ignores_shape() {
        assert_eq!(size(100, 400).cmp_area(&size(200, 200)), Ordering::Equal);
        assert_ne!(size(100, 400), size(200, 200));
        assert_eq!(size(640, 480).cmp_area(&size(1280, 720)), Ordering::Less);
    }

    #[test]
    fn landscape_normalization() {
        assert_eq!(size(1080, 1920).landscape(), size(1920, 1080));
        assert_eq!(size(1920, 1080).landscape(), size(1920, 1080));
        assert!(size(100, 100).is_landscape());
    }
}
