//! Metering and focus regions.
//!
//! Two coordinate systems are in play:
//!
//! - sensor pixels, for the newer camera API: regions are rectangles inside
//!   the current crop region of the active pixel array;
//! - driver space (`[-1000, 1000]²`), for the legacy API: see
//!   [`CoordinateTransformer`].

use crate::orientation::Rotation;
use crate::transform::{CAMERA_DRIVER_RECT, CoordinateTransformer, Rect};

/// Default side of a metering square as a fraction of the crop region's
/// shorter edge.
pub const METERING_REGION_FRACTION: f32 = 0.1225;

/// Lowest metering weight the driver accepts.
pub const METERING_WEIGHT_MIN: i32 = 0;
/// Highest metering weight the driver accepts.
pub const METERING_WEIGHT_MAX: i32 = 1000;

/// Integer rectangle with edges (left, top, right, bottom).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl SensorRect {
    /// Create a rect from its edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// `right - left`, saturating.
    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// `bottom - top`, saturating.
    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Swap edges as needed so that `left <= right` and `top <= bottom`.
    pub fn sorted(self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    /// Clamp every edge into `bounds`. Inverted bounds are sorted first.
    pub fn clamp_to(self, bounds: Self) -> Self {
        let b = bounds.sorted();
        Self {
            left: self.left.max(b.left).min(b.right),
            top: self.top.max(b.top).min(b.bottom),
            right: self.right.max(b.left).min(b.right),
            bottom: self.bottom.max(b.top).min(b.bottom),
        }
    }
}

/// A weighted region for auto-focus or auto-exposure.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeteringRegion {
    /// Region in sensor pixels.
    pub rect: SensorRect,
    /// Weight in `METERING_WEIGHT_MIN..=METERING_WEIGHT_MAX`. Zero disables it.
    pub weight: i32,
}

/// Region weight for a metering fraction: `lerp(MIN, MAX, fraction)`, truncated.
pub fn region_weight(fraction: f32) -> i32 {
    let min = METERING_WEIGHT_MIN as f32;
    let max = METERING_WEIGHT_MAX as f32;
    (min + fraction.clamp(0.0, 1.0) * (max - min)) as i32
}

/// Region that resets metering to the driver's default.
pub const fn zero_weight_region() -> MeteringRegion {
    MeteringRegion {
        rect: SensorRect::new(0, 0, 0, 0),
        weight: 0,
    }
}

/// Square metering region around a touch.
///
/// `(nx, ny)` is the touch in normalized upright display coordinates
/// (`0.0..=1.0`, top-left origin). The square's side is `fraction` of the
/// shorter edge of `crop_region`; it is centered on the touch rotated into
/// sensor space and clamped to `crop_region`. An inverted `crop_region` is
/// sorted first.
///
/// The weight is always `region_weight(METERING_REGION_FRACTION)` (122),
/// whatever `fraction` is: the fraction only sizes the square.
pub fn region_for_normalized_point(
    nx: f32,
    ny: f32,
    fraction: f32,
    crop_region: SensorRect,
    sensor_orientation: Rotation,
) -> MeteringRegion {
    let crop = crop_region.sorted();
    let min_edge = crop.width().min(crop.height());
    let half_side = (0.5 * fraction * min_edge as f32) as i32;
    let (sx, sy) = crate::orientation::normalized_sensor_point(nx, ny, sensor_orientation);
    let cx = (crop.left as f32 + sx * crop.width() as f32) as i32;
    let cy = (crop.top as f32 + sy * crop.height() as f32) as i32;
    let rect = SensorRect::new(
        cx.saturating_sub(half_side),
        cy.saturating_sub(half_side),
        cx.saturating_add(half_side),
        cy.saturating_add(half_side),
    )
    .clamp_to(crop);
    MeteringRegion {
        rect,
        weight: region_weight(METERING_REGION_FRACTION),
    }
}

/// Crop region of the active pixel array for a digital zoom factor.
///
/// Centered; `zoom` below 1.0 is treated as 1.0 (full array). Negative
/// sizes are treated as zero.
pub fn crop_region_for_zoom(active_width: i32, active_height: i32, zoom: f32) -> SensorRect {
    let (active_width, active_height) = (active_width.max(0), active_height.max(0));
    let zoom = if zoom.is_finite() { zoom.max(1.0) } else { 1.0 };
    let cx = active_width / 2;
    let cy = active_height / 2;
    let dx = (0.5 * active_width as f32 / zoom) as i32;
    let dy = (0.5 * active_height as f32 / zoom) as i32;
    SensorRect::new(cx - dx, cy - dy, cx + dx, cy + dy)
}

/// Focus area in driver space for a touch at `(x, y)` in preview pixels.
///
/// `side` is the touch square's edge length in preview pixels. The mapped
/// area is clamped to the driver rectangle and rounded.
pub fn focus_area_for_touch(
    transformer: &CoordinateTransformer,
    x: f32,
    y: f32,
    side: f32,
) -> SensorRect {
    let half = side * 0.5;
    let touch = Rect::new(x - half, y - half, x + half, y + half);
    let driver = transformer.to_camera_space(touch).round();
    driver.clamp_to(CAMERA_DRIVER_RECT.round())
}
