//! Affine transforms between camera-driver space and preview space.
//!
//! The camera driver addresses metering and focus regions in a fixed square,
//! `[-1000, -1000]` to `[1000, 1000]`, independent of resolution. The preview
//! is whatever rectangle the view occupies on screen. [`CoordinateTransformer`]
//! maps rectangles both ways.
//!
//! ```
//! use zencamera::{CoordinateTransformer, Rect};
//!
//! let preview = Rect::new(0.0, 0.0, 1080.0, 1920.0);
//! let t = CoordinateTransformer::new(false, 90, preview).unwrap();
//!
//! // A touch square in the preview, mapped into driver space and back.
//! let touch = Rect::new(500.0, 900.0, 580.0, 980.0);
//! let driver = t.to_camera_space(touch);
//! assert!(t.to_preview_space(driver).approx_eq(touch, 1e-3));
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::error::GeometryError;
use crate::metering::SensorRect;
use crate::orientation::Rotation;

/// Camera-driver coordinate space for metering and focus areas.
pub const CAMERA_DRIVER_RECT: Rect = Rect::new(-1000.0, -1000.0, 1000.0, 1000.0);

/// Axis-aligned rectangle with float edges.
///
/// Edges may be negative (driver space is centered on the origin). A rect is
/// "sorted" when `left <= right` and `top <= bottom`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Rect {
    /// Create a rect from its edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rect at the origin with the given size.
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// `right - left`.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// `bottom - top`.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Center point.
    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Whether both width and height are non-zero.
    pub fn has_nonzero_area(&self) -> bool {
        self.width() != 0.0 && self.height() != 0.0
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

    /// Whether every edge is within `tolerance` of `other`'s.
    pub fn approx_eq(&self, other: Self, tolerance: f32) -> bool {
        (self.left - other.left).abs() <= tolerance
            && (self.top - other.top).abs() <= tolerance
            && (self.right - other.right).abs() <= tolerance
            && (self.bottom - other.bottom).abs() <= tolerance
    }

    /// Round each edge to the nearest integer.
    pub fn round(self) -> SensorRect {
        SensorRect::new(
            self.left.round() as i32,
            self.top.round() as i32,
            self.right.round() as i32,
            self.bottom.round() as i32,
        )
    }
}

/// 2D affine transform.
///
/// Maps `(x, y)` to `(sx·x + kx·y + tx, ky·x + sy·y + ty)`. Composition
/// reads left to right: `a.then(b)` applies `a` first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Affine {
    sx: f64,
    kx: f64,
    tx: f64,
    ky: f64,
    sy: f64,
    ty: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        sx: 1.0,
        kx: 0.0,
        tx: 0.0,
        ky: 0.0,
        sy: 1.0,
        ty: 0.0,
    };

    /// Scale about the origin.
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self {
            sx,
            kx: 0.0,
            tx: 0.0,
            ky: 0.0,
            sy,
            ty: 0.0,
        }
    }

    /// Translate.
    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self {
            sx: 1.0,
            kx: 0.0,
            tx,
            ky: 0.0,
            sy: 1.0,
            ty,
        }
    }

    /// Rotate about the origin by `degrees`, clockwise on a y-down screen.
    ///
    /// Multiples of 90° are exact.
    pub fn rotate(degrees: i32) -> Self {
        let (sin, cos) = match Rotation::from_degrees(degrees) {
            Some(Rotation::Rotate0) => (0.0, 1.0),
            Some(Rotation::Rotate90) => (1.0, 0.0),
            Some(Rotation::Rotate180) => (0.0, -1.0),
            Some(Rotation::Rotate270) => (-1.0, 0.0),
            None => (f64::from(degrees)).to_radians().sin_cos(),
        };
        Self {
            sx: cos,
            kx: -sin,
            tx: 0.0,
            ky: sin,
            sy: cos,
            ty: 0.0,
        }
    }

    /// Map `src` onto `dst`, scaling each axis independently (stretch to fill).
    ///
    /// `src` must have non-zero area.
    pub fn rect_to_rect_fill(src: Rect, dst: Rect) -> Self {
        let sx = f64::from(dst.width()) / f64::from(src.width());
        let sy = f64::from(dst.height()) / f64::from(src.height());
        Self {
            sx,
            kx: 0.0,
            tx: f64::from(dst.left) - f64::from(src.left) * sx,
            ky: 0.0,
            sy,
            ty: f64::from(dst.top) - f64::from(src.top) * sy,
        }
    }

    /// Apply `self`, then `next`.
    pub fn then(self, next: Self) -> Self {
        Self {
            sx: next.sx * self.sx + next.kx * self.ky,
            kx: next.sx * self.kx + next.kx * self.sy,
            tx: next.sx * self.tx + next.kx * self.ty + next.tx,
            ky: next.ky * self.sx + next.sy * self.ky,
            sy: next.ky * self.kx + next.sy * self.sy,
            ty: next.ky * self.tx + next.sy * self.ty + next.ty,
        }
    }

    /// Inverse transform, or `None` if singular.
    pub fn invert(self) -> Option<Self> {
        let det = self.sx * self.sy - self.kx * self.ky;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            sx: self.sy * inv,
            kx: -self.kx * inv,
            tx: (self.kx * self.ty - self.sy * self.tx) * inv,
            ky: -self.ky * inv,
            sy: self.sx * inv,
            ty: (self.ky * self.tx - self.sx * self.ty) * inv,
        })
    }

    /// Map a point.
    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        let (x, y) = (f64::from(x), f64::from(y));
        (
            (self.sx * x + self.kx * y + self.tx) as f32,
            (self.ky * x + self.sy * y + self.ty) as f32,
        )
    }

    /// Map the four corners of `rect` and return their sorted bounding box.
    ///
    /// Exact for transforms made of axis-aligned scales and quarter-turn
    /// rotations; a bounding-box approximation otherwise.
    pub fn map_rect(&self, rect: Rect) -> Rect {
        let corners = [
            self.map_point(rect.left, rect.top),
            self.map_point(rect.right, rect.top),
            self.map_point(rect.left, rect.bottom),
            self.map_point(rect.right, rect.bottom),
        ];
        let mut out = Rect::new(f32::MAX, f32::MAX, f32::MIN, f32::MIN);
        for (x, y) in corners {
            out.left = out.left.min(x);
            out.top = out.top.min(y);
            out.right = out.right.max(x);
            out.bottom = out.bottom.max(y);
        }
        out
    }

    /// Row-major 3×3 values: `[sx, kx, tx, ky, sy, ty, 0, 0, 1]`.
    ///
    /// Same layout as a platform 3×3 graphics matrix.
    pub fn to_values(&self) -> [f32; 9] {
        [
            self.sx as f32,
            self.kx as f32,
            self.tx as f32,
            self.ky as f32,
            self.sy as f32,
            self.ty as f32,
            0.0,
            0.0,
            1.0,
        ]
    }

    /// Whether every coefficient is within `tolerance` of `other`'s.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.sx - other.sx).abs() <= tolerance
            && (self.kx - other.kx).abs() <= tolerance
            && (self.tx - other.tx).abs() <= tolerance
            && (self.ky - other.ky).abs() <= tolerance
            && (self.sy - other.sy).abs() <= tolerance
            && (self.ty - other.ty).abs() <= tolerance
    }
}

/// Converts rectangles between camera-driver space and preview space.
///
/// camera → preview is `mirror`, then `rotate(display_rotation)`, then a
/// stretch-to-fill of [`CAMERA_DRIVER_RECT`] onto the preview rect. The
/// reverse direction uses the inverse, computed once at construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordinateTransformer {
    camera_to_preview: Affine,
    preview_to_camera: Affine,
}

impl CoordinateTransformer {
    /// Build a transformer.
    ///
    /// `mirror_x` is set for front cameras. `display_rotation` is the value
    /// from [`display_rotation_for`](crate::display_rotation_for). Fails with
    /// [`GeometryError::DegenerateViewport`] if `preview_rect` has zero area.
    pub fn new(
        mirror_x: bool,
        display_rotation: i32,
        preview_rect: Rect,
    ) -> Result<Self, GeometryError> {
        if !preview_rect.has_nonzero_area() {
            return Err(GeometryError::DegenerateViewport);
        }
        let mirror = Affine::scale(if mirror_x { -1.0 } else { 1.0 }, 1.0);
        let camera_to_preview = mirror
            .then(Affine::rotate(display_rotation))
            .then(Affine::rect_to_rect_fill(CAMERA_DRIVER_RECT, preview_rect));
        let preview_to_camera = camera_to_preview
            .invert()
            .ok_or(GeometryError::DegenerateViewport)?;
        Ok(Self {
            camera_to_preview,
            preview_to_camera,
        })
    }

    /// Camera-driver rect to preview rect.
    pub fn to_preview_space(&self, source: Rect) -> Rect {
        self.camera_to_preview.map_rect(source)
    }

    /// Preview rect to camera-driver rect.
    pub fn to_camera_space(&self, source: Rect) -> Rect {
        self.preview_to_camera.map_rect(source)
    }

    /// Preview point (e.g. a touch) to camera-driver point.
    pub fn point_to_camera_space(&self, x: f32, y: f32) -> (f32, f32) {
        self.preview_to_camera.map_point(x, y)
    }

    /// Camera-driver point to preview point.
    pub fn point_to_preview_space(&self, x: f32, y: f32) -> (f32, f32) {
        self.camera_to_preview.map_point(x, y)
    }

    /// The camera → preview matrix.
    pub fn camera_to_preview(&self) -> Affine {
        self.camera_to_preview
    }

    /// The preview → camera matrix.
    pub fn preview_to_camera(&self) -> Affine {
        self.preview_to_camera
    }
}

/// Matrix for the preview texture when the screen is landscape.
///
/// For 90° the texture is turned clockwise, for 270° counter-clockwise, and
/// both keep the `width × height` bounds. Other rotations need no correction
/// and return the identity.
pub fn preview_texture_transform(display_rotation: Rotation, width: f32, height: f32) -> Affine {
    if width == 0.0 || height == 0.0 {
        return Affine::IDENTITY;
    }
    let (w, h) = (f64::from(width), f64::from(height));
    match display_rotation {
        // (0,0)→(0,h), (w,0)→(0,0), (0,h)→(w,h)
        Rotation::Rotate90 => Affine {
            sx: 0.0,
            kx: w / h,
            tx: 0.0,
            ky: -h / w,
            sy: 0.0,
            ty: h,
        },
        // (0,0)→(w,0), (w,0)→(w,h), (0,h)→(0,0)
        Rotation::Rotate270 => Affine {
            sx: 0.0,
            kx: -w / h,
            tx: w,
            ky: h / w,
            sy: 0.0,
            ty: 0.0,
        },
        Rotation::Rotate0 | Rotation::Rotate180 => Affine::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    const TOL: f32 = 1e-3;

    fn assert_point(got: (f32, f32), want: (f32, f32)) {
        assert!(
            (got.0 - want.0).abs() <= TOL && (got.1 - want.1).abs() <= TOL,
            "got {got:?}, want {want:?}"
        );
    }

    #[test]
    fn zero_area_rejected() {
        for rect in [
            Rect::new(0.0, 0.0, 0.0, 100.0),
            Rect::new(0.0, 0.0, 100.0, 0.0),
            Rect::default(),
        ] {
            assert_eq!(
                CoordinateTransformer::new(false, 0, rect),
                Err(GeometryError::DegenerateViewport)
            );
        }
    }

    #[test]
    fn identity_rotation_fills_preview() {
        let preview = Rect::new(0.0, 0.0, 1000.0, 500.0);
        let t = CoordinateTransformer::new(false, 0, preview).unwrap();
        assert!(t.to_preview_space(CAMERA_DRIVER_RECT).approx_eq(preview, TOL));
        assert_point(t.point_to_preview_space(0.0, 0.0), (500.0, 250.0));
        assert_point(t.point_to_preview_space(-1000.0, -1000.0), (0.0, 0.0));
    }

    #[test]
    fn mirror_flips_x() {
        let preview = Rect::new(0.0, 0.0, 1000.0, 500.0);
        let t = CoordinateTransformer::new(true, 0, preview).unwrap();
        assert_point(t.point_to_preview_space(1000.0, 0.0), (0.0, 250.0));
        assert_point(t.point_to_preview_space(-1000.0, -1000.0), (1000.0, 0.0));
    }

    #[test]
    fn rotation_90_is_clockwise() {
        let preview = Rect::new(0.0, 0.0, 1000.0, 2000.0);
        let t = CoordinateTransformer::new(false, 90, preview).unwrap();
        // Driver +x points down the preview after a clockwise quarter turn.
        assert_point(t.point_to_preview_space(1000.0, 0.0), (500.0, 2000.0));
        assert_point(t.point_to_preview_space(0.0, 1000.0), (0.0, 1000.0));
    }

    #[test]
    fn offset_preview_rect() {
        let preview = Rect::new(100.0, 200.0, 300.0, 400.0);
        let t = CoordinateTransformer::new(false, 180, preview).unwrap();
        assert_point(t.point_to_preview_space(-1000.0, -1000.0), (300.0, 400.0));
        assert!(t.to_preview_space(CAMERA_DRIVER_RECT).approx_eq(preview, TOL));
    }

    #[test]
    fn round_trip_all_rotations_and_mirrors() {
        let preview = Rect::new(0.0, 0.0, 1080.0, 1920.0);
        let rects = [
            Rect::new(10.0, 20.0, 110.0, 220.0),
            Rect::new(500.0, 900.0, 580.0, 980.0),
            Rect::new(0.0, 0.0, 1080.0, 1920.0),
            Rect::new(-50.0, 1800.0, 40.0, 2000.0),
        ];
        let mut failures = Vec::new();
        for rotation in [0, 90, 180, 270] {
            for mirror in [false, true] {
                let t = CoordinateTransformer::new(mirror, rotation, preview).unwrap();
                for &r in &rects {
                    let back = t.to_preview_space(t.to_camera_space(r));
                    if !back.approx_eq(r, TOL) {
                        failures.push(format!("rot={rotation} mirror={mirror}: {r:?} -> {back:?}"));
                    }
                    let driver = t.to_camera_space(r);
                    let again = t.to_camera_space(t.to_preview_space(driver));
                    if !again.approx_eq(driver, TOL) {
                        failures.push(format!(
                            "rot={rotation} mirror={mirror}: driver {driver:?} -> {again:?}"
                        ));
                    }
                }
            }
        }
        assert!(failures.is_empty(), "{}", failures.join("\n"));
    }

    #[test]
    fn mapped_rects_are_sorted() {
        let preview = Rect::new(0.0, 0.0, 640.0, 480.0);
        for rotation in [0, 90, 180, 270] {
            for mirror in [false, true] {
                let t = CoordinateTransformer::new(mirror, rotation, preview).unwrap();
                let r = t.to_camera_space(Rect::new(100.0, 100.0, 200.0, 150.0));
                assert!(r.left <= r.right && r.top <= r.bottom, "{r:?}");
            }
        }
    }

    #[test]
    fn full_preview_maps_to_driver_rect() {
        let preview = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        for rotation in [0, 90, 180, 270] {
            for mirror in [false, true] {
                let t = CoordinateTransformer::new(mirror, rotation, preview).unwrap();
                let r = t.to_camera_space(preview);
                assert!(
                    r.approx_eq(CAMERA_DRIVER_RECT, 0.05),
                    "rot={rotation} mirror={mirror}: {r:?}"
                );
            }
        }
    }

    #[test]
    fn inverse_composes_to_identity() {
        let t = CoordinateTransformer::new(true, 270, Rect::new(5.0, 7.0, 305.0, 407.0)).unwrap();
        let id = t.camera_to_preview().then(t.preview_to_camera());
        assert!(id.approx_eq(&Affine::IDENTITY, 1e-9), "{id:?}");
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert_eq!(Affine::scale(0.0, 1.0).invert(), None);
        assert!(Affine::translate(3.0, 4.0).invert().is_some());
    }

    #[test]
    fn non_cardinal_rotation_is_bounding_box() {
        let a = Affine::rotate(45);
        let r = a.map_rect(Rect::new(-1.0, -1.0, 1.0, 1.0));
        let d = core::f32::consts::SQRT_2;
        assert!(r.approx_eq(Rect::new(-d, -d, d, d), 1e-5), "{r:?}");
    }

    #[test]
    fn texture_transform_90() {
        let m = preview_texture_transform(Rotation::Rotate90, 400.0, 300.0);
        assert_point(m.map_point(0.0, 0.0), (0.0, 300.0));
        assert_point(m.map_point(400.0, 0.0), (0.0, 0.0));
        assert_point(m.map_point(0.0, 300.0), (400.0, 300.0));
        assert_point(m.map_point(400.0, 300.0), (400.0, 0.0));
    }

    #[test]
    fn texture_transform_270() {
        let m = preview_texture_transform(Rotation::Rotate270, 400.0, 300.0);
        assert_point(m.map_point(0.0, 0.0), (400.0, 0.0));
        assert_point(m.map_point(400.0, 0.0), (400.0, 300.0));
        assert_point(m.map_point(0.0, 300.0), (0.0, 0.0));
        assert_point(m.map_point(400.0, 300.0), (0.0, 300.0));
    }

    #[test]
    fn texture_transform_portrait_is_identity() {
        assert_eq!(
            preview_texture_transform(Rotation::Rotate0, 400.0, 300.0),
            Affine::IDENTITY
        );
        assert_eq!(
            preview_texture_transform(Rotation::Rotate180, 400.0, 300.0),
            Affine::IDENTITY
        );
    }

    #[test]
    fn values_layout() {
        let v = Affine::translate(3.0, 4.0).to_values();
        assert_eq!(v, [1.0, 0.0, 3.0, 0.0, 1.0, 4.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn round_to_sensor_rect() {
        let r = Rect::new(-10.4, 3.6, 99.5, -0.2).round();
        assert_eq!(r, SensorRect::new(-10, 4, 100, 0));
    }
}
