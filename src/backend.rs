//! Camera backends and preview negotiation.
//!
//! A backend is one of the two platform camera APIs. Geometry is identical
//! for both, except for the still-capture rotation: the legacy API reuses
//! the display rotation (with a front-camera quirk), the newer one uses the
//! JPEG formula. See [`crate::orientation`].
//!
//! [`negotiate`] runs the whole layout pass: resolve the ratio, pick the
//! preview and picture sizes, and compute both rotations.
//!
//! ```
//! use zencamera::{
//!     AspectRatio, Camera2Backend, CameraCharacteristics, Facing, NegotiationConfig,
//!     Rotation, Size, SizeMap, Viewport, negotiate,
//! };
//!
//! let sizes: SizeMap = [(640, 480), (1280, 720), (1920, 1080)]
//!     .into_iter()
//!     .map(|(w, h)| Size::new(w, h).unwrap())
//!     .collect();
//! let camera = Camera2Backend::new(CameraCharacteristics::new(
//!     Facing::Back,
//!     90,
//!     sizes.clone(),
//!     sizes,
//! ));
//!
//! let n = negotiate(
//!     &camera,
//!     Viewport::new(1080, 1920).unwrap(),
//!     Rotation::Rotate90,
//!     AspectRatio::RATIO_16_9,
//!     &NegotiationConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(n.preview, Size::new(1920, 1080).unwrap());
//! assert_eq!(n.display_rotation, 0);
//! ```

use crate::config::NegotiationConfig;
use crate::error::GeometryError;
use crate::orientation::{
    Facing, Rotation, display_rotation_for, jpeg_rotation_for, legacy_jpeg_rotation_for,
};
use crate::select::{largest_size, optimal_size};
use crate::size::{AspectRatio, Size};
use crate::size_map::SizeMap;
use crate::transform::{Affine, CoordinateTransformer, Rect, preview_texture_transform};

/// Which platform camera API a backend drives.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BackendKind {
    /// The legacy API.
    Camera1,
    /// The newer API.
    #[default]
    Camera2,
}

/// What an opened camera reports about itself.
///
/// Rebuilt every time a camera is opened.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CameraCharacteristics {
    /// Which way the lens points.
    pub facing: Facing,
    /// Sensor mounting angle in degrees: 0, 90, 180, or 270.
    pub sensor_orientation: i32,
    /// Sizes the preview stream supports.
    pub preview_sizes: SizeMap,
    /// Sizes still captures support.
    pub picture_sizes: SizeMap,
}

impl CameraCharacteristics {
    /// Characteristics from their parts.
    pub fn new(
        facing: Facing,
        sensor_orientation: i32,
        preview_sizes: SizeMap,
        picture_sizes: SizeMap,
    ) -> Self {
        Self {
            facing,
            sensor_orientation,
            preview_sizes,
            picture_sizes,
        }
    }
}

/// A camera API the geometry core can negotiate for.
pub trait CaptureBackend {
    /// Which camera API this is.
    fn kind(&self) -> BackendKind;

    /// The opened camera's characteristics.
    fn characteristics(&self) -> &CameraCharacteristics;

    /// Preview rotation for the given device rotation, in degrees.
    fn display_rotation(&self, device_rotation: Rotation) -> i32 {
        let c = self.characteristics();
        display_rotation_for(c.sensor_orientation, device_rotation.degrees(), c.facing)
    }

    /// Still-capture rotation for the given device rotation, in degrees.
    fn still_rotation(&self, device_rotation: Rotation) -> i32 {
        let c = self.characteristics();
        let device = device_rotation.degrees();
        match self.kind() {
            BackendKind::Camera1 => {
                legacy_jpeg_rotation_for(c.sensor_orientation, device, c.facing)
            }
            BackendKind::Camera2 => jpeg_rotation_for(c.sensor_orientation, device, c.facing),
        }
    }
}

/// Backend for the legacy camera API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Camera1Backend {
    characteristics: CameraCharacteristics,
}

impl Camera1Backend {
    /// Backend for a camera with these characteristics.
    pub fn new(characteristics: CameraCharacteristics) -> Self {
        Self { characteristics }
    }
}

impl CaptureBackend for Camera1Backend {
    fn kind(&self) -> BackendKind {
        BackendKind::Camera1
    }

    fn characteristics(&self) -> &CameraCharacteristics {
        &self.characteristics
    }
}

/// Backend for the newer camera API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Camera2Backend {
    characteristics: CameraCharacteristics,
}

impl Camera2Backend {
    /// Backend for a camera with these characteristics.
    pub fn new(characteristics: CameraCharacteristics) -> Self {
        Self { characteristics }
    }
}

impl CaptureBackend for Camera2Backend {
    fn kind(&self) -> BackendKind {
        BackendKind::Camera2
    }

    fn characteristics(&self) -> &CameraCharacteristics {
        &self.characteristics
    }
}

/// The surface that displays the preview, as laid out on screen.
///
/// Supplied fresh for every layout pass; never camera state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    size: Size,
}

impl Viewport {
    /// Fails with [`GeometryError::DegenerateViewport`] if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        let size = Size::new(width, height).map_err(|_| GeometryError::DegenerateViewport)?;
        Ok(Self { size })
    }

    /// Width in pixels.
    pub fn width(self) -> u32 {
        self.size.width()
    }

    /// Height in pixels.
    pub fn height(self) -> u32 {
        self.size.height()
    }

    /// Dimensions as seen by the sensor after `device_rotation`.
    pub fn oriented(self, device_rotation: Rotation) -> Size {
        if device_rotation.swaps_axes() {
            self.size.transposed()
        } else {
            self.size
        }
    }

    /// Dimensions with width ≥ height.
    pub fn landscape(self) -> Size {
        self.size.landscape()
    }

    /// The viewport as a rect at the origin.
    pub fn to_rect(self) -> Rect {
        Rect::from_size(self.size.width() as f32, self.size.height() as f32)
    }
}

/// Outcome of one layout pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Negotiation {
    /// Ratio actually used. Differs from the request after a fallback.
    pub ratio: AspectRatio,
    /// Preview stream size.
    pub preview: Size,
    /// Still-capture size.
    pub picture: Size,
    /// Preview rotation in degrees.
    pub display_rotation: i32,
    /// Still-capture rotation in degrees.
    pub still_rotation: i32,
    /// Device rotation the pass was run for.
    pub device_rotation: Rotation,
    /// Facing of the negotiated camera.
    pub facing: Facing,
}

impl Negotiation {
    /// Transformer between driver space and `preview_rect`.
    pub fn coordinate_transformer(
        &self,
        preview_rect: Rect,
    ) -> Result<CoordinateTransformer, GeometryError> {
        CoordinateTransformer::new(self.facing.mirrors(), self.display_rotation, preview_rect)
    }

    /// Texture matrix for a `width × height` preview surface.
    pub fn texture_transform(&self, width: f32, height: f32) -> Affine {
        preview_texture_transform(self.device_rotation, width, height)
    }
}

/// Choose preview size, picture size, and rotations for `backend`.
///
/// The ratio is resolved against the preview sizes with
/// [`SizeMap::resolve_ratio`], using `config.default_ratio` as the first
/// fallback. The preview size is the smallest covering the viewport in that
/// ratio. The picture size is the largest in the same ratio; if the picture
/// sizes lack it, the same fallback policy runs on them.
pub fn negotiate<B: CaptureBackend + ?Sized>(
    backend: &B,
    viewport: Viewport,
    device_rotation: Rotation,
    requested_ratio: AspectRatio,
    config: &NegotiationConfig,
) -> Result<Negotiation, GeometryError> {
    let c = backend.characteristics();
    let ratio = c
        .preview_sizes
        .resolve_ratio(requested_ratio, config.default_ratio)?;
    let desired = viewport.oriented(device_rotation);
    let preview = optimal_size(desired, c.preview_sizes.sizes(ratio))?;

    let picture_ratio = c.picture_sizes.resolve_ratio(ratio, config.default_ratio)?;
    let picture = largest_size(c.picture_sizes.sizes(picture_ratio))?;

    let negotiation = Negotiation {
        ratio,
        preview,
        picture,
        display_rotation: backend.display_rotation(device_rotation),
        still_rotation: backend.still_rotation(device_rotation),
        device_rotation,
        facing: c.facing,
    };
    tracing::debug!(
        backend = ?backend.kind(),
        %ratio,
        %preview,
        %picture,
        display_rotation = negotiation.display_rotation,
        still_rotation = negotiation.still_rotation,
        "negotiated preview"
    );
    Ok(negotiation)
}
