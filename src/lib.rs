//! Camera preview geometry: size negotiation, sensor orientation, and metering transforms.
//!
//! Pure geometry with no hardware access and no threading. `no_std` compatible; needs `alloc`.
//!
//! # Modules
//!
//! - [`size`] — Sizes and GCD-reduced aspect ratios
//! - [`size_map`] — Supported sizes grouped by ratio, fallback ratio policy
//! - [`select`] — Smallest covering preview size, largest picture size
//! - [`orientation`] — Facing, quarter-turn rotations, display vs still rotation
//! - [`transform`] — Affine maps between camera-driver space and the preview
//! - [`metering`] — Metering regions, zoom crop, touch-to-focus areas
//! - [`capture`] — Focus lock and precapture sequencing for still capture
//! - [`controls`] — Flash and focus mode tables
//! - [`config`] — Negotiation and focus timing settings
//! - [`backend`] — Camera API backends and the full layout pass
//!
//! ```
//! use zencamera::{AspectRatio, Size, SizeMap, optimal_size};
//!
//! let map: SizeMap = [(640, 480), (1280, 720), (1920, 1080)]
//!     .into_iter()
//!     .map(|(w, h)| Size::new(w, h).unwrap())
//!     .collect();
//!
//! // Portrait viewport; camera sizes are landscape.
//! let viewport = Size::new(1080, 1920).unwrap();
//! let preview = optimal_size(viewport, map.sizes(AspectRatio::RATIO_16_9)).unwrap();
//! assert_eq!(preview, Size::new(1920, 1080).unwrap());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

pub mod backend;
pub mod capture;
pub mod config;
pub mod controls;
pub mod error;
pub mod metering;
pub mod orientation;
pub mod select;
pub mod size;
pub mod size_map;
pub mod transform;

pub use backend::{
    BackendKind, Camera1Backend, Camera2Backend, CameraCharacteristics, CaptureBackend,
    Negotiation, Viewport, negotiate,
};
pub use capture::{
    AeState, AfState, CaptureAction, CaptureResult, CaptureState, CaptureStateMachine,
};
pub use config::NegotiationConfig;
pub use controls::{FlashMode, FocusMode, camera2_af_mode};
pub use error::GeometryError;
pub use metering::{
    METERING_REGION_FRACTION, MeteringRegion, SensorRect, crop_region_for_zoom,
    focus_area_for_touch, region_for_normalized_point, region_weight, zero_weight_region,
};
pub use orientation::{
    Facing, OrientationState, Rotation, display_rotation_for, jpeg_rotation_for,
    legacy_jpeg_rotation_for, normalized_sensor_point,
};
pub use select::{is_sorted_by_area, largest_size, optimal_size, sort_by_area};
pub use size::{AspectRatio, Size};
pub use size_map::SizeMap;
pub use transform::{
    Affine, CAMERA_DRIVER_RECT, CoordinateTransformer, Rect, preview_texture_transform,
};
