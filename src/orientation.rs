//! Sensor orientation, display rotation, and facing.
//!
//! Two rotation formulas live here and they are **not** interchangeable:
//!
//! - [`display_rotation_for`]: how far to rotate the live preview so it
//!   appears upright. Front cameras compensate for their horizontal mirror.
//! - [`jpeg_rotation_for`]: the orientation tag for a still capture. The
//!   device rotation enters with the opposite sign for back cameras, because
//!   still orientation composes with the sensor instead of undoing it.
//!
//! ```text
//!     sensor 90°, device 0°        display    jpeg
//!     back  ──────────────────►      90        90
//!     front ──────────────────►     270        90
//!
//!     sensor 90°, device 90°
//!     back  ──────────────────►       0         0
//!     front ──────────────────►     180       180
//! ```

/// Which way a camera points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    /// Away from the user.
    #[default]
    Back,
    /// Toward the user. The preview is mirrored horizontally.
    Front,
}

impl Facing {
    /// Whether the preview of this camera is mirrored along the X axis.
    pub const fn mirrors(self) -> bool {
        matches!(self, Self::Front)
    }

    /// The other camera.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Back => Self::Front,
            Self::Front => Self::Back,
        }
    }
}

/// A clockwise rotation by a multiple of 90°.
///
/// Display rotation is only ever reported in these four states, so every
/// rotation the core sees is quantized to one of them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    /// No rotation.
    #[default]
    Rotate0,
    /// 90 degrees clockwise.
    Rotate90,
    /// 180 degrees.
    Rotate180,
    /// 270 degrees clockwise (90 counter-clockwise).
    Rotate270,
}

impl Rotation {
    /// All four rotations in quarter-turn order.
    pub const ALL: [Self; 4] = [
        Self::Rotate0,
        Self::Rotate90,
        Self::Rotate180,
        Self::Rotate270,
    ];

    /// From degrees. Any multiple of 90 is accepted, including negative
    /// values and values ≥ 360; anything else returns `None`.
    pub const fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        Some(Self::from_quarter_turns(degrees.rem_euclid(360) / 90))
    }

    /// From the platform's display rotation index (`0..=3`, one per quarter
    /// turn). Returns `None` for anything else.
    pub const fn from_surface_index(index: u8) -> Option<Self> {
        if index < 4 {
            Some(Self::from_quarter_turns(index as i32))
        } else {
            None
        }
    }

    const fn from_quarter_turns(turns: i32) -> Self {
        match turns & 3 {
            0 => Self::Rotate0,
            1 => Self::Rotate90,
            2 => Self::Rotate180,
            _ => Self::Rotate270,
        }
    }

    /// Number of clockwise quarter turns (0-3).
    pub const fn quarter_turns(self) -> i32 {
        match self {
            Self::Rotate0 => 0,
            Self::Rotate90 => 1,
            Self::Rotate180 => 2,
            Self::Rotate270 => 3,
        }
    }

    /// Rotation in degrees: 0, 90, 180, or 270.
    pub const fn degrees(self) -> i32 {
        self.quarter_turns() * 90
    }

    /// Whether this rotation swaps width and height.
    pub const fn swaps_axes(self) -> bool {
        self.quarter_turns() % 2 == 1
    }

    /// Apply `self` first, then `other`.
    pub const fn compose(self, other: Self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }

    /// The rotation that undoes this one.
    pub const fn inverse(self) -> Self {
        Self::from_quarter_turns(4 - self.quarter_turns())
    }
}

/// Rotation to apply to the live preview so it appears upright.
///
/// Front: `(360 - (sensor + device) % 360) % 360`.
/// Back: `(sensor - device + 360) % 360`.
/// Both inputs are reduced modulo 360 first, so any `i32` is accepted. The
/// result is always in `0..360`.
pub const fn display_rotation_for(
    sensor_orientation: i32,
    device_rotation: i32,
    facing: Facing,
) -> i32 {
    let s = sensor_orientation.rem_euclid(360);
    let d = device_rotation.rem_euclid(360);
    match facing {
        Facing::Front => (360 - (s + d) % 360) % 360,
        Facing::Back => (s - d).rem_euclid(360),
    }
}

/// Orientation tag for a still capture.
///
/// `(sensor + device * (front ? 1 : -1) + 360) % 360`, always in `0..360`.
/// Inputs are reduced modulo 360 first.
pub const fn jpeg_rotation_for(
    sensor_orientation: i32,
    device_rotation: i32,
    facing: Facing,
) -> i32 {
    let s = sensor_orientation.rem_euclid(360);
    let d = device_rotation.rem_euclid(360);
    match facing {
        Facing::Front => (s + d) % 360,
        Facing::Back => (s - d).rem_euclid(360),
    }
}

/// Still-capture rotation as the legacy camera API expects it.
///
/// That API takes the display rotation for stills too, except that a front
/// camera reporting 90° has to be tagged 270°.
pub const fn legacy_jpeg_rotation_for(
    sensor_orientation: i32,
    device_rotation: i32,
    facing: Facing,
) -> i32 {
    let rotation = display_rotation_for(sensor_orientation, device_rotation, facing);
    match (facing, rotation) {
        (Facing::Front, 90) => 270,
        _ => rotation,
    }
}

/// Camera and device orientation at one moment. Input only, never persisted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrientationState {
    /// Sensor mounting angle: 0, 90, 180, or 270.
    pub sensor_orientation: i32,
    /// Current display rotation: 0, 90, 180, or 270.
    pub device_rotation: i32,
    /// Camera facing.
    pub facing: Facing,
}

impl OrientationState {
    /// Create a state.
    pub const fn new(sensor_orientation: i32, device_rotation: i32, facing: Facing) -> Self {
        Self {
            sensor_orientation,
            device_rotation,
            facing,
        }
    }

    /// See [`display_rotation_for`].
    pub const fn display_rotation(self) -> i32 {
        display_rotation_for(self.sensor_orientation, self.device_rotation, self.facing)
    }

    /// See [`jpeg_rotation_for`].
    pub const fn jpeg_rotation(self) -> i32 {
        jpeg_rotation_for(self.sensor_orientation, self.device_rotation, self.facing)
    }

    /// See [`legacy_jpeg_rotation_for`].
    pub const fn legacy_jpeg_rotation(self) -> i32 {
        legacy_jpeg_rotation_for(self.sensor_orientation, self.device_rotation, self.facing)
    }

    /// Whether the device is held sideways (display rotated 90° or 270°).
    pub const fn is_landscape(self) -> bool {
        self.device_rotation.rem_euclid(180) == 90
    }
}

/// Map a normalized display point into normalized sensor coordinates.
///
/// `(nx, ny)` is in `0.0..=1.0` relative to the upright (portrait) preview,
/// `(0, 0)` top-left. The result is in the same range relative to the sensor
/// readout.
pub fn normalized_sensor_point(nx: f32, ny: f32, sensor_orientation: Rotation) -> (f32, f32) {
    match sensor_orientation {
        Rotation::Rotate0 => (nx, ny),
        Rotation::Rotate90 => (ny, 1.0 - nx),
        Rotation::Rotate180 => (1.0 - nx, 1.0 - ny),
        Rotation::Rotate270 => (1.0 - ny, nx),
    }
}
