//! Flash and focus mode tables for both camera APIs.
//!
//! The legacy API names modes with strings and rejects anything the device
//! does not list as supported. The newer API encodes flash as a pair of
//! auto-exposure and flash-unit settings.

/// `CONTROL_AE_MODE_ON`.
pub const AE_MODE_ON: i32 = 1;
/// `CONTROL_AE_MODE_ON_AUTO_FLASH`.
pub const AE_MODE_ON_AUTO_FLASH: i32 = 2;
/// `CONTROL_AE_MODE_ON_ALWAYS_FLASH`.
pub const AE_MODE_ON_ALWAYS_FLASH: i32 = 3;
/// `CONTROL_AE_MODE_ON_AUTO_FLASH_REDEYE`.
pub const AE_MODE_ON_AUTO_FLASH_REDEYE: i32 = 4;

/// `FLASH_MODE_OFF`.
pub const FLASH_UNIT_OFF: i32 = 0;
/// `FLASH_MODE_SINGLE`.
pub const FLASH_UNIT_SINGLE: i32 = 1;
/// `FLASH_MODE_TORCH`.
pub const FLASH_UNIT_TORCH: i32 = 2;

/// `CONTROL_AF_MODE_OFF`.
pub const AF_MODE_OFF: i32 = 0;
/// `CONTROL_AF_MODE_AUTO`.
pub const AF_MODE_AUTO: i32 = 1;
/// `CONTROL_AF_MODE_CONTINUOUS_PICTURE`.
pub const AF_MODE_CONTINUOUS_PICTURE: i32 = 4;

/// Flash behaviour for still capture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlashMode {
    /// Never fire.
    #[default]
    Off,
    /// Always fire.
    On,
    /// Keep the flash lit.
    Torch,
    /// Fire when the scene is dark.
    Auto,
    /// Fire with red-eye reduction.
    RedEye,
}

impl FlashMode {
    /// Every mode.
    pub const ALL: [Self; 5] = [Self::Off, Self::On, Self::Torch, Self::Auto, Self::RedEye];

    /// Legacy API parameter value.
    pub const fn camera1_parameter(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Torch => "torch",
            Self::Auto => "auto",
            Self::RedEye => "red-eye",
        }
    }

    /// Inverse of [`camera1_parameter`](Self::camera1_parameter).
    pub fn from_camera1_parameter(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.camera1_parameter() == value)
    }

    /// `(ae_mode, flash_mode)` request values for the newer API.
    pub const fn camera2_setting(self) -> (i32, i32) {
        match self {
            Self::Off => (AE_MODE_ON, FLASH_UNIT_OFF),
            Self::On => (AE_MODE_ON_ALWAYS_FLASH, FLASH_UNIT_OFF),
            Self::Torch => (AE_MODE_ON, FLASH_UNIT_TORCH),
            Self::Auto => (AE_MODE_ON_AUTO_FLASH, FLASH_UNIT_OFF),
            Self::RedEye => (AE_MODE_ON_AUTO_FLASH_REDEYE, FLASH_UNIT_OFF),
        }
    }

    /// Flash mode to apply on a legacy device.
    ///
    /// `requested` if the device supports it; otherwise `current` if that is
    /// still supported; otherwise [`FlashMode::Off`]. An empty `supported`
    /// list means the device has no flash.
    pub fn resolve(requested: Self, current: Self, supported: &[Self]) -> Self {
        if supported.contains(&requested) {
            return requested;
        }
        if supported.contains(&current) {
            tracing::debug!(?requested, ?current, "flash mode unsupported, keeping current");
            return current;
        }
        tracing::debug!(?requested, ?current, "flash mode unsupported, turning flash off");
        Self::Off
    }
}

/// Legacy API focus mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FocusMode {
    /// Focus on request.
    Auto,
    /// Focus held at infinity.
    Infinity,
    /// Close-up focus on request.
    Macro,
    /// The lens cannot focus.
    Fixed,
    /// Extended depth of field.
    Edof,
    /// Continuous focus tuned for video.
    ContinuousVideo,
    /// Continuous focus tuned for stills.
    ContinuousPicture,
}

impl FocusMode {
    /// Every mode.
    pub const ALL: [Self; 7] = [
        Self::Auto,
        Self::Infinity,
        Self::Macro,
        Self::Fixed,
        Self::Edof,
        Self::ContinuousVideo,
        Self::ContinuousPicture,
    ];

    /// Legacy API parameter value.
    pub const fn camera1_parameter(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Infinity => "infinity",
            Self::Macro => "macro",
            Self::Fixed => "fixed",
            Self::Edof => "edof",
            Self::ContinuousVideo => "continuous-video",
            Self::ContinuousPicture => "continuous-picture",
        }
    }

    /// Inverse of [`camera1_parameter`](Self::camera1_parameter).
    pub fn from_camera1_parameter(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.camera1_parameter() == value)
    }

    /// Focus mode to apply on a legacy device.
    ///
    /// Continuous-picture when `auto_focus` is on and supported, else fixed,
    /// else infinity, else the first supported mode. `None` only when
    /// `supported` is empty.
    pub fn choose(auto_focus: bool, supported: &[Self]) -> Option<Self> {
        if auto_focus && supported.contains(&Self::ContinuousPicture) {
            return Some(Self::ContinuousPicture);
        }
        [Self::Fixed, Self::Infinity]
            .into_iter()
            .find(|mode| supported.contains(mode))
            .or_else(|| supported.first().copied())
    }
}

/// `CONTROL_AF_MODE` for the newer API, plus whether auto-focus stays on.
///
/// Auto-focus is dropped when the device lists no modes or only
/// [`AF_MODE_OFF`]. Legacy-level hardware gets [`AF_MODE_AUTO`] instead of
/// continuous focus.
pub fn camera2_af_mode(auto_focus: bool, available: &[i32], legacy_hardware: bool) -> (i32, bool) {
    if !auto_focus {
        return (AF_MODE_OFF, false);
    }
    if available.iter().all(|&m| m == AF_MODE_OFF) {
        tracing::debug!("auto-focus unavailable, disabling");
        return (AF_MODE_OFF, false);
    }
    if legacy_hardware {
        (AF_MODE_AUTO, true)
    } else {
        (AF_MODE_CONTINUOUS_PICTURE, true)
    }
}
