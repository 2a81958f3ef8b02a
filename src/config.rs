//! Tunables for size negotiation, metering, and focus timing.

use crate::metering::{
    METERING_REGION_FRACTION, MeteringRegion, SensorRect, region_for_normalized_point,
};
use crate::orientation::Rotation;
use crate::size::AspectRatio;

/// Focus-lock hold time before continuous focus resumes, in milliseconds.
pub const FOCUS_UNLOCK_DELAY_MS: u64 = 10_000;
/// Wait before retrying a failed focus lock, in milliseconds.
pub const FOCUS_RETRY_DELAY_MS: u64 = 2_000;

/// Settings shared by [`negotiate`](crate::negotiate), the metering helpers,
/// and [`CaptureStateMachine`](crate::CaptureStateMachine).
///
/// ```
/// use zencamera::{AspectRatio, NegotiationConfig};
///
/// let config = NegotiationConfig::default()
///     .default_ratio(AspectRatio::RATIO_16_9)
///     .focus_retry_delay_ms(500);
/// assert_eq!(config.default_ratio, AspectRatio::RATIO_16_9);
/// assert_eq!(config.focus_unlock_delay_ms, 10_000);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NegotiationConfig {
    /// Ratio to fall back to when the requested one is unsupported.
    pub default_ratio: AspectRatio,
    /// Metering square side as a fraction of the crop region's shorter edge.
    pub metering_fraction: f32,
    /// How long a successful focus lock is held.
    pub focus_unlock_delay_ms: u64,
    /// How long to wait before retrying a failed focus lock.
    pub focus_retry_delay_ms: u64,
    /// Lock focus before a still capture. Off for fixed-focus lenses.
    pub auto_focus: bool,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            default_ratio: AspectRatio::RATIO_4_3,
            metering_fraction: METERING_REGION_FRACTION,
            focus_unlock_delay_ms: FOCUS_UNLOCK_DELAY_MS,
            focus_retry_delay_ms: FOCUS_RETRY_DELAY_MS,
            auto_focus: true,
        }
    }
}

impl NegotiationConfig {
    /// Set the fallback ratio.
    pub fn default_ratio(mut self, ratio: AspectRatio) -> Self {
        self.default_ratio = ratio;
        self
    }

    /// Set the metering fraction. Clamped to `0.0..=1.0`; NaN keeps the default.
    pub fn metering_fraction(mut self, fraction: f32) -> Self {
        self.metering_fraction = if fraction.is_nan() {
            METERING_REGION_FRACTION
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self
    }

    /// Set the focus-lock hold time.
    pub fn focus_unlock_delay_ms(mut self, ms: u64) -> Self {
        self.focus_unlock_delay_ms = ms;
        self
    }

    /// Set the focus-lock retry delay.
    pub fn focus_retry_delay_ms(mut self, ms: u64) -> Self {
        self.focus_retry_delay_ms = ms;
        self
    }

    /// Turn the focus lock before still captures on or off.
    pub fn auto_focus(mut self, on: bool) -> Self {
        self.auto_focus = on;
        self
    }

    /// [`region_for_normalized_point`] with this config's metering fraction.
    pub fn metering_region(
        &self,
        nx: f32,
        ny: f32,
        crop_region: SensorRect,
        sensor_orientation: Rotation,
    ) -> MeteringRegion {
        region_for_normalized_point(nx, ny, self.metering_fraction, crop_region, sensor_orientation)
    }
}
