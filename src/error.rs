//! Geometry error kinds.

use core::fmt;

/// Error from size, ratio, selection, or transform construction.
///
/// All variants are caller contract violations: the core never retries, and
/// none of them describe hardware state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryError {
    /// A width or height of zero was given to [`Size`](crate::Size) or
    /// [`AspectRatio`](crate::AspectRatio).
    InvalidDimensions,
    /// Size selection was asked to choose from an empty set.
    EmptyCandidateSet,
    /// No aspect ratio is available, not even a fallback. Only happens when
    /// the [`SizeMap`](crate::SizeMap) is empty.
    UnsupportedAspectRatio,
    /// A zero-area rectangle was given to the coordinate transformer.
    DegenerateViewport,
    /// An aspect ratio string was not of the form `x:y`.
    ParseRatio,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidDimensions => "width and height must both be non-zero",
            Self::EmptyCandidateSet => "no candidate sizes to choose from",
            Self::UnsupportedAspectRatio => "no supported aspect ratio available",
            Self::DegenerateViewport => "preview rectangle has zero area",
            Self::ParseRatio => "aspect ratio must be written as x:y",
        })
    }
}

impl core::error::Error for GeometryError {}
