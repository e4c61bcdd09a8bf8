use crate::foundation::error::{PathValueError, PathValueResult};

pub use kurbo::{BezPath, PathEl, PathSeg, Point, Vec2};

/// Composition frame rate in frames per second. Motion-graphics exports use
/// fractional rates such as 29.97, so this is not a rational like `Fps`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FrameRate(f64);

impl FrameRate {
    /// Create a validated frame rate.
    pub fn new(fps: f64) -> PathValueResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(PathValueError::validation("frame rate must be finite and > 0"));
        }
        Ok(Self(fps))
    }

    /// Frames per second.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Convert a (possibly negative) frame count to whole milliseconds,
    /// truncating toward zero.
    pub fn frames_to_millis(self, frames: i64) -> i64 {
        (frames as f64 / self.0 * 1000.0) as i64
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self(30.0)
    }
}

impl TryFrom<f64> for FrameRate {
    type Error = PathValueError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<FrameRate> for f64 {
    fn from(v: FrameRate) -> Self {
        v.0
    }
}

/// Uniform display-density factor applied to spatial coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DisplayScale(f64);

impl DisplayScale {
    /// Identity scale.
    pub const ONE: Self = Self(1.0);

    /// Create a validated scale factor.
    pub fn new(scale: f64) -> PathValueResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PathValueError::validation("display scale must be finite and > 0"));
        }
        Ok(Self(scale))
    }

    /// Raw factor.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Factor to apply in the given mode: `self` for spatial values, `1.0` otherwise.
    pub fn for_mode(self, spatial: bool) -> f64 {
        if spatial { self.0 } else { 1.0 }
    }
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f64> for DisplayScale {
    type Error = PathValueError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<DisplayScale> for f64 {
    fn from(v: DisplayScale) -> Self {
        v.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
