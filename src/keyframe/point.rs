use crate::{
    foundation::core::{DisplayScale, Point},
    foundation::error::{PathValueError, PathValueResult},
    keyframe::model::{EasingHandle, NumericOrArray},
};

/// Decodes exported coordinate pairs into points.
///
/// Spatial values are multiplied by the display scale on the way in. Arrays
/// with fewer than two coordinates decode to the zero point; a coordinate that
/// is present but carries no number is an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointCodec {
    scale: DisplayScale,
    spatial: bool,
}

impl PointCodec {
    /// Codec for values that are (`spatial = true`) or are not display-space coordinates.
    pub fn new(scale: DisplayScale, spatial: bool) -> Self {
        Self { scale, spatial }
    }

    /// Effective multiplier applied to decoded coordinates.
    pub fn factor(&self) -> f64 {
        self.scale.for_mode(self.spatial)
    }

    /// Decode a `[x, y, ...]` array.
    pub fn decode_array(&self, values: &[NumericOrArray]) -> PathValueResult<Point> {
        if values.len() < 2 {
            return Ok(Point::ZERO);
        }
        let x = coordinate(&values[0], "x")?;
        let y = coordinate(&values[1], "y")?;
        let s = self.factor();
        Ok(Point::new(x * s, y * s))
    }

    /// Decode a raw JSON array, as found in a static (non-keyframed) value.
    pub fn decode_json(&self, value: &serde_json::Value) -> PathValueResult<Point> {
        let values: Vec<NumericOrArray> = serde::Deserialize::deserialize(value)
            .map_err(|e| PathValueError::malformed(format!("point {value}: {e}")))?;
        self.decode_array(&values)
    }

    /// Decode an `{x, y}` timing-curve handle, scaled like any spatial value.
    pub fn decode_handle(&self, handle: &EasingHandle) -> PathValueResult<Point> {
        let x = coordinate(&handle.x, "x")?;
        let y = coordinate(&handle.y, "y")?;
        let s = self.factor();
        Ok(Point::new(x * s, y * s))
    }

    /// Undo [`PointCodec::decode_handle`] scaling, yielding the raw ratio pair.
    pub fn unscale(&self, p: Point) -> Point {
        let s = self.factor();
        Point::new(p.x / s, p.y / s)
    }
}

fn coordinate(v: &NumericOrArray, axis: &str) -> PathValueResult<f64> {
    v.value()
        .ok_or_else(|| PathValueError::malformed(format!("{axis} coordinate is an empty array")))
}

#[cfg(test)]
#[path = "../../tests/unit/keyframe/point.rs"]
mod tests;
