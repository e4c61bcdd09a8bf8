use serde::{Deserialize, Serialize};

use crate::foundation::error::{PathValueError, PathValueResult};

/// A coordinate that exporters write either as a bare number or wrapped in an
/// array. Only element 0 of the array form is meaningful.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericOrArray {
    /// `0.5`
    Number(f64),
    /// `[0.5]`
    Array(Vec<f64>),
}

impl NumericOrArray {
    /// The scalar carried by this coordinate, or `None` for an empty array.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Array(vs) => vs.first().copied(),
        }
    }
}

impl From<f64> for NumericOrArray {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

/// One timing-curve control point (`o` or `i`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EasingHandle {
    /// Time axis.
    pub x: NumericOrArray,
    /// Progress axis.
    pub y: NumericOrArray,
}

/// Raw keyframe record as found in the export.
///
/// Unknown members (`n`, `ix`, ...) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Frame marker.
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<f64>,
    /// Value at this keyframe.
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Vec<NumericOrArray>>,
    /// Value this keyframe interpolates toward; presence starts a segment.
    #[serde(rename = "e", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Vec<NumericOrArray>>,
    /// Spatial handle leaving `start`, relative to it.
    #[serde(rename = "to", default, skip_serializing_if = "Option::is_none")]
    pub out_tangent: Option<Vec<NumericOrArray>>,
    /// Spatial handle entering `end`, relative to it.
    #[serde(rename = "ti", default, skip_serializing_if = "Option::is_none")]
    pub in_tangent: Option<Vec<NumericOrArray>>,
    /// First timing-curve control point.
    #[serde(rename = "o", default, skip_serializing_if = "Option::is_none")]
    pub ease_out: Option<EasingHandle>,
    /// Second timing-curve control point.
    #[serde(rename = "i", default, skip_serializing_if = "Option::is_none")]
    pub ease_in: Option<EasingHandle>,
    /// `1` marks a hold keyframe.
    #[serde(rename = "h", default, skip_serializing_if = "Option::is_none")]
    pub hold: Option<f64>,
}

impl Keyframe {
    /// Integer frame index, truncated toward zero.
    pub fn frame_index(&self) -> Option<i64> {
        self.frame.map(|f| f.trunc() as i64)
    }

    /// Whether this keyframe freezes its value until the next one.
    pub fn is_hold(&self) -> bool {
        self.hold.is_some_and(|h| h.trunc() == 1.0)
    }
}

/// Return `true` when `items` looks like a keyframe list rather than a static
/// coordinate array: its first element is an object carrying a `t` member.
pub fn is_keyframe_list(items: &[serde_json::Value]) -> bool {
    items
        .first()
        .and_then(serde_json::Value::as_object)
        .is_some_and(|o| o.contains_key("t"))
}

/// Decode every record of a keyframe list, failing on the first one that does
/// not fit the [`Keyframe`] shape.
pub fn parse_keyframes(items: &[serde_json::Value]) -> PathValueResult<Vec<Keyframe>> {
    items
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            Keyframe::deserialize(raw).map_err(|e| PathValueError::keyframe(index, raw, e.to_string()))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/keyframe/model.rs"]
mod tests;
