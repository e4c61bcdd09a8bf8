use crate::{
    foundation::core::FrameRate,
    foundation::error::{PathValueError, PathValueResult},
    keyframe::model::Keyframe,
};

/// Time extent of a keyframe list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct KeyframeSpan {
    /// Frame of the first timed keyframe.
    pub start_frame: i64,
    /// Frame of the last timed keyframe.
    pub end_frame: i64,
    /// `end_frame - start_frame`, always > 0.
    pub duration_frames: i64,
    /// Wall-clock length in milliseconds.
    pub duration_ms: u64,
    /// Wall-clock offset of `start_frame` in milliseconds.
    pub delay_ms: i64,
}

impl KeyframeSpan {
    /// Resolve the span from the first and last keyframes carrying a frame marker.
    #[tracing::instrument(skip(keyframes), fields(len = keyframes.len()))]
    pub fn resolve(keyframes: &[Keyframe], frame_rate: FrameRate) -> PathValueResult<Self> {
        let start_frame = keyframes.iter().find_map(Keyframe::frame_index);
        let end_frame = keyframes.iter().rev().find_map(Keyframe::frame_index);
        let (Some(start_frame), Some(end_frame)) = (start_frame, end_frame) else {
            return Err(PathValueError::missing("no keyframe carries a frame marker"));
        };

        let invalid = PathValueError::InvalidSpan {
            start: start_frame,
            end: end_frame,
        };
        if end_frame <= start_frame {
            return Err(invalid);
        }
        // Frame markers saturate at the i64 bounds, so the width can still overflow.
        let duration_frames = end_frame.checked_sub(start_frame).ok_or(invalid)?;
        Ok(Self {
            start_frame,
            end_frame,
            duration_frames,
            duration_ms: frame_rate.frames_to_millis(duration_frames).max(0) as u64,
            delay_ms: frame_rate.frames_to_millis(start_frame),
        })
    }

    /// Normalized position of `frame` within the span.
    pub fn fraction(&self, frame: i64) -> f64 {
        (frame as f64 - self.start_frame as f64) / self.duration_frames as f64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/keyframe/span.rs"]
mod tests;
