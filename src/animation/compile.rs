use crate::{
    animation::ease::Easing,
    foundation::core::{BezPath, PathSeg, Point},
    foundation::error::{PathValueError, PathValueResult},
    keyframe::model::Keyframe,
    keyframe::point::PointCodec,
    keyframe::span::KeyframeSpan,
};

/// Gap left in front of the first key time after a hold, so the held value
/// survives until just before the next real value.
pub const HOLD_EPSILON: f64 = 0.00001;

/// Immutable result of compiling a keyframe list.
///
/// `key_times` holds one normalized time per path vertex, the initial move
/// included (always `0.0`). `easings` holds one entry per segment.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PathDescriptor {
    path: BezPath,
    key_times: Vec<f64>,
    easings: Vec<Easing>,
    span: KeyframeSpan,
    initial_point: Point,
}

impl PathDescriptor {
    /// Compiled path; the first element is always a move.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Drawable segments after the initial move, in order.
    pub fn segments(&self) -> impl Iterator<Item = PathSeg> + '_ {
        self.path.segments()
    }

    /// Number of segments after the initial move.
    pub fn segment_count(&self) -> usize {
        self.path.elements().len().saturating_sub(1)
    }

    /// Normalized time of every path vertex.
    pub fn key_times(&self) -> &[f64] {
        &self.key_times
    }

    /// Time at which each segment reaches its endpoint, paired 1:1 with
    /// [`PathDescriptor::segments`].
    pub fn breakpoints(&self) -> &[f64] {
        self.key_times.get(1..).unwrap_or(&[])
    }

    /// Timing function of each segment.
    pub fn easings(&self) -> &[Easing] {
        &self.easings
    }

    /// Frame and wall-clock extent of the source keyframes.
    pub fn span(&self) -> &KeyframeSpan {
        &self.span
    }

    /// Total duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.span.duration_ms
    }

    /// Start delay in milliseconds.
    pub fn delay_ms(&self) -> i64 {
        self.span.delay_ms
    }

    /// Value before the animation starts.
    pub fn initial_point(&self) -> Point {
        self.initial_point
    }

    /// Whether the path moves beyond its initial point.
    pub fn has_animation(&self) -> bool {
        self.segment_count() > 0
    }
}

/// Compile `keyframes` into a path plus per-vertex key times and per-segment
/// easings, in a single forward pass.
///
/// A hold keyframe cannot emit its geometry immediately: the jump it produces
/// ends where the *next* keyframe starts. It leaves a pending point (emitted
/// as a linear segment once the next keyframe is seen), requests a fresh start
/// segment for that keyframe, and requests a key time `HOLD_EPSILON` in front
/// of it.
#[tracing::instrument(skip_all, fields(len = keyframes.len()))]
pub fn compile_keyframes(
    keyframes: &[Keyframe],
    span: &KeyframeSpan,
    codec: &PointCodec,
) -> PathValueResult<PathDescriptor> {
    if keyframes.is_empty() {
        return Err(PathValueError::missing("keyframe list is empty"));
    }

    let mut path = BezPath::new();
    let mut key_times = Vec::with_capacity(keyframes.len() + 1);
    let mut easings = Vec::with_capacity(keyframes.len());
    let mut initial_point = Point::ZERO;

    let mut pending_hold: Option<Point> = None;
    let mut needs_start_segment = true;
    let mut needs_time_padding = false;
    let mut prev_frame: Option<i64> = None;

    for (i, kf) in keyframes.iter().enumerate() {
        let bad = |reason: String| PathValueError::keyframe(i, kf, reason);

        let frame = kf
            .frame_index()
            .ok_or_else(|| bad("missing frame marker `t`".into()))?;
        if prev_frame.is_some_and(|p| frame < p) {
            return Err(bad(format!("frame {frame} is earlier than the previous keyframe")));
        }
        prev_frame = Some(frame);
        let time = span.fraction(frame);

        if let Some(held) = pending_hold.take() {
            tracing::trace!(index = i, x = held.x, y = held.y, "materializing hold");
            path.line_to(held);
            easings.push(Easing::Linear);
        }

        let start = match kf.start.as_deref() {
            Some(s) => codec.decode_array(s).map_err(|e| bad(e.to_string()))?,
            None => Point::ZERO,
        };

        if needs_start_segment {
            if i == 0 {
                path.move_to(start);
                initial_point = start;
            } else {
                path.line_to(start);
                easings.push(Easing::Linear);
            }
            needs_start_segment = false;
        }

        if needs_time_padding {
            key_times.push(time - HOLD_EPSILON);
            needs_time_padding = false;
        }

        if let Some(end) = kf.end.as_deref() {
            let end = codec.decode_array(end).map_err(|e| bad(e.to_string()))?;
            let decode_opt = |v: Option<&[_]>| v.map(|v| codec.decode_array(v)).transpose();
            let out_tangent = decode_opt(kf.out_tangent.as_deref()).map_err(|e| bad(e.to_string()))?;
            let in_tangent = decode_opt(kf.in_tangent.as_deref()).map_err(|e| bad(e.to_string()))?;

            match (out_tangent, in_tangent) {
                (Some(to), Some(ti)) => {
                    path.curve_to(start + to.to_vec2(), end + ti.to_vec2(), end);
                }
                _ => path.line_to(end),
            }

            let easing = match (&kf.ease_out, &kf.ease_in) {
                (Some(out_handle), Some(in_handle)) => {
                    let c1 = codec.decode_handle(out_handle).map_err(|e| bad(e.to_string()))?;
                    let c2 = codec.decode_handle(in_handle).map_err(|e| bad(e.to_string()))?;
                    Easing::cubic(codec.unscale(c1), codec.unscale(c2))
                }
                _ => Easing::Linear,
            };
            easings.push(easing);
        }

        key_times.push(time);

        if kf.is_hold() {
            pending_hold = Some(start);
            needs_start_segment = true;
            needs_time_padding = true;
        }
    }

    let vertices = path.elements().len();
    if key_times.len() != vertices || easings.len() + 1 != vertices {
        return Err(PathValueError::MisalignedTimeline {
            vertices,
            key_times: key_times.len(),
            easings: easings.len(),
        });
    }

    tracing::debug!(
        segments = vertices - 1,
        duration_ms = span.duration_ms,
        delay_ms = span.delay_ms,
        "compiled keyframe path"
    );

    Ok(PathDescriptor {
        path,
        key_times,
        easings,
        span: *span,
        initial_point,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/compile.rs"]
mod tests;
