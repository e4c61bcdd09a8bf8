use std::sync::Arc;

use crate::{
    animation::compile::{PathDescriptor, compile_keyframes},
    animation::observable::Observable,
    animation::path_anim::PathKeyframeAnimation,
    foundation::core::{DisplayScale, FrameRate, Point},
    foundation::error::{PathValueError, PathValueResult},
    keyframe::model::{is_keyframe_list, parse_keyframes},
    keyframe::point::PointCodec,
    keyframe::span::KeyframeSpan,
};

/// Construction options for an [`AnimatablePathValue`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PathValueOpts {
    /// Composition frame rate.
    pub frame_rate: FrameRate,
    /// Length of the enclosing composition; `None` means `delay + duration`.
    pub comp_duration_ms: Option<u64>,
    /// Display-density factor for spatial coordinates.
    pub scale: DisplayScale,
    /// Whether the property holds display-space coordinates.
    pub spatial: bool,
}

impl Default for PathValueOpts {
    fn default() -> Self {
        Self {
            frame_rate: FrameRate::default(),
            comp_duration_ms: None,
            scale: DisplayScale::ONE,
            spatial: true,
        }
    }
}

impl PathValueOpts {
    /// Check the fields that the field types cannot enforce themselves.
    pub fn validate(&self) -> PathValueResult<()> {
        if self.comp_duration_ms == Some(0) {
            return Err(PathValueError::validation("composition duration must be > 0"));
        }
        Ok(())
    }

    fn codec(&self) -> PointCodec {
        PointCodec::new(self.scale, self.spatial)
    }
}

/// A 2D point property that is either constant or driven by keyframes.
///
/// Built once from the exported property; any change to the source requires a
/// new instance. The compiled descriptor is shared read-only with every
/// animation built from it.
pub struct AnimatablePathValue {
    observable: Observable<Point>,
    initial_point: Point,
    descriptor: Option<Arc<PathDescriptor>>,
    comp_duration_ms: Option<u64>,
}

impl AnimatablePathValue {
    /// Build from a property object whose `k` member carries the value.
    #[tracing::instrument(skip(property))]
    pub fn from_property(property: &serde_json::Value, opts: &PathValueOpts) -> PathValueResult<Self> {
        match property.get("k") {
            None | Some(serde_json::Value::Null) => {
                Err(PathValueError::missing("point property has no `k` value"))
            }
            Some(payload) => Self::from_payload(payload, opts),
        }
    }

    /// Build from the bare `k` payload: a coordinate array or a keyframe list.
    pub fn from_payload(payload: &serde_json::Value, opts: &PathValueOpts) -> PathValueResult<Self> {
        opts.validate()?;

        let items = match payload {
            serde_json::Value::Null => {
                return Err(PathValueError::missing("point property value is null"));
            }
            serde_json::Value::Array(items) => items,
            other => {
                return Err(PathValueError::malformed(format!(
                    "expected an array, got {other}"
                )));
            }
        };
        if items.is_empty() {
            return Err(PathValueError::missing("point property value is empty"));
        }

        let codec = opts.codec();
        let observable = Observable::new();

        if !is_keyframe_list(items) {
            let initial_point = codec.decode_json(payload)?;
            observable.set_value(initial_point);
            return Ok(Self {
                observable,
                initial_point,
                descriptor: None,
                comp_duration_ms: opts.comp_duration_ms,
            });
        }

        let keyframes = parse_keyframes(items)?;
        let span = KeyframeSpan::resolve(&keyframes, opts.frame_rate)?;
        let descriptor = compile_keyframes(&keyframes, &span, &codec)?;
        let initial_point = descriptor.initial_point();
        observable.set_value(initial_point);

        Ok(Self {
            observable,
            initial_point,
            descriptor: Some(Arc::new(descriptor)),
            comp_duration_ms: opts.comp_duration_ms,
        })
    }

    /// Last published point.
    pub fn current_value(&self) -> Point {
        self.observable.value().unwrap_or(self.initial_point)
    }

    /// Value before any animation runs.
    pub fn initial_point(&self) -> Point {
        self.initial_point
    }

    /// Cell that receives every sampled point; subscribe here to follow playback.
    pub fn observable(&self) -> &Observable<Point> {
        &self.observable
    }

    /// Compiled keyframes, if the property is animated.
    pub fn descriptor(&self) -> Option<&PathDescriptor> {
        self.descriptor.as_deref()
    }

    /// Whether the compiled path moves beyond its initial point.
    pub fn has_animation(&self) -> bool {
        self.descriptor.as_ref().is_some_and(|d| d.has_animation())
    }

    /// Playable animation that publishes every sampled point to
    /// [`AnimatablePathValue::observable`], or `None` for a constant value.
    pub fn build_animation(&self) -> Option<PathKeyframeAnimation> {
        let descriptor = self.descriptor.as_ref().filter(|d| d.has_animation())?;

        let mut animation = PathKeyframeAnimation::new(Arc::clone(descriptor), self.comp_duration_ms);
        let observable = self.observable.clone();
        animation.add_update_listener(move |p| observable.set_value(p));

        tracing::debug!(
            segments = descriptor.segment_count(),
            duration_ms = animation.duration_ms(),
            start_delay_ms = animation.start_delay_ms(),
            "built path animation"
        );
        Some(animation)
    }
}

impl std::fmt::Display for AnimatablePathValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AnimatablePathValue(initial=({}, {}))",
            self.initial_point.x, self.initial_point.y
        )
    }
}

impl std::fmt::Debug for AnimatablePathValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatablePathValue")
            .field("initial_point", &self.initial_point)
            .field("current_value", &self.current_value())
            .field("has_animation", &self.has_animation())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/unit/value.rs"]
mod tests;
