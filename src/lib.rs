//! Keyframed point properties from motion-graphics exports, compiled into
//! sampleable path animations.
//!
//! A point property arrives either as a constant `[x, y]` or as a list of
//! keyframe records. Keyframe lists are compiled once into an immutable
//! [`PathDescriptor`]: a [`BezPath`] of line and cubic segments, one normalized
//! key time per path vertex, and one [`Easing`] per segment.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: raw `k` payload -> [`Keyframe`] records ([`PointCodec`] applies the display scale)
//! 2. **Span**: first/last frame markers -> [`KeyframeSpan`] (duration and delay)
//! 3. **Compile**: keyframes -> [`PathDescriptor`] (path, key times, easings; holds become near-steps)
//! 4. **Play**: [`AnimatablePathValue::build_animation`] -> [`PathKeyframeAnimation`], which
//!    publishes sampled points to an [`Observable`]
//!
//! All failures happen during construction and are reported as [`PathValueError`].
//! Scheduling, looping and rendering belong to the caller.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod keyframe;
mod value;

pub use animation::compile::{HOLD_EPSILON, PathDescriptor, compile_keyframes};
pub use animation::ease::Easing;
pub use animation::observable::{Observable, SubscriptionId};
pub use animation::path_anim::PathKeyframeAnimation;
pub use foundation::core::{BezPath, DisplayScale, FrameRate, PathEl, PathSeg, Point, Vec2};
pub use foundation::error::{PathValueError, PathValueResult};
pub use keyframe::model::{EasingHandle, Keyframe, NumericOrArray, is_keyframe_list, parse_keyframes};
pub use keyframe::point::PointCodec;
pub use keyframe::span::KeyframeSpan;
pub use value::{AnimatablePathValue, PathValueOpts};
