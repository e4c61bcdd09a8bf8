use std::sync::Arc;

use kurbo::{ParamCurve as _, ParamCurveArclen as _};

use crate::{
    animation::compile::PathDescriptor,
    foundation::core::{PathSeg, Point},
};

const ARCLEN_ACCURACY: f64 = 1e-6;

type UpdateListener = Box<dyn Fn(Point) + Send + Sync>;

/// Playable view of a compiled [`PathDescriptor`].
///
/// Sampling is a pure function of progress; the only side effect of
/// [`PathKeyframeAnimation::set_progress`] is calling the update listeners.
pub struct PathKeyframeAnimation {
    descriptor: Arc<PathDescriptor>,
    segments: Vec<(PathSeg, f64)>,
    comp_duration_ms: u64,
    listeners: Vec<UpdateListener>,
}

impl PathKeyframeAnimation {
    /// Wrap `descriptor`. `comp_duration_ms` is the length of the enclosing
    /// composition; `None` means the animation spans `delay + duration`.
    pub fn new(descriptor: Arc<PathDescriptor>, comp_duration_ms: Option<u64>) -> Self {
        let segments = descriptor
            .segments()
            .map(|seg| (seg, seg.arclen(ARCLEN_ACCURACY)))
            .collect();
        let comp_duration_ms = comp_duration_ms.unwrap_or_else(|| {
            (descriptor.delay_ms().max(0) as u64).saturating_add(descriptor.duration_ms())
        });
        Self {
            descriptor,
            segments,
            comp_duration_ms,
            listeners: Vec::new(),
        }
    }

    /// The compiled path, key times and easings being played.
    pub fn descriptor(&self) -> &PathDescriptor {
        &self.descriptor
    }

    /// Length of the animated span in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.descriptor.duration_ms()
    }

    /// Offset of the animated span from the start of the composition.
    pub fn start_delay_ms(&self) -> i64 {
        self.descriptor.delay_ms()
    }

    /// Length of the enclosing composition in milliseconds.
    pub fn comp_duration_ms(&self) -> u64 {
        self.comp_duration_ms
    }

    /// Call `listener` with every point produced by [`PathKeyframeAnimation::set_progress`].
    pub fn add_update_listener<F>(&mut self, listener: F)
    where
        F: Fn(Point) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Map composition progress in `[0, 1]` to progress within this animation's span.
    pub fn local_progress(&self, comp_progress: f64) -> f64 {
        let elapsed = comp_progress * self.comp_duration_ms as f64 - self.start_delay_ms() as f64;
        let duration = self.duration_ms() as f64;
        if duration <= 0.0 {
            return if elapsed >= 0.0 { 1.0 } else { 0.0 };
        }
        (elapsed / duration).clamp(0.0, 1.0)
    }

    /// Point at local progress `progress`. Out-of-range input is clamped.
    pub fn value_at(&self, progress: f64) -> Point {
        let Some((last, _)) = self.segments.last() else {
            return self.descriptor.initial_point();
        };
        if progress.is_nan() || progress <= 0.0 {
            return self.descriptor.initial_point();
        }
        if progress >= 1.0 {
            return last.end();
        }

        let key_times = self.descriptor.key_times();
        let idx = key_times
            .partition_point(|&t| t <= progress)
            .saturating_sub(1)
            .min(self.segments.len() - 1);
        let (t0, t1) = (key_times[idx], key_times[idx + 1]);
        let fraction = if t1 > t0 {
            (progress - t0) / (t1 - t0)
        } else {
            1.0
        };
        let eased = self.descriptor.easings()[idx].apply(fraction);

        let (seg, len) = self.segments[idx];
        point_along(seg, len, eased)
    }

    /// Sample at composition progress `comp_progress` and notify listeners.
    pub fn set_progress(&self, comp_progress: f64) -> Point {
        let p = self.value_at(self.local_progress(comp_progress));
        for listener in &self.listeners {
            listener(p);
        }
        p
    }
}

/// Point at `fraction` of the arc length of `seg`.
fn point_along(seg: PathSeg, len: f64, fraction: f64) -> Point {
    if fraction <= 0.0 {
        return seg.start();
    }
    if fraction >= 1.0 {
        return seg.end();
    }
    if len <= f64::EPSILON {
        return seg.eval(fraction);
    }
    let t = seg.inv_arclen(fraction * len, ARCLEN_ACCURACY);
    seg.eval(t)
}

impl std::fmt::Debug for PathKeyframeAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathKeyframeAnimation")
            .field("segments", &self.segments.len())
            .field("duration_ms", &self.duration_ms())
            .field("start_delay_ms", &self.start_delay_ms())
            .field("comp_duration_ms", &self.comp_duration_ms)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/path_anim.rs"]
mod tests;
