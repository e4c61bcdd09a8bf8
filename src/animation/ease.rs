use crate::foundation::core::Point;

/// Per-segment timing function mapping elapsed fraction to progress fraction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Identity rate.
    Linear,
    /// CSS-style cubic bezier through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    CubicBezier {
        /// First control point, time axis.
        x1: f64,
        /// First control point, progress axis.
        y1: f64,
        /// Second control point, time axis.
        x2: f64,
        /// Second control point, progress axis.
        y2: f64,
    },
}

impl Easing {
    /// Resolve the easing for a segment from its (already unscaled) timing handles.
    /// Anything short of both handles is linear.
    pub fn from_handles(out_handle: Option<Point>, in_handle: Option<Point>) -> Self {
        match (out_handle, in_handle) {
            (Some(c1), Some(c2)) => Self::cubic(c1, c2),
            _ => Self::Linear,
        }
    }

    /// Cubic timing curve. The time components are clamped into `[0, 1]` so
    /// the curve stays a function of time.
    pub fn cubic(c1: Point, c2: Point) -> Self {
        Self::CubicBezier {
            x1: c1.x.clamp(0.0, 1.0),
            y1: c1.y,
            x2: c2.x.clamp(0.0, 1.0),
            y2: c2.y,
        }
    }

    /// Apply to normalized time `t`; inputs outside `[0, 1]` are clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }
}

/// Solve the timing curve for `x`, then return its `y`.
fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    // Solve bx(u) = x: Newton first, then bisection to settle flat regions.
    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    for _ in 0..24 {
        let x_t = sample_curve(x1, x2, t);
        if (x_t - x).abs() < 1e-9 {
            break;
        }
        if x_t < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample_curve(y1, y2, t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
