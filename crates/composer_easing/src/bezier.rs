// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cubic Bezier easing solved by bisection.
//!
//! The curve runs from (0, 0) to (1, 1) with two free control points. It is
//! parameterized by an auxiliary variable, so evaluating "y for x = t" first
//! searches the x component for the matching parameter and then returns the
//! y component at that parameter.

/// Bisection steps used by [`CubicBezier::new`].
pub const DEFAULT_BISECTION_ITERATIONS: u32 = 10;

/// Early-exit distance in x used by [`CubicBezier::new`].
pub const DEFAULT_BISECTION_TOLERANCE: f64 = 1e-6;

/// CSS `ease` control points, used when a Bezier ease has none.
pub const DEFAULT_CONTROL_POINTS: [f64; 4] = [0.25, 0.1, 0.25, 1.0];

/// A cubic Bezier timing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// First control point x
    pub x1: f64,
    /// First control point y
    pub y1: f64,
    /// Second control point x
    pub x2: f64,
    /// Second control point y
    pub y2: f64,
    /// Maximum bisection steps
    pub iterations: u32,
    /// Stop once the x error drops below this
    pub tolerance: f64,
}

impl CubicBezier {
    /// Create a curve with the default solver settings
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            iterations: DEFAULT_BISECTION_ITERATIONS,
            tolerance: DEFAULT_BISECTION_TOLERANCE,
        }
    }

    /// Create a curve from `[x1, y1, x2, y2]`
    pub fn from_points(points: [f64; 4]) -> Self {
        Self::new(points[0], points[1], points[2], points[3])
    }

    /// Override the solver settings
    pub fn with_solver(mut self, iterations: u32, tolerance: f64) -> Self {
        self.iterations = iterations;
        self.tolerance = tolerance;
        self
    }

    /// Eased value for progress `t`
    pub fn evaluate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = self.solve_parameter(t);
        component(self.y1, self.y2, s)
    }

    /// Curve parameter whose x component is closest to `x`.
    pub fn solve_parameter(&self, x: f64) -> f64 {
        let mut lo = 0.0;
        let mut hi = 1.0;
        let mut mid = x.clamp(0.0, 1.0);

        for _ in 0..self.iterations {
            mid = (lo + hi) * 0.5;
            let error = component(self.x1, self.x2, mid) - x;
            if error.abs() < self.tolerance {
                break;
            }
            if error < 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        mid
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::from_points(DEFAULT_CONTROL_POINTS)
    }
}

/// One axis of a Bezier anchored at 0 and 1:
/// 3(1-s)²s·p1 + 3(1-s)s²·p2 + s³
#[inline]
fn component(p1: f64, p2: f64, s: f64) -> f64 {
    let ms = 1.0 - s;
    3.0 * ms * ms * s * p1 + 3.0 * ms * s * s * p2 + s * s * s
}
