// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions and segment evaluation.

use crate::error::Result;
use crate::interpolation::InterpolationKind;
use crate::value::{interpolate_values, Value};
use composer_easing::{
    EasingKind, EasingLibrary, EasingParams, RateFunctionBridge, RateFunctionRef, SpringParams,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyframeId(pub Uuid);

impl KeyframeId {
    /// Create a new random keyframe ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for KeyframeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A keyframe on one property of a track
#[derive(Debug, Clone)]
pub struct Keyframe {
    /// Unique keyframe ID
    pub id: KeyframeId,
    /// Time in seconds
    pub time: f64,
    /// Value at this keyframe
    pub value: Value,
    /// Interpolation towards the next keyframe
    pub interpolation: InterpolationKind,
    /// Control points `[x1, y1, x2, y2]` for Bezier interpolation
    pub bezier_points: Option<[f64; 4]>,
    /// Spring constants for spring interpolation
    pub spring_params: Option<SpringParams>,
    /// Extra easing parameters
    pub easing_params: EasingParams,
    /// Rate function that replaces `interpolation` when set
    pub rate_function_override: Option<RateFunctionRef>,
}

impl Keyframe {
    /// Create a new linear keyframe
    pub fn new(time: f64, value: impl Into<Value>) -> Self {
        Self {
            id: KeyframeId::new(),
            time,
            value: value.into(),
            interpolation: InterpolationKind::Linear,
            bezier_points: None,
            spring_params: None,
            easing_params: EasingParams::default(),
            rate_function_override: None,
        }
    }

    /// Set interpolation mode
    pub fn with_interpolation(mut self, interpolation: impl Into<InterpolationKind>) -> Self {
        self.interpolation = interpolation.into();
        self
    }

    /// Set Bezier control points
    pub fn with_bezier_points(mut self, points: [f64; 4]) -> Self {
        self.bezier_points = Some(points);
        self
    }

    /// Set spring constants
    pub fn with_spring(mut self, spring: SpringParams) -> Self {
        self.spring_params = Some(spring);
        self
    }

    /// Set extra easing parameters
    pub fn with_easing_params(mut self, params: EasingParams) -> Self {
        self.easing_params = params;
        self
    }

    /// Replace the interpolation with a rate function
    pub fn with_rate_function(mut self, rate_function: impl Into<RateFunctionRef>) -> Self {
        self.rate_function_override = Some(rate_function.into());
        self
    }

    /// Easing parameters with the Bezier and spring fields folded in.
    pub fn effective_params(&self) -> EasingParams {
        let mut params = self.easing_params;
        if let Some(points) = self.bezier_points {
            params.bezier = Some(points);
        }
        if let Some(spring) = self.spring_params {
            params.spring = Some(spring);
        }
        params
    }

    /// Eased progress for linear progress `u`.
    pub fn ease(&self, u: f64) -> f64 {
        let params = self.effective_params();
        if let Some(reference) = &self.rate_function_override {
            return RateFunctionBridge::resolve(reference, &params).eval(u);
        }
        match self.interpolation.easing_kind() {
            Some(kind) => EasingLibrary::evaluate(kind, u, &params),
            None => RateFunctionBridge::resolve_name(self.interpolation.name(), &params).eval(u),
        }
    }

    /// Value of the segment from this keyframe to `next` at time `t`.
    ///
    /// Step keyframes hold their value for the whole segment. Otherwise the
    /// segment progress is clamped to `[0, 1]`, eased, and used to blend the
    /// two values.
    pub fn interpolate_to(&self, next: &Keyframe, t: f64) -> Result<Value> {
        if self.interpolation.easing_kind() == Some(EasingKind::Step) {
            return Ok(self.value.clone());
        }

        let span = next.time - self.time;
        if span == 0.0 {
            return Ok(self.value.clone());
        }

        let u = ((t - self.time) / span).clamp(0.0, 1.0);
        interpolate_values(&self.value, &next.value, self.ease(u))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn number(v: Result<Value>) -> f64 {
        v.unwrap().as_number().unwrap()
    }

    #[test]
    fn test_linear_segment() {
        let a = Keyframe::new(0.0, 0.0);
        let b = Keyframe::new(2.0, 10.0);
        assert!(approx_eq(number(a.interpolate_to(&b, 1.0)), 5.0));
        assert!(approx_eq(number(a.interpolate_to(&b, -4.0)), 0.0));
        assert!(approx_eq(number(a.interpolate_to(&b, 9.0)), 10.0));
    }

    #[test]
    fn test_step_holds() {
        let a = Keyframe::new(1.0, 3.0).with_interpolation(InterpolationKind::Step);
        let b = Keyframe::new(2.0, 8.0);
        for t in [1.0, 1.25, 1.5, 1.999] {
            assert_eq!(number(a.interpolate_to(&b, t)), 3.0);
        }
    }

    #[test]
    fn test_step_easing_kind_holds() {
        let mut a = Keyframe::new(0.0, "off");
        a.interpolation = InterpolationKind::Easing(EasingKind::Step);
        let b = Keyframe::new(1.0, "on");
        assert_eq!(a.interpolate_to(&b, 0.7).unwrap(), Value::from("off"));

        let mut x = Keyframe::new(0.0, 2.0);
        x.interpolation = InterpolationKind::Easing(EasingKind::Step);
        let y = Keyframe::new(1.0, 6.0);
        assert_eq!(number(x.interpolate_to(&y, 0.7)), 2.0);
    }

    #[test]
    fn test_zero_span_returns_own_value() {
        let a = Keyframe::new(1.0, 3.0);
        let b = Keyframe::new(1.0, 8.0);
        assert_eq!(number(a.interpolate_to(&b, 1.0)), 3.0);
    }

    #[test]
    fn test_bounce_segment() {
        let a = Keyframe::new(0.0, 0.0).with_interpolation(EasingKind::EaseOutBounce);
        let b = Keyframe::new(1.0, 1.0);
        let t = 1.0 / 2.75 - 0.01;
        assert!(approx_eq(number(a.interpolate_to(&b, t)), 7.5625 * t * t));
    }

    #[test]
    fn test_bezier_points_are_used() {
        let plain = Keyframe::new(0.0, 0.0).with_interpolation(InterpolationKind::Bezier);
        let custom = plain.clone().with_bezier_points([0.9, 0.0, 1.0, 0.1]);
        let end = Keyframe::new(1.0, 1.0);
        let a = number(plain.interpolate_to(&end, 0.5));
        let b = number(custom.interpolate_to(&end, 0.5));
        assert!(b < a);
    }

    #[test]
    fn test_override_wins() {
        let kf = Keyframe::new(0.0, 0.0)
            .with_interpolation(InterpolationKind::Linear)
            .with_rate_function(RateFunctionRef::function(|t| t * t));
        let end = Keyframe::new(1.0, 10.0);
        assert!(approx_eq(number(kf.interpolate_to(&end, 0.5)), 2.5));
    }

    #[test]
    fn test_named_interpolation_uses_bridge() {
        let kf = Keyframe::new(0.0, 0.0).with_interpolation("rush_in");
        let reference = Keyframe::new(0.0, 0.0).with_interpolation(EasingKind::RushInto);
        assert!(approx_eq(kf.ease(0.3), reference.ease(0.3)));

        let unknown = Keyframe::new(0.0, 0.0).with_interpolation("not_a_curve");
        assert!(approx_eq(unknown.ease(0.3), 0.3));
    }

    #[test]
    fn test_override_receives_keyframe_params() {
        let kf = Keyframe::new(0.0, 0.0)
            .with_rate_function("ease_out_back")
            .with_easing_params(EasingParams::default().with_overshoot(3.0));
        let expected = EasingLibrary::evaluate(
            EasingKind::EaseOutBack,
            0.8,
            &EasingParams::default().with_overshoot(3.0),
        );
        assert!(approx_eq(kf.ease(0.8), expected));
    }
}
