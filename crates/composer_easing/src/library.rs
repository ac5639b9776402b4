// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing function factory.

use crate::bezier::{CubicBezier, DEFAULT_CONTROL_POINTS};
use crate::curves;
use crate::kind::{EasingKind, EasingParams};
use std::fmt;
use std::sync::Arc;

/// A resolved rate function `t ↦ f(t)`, cheap to clone.
#[derive(Clone)]
pub struct RateFunction(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl RateFunction {
    /// Wrap a closure
    pub fn new(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Evaluate at `t`
    pub fn eval(&self, t: f64) -> f64 {
        (self.0)(t)
    }

    /// Whether both handles point at the same function
    pub fn ptr_eq(&self, other: &RateFunction) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for RateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RateFunction").finish_non_exhaustive()
    }
}

/// Builds easing functions from an [`EasingKind`] and its parameters.
pub struct EasingLibrary;

impl EasingLibrary {
    /// Build the function for `kind`, capturing `params`.
    pub fn get_easing_function(kind: EasingKind, params: &EasingParams) -> RateFunction {
        let params = *params;
        if kind == EasingKind::CubicBezier {
            let curve = CubicBezier::from_points(params.bezier.unwrap_or(DEFAULT_CONTROL_POINTS));
            return RateFunction::new(move |t| curve.evaluate(t));
        }
        RateFunction::new(move |t| Self::evaluate(kind, t, &params))
    }

    /// Evaluate `kind` at `t` directly.
    pub fn evaluate(kind: EasingKind, t: f64, params: &EasingParams) -> f64 {
        match kind {
            EasingKind::Linear => curves::linear(t),
            EasingKind::Step => curves::step(t),
            EasingKind::SmoothStep => curves::smooth_step(t),
            EasingKind::SmootherStep => curves::smoother_step(t),
            EasingKind::SmoothestStep => curves::smoothest_step(t),
            EasingKind::EaseInQuad => curves::power_in(t, 2),
            EasingKind::EaseOutQuad => curves::power_out(t, 2),
            EasingKind::EaseInOutQuad => curves::power_in_out(t, 2),
            EasingKind::EaseInCubic => curves::power_in(t, 3),
            EasingKind::EaseOutCubic => curves::power_out(t, 3),
            EasingKind::EaseInOutCubic => curves::power_in_out(t, 3),
            EasingKind::EaseInQuart => curves::power_in(t, 4),
            EasingKind::EaseOutQuart => curves::power_out(t, 4),
            EasingKind::EaseInOutQuart => curves::power_in_out(t, 4),
            EasingKind::EaseInQuint => curves::power_in(t, 5),
            EasingKind::EaseOutQuint => curves::power_out(t, 5),
            EasingKind::EaseInOutQuint => curves::power_in_out(t, 5),
            EasingKind::EaseInExpo => curves::expo_in(t),
            EasingKind::EaseOutExpo => curves::expo_out(t),
            EasingKind::EaseInOutExpo => curves::expo_in_out(t),
            EasingKind::EaseInCirc => curves::circ_in(t),
            EasingKind::EaseOutCirc => curves::circ_out(t),
            EasingKind::EaseInOutCirc => curves::circ_in_out(t),
            EasingKind::EaseInElastic => curves::elastic_in(t, params.amplitude, params.period),
            EasingKind::EaseOutElastic => curves::elastic_out(t, params.amplitude, params.period),
            EasingKind::EaseInOutElastic => {
                curves::elastic_in_out(t, params.amplitude, params.period)
            }
            EasingKind::EaseInBounce => curves::bounce_in(t),
            EasingKind::EaseOutBounce => curves::bounce_out(t),
            EasingKind::EaseInOutBounce => curves::bounce_in_out(t),
            EasingKind::EaseInBack => curves::back_in(t, params.overshoot),
            EasingKind::EaseOutBack => curves::back_out(t, params.overshoot),
            EasingKind::EaseInOutBack => curves::back_in_out(t, params.overshoot),
            EasingKind::CubicBezier => {
                CubicBezier::from_points(params.bezier.unwrap_or(DEFAULT_CONTROL_POINTS))
                    .evaluate(t)
            }
            EasingKind::Spring => params.spring.unwrap_or_default().position(t),
            EasingKind::Smooth => curves::smooth(t, params.inflection),
            EasingKind::ThereAndBack => curves::there_and_back(t, params.inflection),
            EasingKind::ThereAndBackWithPause => {
                curves::there_and_back_with_pause(t, params.pause_ratio)
            }
            EasingKind::RushInto => curves::rush_into(t, params.inflection),
            EasingKind::RushFrom => curves::rush_from(t, params.inflection),
            EasingKind::SlowInto => curves::slow_into(t),
            EasingKind::DoubleSmooth => curves::double_smooth(t, params.inflection),
            EasingKind::TripleSmooth => curves::triple_smooth(t, params.inflection),
            EasingKind::NotQuiteThere => curves::not_quite_there(t, params.proportion),
            EasingKind::Wiggle => curves::wiggle(t, params.wiggles),
            EasingKind::Squish => curves::squish(t, params.squish_start, params.squish_end),
            EasingKind::Lingering => curves::lingering(t),
            EasingKind::ExponentialDecay => curves::exponential_decay(t, params.half_life),
            EasingKind::RunningStart => curves::running_start(t, params.pull_factor),
        }
    }

    /// Build the function for a kind name, falling back to linear.
    pub fn by_name(name: &str, params: &EasingParams) -> RateFunction {
        match EasingKind::from_name(name) {
            Some(kind) => Self::get_easing_function(kind, params),
            None => {
                tracing::warn!("Unknown easing kind '{}', using linear", name);
                Self::get_easing_function(EasingKind::Linear, params)
            }
        }
    }
}
