// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing kinds and their tunable parameters.

use crate::spring::SpringParams;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Every easing curve the library knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingKind {
    /// Identity
    Linear,
    /// Jumps from 0 to 1 at t = 0.5
    Step,
    /// Cubic Hermite step
    SmoothStep,
    /// Quintic Hermite step
    SmootherStep,
    /// Degree-7 Hermite step
    SmoothestStep,
    /// t²
    EaseInQuad,
    /// 1 - (1 - t)²
    EaseOutQuad,
    /// Mirrored quadratic
    EaseInOutQuad,
    /// t³
    EaseInCubic,
    /// 1 - (1 - t)³
    EaseOutCubic,
    /// Mirrored cubic
    EaseInOutCubic,
    /// t⁴
    EaseInQuart,
    /// 1 - (1 - t)⁴
    EaseOutQuart,
    /// Mirrored quartic
    EaseInOutQuart,
    /// t⁵
    EaseInQuint,
    /// 1 - (1 - t)⁵
    EaseOutQuint,
    /// Mirrored quintic
    EaseInOutQuint,
    /// Exponential ease in
    EaseInExpo,
    /// Exponential ease out
    EaseOutExpo,
    /// Exponential ease in/out
    EaseInOutExpo,
    /// Circular ease in
    EaseInCirc,
    /// Circular ease out
    EaseOutCirc,
    /// Circular ease in/out
    EaseInOutCirc,
    /// Decaying sine, in
    EaseInElastic,
    /// Decaying sine, out
    EaseOutElastic,
    /// Decaying sine, in/out
    EaseInOutElastic,
    /// Reflected bounce
    EaseInBounce,
    /// Canonical four-segment bounce
    EaseOutBounce,
    /// Bounce on both ends
    EaseInOutBounce,
    /// Pulls back before leaving
    EaseInBack,
    /// Overshoots the target
    EaseOutBack,
    /// Pull back and overshoot
    EaseInOutBack,
    /// Cubic Bezier with two free control points
    CubicBezier,
    /// Damped harmonic oscillator
    Spring,
    /// Sigmoid-based smooth curve
    Smooth,
    /// Goes to 1 and returns to 0
    ThereAndBack,
    /// Goes to 1, holds, returns to 0
    ThereAndBackWithPause,
    /// First half of the smooth curve, rescaled
    RushInto,
    /// Second half of the smooth curve, rescaled
    RushFrom,
    /// Quarter circle
    SlowInto,
    /// smooth ∘ smooth
    DoubleSmooth,
    /// smooth ∘ smooth ∘ smooth
    TripleSmooth,
    /// Scaled-down smooth curve that never reaches 1
    NotQuiteThere,
    /// Sine-modulated there-and-back
    Wiggle,
    /// Smooth curve squeezed into a sub-interval
    Squish,
    /// Fast, slow, fast
    Lingering,
    /// 1 - e^(-t / half_life)
    ExponentialDecay,
    /// Pulls back, then runs to the target
    RunningStart,
}

impl EasingKind {
    /// All kinds, in catalogue order.
    pub const ALL: &'static [EasingKind] = &[
        Self::Linear,
        Self::Step,
        Self::SmoothStep,
        Self::SmootherStep,
        Self::SmoothestStep,
        Self::EaseInQuad,
        Self::EaseOutQuad,
        Self::EaseInOutQuad,
        Self::EaseInCubic,
        Self::EaseOutCubic,
        Self::EaseInOutCubic,
        Self::EaseInQuart,
        Self::EaseOutQuart,
        Self::EaseInOutQuart,
        Self::EaseInQuint,
        Self::EaseOutQuint,
        Self::EaseInOutQuint,
        Self::EaseInExpo,
        Self::EaseOutExpo,
        Self::EaseInOutExpo,
        Self::EaseInCirc,
        Self::EaseOutCirc,
        Self::EaseInOutCirc,
        Self::EaseInElastic,
        Self::EaseOutElastic,
        Self::EaseInOutElastic,
        Self::EaseInBounce,
        Self::EaseOutBounce,
        Self::EaseInOutBounce,
        Self::EaseInBack,
        Self::EaseOutBack,
        Self::EaseInOutBack,
        Self::CubicBezier,
        Self::Spring,
        Self::Smooth,
        Self::ThereAndBack,
        Self::ThereAndBackWithPause,
        Self::RushInto,
        Self::RushFrom,
        Self::SlowInto,
        Self::DoubleSmooth,
        Self::TripleSmooth,
        Self::NotQuiteThere,
        Self::Wiggle,
        Self::Squish,
        Self::Lingering,
        Self::ExponentialDecay,
        Self::RunningStart,
    ];

    /// Snake-case identifier, also used in serialized documents.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Step => "step",
            Self::SmoothStep => "smooth_step",
            Self::SmootherStep => "smoother_step",
            Self::SmoothestStep => "smoothest_step",
            Self::EaseInQuad => "ease_in_quad",
            Self::EaseOutQuad => "ease_out_quad",
            Self::EaseInOutQuad => "ease_in_out_quad",
            Self::EaseInCubic => "ease_in_cubic",
            Self::EaseOutCubic => "ease_out_cubic",
            Self::EaseInOutCubic => "ease_in_out_cubic",
            Self::EaseInQuart => "ease_in_quart",
            Self::EaseOutQuart => "ease_out_quart",
            Self::EaseInOutQuart => "ease_in_out_quart",
            Self::EaseInQuint => "ease_in_quint",
            Self::EaseOutQuint => "ease_out_quint",
            Self::EaseInOutQuint => "ease_in_out_quint",
            Self::EaseInExpo => "ease_in_expo",
            Self::EaseOutExpo => "ease_out_expo",
            Self::EaseInOutExpo => "ease_in_out_expo",
            Self::EaseInCirc => "ease_in_circ",
            Self::EaseOutCirc => "ease_out_circ",
            Self::EaseInOutCirc => "ease_in_out_circ",
            Self::EaseInElastic => "ease_in_elastic",
            Self::EaseOutElastic => "ease_out_elastic",
            Self::EaseInOutElastic => "ease_in_out_elastic",
            Self::EaseInBounce => "ease_in_bounce",
            Self::EaseOutBounce => "ease_out_bounce",
            Self::EaseInOutBounce => "ease_in_out_bounce",
            Self::EaseInBack => "ease_in_back",
            Self::EaseOutBack => "ease_out_back",
            Self::EaseInOutBack => "ease_in_out_back",
            Self::CubicBezier => "cubic_bezier",
            Self::Spring => "spring",
            Self::Smooth => "smooth",
            Self::ThereAndBack => "there_and_back",
            Self::ThereAndBackWithPause => "there_and_back_with_pause",
            Self::RushInto => "rush_into",
            Self::RushFrom => "rush_from",
            Self::SlowInto => "slow_into",
            Self::DoubleSmooth => "double_smooth",
            Self::TripleSmooth => "triple_smooth",
            Self::NotQuiteThere => "not_quite_there",
            Self::Wiggle => "wiggle",
            Self::Squish => "squish",
            Self::Lingering => "lingering",
            Self::ExponentialDecay => "exponential_decay",
            Self::RunningStart => "running_start",
        }
    }

    /// Case-insensitive lookup that ignores `_`, `-` and spaces, so
    /// `EaseOutBounce`, `ease_out_bounce` and `ease-out-bounce` all match.
    pub fn from_name(name: &str) -> Option<Self> {
        BY_NORMALIZED_NAME.get(normalize(name).as_str()).copied()
    }

    /// Whether the curve satisfies `f(0) = 0` and `f(1) = 1`.
    ///
    /// Elastic and back eases hit both endpoints too, but they leave `[0, 1]`
    /// on the way, so they are reported as `false` together with the shapes
    /// that return to zero or stop short of one.
    pub fn reaches_endpoints(&self) -> bool {
        !matches!(
            self,
            Self::EaseInElastic
                | Self::EaseOutElastic
                | Self::EaseInOutElastic
                | Self::EaseInBack
                | Self::EaseOutBack
                | Self::EaseInOutBack
                | Self::RunningStart
                | Self::ThereAndBack
                | Self::ThereAndBackWithPause
                | Self::NotQuiteThere
                | Self::Wiggle
                | Self::ExponentialDecay
        )
    }
}

impl fmt::Display for EasingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static BY_NORMALIZED_NAME: LazyLock<HashMap<String, EasingKind>> = LazyLock::new(|| {
    EasingKind::ALL
        .iter()
        .map(|kind| (normalize(kind.name()), *kind))
        .collect()
});

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Tunable parameters shared by the easing catalogue.
///
/// Each kind reads only the fields it cares about; the rest are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EasingParams {
    /// Elastic amplitude
    pub amplitude: f64,
    /// Elastic period
    pub period: f64,
    /// Back-ease overshoot constant
    pub overshoot: f64,
    /// Cubic Bezier control points `[x1, y1, x2, y2]`
    pub bezier: Option<[f64; 4]>,
    /// Spring constants
    pub spring: Option<SpringParams>,
    /// Steepness of the sigmoid behind `smooth`
    pub inflection: f64,
    /// Share of the domain spent holding in `there_and_back_with_pause`
    pub pause_ratio: f64,
    /// Ceiling of `not_quite_there`
    pub proportion: f64,
    /// Half-oscillations of `wiggle`
    pub wiggles: f64,
    /// Start of the `squish` window
    pub squish_start: f64,
    /// End of the `squish` window
    pub squish_end: f64,
    /// Half-life of `exponential_decay`
    pub half_life: f64,
    /// Pull-back strength of `running_start`
    pub pull_factor: f64,
}

impl EasingParams {
    /// Default elastic amplitude
    pub const DEFAULT_AMPLITUDE: f64 = 1.0;
    /// Default elastic period
    pub const DEFAULT_PERIOD: f64 = 0.3;
    /// Default back-ease overshoot
    pub const DEFAULT_OVERSHOOT: f64 = 1.70158;

    /// Builder: Bezier control points
    pub fn with_bezier(mut self, points: [f64; 4]) -> Self {
        self.bezier = Some(points);
        self
    }

    /// Builder: spring constants
    pub fn with_spring(mut self, spring: SpringParams) -> Self {
        self.spring = Some(spring);
        self
    }

    /// Builder: back-ease overshoot
    pub fn with_overshoot(mut self, overshoot: f64) -> Self {
        self.overshoot = overshoot;
        self
    }

    /// Builder: elastic amplitude and period
    pub fn with_elastic(mut self, amplitude: f64, period: f64) -> Self {
        self.amplitude = amplitude;
        self.period = period;
        self
    }

    /// Set a parameter by its field name. Returns `false` for unknown names.
    ///
    /// Spring constants are accepted as `stiffness`, `damping` and `mass`.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match name {
            "amplitude" => self.amplitude = value,
            "period" => self.period = value,
            "overshoot" => self.overshoot = value,
            "inflection" => self.inflection = value,
            "pause_ratio" => self.pause_ratio = value,
            "proportion" => self.proportion = value,
            "wiggles" => self.wiggles = value,
            "squish_start" => self.squish_start = value,
            "squish_end" => self.squish_end = value,
            "half_life" => self.half_life = value,
            "pull_factor" => self.pull_factor = value,
            "stiffness" => self.spring.get_or_insert_with(SpringParams::default).stiffness = value,
            "damping" => self.spring.get_or_insert_with(SpringParams::default).damping = value,
            "mass" => self.spring.get_or_insert_with(SpringParams::default).mass = value,
            _ => return false,
        }
        true
    }

    /// Build parameters from `(name, value)` pairs, skipping unknown names.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut params = Self::default();
        for (name, value) in pairs {
            if !params.set(name, value) {
                tracing::debug!("Ignoring unknown easing parameter: {}", name);
            }
        }
        params
    }
}

impl Default for EasingParams {
    fn default() -> Self {
        Self {
            amplitude: Self::DEFAULT_AMPLITUDE,
            period: Self::DEFAULT_PERIOD,
            overshoot: Self::DEFAULT_OVERSHOOT,
            bezier: None,
            spring: None,
            inflection: 10.0,
            pause_ratio: 1.0 / 3.0,
            proportion: 0.7,
            wiggles: 2.0,
            squish_start: 0.4,
            squish_end: 0.6,
            half_life: 0.1,
            pull_factor: -0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in EasingKind::ALL {
            assert_eq!(EasingKind::from_name(kind.name()), Some(*kind));
        }
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(EasingKind::from_name("EaseOutBounce"), Some(EasingKind::EaseOutBounce));
        assert_eq!(EasingKind::from_name("EASE-IN-QUAD"), Some(EasingKind::EaseInQuad));
        assert_eq!(EasingKind::from_name("rush into"), Some(EasingKind::RushInto));
        assert_eq!(EasingKind::from_name("wobble"), None);
        assert_eq!(EasingKind::from_name(""), None);
        assert_eq!(EasingKind::from_name(" - _"), None);
    }

    #[test]
    fn test_params_set() {
        let mut params = EasingParams::default();
        assert!(params.set("overshoot", 2.5));
        assert!(params.set("stiffness", 300.0));
        assert!(!params.set("nonsense", 1.0));
        assert_eq!(params.overshoot, 2.5);
        assert_eq!(params.spring.map(|s| s.stiffness), Some(300.0));
    }

    #[test]
    fn test_params_from_pairs() {
        let params = EasingParams::from_pairs([("wiggles", 4.0), ("bogus", 1.0)]);
        assert_eq!(params.wiggles, 4.0);
        assert_eq!(params.period, EasingParams::DEFAULT_PERIOD);
    }
}
