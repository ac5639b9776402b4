// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resolution of rate-function references and rate-function combinators.
//!
//! A reference is a name, a typed easing kind, or a function value. Names go
//! through a fixed chain of lookups:
//!
//! 1. the alias table (`ease` → `smooth`, `rush_in` → `rush_into`, ...)
//! 2. the native named functions (`smooth`, `there_and_back`, ...)
//! 3. a case-insensitive match against [`EasingKind`] identifiers
//! 4. the preset table (Material, iOS, spring and overshoot bundles)
//! 5. `linear`, with a warning

use crate::error::{EasingError, Result};
use crate::kind::{EasingKind, EasingParams};
use crate::library::{EasingLibrary, RateFunction};
use crate::presets::{self, Preset};
use std::collections::HashMap;
use std::sync::LazyLock;

static ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("ease", "smooth"),
        ("rush_in", "rush_into"),
        ("rush_out", "rush_from"),
        ("slow_in", "slow_into"),
        ("linger", "lingering"),
        ("decay", "exponential_decay"),
        ("ping_pong", "there_and_back"),
        ("hold", "step"),
        ("ease_in", "ease_in_cubic"),
        ("ease_out", "ease_out_cubic"),
        ("ease_in_out", "ease_in_out_cubic"),
    ])
});

static NATIVE: LazyLock<HashMap<&'static str, EasingKind>> = LazyLock::new(|| {
    HashMap::from([
        ("linear", EasingKind::Linear),
        ("smooth", EasingKind::Smooth),
        ("smoothstep", EasingKind::SmoothStep),
        ("smootherstep", EasingKind::SmootherStep),
        ("smoothererstep", EasingKind::SmoothestStep),
        ("rush_into", EasingKind::RushInto),
        ("rush_from", EasingKind::RushFrom),
        ("slow_into", EasingKind::SlowInto),
        ("double_smooth", EasingKind::DoubleSmooth),
        ("triple_smooth", EasingKind::TripleSmooth),
        ("there_and_back", EasingKind::ThereAndBack),
        ("there_and_back_with_pause", EasingKind::ThereAndBackWithPause),
        ("not_quite_there", EasingKind::NotQuiteThere),
        ("wiggle", EasingKind::Wiggle),
        ("squish_rate_func", EasingKind::Squish),
        ("lingering", EasingKind::Lingering),
        ("exponential_decay", EasingKind::ExponentialDecay),
        ("running_start", EasingKind::RunningStart),
    ])
});

/// A reference to a rate function in one of its three representations.
#[derive(Debug, Clone)]
pub enum RateFunctionRef {
    /// Looked up by name through aliases, natives, kinds and presets
    Named(String),
    /// A typed easing kind with its own parameters
    Easing {
        /// Easing kind
        kind: EasingKind,
        /// Parameters for the kind
        params: EasingParams,
    },
    /// A function value, used as-is
    Function(RateFunction),
}

impl RateFunctionRef {
    /// Reference by name
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Reference a kind with default parameters
    pub fn easing(kind: EasingKind) -> Self {
        Self::Easing {
            kind,
            params: EasingParams::default(),
        }
    }

    /// Reference a closure
    pub fn function(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Function(RateFunction::new(f))
    }
}

impl From<&str> for RateFunctionRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for RateFunctionRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<EasingKind> for RateFunctionRef {
    fn from(kind: EasingKind) -> Self {
        Self::easing(kind)
    }
}

impl From<RateFunction> for RateFunctionRef {
    fn from(f: RateFunction) -> Self {
        Self::Function(f)
    }
}

/// Turns rate-function references into functions and combines them.
pub struct RateFunctionBridge;

impl RateFunctionBridge {
    /// Resolve a reference. `params` apply to named lookups that land on an
    /// easing kind; typed references carry their own parameters.
    pub fn resolve(reference: &RateFunctionRef, params: &EasingParams) -> RateFunction {
        match reference {
            RateFunctionRef::Named(name) => Self::resolve_name(name, params),
            RateFunctionRef::Easing { kind, params } => {
                EasingLibrary::get_easing_function(*kind, params)
            }
            RateFunctionRef::Function(f) => f.clone(),
        }
    }

    /// Resolve a name through the lookup chain.
    pub fn resolve_name(name: &str, params: &EasingParams) -> RateFunction {
        let lowered = name.trim().to_lowercase();
        let target = ALIASES
            .get(lowered.as_str())
            .copied()
            .unwrap_or(lowered.as_str());

        if let Some(kind) = NATIVE.get(target) {
            return EasingLibrary::get_easing_function(*kind, params);
        }
        if let Some(kind) = EasingKind::from_name(target) {
            return EasingLibrary::get_easing_function(kind, params);
        }
        if let Some(preset) = presets::find(target) {
            return EasingLibrary::get_easing_function(preset.kind, &preset.params);
        }

        tracing::warn!("Unknown rate function '{}', falling back to linear", name);
        EasingLibrary::get_easing_function(EasingKind::Linear, params)
    }

    /// Whether a name resolves to something other than the linear fallback.
    pub fn is_known(name: &str) -> bool {
        let lowered = name.trim().to_lowercase();
        let target = ALIASES
            .get(lowered.as_str())
            .copied()
            .unwrap_or(lowered.as_str());
        NATIVE.contains_key(target)
            || EasingKind::from_name(target).is_some()
            || presets::find(target).is_some()
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Preset> {
        presets::find(name.trim())
    }

    /// Every resolvable name, sorted.
    pub fn available_names() -> Vec<String> {
        let mut names: Vec<String> = ALIASES
            .keys()
            .chain(NATIVE.keys())
            .map(ToString::to_string)
            .chain(EasingKind::ALL.iter().map(|kind| kind.name().to_string()))
            .chain(presets::all().iter().map(|preset| preset.name.to_string()))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Weighted sum `t ↦ Σ wᵢ·fᵢ(t)`. Equal weights when `weights` is
    /// `None`; weights are normalized to sum to one.
    pub fn compose(refs: &[RateFunctionRef], weights: Option<&[f64]>) -> Result<RateFunction> {
        if refs.is_empty() {
            return Err(EasingError::Empty("compose"));
        }
        let weights = normalize_weights(refs.len(), weights)?;
        let functions = Self::resolve_all(refs);

        Ok(RateFunction::new(move |t| {
            functions
                .iter()
                .zip(&weights)
                .map(|(f, w)| w * f.eval(t))
                .sum()
        }))
    }

    /// Play the functions one after another. `[0, 1]` is split into
    /// contiguous pieces proportional to `durations` (equal when `None`) and
    /// each function sees its own piece remapped to `[0, 1]`. From `t = 1`
    /// on, the last function is evaluated at 1.
    pub fn chain(refs: &[RateFunctionRef], durations: Option<&[f64]>) -> Result<RateFunction> {
        if refs.is_empty() {
            return Err(EasingError::Empty("chain"));
        }
        let durations = normalize_weights(refs.len(), durations)?;
        let functions = Self::resolve_all(refs);

        Ok(RateFunction::new(move |t| {
            let last = functions.len() - 1;
            if t >= 1.0 {
                return functions[last].eval(1.0);
            }

            let mut start = 0.0;
            for (i, (f, span)) in functions.iter().zip(&durations).enumerate() {
                let end = start + span;
                if t < end || i == last {
                    if *span <= 0.0 {
                        return f.eval(1.0);
                    }
                    return f.eval((t - start) / span);
                }
                start = end;
            }
            functions[last].eval(1.0)
        }))
    }

    fn resolve_all(refs: &[RateFunctionRef]) -> Vec<RateFunction> {
        let params = EasingParams::default();
        refs.iter().map(|r| Self::resolve(r, &params)).collect()
    }
}

fn normalize_weights(count: usize, weights: Option<&[f64]>) -> Result<Vec<f64>> {
    let Some(weights) = weights else {
        return Ok(vec![1.0 / count as f64; count]);
    };
    if weights.len() != count {
        return Err(EasingError::WeightCountMismatch {
            expected: count,
            actual: weights.len(),
        });
    }
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(EasingError::InvalidWeight(*bad));
    }
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(EasingError::InvalidWeightSum(total));
    }
    Ok(weights.iter().map(|w| w / total).collect())
}
