// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interpolation kinds stored on keyframes.

use composer_easing::EasingKind;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How a keyframe blends into the next one.
///
/// Serialized as a plain string. Strings that are neither a built-in kind nor
/// an easing name are kept as [`InterpolationKind::Named`] and resolved by
/// name when evaluated, so unknown names never fail at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum InterpolationKind {
    /// Hold the value until the next keyframe
    Step,
    /// Linear blend
    #[default]
    Linear,
    /// Cubic Bezier using the keyframe's control points
    Bezier,
    /// Damped spring using the keyframe's spring constants
    Spring,
    /// Any other easing curve
    Easing(EasingKind),
    /// Resolved by name (aliases, presets, unknown names)
    Named(String),
}

impl InterpolationKind {
    /// Serialized name
    pub fn name(&self) -> &str {
        match self {
            Self::Step => "step",
            Self::Linear => "linear",
            Self::Bezier => "bezier",
            Self::Spring => "spring",
            Self::Easing(kind) => kind.name(),
            Self::Named(name) => name,
        }
    }

    /// Easing kind this interpolation maps to. `None` for named kinds, which
    /// go through the rate-function bridge instead.
    ///
    /// | interpolation | easing |
    /// |---|---|
    /// | `Step` | `Step` |
    /// | `Linear` | `Linear` |
    /// | `Bezier` | `CubicBezier` |
    /// | `Spring` | `Spring` |
    /// | `Easing(k)` | `k` |
    pub fn easing_kind(&self) -> Option<EasingKind> {
        match self {
            Self::Step => Some(EasingKind::Step),
            Self::Linear => Some(EasingKind::Linear),
            Self::Bezier => Some(EasingKind::CubicBezier),
            Self::Spring => Some(EasingKind::Spring),
            Self::Easing(kind) => Some(*kind),
            Self::Named(_) => None,
        }
    }
}

impl From<EasingKind> for InterpolationKind {
    fn from(kind: EasingKind) -> Self {
        match kind {
            EasingKind::Step => Self::Step,
            EasingKind::Linear => Self::Linear,
            EasingKind::CubicBezier => Self::Bezier,
            EasingKind::Spring => Self::Spring,
            other => Self::Easing(other),
        }
    }
}

impl FromStr for InterpolationKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "step" | "constant" | "hold" => Self::Step,
            "linear" => Self::Linear,
            "bezier" => Self::Bezier,
            "spring" => Self::Spring,
            _ => match EasingKind::from_name(s) {
                Some(kind) => Self::from(kind),
                None => Self::Named(s.to_string()),
            },
        })
    }
}

impl From<&str> for InterpolationKind {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for InterpolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for InterpolationKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for InterpolationKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(InterpolationKind::from(name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builtin_names() {
        assert_eq!(InterpolationKind::from("step"), InterpolationKind::Step);
        assert_eq!(InterpolationKind::from("Linear"), InterpolationKind::Linear);
        assert_eq!(InterpolationKind::from("cubic_bezier"), InterpolationKind::Bezier);
        assert_eq!(
            InterpolationKind::from("EaseOutBounce"),
            InterpolationKind::Easing(EasingKind::EaseOutBounce)
        );
    }

    #[test]
    fn test_unknown_names_are_kept() {
        let kind = InterpolationKind::from("material_standard");
        assert_eq!(kind, InterpolationKind::Named("material_standard".to_string()));
        assert_eq!(kind.easing_kind(), None);
        assert_eq!(kind.name(), "material_standard");
    }

    #[test]
    fn test_every_easing_kind_round_trips_through_its_name() {
        for kind in EasingKind::ALL {
            let interpolation = InterpolationKind::from(*kind);
            assert_eq!(interpolation.easing_kind(), Some(*kind));
            assert_eq!(InterpolationKind::from(interpolation.name()), interpolation);
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&InterpolationKind::Easing(EasingKind::EaseInQuad)).unwrap();
        assert_eq!(json, "\"ease_in_quad\"");
        let back: InterpolationKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, InterpolationKind::Easing(EasingKind::EaseInQuad));
    }
}
