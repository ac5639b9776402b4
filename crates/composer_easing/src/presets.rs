// SPDX-License-Identifier: MIT OR Apache-2.0
//! Curated easing parameter bundles.

use crate::kind::{EasingKind, EasingParams};
use crate::spring::SpringParams;
use std::collections::HashMap;
use std::sync::LazyLock;

/// A named easing kind with tuned parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    /// Lookup name
    pub name: &'static str,
    /// Underlying easing
    pub kind: EasingKind,
    /// Parameters applied on top of the defaults
    pub params: EasingParams,
}

fn bezier(name: &'static str, points: [f64; 4]) -> Preset {
    Preset {
        name,
        kind: EasingKind::CubicBezier,
        params: EasingParams::default().with_bezier(points),
    }
}

fn spring(name: &'static str, stiffness: f64, damping: f64) -> Preset {
    Preset {
        name,
        kind: EasingKind::Spring,
        params: EasingParams::default().with_spring(SpringParams::new(stiffness, damping, 1.0)),
    }
}

fn back(name: &'static str, overshoot: f64) -> Preset {
    Preset {
        name,
        kind: EasingKind::EaseOutBack,
        params: EasingParams::default().with_overshoot(overshoot),
    }
}

static PRESETS: LazyLock<Vec<Preset>> = LazyLock::new(|| {
    vec![
        bezier("material_standard", [0.4, 0.0, 0.2, 1.0]),
        bezier("material_decelerated", [0.0, 0.0, 0.2, 1.0]),
        bezier("material_accelerated", [0.4, 0.0, 1.0, 1.0]),
        bezier("material_sharp", [0.4, 0.0, 0.6, 1.0]),
        bezier("ios_default", [0.25, 0.1, 0.25, 1.0]),
        bezier("ios_ease_in_out", [0.42, 0.0, 0.58, 1.0]),
        Preset {
            name: "bounce",
            kind: EasingKind::EaseOutBounce,
            params: EasingParams::default(),
        },
        Preset {
            name: "elastic",
            kind: EasingKind::EaseOutElastic,
            params: EasingParams::default().with_elastic(1.0, 0.4),
        },
        spring("spring_default", 170.0, 26.0),
        spring("spring_gentle", 120.0, 14.0),
        spring("spring_wobbly", 180.0, 12.0),
        spring("spring_stiff", 210.0, 20.0),
        back("overshoot", EasingParams::DEFAULT_OVERSHOOT),
        back("overshoot_small", 1.2),
        back("overshoot_large", 2.5),
    ]
});

static BY_NAME: LazyLock<HashMap<&'static str, Preset>> =
    LazyLock::new(|| PRESETS.iter().map(|preset| (preset.name, *preset)).collect());

/// Every preset, in lookup order.
pub fn all() -> &'static [Preset] {
    &PRESETS
}

/// Look up a preset by exact name.
pub fn find(name: &str) -> Option<Preset> {
    BY_NAME.get(name).copied()
}
