// SPDX-License-Identifier: MIT OR Apache-2.0
//! Closed-form damped harmonic oscillator used by the `spring` ease.

use serde::{Deserialize, Serialize};

/// Spring constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringParams {
    /// Spring stiffness (k)
    pub stiffness: f64,
    /// Damping coefficient (c)
    pub damping: f64,
    /// Moving mass (m)
    pub mass: f64,
}

impl SpringParams {
    /// Create spring constants
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Undamped angular frequency sqrt(k / m)
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass.max(f64::EPSILON)).sqrt()
    }

    /// Damping ratio c / (2 sqrt(k m))
    pub fn damping_ratio(&self) -> f64 {
        let critical = 2.0 * (self.stiffness * self.mass).max(f64::EPSILON).sqrt();
        self.damping / critical
    }

    /// Position of a spring released at 0 towards 1 with zero velocity,
    /// `t` seconds after release.
    ///
    /// The curve is pinned to 0 for `t <= 0` and to 1 for `t >= 1`.
    pub fn position(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let omega = self.natural_frequency();
        let zeta = self.damping_ratio();

        if (zeta - 1.0).abs() < 1e-9 {
            // Critically damped
            1.0 - (-omega * t).exp() * (1.0 + omega * t)
        } else if zeta < 1.0 {
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega * t).exp();
            1.0 - decay * ((damped * t).cos() + (zeta * omega / damped) * (damped * t).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        }
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
        }
    }
}
