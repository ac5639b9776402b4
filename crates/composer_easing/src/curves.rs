// SPDX-License-Identifier: MIT OR Apache-2.0
//! The raw easing formulas.
//!
//! Every function here is total over the reals and free of side effects.

use std::f64::consts::PI;

/// Identity
pub fn linear(t: f64) -> f64 {
    t
}

/// 0 below one half, 1 from one half on
pub fn step(t: f64) -> f64 {
    if t < 0.5 {
        0.0
    } else {
        1.0
    }
}

/// 3t² - 2t³
pub fn smooth_step(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// 6t⁵ - 15t⁴ + 10t³
pub fn smoother_step(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (6.0 * t - 15.0) + 10.0)
}

/// -20t⁷ + 70t⁶ - 84t⁵ + 35t⁴
pub fn smoothest_step(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let t4 = t * t * t * t;
    t4 * (35.0 + t * (-84.0 + t * (70.0 - 20.0 * t)))
}

/// tⁿ
pub fn power_in(t: f64, n: i32) -> f64 {
    t.powi(n)
}

/// 1 - (1 - t)ⁿ
pub fn power_out(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

/// `power_in` on the first half, mirrored about (0.5, 0.5) on the second
pub fn power_in_out(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        power_in(2.0 * t, n) / 2.0
    } else {
        1.0 - power_in(2.0 - 2.0 * t, n) / 2.0
    }
}

/// Exponential ease in
pub fn expo_in(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else {
        2f64.powf(10.0 * t - 10.0)
    }
}

/// Exponential ease out
pub fn expo_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}

/// Exponential ease in/out
pub fn expo_in_out(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2f64.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
    }
}

/// Circular ease in
pub fn circ_in(t: f64) -> f64 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}

/// Circular ease out
pub fn circ_out(t: f64) -> f64 {
    (1.0 - (t - 1.0) * (t - 1.0)).max(0.0).sqrt()
}

/// Circular ease in/out
pub fn circ_in_out(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - (1.0 - (2.0 * t).powi(2)).max(0.0).sqrt()) / 2.0
    } else {
        ((1.0 - (-2.0 * t + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
    }
}

/// Phase shift of the elastic sine; amplitudes below 1 are raised to 1.
fn elastic_shape(amplitude: f64, period: f64) -> (f64, f64) {
    let period = if period.abs() < f64::EPSILON { 0.3 } else { period };
    if amplitude < 1.0 {
        (1.0, period / 4.0)
    } else {
        (amplitude, period / (2.0 * PI) * (1.0 / amplitude).asin())
    }
}

/// Elastic ease in
pub fn elastic_in(t: f64, amplitude: f64, period: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let (a, s) = elastic_shape(amplitude, period);
    let p = if period.abs() < f64::EPSILON { 0.3 } else { period };
    let shifted = t - 1.0;
    -(a * 2f64.powf(10.0 * shifted) * ((shifted - s) * 2.0 * PI / p).sin())
}

/// Elastic ease out
pub fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let (a, s) = elastic_shape(amplitude, period);
    let p = if period.abs() < f64::EPSILON { 0.3 } else { period };
    a * 2f64.powf(-10.0 * t) * ((t - s) * 2.0 * PI / p).sin() + 1.0
}

/// Elastic ease in/out
pub fn elastic_in_out(t: f64, amplitude: f64, period: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let (a, s) = elastic_shape(amplitude, period);
    let p = if period.abs() < f64::EPSILON { 0.3 } else { period };
    let shifted = 2.0 * t - 1.0;
    let wave = ((shifted - s) * 2.0 * PI / p).sin();
    if shifted < 0.0 {
        -0.5 * a * 2f64.powf(10.0 * shifted) * wave
    } else {
        0.5 * a * 2f64.powf(-10.0 * shifted) * wave + 1.0
    }
}

const BOUNCE_N1: f64 = 7.5625;
const BOUNCE_D1: f64 = 2.75;

/// Canonical four-segment bounce
pub fn bounce_out(t: f64) -> f64 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984375
    }
}

/// `bounce_out` reflected about (0.5, 0.5)
pub fn bounce_in(t: f64) -> f64 {
    1.0 - bounce_out(1.0 - t)
}

/// `bounce_in` on the first half, `bounce_out` on the second
pub fn bounce_in_out(t: f64) -> f64 {
    if t < 0.5 {
        (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
    } else {
        (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
    }
}

/// Back ease in
pub fn back_in(t: f64, overshoot: f64) -> f64 {
    (overshoot + 1.0) * t * t * t - overshoot * t * t
}

/// Back ease out
pub fn back_out(t: f64, overshoot: f64) -> f64 {
    let u = t - 1.0;
    1.0 + (overshoot + 1.0) * u * u * u + overshoot * u * u
}

/// Back ease in/out
pub fn back_in_out(t: f64, overshoot: f64) -> f64 {
    let c = overshoot * 1.525;
    if t < 0.5 {
        let u = 2.0 * t;
        u * u * ((c + 1.0) * u - c) / 2.0
    } else {
        let u = 2.0 * t - 2.0;
        (u * u * ((c + 1.0) * u + c) + 2.0) / 2.0
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid remapped so that 0 → 0 and 1 → 1, clamped outside
pub fn smooth(t: f64, inflection: f64) -> f64 {
    let error = sigmoid(-inflection / 2.0);
    ((sigmoid(inflection * (t - 0.5)) - error) / (1.0 - 2.0 * error)).clamp(0.0, 1.0)
}

/// First half of `smooth`, stretched over the whole domain
pub fn rush_into(t: f64, inflection: f64) -> f64 {
    2.0 * smooth(t / 2.0, inflection)
}

/// Second half of `smooth`, stretched over the whole domain
pub fn rush_from(t: f64, inflection: f64) -> f64 {
    2.0 * smooth(t / 2.0 + 0.5, inflection) - 1.0
}

/// Quarter circle, fast start
pub fn slow_into(t: f64) -> f64 {
    (1.0 - (1.0 - t) * (1.0 - t)).max(0.0).sqrt()
}

/// `smooth` applied twice
pub fn double_smooth(t: f64, inflection: f64) -> f64 {
    smooth(smooth(t, inflection), inflection)
}

/// `smooth` applied three times
pub fn triple_smooth(t: f64, inflection: f64) -> f64 {
    smooth(double_smooth(t, inflection), inflection)
}

/// Up to 1 at the midpoint and back down to 0
pub fn there_and_back(t: f64, inflection: f64) -> f64 {
    let folded = if t < 0.5 { 2.0 * t } else { 2.0 * (1.0 - t) };
    smooth(folded, inflection)
}

/// `there_and_back` holding at 1 for `pause_ratio` of the domain
pub fn there_and_back_with_pause(t: f64, pause_ratio: f64) -> f64 {
    let pause_ratio = pause_ratio.clamp(0.0, 0.999);
    let a = 2.0 / (1.0 - pause_ratio);
    if t < 0.5 - pause_ratio / 2.0 {
        smooth(a * t, 10.0)
    } else if t < 0.5 + pause_ratio / 2.0 {
        1.0
    } else {
        smooth(a - a * t, 10.0)
    }
}

/// `smooth` scaled down so it tops out at `proportion`
pub fn not_quite_there(t: f64, proportion: f64) -> f64 {
    proportion * smooth(t, 10.0)
}

/// `there_and_back` modulated by a sine
pub fn wiggle(t: f64, wiggles: f64) -> f64 {
    there_and_back(t, 10.0) * (wiggles * PI * t).sin()
}

/// `smooth` squeezed into `[start, end]`, flat outside the window
pub fn squish(t: f64, start: f64, end: f64) -> f64 {
    if (end - start).abs() < f64::EPSILON {
        return if t < start { 0.0 } else { 1.0 };
    }
    if t < start {
        smooth(0.0, 10.0)
    } else if t > end {
        smooth(1.0, 10.0)
    } else {
        smooth((t - start) / (end - start), 10.0)
    }
}

/// Piecewise linear: fast to 0.4, slow to 0.6, fast to 1
pub fn lingering(t: f64) -> f64 {
    const KNOTS: [(f64, f64); 4] = [(0.0, 0.0), (0.2, 0.4), (0.8, 0.6), (1.0, 1.0)];
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    for pair in KNOTS.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if t <= x1 {
            return y0 + (y1 - y0) * (t - x0) / (x1 - x0);
        }
    }
    1.0
}

/// 1 - e^(-t / half_life)
pub fn exponential_decay(t: f64, half_life: f64) -> f64 {
    let half_life = if half_life.abs() < f64::EPSILON { 0.1 } else { half_life };
    1.0 - (-t / half_life).exp()
}

/// Degree-6 Bezier through `[0, 0, p, p, 1, 1, 1]`
pub fn running_start(t: f64, pull_factor: f64) -> f64 {
    let points = [0.0, 0.0, pull_factor, pull_factor, 1.0, 1.0, 1.0];
    bernstein(&points, t)
}

/// Evaluate a 1-D Bezier with arbitrary control points by de Casteljau.
fn bernstein(points: &[f64], t: f64) -> f64 {
    let mut work = points.to_vec();
    let n = work.len();
    for level in 1..n {
        for i in 0..n - level {
            work[i] = work[i] * (1.0 - t) + work[i + 1] * t;
        }
    }
    work.first().copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_hermite_steps() {
        for f in [smooth_step, smoother_step, smoothest_step] {
            assert!(approx_eq(f(0.0), 0.0));
            assert!(approx_eq(f(0.5), 0.5));
            assert!(approx_eq(f(1.0), 1.0));
            assert!(approx_eq(f(-2.0), 0.0));
            assert!(approx_eq(f(3.0), 1.0));
        }
    }

    #[test]
    fn test_power_in_out_is_symmetric() {
        for n in 2..=5 {
            assert!(approx_eq(power_in_out(0.5, n), 0.5));
            assert!(approx_eq(power_in_out(0.2, n) + power_in_out(0.8, n), 1.0));
        }
    }

    #[test]
    fn test_bounce_segments() {
        let t = 0.3;
        assert!(approx_eq(bounce_out(t), 7.5625 * t * t));
        assert!(approx_eq(bounce_out(1.0), 1.0));
        assert!(approx_eq(bounce_in(0.0), 0.0));
        assert!(approx_eq(bounce_in_out(0.5), 0.5));
    }

    #[test]
    fn test_back_overshoots() {
        assert!(back_in(0.2, 1.70158) < 0.0);
        assert!(back_out(0.8, 1.70158) > 1.0);
        assert!(approx_eq(back_out(1.0, 1.70158), 1.0));
    }

    #[test]
    fn test_elastic_endpoints() {
        assert_eq!(elastic_out(0.0, 1.0, 0.3), 0.0);
        assert_eq!(elastic_out(1.0, 1.0, 0.3), 1.0);
        let peak = (1..100)
            .map(|i| elastic_out(i as f64 / 100.0, 1.0, 0.3))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_there_and_back_returns() {
        assert!(approx_eq(there_and_back(0.0, 10.0), 0.0));
        assert!(approx_eq(there_and_back(0.5, 10.0), 1.0));
        assert!(approx_eq(there_and_back(1.0, 10.0), 0.0));
        assert_eq!(there_and_back_with_pause(0.5, 1.0 / 3.0), 1.0);
    }

    #[test]
    fn test_squish_window() {
        assert_eq!(squish(0.1, 0.4, 0.6), 0.0);
        assert!(approx_eq(squish(0.5, 0.4, 0.6), 0.5));
        assert!(approx_eq(squish(0.9, 0.4, 0.6), 1.0));
    }

    #[test]
    fn test_lingering_segments() {
        assert!(approx_eq(lingering(0.2), 0.4));
        assert!(approx_eq(lingering(0.5), 0.5));
        assert!(approx_eq(lingering(0.8), 0.6));
        assert!(approx_eq(lingering(0.9), 0.8));
    }

    #[test]
    fn test_running_start_pulls_back() {
        assert!(running_start(0.2, -0.5) < 0.0);
        assert!(approx_eq(running_start(0.0, -0.5), 0.0));
        assert!(approx_eq(running_start(1.0, -0.5), 1.0));
    }

    #[test]
    fn test_not_quite_there_caps() {
        assert!(approx_eq(not_quite_there(1.0, 0.7), 0.7));
    }
}
