// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing catalogue and rate-function resolution for Composer.
//!
//! This crate provides:
//! - A catalogue of easing curves (polynomial, exponential, circular,
//!   elastic, bounce, back, cubic Bezier, spring, and the smooth family)
//! - Name, kind and function resolution through [`RateFunctionBridge`]
//! - Weighted composition and sequential chaining of rate functions
//!
//! ## Architecture
//!
//! - [`EasingLibrary`] turns an [`EasingKind`] plus [`EasingParams`] into a
//!   [`RateFunction`]
//! - [`RateFunctionBridge`] resolves a [`RateFunctionRef`] through aliases,
//!   native names, kinds and presets

pub mod bezier;
pub mod bridge;
pub mod curves;
pub mod error;
pub mod kind;
pub mod library;
pub mod presets;
pub mod spring;

pub use bezier::{CubicBezier, DEFAULT_BISECTION_ITERATIONS, DEFAULT_BISECTION_TOLERANCE};
pub use bridge::{RateFunctionBridge, RateFunctionRef};
pub use error::{EasingError, Result};
pub use kind::{EasingKind, EasingParams};
pub use library::{EasingLibrary, RateFunction};
pub use presets::Preset;
pub use spring::SpringParams;
