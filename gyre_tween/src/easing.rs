// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure easing functions mapping progress `[0, 1]` to eased progress `[0, 1]`.
//!
//! Every function in this module satisfies `f(0) = 0` and `f(1) = 1` and is
//! monotone on `[0, 1]`. Inputs outside that range are clamped by callers
//! ([`crate::TweenScheduler`] clamps progress before applying an easing).

/// An easing function: pure, `[0, 1] → [0, 1]`, with `f(0) = 0` and `f(1) = 1`.
pub type Easing = fn(f64) -> f64;

/// The easing used when callers do not supply one.
pub const DEFAULT_EASING: Easing = ease_out_quart;

/// Identity easing: `f(t) = t`.
#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}

/// Quadratic ease-out: `f(t) = 1 - (1-t)²`.
#[must_use]
pub fn ease_out_quad(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv
}

/// Cubic ease-out: `f(t) = 1 - (1-t)³`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quartic ease-out: `f(t) = 1 - (1-t)⁴`.
///
/// This is the default transition curve: fast start, long settle tail.
#[must_use]
pub fn ease_out_quart(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv
}

/// Hermite smoothstep: `f(t) = t²(3 - 2t)`.
///
/// Symmetric ease-in/ease-out; useful for decorative motion where the
/// asymmetric ease-out curves feel too abrupt at the start.
#[must_use]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}
