// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scalar offset value type.
//!
//! One engine owns two independent [`ScalarPosition`] instances: *current*
//! (what is rendered now) and *target* (where a non-instant transition is
//! heading). They are equal whenever no transition is in flight. The type has
//! no bounds of its own; the engine, the tween, and the drag controller all
//! write into it under the cancellation discipline that guarantees a single
//! writer at a time.

/// One offset along the primary axis, in the same unit as slide sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScalarPosition(f64);

impl ScalarPosition {
    /// Creates a position holding `value`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// The current value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Replaces the value.
    pub fn set(&mut self, value: f64) {
        self.0 = value;
    }

    /// Adds `delta` to the value.
    pub fn add(&mut self, delta: f64) {
        self.0 += delta;
    }

    /// Moves the value a fraction `factor` of the remaining distance toward
    /// `target`.
    ///
    /// Linear interpolation, deliberately unclamped: callers decide whether
    /// and how often to repeat it.
    pub fn lerp(&mut self, target: f64, factor: f64) {
        self.0 += (target - self.0) * factor;
    }
}
