// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded index counter: clamp or wrap an integer index.
//!
//! Out-of-range inputs are always normalized, never rejected — hosts may
//! legitimately drive indices speculatively past known bounds. After any
//! [`IndexCounter::set`] or [`IndexCounter::add`], the value is an integer in
//! range.

/// An index held in `[0, end_index]` (clamping) or `[0, max)` (wrapping).
///
/// `end_index` stops navigation early when more than one item is visible per
/// page; it is always at most `max - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexCounter {
    value: usize,
    max: usize,
    end_index: usize,
    looping: bool,
}

impl IndexCounter {
    /// Creates a counter over `[0, max)` starting at 0.
    ///
    /// `end_index` is clamped to `max - 1` (or 0 when `max` is 0).
    #[must_use]
    pub fn new(max: usize, end_index: usize, looping: bool) -> Self {
        Self {
            value: 0,
            max,
            end_index: end_index.min(max.saturating_sub(1)),
            looping,
        }
    }

    /// The current value.
    #[must_use]
    pub fn get(&self) -> usize {
        self.value
    }

    /// The exclusive upper bound of the index space.
    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }

    /// The last index navigation may stop on when not looping.
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// Whether the counter wraps instead of clamping.
    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Normalizes `index` into range and stores it, returning the result.
    ///
    /// Looping wraps any integer (including negative) into `[0, max)` via
    /// euclidean modulo; otherwise the index clamps to `[0, end_index]`.
    /// With `max` of 0 or 1 the value is always 0.
    pub fn set(&mut self, index: i64) -> usize {
        self.value = self.normalize(index);
        self.value
    }

    /// Equivalent to `set(get() + delta)`.
    pub fn add(&mut self, delta: i64) -> usize {
        let base = i64::try_from(self.value).unwrap_or(i64::MAX);
        self.set(base.saturating_add(delta))
    }

    /// What [`IndexCounter::set`] would return, without mutating.
    ///
    /// Used for speculative calculations; deep-copy the counter instead when
    /// a whole speculative session is needed.
    #[must_use]
    pub fn normalize(&self, index: i64) -> usize {
        if self.max == 0 {
            return 0;
        }
        if self.looping {
            let max = i64::try_from(self.max).unwrap_or(i64::MAX);
            #[expect(
                clippy::cast_sign_loss,
                reason = "rem_euclid of a positive modulus is non-negative"
            )]
            {
                index.rem_euclid(max) as usize
            }
        } else {
            let end = i64::try_from(self.end_index).unwrap_or(i64::MAX);
            #[expect(
                clippy::cast_sign_loss,
                reason = "clamped to [0, end_index], which fits usize"
            )]
            {
                index.clamp(0, end) as usize
            }
        }
    }

    /// Replaces the bounds, re-normalizing the current value.
    pub fn set_bounds(&mut self, max: usize, end_index: usize) {
        self.max = max;
        self.end_index = end_index.min(max.saturating_sub(1));
        let value = i64::try_from(self.value).unwrap_or(i64::MAX);
        self.set(value);
    }

    /// Switches between wrapping and clamping, re-normalizing the value.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
        let value = i64::try_from(self.value).unwrap_or(i64::MAX);
        self.set(value);
    }
}
