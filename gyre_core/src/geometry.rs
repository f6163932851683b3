// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived slide geometry: sizes, offsets, travel bounds, lock state.
//!
//! A [`SlideGeometry`] is recomputed wholesale and replaced atomically
//! whenever the item count, the container size, or a layout-relevant option
//! changes — it is never mutated incrementally.
//!
//! Offsets here follow the scroll convention: offset 0 shows the first slide
//! and offsets grow toward later slides. Rendering hosts apply the *negative*
//! of the engine's offset as the track translation.

use alloc::vec::Vec;

use crate::options::Options;

/// Derived, cached layout for one engine instance.
#[derive(Clone, Debug, PartialEq)]
pub struct SlideGeometry {
    container: f64,
    slide_size: f64,
    step: f64,
    positions: Vec<f64>,
    end_index: usize,
    travel_cap: f64,
    unbounded: bool,
    locked: bool,
}

impl Default for SlideGeometry {
    fn default() -> Self {
        Self::compute(0, 0.0, &Options::default(), false)
    }
}

impl SlideGeometry {
    /// Computes the geometry for `count` slides in a container of size
    /// `container`.
    ///
    /// `unbounded` is set while a loop coordinator is active: travel is then
    /// not capped, the reachable bounds are infinite, and the lock state is
    /// always unlocked (clones make the virtual content wider than any
    /// viewport).
    ///
    /// All numeric inputs are normalized defensively: non-finite or negative
    /// sizes degrade to 0 rather than propagating.
    #[must_use]
    pub fn compute(count: usize, container: f64, options: &Options, unbounded: bool) -> Self {
        let container = if container.is_finite() && container > 0.0 {
            container
        } else {
            0.0
        };
        let gap = if options.gap.is_finite() {
            options.gap
        } else {
            0.0
        };
        let per_page = options.per_page_or_1();

        let raw = (container - gap * per_page.saturating_sub(1) as f64) / per_page as f64;
        let slide_size = if raw.is_finite() { raw.max(0.0) } else { 0.0 };
        let step = slide_size + gap;

        let positions: Vec<f64> = (0..count).map(|i| i as f64 * step).collect();

        let base_end = count.saturating_sub(per_page);
        let end_index = if options.navigation {
            count.saturating_sub(1)
        } else {
            base_end
        };
        let travel_cap = positions.get(base_end).copied().unwrap_or(0.0).max(0.0);
        let locked = !unbounded && travel_cap <= 0.0;

        Self {
            container,
            slide_size,
            step,
            positions,
            end_index,
            travel_cap,
            unbounded,
            locked,
        }
    }

    /// The container size along the primary axis.
    #[must_use]
    pub fn container(&self) -> f64 {
        self.container
    }

    /// The computed per-slide size.
    #[must_use]
    pub fn slide_size(&self) -> f64 {
        self.slide_size
    }

    /// Distance between adjacent slide origins (`slide_size + gap`).
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of slides covered by this geometry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` when there are no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The cached offset of slide `index`, or 0 when out of range.
    #[must_use]
    pub fn position_of(&self, index: usize) -> f64 {
        self.positions.get(index).copied().unwrap_or(0.0)
    }

    /// The last index navigation may stop on.
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// The maximum visual travel: the last full page's offset.
    #[must_use]
    pub fn travel_cap(&self) -> f64 {
        self.travel_cap
    }

    /// Whether all content already fits the viewport.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The scroll offset a navigation to `index` should settle on.
    ///
    /// Capped at the travel limit unless unbounded, which is what decouples
    /// "which index is addressable" from "how far the strip may travel" in
    /// navigation mode.
    #[must_use]
    pub fn offset_for(&self, index: usize) -> f64 {
        let pos = self.position_of(index);
        if self.unbounded {
            pos
        } else {
            pos.min(self.travel_cap)
        }
    }

    /// The reachable offset bounds `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        if self.unbounded {
            (f64::NEG_INFINITY, f64::INFINITY)
        } else {
            (0.0, self.travel_cap)
        }
    }

    /// The index whose cached offset is closest to `offset`.
    #[must_use]
    pub fn nearest_index(&self, offset: f64) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, &pos) in self.positions.iter().enumerate() {
            let dist = (pos - offset).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }
}
