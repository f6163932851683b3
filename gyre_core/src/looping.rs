// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clone-based infinite looping.
//!
//! The coordinator maps a logical index space `[0, n)` onto a physical strip
//! `[0, n + 2c)` with `c` clone slots on each side. The engine runs over the
//! physical strip with its own wraparound disabled; this module decides when
//! to re-anchor the physical position by ±n so the strip never visibly runs
//! out of slides. Both jump kinds land on a slot rendering identical content,
//! so an observer watching slide contents cannot see them.
//!
//! Pure index/offset arithmetic: the coordinator holds no position of its
//! own and is rebuilt wholesale when the item count or page size changes.

/// Loop bookkeeping for one carousel instance.
///
/// Inactive coordinators (loop refused or not requested) pass logical
/// indices through untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopCoordinator {
    original: usize,
    clones: usize,
    active: bool,
}

impl LoopCoordinator {
    /// Creates an inactive coordinator (no clones, passthrough mapping).
    #[must_use]
    pub fn inactive(original: usize) -> Self {
        Self {
            original,
            clones: 0,
            active: false,
        }
    }

    /// Creates a coordinator for `original` items shown `per_page` at a time.
    ///
    /// Looping needs at least 2 originals; with fewer the request is refused
    /// and the coordinator stays inactive. The clone count per side covers at
    /// least one full page, clamped to the original count.
    #[must_use]
    pub fn new(original: usize, per_page: usize) -> Self {
        if original < 2 {
            log::warn!("loop mode refused: requires at least 2 items, got {original}");
            return Self::inactive(original);
        }
        Self {
            original,
            clones: per_page.max(1).min(original),
            active: true,
        }
    }

    /// Whether clone-based looping is in effect.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of original items.
    #[must_use]
    pub fn original_len(&self) -> usize {
        self.original
    }

    /// Clone slots per side (0 when inactive).
    #[must_use]
    pub fn clone_count(&self) -> usize {
        self.clones
    }

    /// Total physical slot count, clones included.
    #[must_use]
    pub fn physical_len(&self) -> usize {
        self.original + 2 * self.clones
    }

    /// The physical slot of the first original item; also the initial index.
    #[must_use]
    pub fn first_original(&self) -> usize {
        self.clones
    }

    /// The logical identity rendered by physical slot `physical`.
    #[must_use]
    pub fn logical_of(&self, physical: usize) -> usize {
        if !self.active || self.original == 0 {
            return physical.min(self.original.saturating_sub(1));
        }
        let n = i64::try_from(self.original).unwrap_or(i64::MAX);
        let p = i64::try_from(physical).unwrap_or(i64::MAX);
        let c = i64::try_from(self.clones).unwrap_or(0);
        #[expect(
            clippy::cast_sign_loss,
            reason = "rem_euclid of a positive modulus is non-negative"
        )]
        {
            (p - c).rem_euclid(n) as usize
        }
    }

    /// Picks the physical destination for a navigation to `logical`.
    ///
    /// The logical index is wrapped into `[0, n)`; among the canonical slot
    /// and its ±n aliases that fit `[0, end_index]`, the one nearest
    /// `current_physical` wins, so the strip always takes the shortest
    /// visual path.
    #[must_use]
    pub fn resolve(&self, logical: i64, current_physical: usize, end_index: usize) -> i64 {
        if !self.active {
            return logical;
        }
        let n = i64::try_from(self.original).unwrap_or(i64::MAX);
        let c = i64::try_from(self.clones).unwrap_or(0);
        let slot = c + logical.rem_euclid(n);
        let current = i64::try_from(current_physical).unwrap_or(i64::MAX);
        let end = i64::try_from(end_index).unwrap_or(i64::MAX);

        let mut best = slot;
        let mut best_dist = (slot - current).abs();
        for candidate in [slot - n, slot + n] {
            if candidate < 0 || candidate > end {
                continue;
            }
            let dist = (candidate - current).abs();
            if dist < best_dist {
                best = candidate;
                best_dist = dist;
            }
        }
        best
    }

    /// The ±n index jump to apply after a transition settled on `physical`,
    /// if that slot is in clone territory.
    #[must_use]
    pub fn settle_adjustment(&self, physical: usize) -> Option<i64> {
        if !self.active {
            return None;
        }
        let n = i64::try_from(self.original).unwrap_or(i64::MAX);
        if physical < self.clones {
            Some(n)
        } else if physical >= self.clones + self.original {
            Some(-n)
        } else {
            None
        }
    }

    /// The mid-motion re-anchor for a live pixel `offset`, if the fractional
    /// slot has crossed half a slide into clone territory.
    ///
    /// Returns `(index_delta, pixel_delta)` to feed to the engine's shift;
    /// the pixel delta is also the payload of the `PositionShifted` event.
    #[must_use]
    pub fn motion_adjustment(&self, offset: f64, step: f64) -> Option<(i64, f64)> {
        if !self.active || !(step > 0.0) {
            return None;
        }
        let n = i64::try_from(self.original).unwrap_or(i64::MAX);
        let span = self.original as f64 * step;
        let v = offset / step;
        let lo = self.clones as f64 - 0.5;
        let hi = (self.clones + self.original) as f64 - 0.5;
        if v < lo {
            Some((n, span))
        } else if v > hi {
            Some((-n, -span))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_few_items_refuses_looping() {
        let coord = LoopCoordinator::new(1, 3);
        assert!(!coord.is_active());
        assert_eq!(coord.clone_count(), 0);
        assert_eq!(coord.physical_len(), 1);
        assert_eq!(coord.resolve(4, 0, 0), 4);
        assert_eq!(coord.settle_adjustment(0), None);
        assert_eq!(coord.motion_adjustment(-100.0, 400.0), None);
    }

    #[test]
    fn clone_count_covers_a_page_clamped_to_originals() {
        assert_eq!(LoopCoordinator::new(5, 1).clone_count(), 1);
        assert_eq!(LoopCoordinator::new(5, 3).clone_count(), 3);
        assert_eq!(LoopCoordinator::new(3, 7).clone_count(), 3);
        assert_eq!(LoopCoordinator::new(5, 0).clone_count(), 1);
    }

    #[test]
    fn physical_layout_brackets_the_originals() {
        let coord = LoopCoordinator::new(5, 2);
        assert_eq!(coord.physical_len(), 9);
        assert_eq!(coord.first_original(), 2);
    }

    #[test]
    fn logical_identity_wraps_through_clones() {
        // 5 originals, 1 clone per side: physical 0..7.
        let coord = LoopCoordinator::new(5, 1);
        assert_eq!(coord.logical_of(0), 4); // leading clone
        assert_eq!(coord.logical_of(1), 0);
        assert_eq!(coord.logical_of(5), 4);
        assert_eq!(coord.logical_of(6), 0); // trailing clone
    }

    #[test]
    fn resolve_takes_the_shortest_visual_path() {
        let coord = LoopCoordinator::new(5, 1);
        // Standing on the last original (physical 5, logical 4): logical 0 is
        // one slot ahead through the trailing clone, four slots back through
        // the canonical slot.
        assert_eq!(coord.resolve(0, 5, 6), 6);
        // Standing at the front, logical 4 is one slot back through the
        // leading clone.
        assert_eq!(coord.resolve(4, 1, 6), 0);
        // Mid-strip prefers the canonical slot.
        assert_eq!(coord.resolve(2, 3, 6), 3);
    }

    #[test]
    fn resolve_wraps_out_of_range_logicals() {
        let coord = LoopCoordinator::new(5, 1);
        assert_eq!(coord.resolve(7, 3, 6), coord.resolve(2, 3, 6));
        assert_eq!(coord.resolve(-1, 3, 6), coord.resolve(4, 3, 6));
    }

    #[test]
    fn resolve_never_leaves_the_navigable_range() {
        let coord = LoopCoordinator::new(5, 1);
        for logical in -6_i64..12 {
            for current in 0..7_usize {
                let dest = coord.resolve(logical, current, 6);
                assert!((0..=6).contains(&dest), "resolve({logical}, {current})");
            }
        }
    }

    #[test]
    fn four_items_two_clones_resolve_within_half_the_originals() {
        // 4 originals, 2 clones per side, 2 per page: navigable range 0..=6.
        // Navigation always starts from the original region (slots 2..=5),
        // which the settle jump guarantees.
        let coord = LoopCoordinator::new(4, 2);
        for current in 2..=5_usize {
            for logical in -4_i64..8 {
                let dest = coord.resolve(logical, current, 6);
                let dist = (dest - i64::try_from(current).unwrap()).abs();
                assert!(dist <= 2, "dist {dist} for ({logical}, {current})");
            }
        }
    }

    #[test]
    fn settle_adjustment_fires_only_in_clone_territory() {
        let coord = LoopCoordinator::new(5, 1);
        assert_eq!(coord.settle_adjustment(0), Some(5));
        assert_eq!(coord.settle_adjustment(1), None);
        assert_eq!(coord.settle_adjustment(5), None);
        assert_eq!(coord.settle_adjustment(6), Some(-5));
    }

    #[test]
    fn motion_adjustment_uses_half_slide_margins() {
        // 5 originals, 1 clone, step 400: originals live at offsets
        // 400..=2000; margins at 0.5×400 and 5.5×400.
        let coord = LoopCoordinator::new(5, 1);
        assert_eq!(coord.motion_adjustment(400.0, 400.0), None);
        assert_eq!(coord.motion_adjustment(210.0, 400.0), None);
        assert_eq!(coord.motion_adjustment(190.0, 400.0), Some((5, 2000.0)));
        assert_eq!(coord.motion_adjustment(2190.0, 400.0), None);
        assert_eq!(coord.motion_adjustment(2210.0, 400.0), Some((-5, -2000.0)));
    }
}
