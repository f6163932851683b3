// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The positioning engine: owns the scalar pair, the index counter, the
//! geometry cache, and the tween scheduler.
//!
//! The engine's *current*/*target* positions and its counter are owned
//! exclusively by one engine instance. The drag controller and the loop
//! coordinator are granted narrow, explicitly named write access —
//! [`Engine::seize`], [`Engine::override_position`], [`Engine::re_anchor`],
//! [`Engine::shift`] — under the discipline that at most one collaborator
//! holds live write authority at any instant: the engine's own tween, or an
//! active drag session. Every write path that takes over first stops the
//! tween, so two sources never mutate the pair concurrently.
//!
//! No operation here errors or panics: degenerate configurations and
//! out-of-range indices degrade to clamped values and no-op navigation.

use alloc::vec::Vec;

use gyre_tween::{Started, TweenScheduler};

use crate::counter::IndexCounter;
use crate::event::Event;
use crate::geometry::SlideGeometry;
use crate::options::Options;
use crate::scalar::ScalarPosition;

/// The positioning core for one carousel instance.
///
/// Offsets follow the scroll convention: 0 shows the first slide, larger
/// offsets show later slides, and a drag displacement in the positive axis
/// direction advances the index. Rendering hosts apply the negative of
/// [`Engine::offset`] as the track translation (see
/// [`crate::TrackSnapshot`]).
#[derive(Debug)]
pub struct Engine {
    options: Options,
    count: usize,
    container: f64,
    current: ScalarPosition,
    target: ScalarPosition,
    counter: IndexCounter,
    geometry: SlideGeometry,
    tween: TweenScheduler,
    outbox: Vec<Event>,
    loop_active: bool,
}

impl Engine {
    /// Creates an engine over `count` slides in a container of size
    /// `container`.
    #[must_use]
    pub fn new(count: usize, container: f64, options: Options) -> Self {
        let geometry = SlideGeometry::compute(count, container, &options, false);
        let counter = IndexCounter::new(count, geometry.end_index(), options.looping);
        let mut engine = Self {
            options,
            count,
            container,
            current: ScalarPosition::default(),
            target: ScalarPosition::default(),
            counter,
            geometry,
            tween: TweenScheduler::new(),
            outbox: Vec::new(),
            loop_active: false,
        };
        if engine.geometry.is_locked() {
            engine.outbox.push(Event::Lock);
        }
        engine
    }

    /// Navigates to `index`, normalized through the counter.
    ///
    /// Emits [`Event::BeforeSlideChange`], then either settles instantly
    /// (emitting [`Event::SlideChanged`]) or starts a tween (emitting
    /// [`Event::SlideChange`] now, [`Event::Scroll`] per frame, and
    /// [`Event::SlideChanged`] on completion). Starting a new transition
    /// always cancels the one in flight; the superseded transition never
    /// settles.
    ///
    /// Navigation is a no-op while locked. Returns the normalized index.
    pub fn scroll_to(&mut self, index: i64, instant: bool, now_ms: f64) -> usize {
        if self.geometry.is_locked() {
            return self.counter.get();
        }
        let idx = self.counter.set(index);
        self.outbox.push(Event::BeforeSlideChange { index: idx });
        let target = self.geometry.offset_for(idx);
        self.target.set(target);
        if instant || !(self.options.speed_ms > 0.0) {
            self.tween.stop();
            self.current.set(target);
            self.outbox.push(Event::SlideChanged { index: idx });
        } else {
            self.outbox.push(Event::SlideChange { index: idx });
            match self.tween.start(
                self.current.get(),
                target,
                self.options.speed_ms,
                self.options.easing,
                now_ms,
            ) {
                Started::Instant(value) => {
                    self.current.set(value);
                    self.outbox.push(Event::SlideChanged { index: idx });
                }
                Started::Animating => {}
            }
        }
        idx
    }

    /// Equivalent to `scroll_to(index() + delta)`.
    pub fn scroll_by(&mut self, delta: i64, now_ms: f64) -> usize {
        let base = i64::try_from(self.counter.get()).unwrap_or(i64::MAX);
        self.scroll_to(base.saturating_add(delta), false, now_ms)
    }

    /// Advances the in-flight tween to `now_ms`.
    ///
    /// Emits [`Event::Scroll`] for the frame and [`Event::SlideChanged`] when
    /// the transition settles. Returns `true` if a tween frame was consumed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(frame) = self.tween.tick(now_ms) else {
            return false;
        };
        self.current.set(frame.value);
        self.outbox.push(Event::Scroll);
        if frame.done {
            self.outbox.push(Event::SlideChanged {
                index: self.counter.get(),
            });
        }
        true
    }

    /// Recomputes geometry and re-anchors the position to the current index
    /// without animation. Call after external size or count changes.
    ///
    /// Emits [`Event::Lock`] / [`Event::Unlock`] only when the lock state
    /// changes.
    pub fn update(&mut self) {
        self.tween.stop();
        let was_locked = self.geometry.is_locked();
        self.geometry =
            SlideGeometry::compute(self.count, self.container, &self.options, self.loop_active);
        self.counter
            .set_bounds(self.count, self.geometry.end_index());
        self.counter
            .set_looping(self.options.looping && !self.loop_active);
        let offset = self.geometry.offset_for(self.counter.get());
        self.current.set(offset);
        self.target.set(offset);
        match (was_locked, self.geometry.is_locked()) {
            (false, true) => self.outbox.push(Event::Lock),
            (true, false) => self.outbox.push(Event::Unlock),
            _ => {}
        }
    }

    /// Replaces the container size and recomputes.
    pub fn set_container(&mut self, container: f64) {
        self.container = container;
        self.update();
    }

    /// Replaces the slide count and recomputes.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        self.update();
    }

    /// Enables or disables loop-coordinator mode.
    ///
    /// While active, the engine's native wraparound is disabled (the physical
    /// index space is linear), travel is uncapped, and the lock state is
    /// always unlocked.
    pub fn set_loop_active(&mut self, active: bool) {
        self.loop_active = active;
        self.update();
    }

    /// Whether navigating forward is possible.
    #[must_use]
    pub fn can_scroll_next(&self) -> bool {
        self.options.looping || self.counter.get() < self.geometry.end_index()
    }

    /// Whether navigating backward is possible.
    #[must_use]
    pub fn can_scroll_prev(&self) -> bool {
        self.options.looping || self.counter.get() > 0
    }

    /// The active index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.counter.get()
    }

    /// The slide count covered by this engine.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` when the engine covers no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The current scroll offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.current.get()
    }

    /// The offset the in-flight (or last) transition is heading to.
    #[must_use]
    pub fn target_offset(&self) -> f64 {
        self.target.get()
    }

    /// The cached geometry.
    #[must_use]
    pub fn geometry(&self) -> &SlideGeometry {
        &self.geometry
    }

    /// Whether all content fits the viewport.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.geometry.is_locked()
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_animating()
    }

    /// Whether the tween wants another frame.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.tween.needs_frame()
    }

    /// The configuration this engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The reachable offset bounds `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        self.geometry.bounds()
    }

    /// The index whose offset is nearest to `offset`, clamped to the
    /// navigable range.
    #[must_use]
    pub fn nearest_index(&self, offset: f64) -> usize {
        let idx = self.geometry.nearest_index(offset);
        let value = i64::try_from(idx).unwrap_or(i64::MAX);
        self.counter.normalize(value)
    }

    // --- collaborator surface -------------------------------------------
    //
    // The drag controller and loop coordinator call these; see the module
    // docs for the single-writer discipline.

    /// Cancels the in-flight tween so a collaborator can take direct control
    /// of the position.
    pub fn seize(&mut self) {
        self.tween.stop();
    }

    /// Writes `offset` into both current and target, bypassing the tween.
    pub fn override_position(&mut self, offset: f64) {
        self.current.set(offset);
        self.target.set(offset);
    }

    /// Re-anchors index and position without animation and without events.
    pub fn re_anchor(&mut self, index: i64) {
        self.tween.stop();
        let idx = self.counter.set(index);
        let offset = self.geometry.offset_for(idx);
        self.current.set(offset);
        self.target.set(offset);
    }

    /// Shifts the index by `index_delta` slides and the position pair by
    /// `pixel_delta`, preserving any mid-slide fraction. No events.
    ///
    /// Used by the loop coordinator's mid-motion boundary jump; the caller is
    /// responsible for publishing [`Event::PositionShifted`].
    pub fn shift(&mut self, index_delta: i64, pixel_delta: f64) {
        self.counter.add(index_delta);
        self.current.add(pixel_delta);
        self.target.add(pixel_delta);
    }

    /// Sets the index to the slide nearest the current position without
    /// moving, and settles there. Emits [`Event::SlideChanged`].
    ///
    /// Used when a free-mode momentum run stops between snap points.
    pub fn settle_in_place(&mut self) {
        let idx = self.nearest_index(self.current.get());
        let value = i64::try_from(idx).unwrap_or(i64::MAX);
        self.counter.set(value);
        self.target.set(self.current.get());
        self.outbox.push(Event::SlideChanged { index: idx });
    }

    /// Appends an event to the outbox on a collaborator's behalf.
    pub fn emit(&mut self, event: Event) {
        self.outbox.push(event);
    }

    /// Takes all pending events, in emission order.
    pub fn drain_events(&mut self) -> Vec<Event> {
        core::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyre_tween::easing;

    fn engine(count: usize) -> Engine {
        let options = Options {
            speed_ms: 100.0,
            easing: easing::linear,
            ..Options::default()
        };
        Engine::new(count, 400.0, options)
    }

    #[test]
    fn instant_scroll_settles_immediately() {
        let mut e = engine(5);
        e.scroll_to(2, true, 0.0);
        assert_eq!(e.index(), 2);
        assert_eq!(e.offset(), 800.0);
        assert_eq!(e.offset(), e.target_offset());
        assert!(!e.is_animating());
        assert_eq!(
            e.drain_events(),
            alloc::vec![
                Event::BeforeSlideChange { index: 2 },
                Event::SlideChanged { index: 2 },
            ]
        );
    }

    #[test]
    fn animated_scroll_emits_in_order() {
        let mut e = engine(5);
        e.scroll_to(1, false, 0.0);
        assert!(e.is_animating());
        assert!(e.tick(50.0));
        assert!(e.tick(150.0));
        assert!(!e.is_animating());
        assert_eq!(
            e.drain_events(),
            alloc::vec![
                Event::BeforeSlideChange { index: 1 },
                Event::SlideChange { index: 1 },
                Event::Scroll,
                Event::Scroll,
                Event::SlideChanged { index: 1 },
            ]
        );
        assert_eq!(e.offset(), 400.0);
    }

    #[test]
    fn mid_flight_position_interpolates() {
        let mut e = engine(5);
        e.scroll_to(1, false, 0.0);
        e.tick(50.0);
        assert!((e.offset() - 200.0).abs() < 1e-9);
        assert_eq!(e.target_offset(), 400.0);
    }

    #[test]
    fn new_scroll_cancels_in_flight_transition() {
        let mut e = engine(5);
        e.scroll_to(4, false, 0.0);
        e.tick(50.0);
        e.scroll_to(0, false, 50.0);
        // Run well past the first transition's end: only the second settles.
        e.tick(500.0);
        let events = e.drain_events();
        let settles: Vec<_> = events
            .iter()
            .filter(|ev| matches!(ev, Event::SlideChanged { .. }))
            .collect();
        assert_eq!(settles, alloc::vec![&Event::SlideChanged { index: 0 }]);
        assert_eq!(e.offset(), 0.0);
    }

    #[test]
    fn out_of_range_indices_clamp() {
        let mut e = engine(5);
        assert_eq!(e.scroll_to(10, true, 0.0), 4);
        assert_eq!(e.scroll_to(-3, true, 0.0), 0);
    }

    #[test]
    fn native_wraparound_when_looping_without_coordinator() {
        let options = Options::default().with_looping(true);
        let mut e = Engine::new(5, 400.0, options);
        assert_eq!(e.scroll_to(10, true, 0.0), 0);
        assert_eq!(e.scroll_to(-1, true, 0.0), 4);
        assert!(e.can_scroll_next());
        assert!(e.can_scroll_prev());
    }

    #[test]
    fn update_preserves_index_when_geometry_unchanged() {
        let mut e = engine(5);
        e.scroll_to(3, true, 0.0);
        e.drain_events();
        e.update();
        assert_eq!(e.index(), 3);
        assert_eq!(e.offset(), 1200.0);
        assert!(e.drain_events().is_empty());
    }

    #[test]
    fn update_reanchors_after_resize() {
        let mut e = engine(5);
        e.scroll_to(2, true, 0.0);
        e.set_container(200.0);
        assert_eq!(e.index(), 2);
        assert_eq!(e.offset(), 400.0);
        assert_eq!(e.offset(), e.target_offset());
    }

    #[test]
    fn can_scroll_respects_end_index() {
        let options = Options::default().with_per_page(4);
        let mut e = Engine::new(6, 400.0, options);
        assert_eq!(e.geometry().end_index(), 2);
        assert!(e.can_scroll_next());
        e.scroll_to(1, true, 0.0);
        assert!(e.can_scroll_next());
        e.scroll_to(5, true, 0.0);
        assert_eq!(e.index(), 2);
        assert!(!e.can_scroll_next());
        assert!(e.can_scroll_prev());
    }

    #[test]
    fn locked_engine_ignores_navigation() {
        let mut e = engine(1);
        assert!(e.is_locked());
        assert_eq!(e.drain_events(), alloc::vec![Event::Lock]);
        e.scroll_to(5, false, 0.0);
        assert_eq!(e.index(), 0);
        assert!(e.drain_events().is_empty());
    }

    #[test]
    fn lock_transitions_emit_once() {
        let mut e = engine(5);
        assert!(e.drain_events().is_empty());
        e.set_count(1);
        assert_eq!(e.drain_events(), alloc::vec![Event::Lock]);
        e.update();
        assert!(e.drain_events().is_empty());
        e.set_count(5);
        assert_eq!(e.drain_events(), alloc::vec![Event::Unlock]);
    }

    #[test]
    fn shift_preserves_mid_slide_fraction() {
        let mut e = engine(10);
        e.scroll_to(2, true, 0.0);
        e.override_position(850.0);
        e.shift(3, 1200.0);
        assert_eq!(e.index(), 5);
        assert_eq!(e.offset(), 2050.0);
        assert_eq!(e.target_offset(), 2050.0);
    }

    #[test]
    fn settle_in_place_aligns_index_without_moving() {
        let mut e = engine(10);
        e.override_position(1190.0);
        e.drain_events();
        e.settle_in_place();
        assert_eq!(e.index(), 3);
        assert_eq!(e.offset(), 1190.0);
        assert_eq!(
            e.drain_events(),
            alloc::vec![Event::SlideChanged { index: 3 }]
        );
    }

    #[test]
    fn zero_speed_makes_all_transitions_instant() {
        let options = Options {
            speed_ms: 0.0,
            ..Options::default()
        };
        let mut e = Engine::new(5, 400.0, options);
        e.scroll_to(2, false, 0.0);
        assert!(!e.is_animating());
        assert_eq!(e.offset(), 800.0);
    }
}
