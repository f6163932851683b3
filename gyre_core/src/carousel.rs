// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel facade: engine + drag + loop + bus, wired together.
//!
//! Hosts talk to [`Carousel`] exclusively. Every public operation drains the
//! engine's event outbox into the bus before returning, so handlers observe
//! the pre-change → mid-scroll → completion order of a transition exactly as
//! it happened. In loop mode the facade translates the engine's physical
//! indices to logical ones before publishing, and applies the boundary
//! re-anchor jumps; observers never see clone slots.
//!
//! ## Minimal example
//!
//! ```
//! use gyre_core::{Carousel, Options};
//!
//! let mut carousel = Carousel::new(5, 400.0, Options::default());
//! carousel.scroll_to(2, 0.0);
//! while carousel.needs_frame() {
//!     // A real host waits for its frame callback here.
//!     carousel.tick(1_000.0);
//! }
//! assert_eq!(carousel.index(), 2);
//! assert_eq!(carousel.snapshot().translate, -800.0);
//! ```

use alloc::vec::Vec;

use gyre_events::EventBus;

use crate::drag::{DragController, PointerInput};
use crate::engine::Engine;
use crate::event::Event;
use crate::looping::LoopCoordinator;
use crate::options::Options;

/// What kind of motion the carousel is currently in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    /// At rest on a settled position.
    Idle,
    /// A tween or momentum run is moving the strip.
    Scrolling,
    /// A pointer session is moving the strip.
    Dragging,
}

/// One rendered slot in a [`TrackSnapshot`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideSlot {
    /// Position of the slot within the physical strip.
    pub physical: usize,
    /// The logical item this slot renders. Differs from `physical` only for
    /// loop-mode clone slots.
    pub logical: usize,
    /// The slot's offset along the axis, relative to the track origin.
    pub position: f64,
    /// Whether this is the engine's active slot.
    pub active: bool,
}

/// A pull-model view of the track for rendering hosts.
///
/// Read one after each [`Carousel::tick`] and apply it however you render;
/// the snapshot carries no references into the carousel.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackSnapshot {
    /// Translation to apply to the whole track: the negative of the current
    /// scroll offset.
    pub translate: f64,
    /// Container size along the axis.
    pub container: f64,
    /// Per-slide size along the axis.
    pub slide_size: f64,
    /// Distance between adjacent slot origins.
    pub step: f64,
    /// All physical slots in strip order, clones included.
    pub slots: Vec<SlideSlot>,
}

/// A headless carousel instance.
#[derive(Debug)]
pub struct Carousel {
    engine: Engine,
    drag: DragController,
    looping: LoopCoordinator,
    bus: EventBus<Event>,
    len: usize,
}

impl Carousel {
    /// Creates a carousel over `len` logical items in a container of size
    /// `container`.
    ///
    /// With `options.looping` set and at least 2 items, the engine is built
    /// over the cloned physical strip and anchored on the first original.
    #[must_use]
    pub fn new(len: usize, container: f64, options: Options) -> Self {
        let looping = if options.looping {
            LoopCoordinator::new(len, options.per_page_or_1())
        } else {
            LoopCoordinator::inactive(len)
        };
        let count = if looping.is_active() {
            looping.physical_len()
        } else {
            len
        };
        let mut engine = Engine::new(count, container, options);
        if looping.is_active() {
            engine.set_loop_active(true);
            let anchor = i64::try_from(looping.first_original()).unwrap_or(0);
            engine.re_anchor(anchor);
        }
        let mut carousel = Self {
            engine,
            drag: DragController::new(),
            looping,
            bus: EventBus::new(),
            len,
        };
        // Construction churn (initial lock probing) has no observers yet.
        carousel.engine.drain_events();
        carousel
    }

    /// The active logical index.
    #[must_use]
    pub fn index(&self) -> usize {
        if self.looping.is_active() {
            self.looping.logical_of(self.engine.index())
        } else {
            self.engine.index()
        }
    }

    /// Number of logical items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the carousel holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether all content fits the viewport and navigation is a no-op.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.engine.is_locked()
    }

    /// The configuration this carousel was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        self.engine.options()
    }

    /// The current motion state.
    #[must_use]
    pub fn motion_state(&self) -> MotionState {
        if self.drag.is_dragging() {
            MotionState::Dragging
        } else if self.engine.is_animating() || self.drag.is_coasting() {
            MotionState::Scrolling
        } else {
            MotionState::Idle
        }
    }

    /// Whether another [`Carousel::tick`] call is wanted.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.engine.needs_frame() || self.drag.needs_frame()
    }

    /// Whether navigating forward is possible.
    #[must_use]
    pub fn can_next(&self) -> bool {
        self.looping.is_active() || self.engine.can_scroll_next()
    }

    /// Whether navigating backward is possible.
    #[must_use]
    pub fn can_prev(&self) -> bool {
        self.looping.is_active() || self.engine.can_scroll_prev()
    }

    /// The event bus.
    #[must_use]
    pub fn bus(&self) -> &EventBus<Event> {
        &self.bus
    }

    /// The event bus, mutably, for registering and removing handlers.
    pub fn bus_mut(&mut self) -> &mut EventBus<Event> {
        &mut self.bus
    }

    /// Starts an animated transition to logical `index`.
    ///
    /// Out-of-range indices are normalized (wrapped in loop mode, clamped
    /// otherwise). Returns the logical index actually navigated to.
    pub fn scroll_to(&mut self, index: i64, now_ms: f64) -> usize {
        self.go(index, false, now_ms)
    }

    /// Moves to logical `index` instantly, without animation.
    pub fn jump(&mut self, index: i64, now_ms: f64) -> usize {
        self.go(index, true, now_ms)
    }

    /// Advances by `delta` logical indices.
    pub fn scroll_by(&mut self, delta: i64, now_ms: f64) -> usize {
        let base = i64::try_from(self.index()).unwrap_or(i64::MAX);
        self.go(base.saturating_add(delta), false, now_ms)
    }

    /// Advances forward by one page. No-op at the end without looping.
    pub fn next(&mut self, now_ms: f64) -> usize {
        self.page(1, now_ms)
    }

    /// Goes back by one page. No-op at the start without looping.
    pub fn prev(&mut self, now_ms: f64) -> usize {
        self.page(-1, now_ms)
    }

    /// Feeds one pointer record into the drag state machine.
    pub fn pointer(&mut self, input: &PointerInput) {
        self.drag.handle(&mut self.engine, input);
        self.apply_motion_jump();
        self.pump();
    }

    /// Advances all in-flight motion to `now_ms`.
    ///
    /// Call once per visual frame while [`Carousel::needs_frame`] is true.
    /// Returns `true` if any motion advanced.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let mut advanced = self.engine.tick(now_ms);
        advanced |= self.drag.tick(&mut self.engine, now_ms);
        if advanced {
            self.apply_motion_jump();
        }
        self.pump();
        advanced
    }

    /// Recomputes geometry after external option or size changes, keeping the
    /// active index anchored without animation.
    pub fn update(&mut self) {
        self.drag.reset();
        self.engine.update();
        self.pump();
    }

    /// Replaces the container size.
    pub fn set_container(&mut self, container: f64) {
        self.drag.reset();
        self.engine.set_container(container);
        self.pump();
    }

    /// Replaces the logical item count, rebuilding loop bookkeeping and
    /// keeping the active index where possible.
    pub fn set_len(&mut self, len: usize) {
        let logical = self.index().min(len.saturating_sub(1));
        self.len = len;
        self.drag.reset();
        self.looping = if self.engine.options().looping {
            LoopCoordinator::new(len, self.engine.options().per_page_or_1())
        } else {
            LoopCoordinator::inactive(len)
        };
        let count = if self.looping.is_active() {
            self.looping.physical_len()
        } else {
            len
        };
        self.engine.set_count(count);
        self.engine.set_loop_active(self.looping.is_active());
        let anchor = if self.looping.is_active() {
            self.looping.first_original() + logical
        } else {
            logical
        };
        self.engine.re_anchor(i64::try_from(anchor).unwrap_or(i64::MAX));
        self.pump();
    }

    /// A pull-model view of the track for rendering.
    #[must_use]
    pub fn snapshot(&self) -> TrackSnapshot {
        let geometry = self.engine.geometry();
        let active = self.engine.index();
        let slots = (0..geometry.len())
            .map(|physical| SlideSlot {
                physical,
                logical: self.looping.logical_of(physical),
                position: geometry.position_of(physical),
                active: physical == active,
            })
            .collect();
        TrackSnapshot {
            translate: -self.engine.offset(),
            container: geometry.container(),
            slide_size: geometry.slide_size(),
            step: geometry.step(),
            slots,
        }
    }

    fn go(&mut self, logical: i64, instant: bool, now_ms: f64) -> usize {
        let target = if self.looping.is_active() {
            self.looping.resolve(
                logical,
                self.engine.index(),
                self.engine.geometry().end_index(),
            )
        } else {
            logical
        };
        self.engine.scroll_to(target, instant, now_ms);
        self.pump();
        self.index()
    }

    fn page(&mut self, direction: i64, now_ms: f64) -> usize {
        let allowed = match direction {
            d if d > 0 => self.can_next(),
            d if d < 0 => self.can_prev(),
            _ => false,
        };
        if !allowed {
            return self.index();
        }
        let per_page = i64::try_from(self.engine.options().per_page_or_1()).unwrap_or(1);
        if self.looping.is_active() {
            let base = i64::try_from(self.index()).unwrap_or(i64::MAX);
            self.go(base.saturating_add(direction * per_page), false, now_ms)
        } else {
            self.engine.scroll_by(direction * per_page, now_ms);
            self.pump();
            self.index()
        }
    }

    /// Re-anchors the physical position by one cycle when a drag or momentum
    /// run has carried it past the half-slide margin into clone territory.
    ///
    /// Tween motion is excluded: its destination always lies on the physical
    /// strip, and the silent settle jump handles clone-slot endings.
    fn apply_motion_jump(&mut self) {
        if !self.looping.is_active() || !(self.drag.is_dragging() || self.drag.is_coasting()) {
            return;
        }
        let step = self.engine.geometry().step();
        if let Some((index_delta, pixel_delta)) =
            self.looping.motion_adjustment(self.engine.offset(), step)
        {
            self.engine.shift(index_delta, pixel_delta);
            self.drag.shift(pixel_delta);
            self.engine.emit(Event::PositionShifted { delta: pixel_delta });
        }
    }

    /// Drains the engine outbox into the bus, translating physical indices to
    /// logical, then applies the settle jump strictly after the completion
    /// event has been delivered.
    fn pump(&mut self) {
        let events = self.engine.drain_events();
        let mut settled = false;
        for event in events {
            if matches!(event, Event::SlideChanged { .. }) {
                settled = true;
            }
            let event = self.translate(event);
            self.bus.emit(&event);
        }
        if settled && self.at_rest() {
            self.apply_settle_jump();
        }
    }

    fn at_rest(&self) -> bool {
        !self.engine.is_animating() && !self.drag.is_dragging() && !self.drag.is_coasting()
    }

    fn apply_settle_jump(&mut self) {
        let Some(index_delta) = self.looping.settle_adjustment(self.engine.index()) else {
            return;
        };
        let span = self.looping.original_len() as f64 * self.engine.geometry().step();
        let pixel_delta = if index_delta > 0 { span } else { -span };
        self.engine.shift(index_delta, pixel_delta);
    }

    fn translate(&self, event: Event) -> Event {
        if !self.looping.is_active() {
            return event;
        }
        match event {
            Event::BeforeSlideChange { index } => Event::BeforeSlideChange {
                index: self.looping.logical_of(index),
            },
            Event::SlideChange { index } => Event::SlideChange {
                index: self.looping.logical_of(index),
            },
            Event::SlideChanged { index } => Event::SlideChanged {
                index: self.looping.logical_of(index),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn carousel(len: usize, options: Options) -> Carousel {
        let options = Options {
            speed_ms: 100.0,
            easing: gyre_tween::easing::linear,
            ..options
        };
        Carousel::new(len, 400.0, options)
    }

    fn settle(carousel: &mut Carousel, mut now: f64) -> f64 {
        let mut guard = 0;
        while carousel.needs_frame() {
            now += 16.0;
            carousel.tick(now);
            guard += 1;
            assert!(guard < 1_000, "motion failed to settle");
        }
        now
    }

    #[test]
    fn jump_is_instant_and_published() {
        let mut c = carousel(5, Options::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        c.bus_mut().on_any(move |ev: &Event| sink.borrow_mut().push(*ev));

        assert_eq!(c.jump(3, 0.0), 3);
        assert_eq!(c.index(), 3);
        assert_eq!(c.motion_state(), MotionState::Idle);
        assert_eq!(
            *seen.borrow(),
            vec![
                Event::BeforeSlideChange { index: 3 },
                Event::SlideChanged { index: 3 },
            ]
        );
    }

    #[test]
    fn animated_scroll_settles_through_ticks() {
        let mut c = carousel(5, Options::default());
        c.scroll_to(2, 0.0);
        assert_eq!(c.motion_state(), MotionState::Scrolling);
        settle(&mut c, 0.0);
        assert_eq!(c.index(), 2);
        assert_eq!(c.motion_state(), MotionState::Idle);
        assert_eq!(c.snapshot().translate, -800.0);
    }

    #[test]
    fn next_and_prev_move_by_one_page() {
        let mut c = carousel(6, Options::default().with_per_page(2));
        assert_eq!(c.jump(0, 0.0), 0);
        c.next(0.0);
        settle(&mut c, 0.0);
        assert_eq!(c.index(), 2);
        c.prev(1_000.0);
        settle(&mut c, 1_000.0);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn next_at_end_without_looping_is_a_no_op() {
        let mut c = carousel(3, Options::default());
        c.jump(2, 0.0);
        assert!(!c.can_next());
        let seen = Rc::new(RefCell::new(0));
        let sink = seen.clone();
        c.bus_mut().on_any(move |_: &Event| *sink.borrow_mut() += 1);
        assert_eq!(c.next(0.0), 2);
        assert_eq!(*seen.borrow(), 0);
    }

    #[test]
    fn loop_mode_wraps_next_past_the_end() {
        let mut c = carousel(5, Options::default().with_looping(true));
        assert_eq!(c.index(), 0);
        assert!(c.can_next() && c.can_prev());
        for expected in [1, 2, 3, 4, 0, 1] {
            c.next(0.0);
            settle(&mut c, 0.0);
            assert_eq!(c.index(), expected);
        }
    }

    #[test]
    fn loop_mode_wraps_prev_past_the_start() {
        let mut c = carousel(5, Options::default().with_looping(true));
        c.prev(0.0);
        settle(&mut c, 0.0);
        assert_eq!(c.index(), 4);
        c.prev(1_000.0);
        settle(&mut c, 1_000.0);
        assert_eq!(c.index(), 3);
    }

    #[test]
    fn loop_events_carry_logical_indices() {
        let mut c = carousel(5, Options::default().with_looping(true));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        c.bus_mut()
            .on(crate::event::names::SLIDE_CHANGED, move |ev: &Event| {
                if let Event::SlideChanged { index } = ev {
                    sink.borrow_mut().push(*index);
                }
            });
        c.prev(0.0);
        settle(&mut c, 0.0);
        assert_eq!(*seen.borrow(), vec![4]);
        assert!(seen.borrow().iter().all(|&i| i < 5));
    }

    #[test]
    fn loop_snapshot_marks_clone_identity() {
        let c = carousel(5, Options::default().with_looping(true));
        let snapshot = c.snapshot();
        // 5 originals, 1 clone per side.
        assert_eq!(snapshot.slots.len(), 7);
        assert_eq!(snapshot.slots[0].logical, 4);
        assert_eq!(snapshot.slots[1].logical, 0);
        assert!(snapshot.slots[1].active);
        assert_eq!(snapshot.slots[6].logical, 0);
    }

    #[test]
    fn loop_with_one_item_degrades_to_plain_carousel() {
        let mut c = carousel(1, Options::default().with_looping(true));
        assert_eq!(c.snapshot().slots.len(), 1);
        assert_eq!(c.next(0.0), 0);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn set_len_keeps_the_index_when_possible() {
        let mut c = carousel(8, Options::default());
        c.jump(3, 0.0);
        c.set_len(6);
        assert_eq!(c.index(), 3);
        assert_eq!(c.len(), 6);
        c.set_len(2);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn set_container_reanchors_without_moving_the_index() {
        let mut c = carousel(5, Options::default());
        c.jump(2, 0.0);
        c.set_container(200.0);
        assert_eq!(c.index(), 2);
        assert_eq!(c.snapshot().translate, -400.0);
    }

    #[test]
    fn lock_and_unlock_reach_the_bus() {
        let mut c = carousel(5, Options::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        c.bus_mut().on_any(move |ev: &Event| sink.borrow_mut().push(*ev));
        c.set_len(1);
        c.set_len(5);
        assert!(seen.borrow().contains(&Event::Lock));
        assert!(seen.borrow().contains(&Event::Unlock));
    }

    #[test]
    fn scroll_by_moves_relative_to_the_logical_index() {
        let mut c = carousel(5, Options::default().with_looping(true));
        c.jump(4, 0.0);
        assert_eq!(c.scroll_by(2, 0.0), 1);
        settle(&mut c, 0.0);
        assert_eq!(c.index(), 1);
    }
}
