// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer drag state machine: Idle → Active → (Momentum) → Idle.
//!
//! The controller never owns the position; it writes through the engine's
//! collaborator surface. A pointer-down seizes the position (cancelling any
//! tween or momentum run), moves write directly, and release either snaps via
//! a normal engine transition or launches a self-rescheduling momentum loop.
//!
//! All coordinates are extracted along the configured axis from the
//! `kurbo::Point` carried by [`PointerInput`].

use kurbo::Point;
use smallvec::SmallVec;

use gyre_tween::FrameRequest;

use crate::engine::Engine;
use crate::event::Event;
use crate::options::DragMode;

/// Capacity of the velocity sample ring; the oldest sample is evicted first.
const SAMPLE_CAPACITY: usize = 8;

/// How far ahead a release velocity is extrapolated when choosing a snap
/// destination, in milliseconds.
const FLICK_WINDOW_MS: f64 = 500.0;

/// Momentum velocity below this magnitude (px/ms) counts as stopped.
const STOP_VELOCITY: f64 = 0.01;

/// Upper bound on the frame delta used by the momentum loop, so a paused host
/// does not teleport the strip on resume.
const MAX_FRAME_DT_MS: f64 = 64.0;

/// Which button a pointer-down was performed with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerButton {
    /// The primary button (left mouse button, touch contact).
    #[default]
    Primary,
    /// The secondary button.
    Secondary,
    /// Any other button.
    Auxiliary,
}

/// The lifecycle phase of one pointer record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    /// Pointer pressed.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released.
    Up,
    /// The session was aborted by the host (capture loss, etc.).
    Cancel,
}

/// One pointer record fed into the controller by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Pointer location.
    pub point: Point,
    /// Caller-supplied elapsed milliseconds, same clock as the tick calls.
    pub time_ms: f64,
    /// Lifecycle phase.
    pub phase: PointerPhase,
    /// Button kind; only [`PointerButton::Primary`] starts a session.
    pub button: PointerButton,
    /// Set when the pointer is over an interactive child (link, button);
    /// such a down does not start a drag.
    pub over_interactive: bool,
}

impl PointerInput {
    /// Convenience constructor for a primary, non-interactive record.
    #[must_use]
    pub fn new(point: Point, time_ms: f64, phase: PointerPhase) -> Self {
        Self {
            point,
            time_ms,
            phase,
            button: PointerButton::Primary,
            over_interactive: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    coord: f64,
    time_ms: f64,
}

#[derive(Debug)]
struct Session {
    start_coord: f64,
    start_offset: f64,
    samples: SmallVec<[Sample; SAMPLE_CAPACITY]>,
}

#[derive(Debug)]
struct Momentum {
    velocity: f64,
    last_ms: f64,
    /// Snap to the nearest index once stopped; free mode settles in place.
    snap: bool,
    frame: FrameRequest,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Active(Session),
    Momentum(Momentum),
}

/// The drag state machine for one carousel instance.
#[derive(Debug, Default)]
pub struct DragController {
    state: State,
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pointer session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Active(_))
    }

    /// Whether a momentum run is in flight.
    #[must_use]
    pub fn is_coasting(&self) -> bool {
        matches!(self.state, State::Momentum(_))
    }

    /// Whether the momentum loop wants another frame.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        match &self.state {
            State::Momentum(m) => m.frame.is_scheduled(),
            _ => false,
        }
    }

    /// Feeds one pointer record through the state machine.
    pub fn handle(&mut self, engine: &mut Engine, input: &PointerInput) {
        match input.phase {
            PointerPhase::Down => self.on_down(engine, input),
            PointerPhase::Move => self.on_move(engine, input),
            PointerPhase::Up | PointerPhase::Cancel => self.on_up(engine, input),
        }
    }

    /// Advances the momentum loop to `now_ms`. Returns `true` if a momentum
    /// frame was consumed.
    pub fn tick(&mut self, engine: &mut Engine, now_ms: f64) -> bool {
        let State::Momentum(momentum) = &mut self.state else {
            return false;
        };
        if !momentum.frame.take() {
            return false;
        }
        let dt = (now_ms - momentum.last_ms).clamp(0.0, MAX_FRAME_DT_MS);
        momentum.last_ms = now_ms;

        let (min, max) = engine.bounds();
        let next = engine.offset() + momentum.velocity * dt;
        momentum.velocity *= engine.options().friction_or_default();

        if next <= min || next >= max {
            // Ran into a travel bound: pin there and stop coasting.
            engine.override_position(next.clamp(min, max));
            engine.emit(Event::Scroll);
            let snap = momentum.snap;
            self.finish_momentum(engine, snap, now_ms);
            return true;
        }

        engine.override_position(next);
        engine.emit(Event::Scroll);

        if momentum.velocity.abs() < STOP_VELOCITY {
            let snap = momentum.snap;
            self.finish_momentum(engine, snap, now_ms);
        } else {
            momentum.frame.schedule();
        }
        true
    }

    /// Compensates the session's start bookkeeping after the position was
    /// silently shifted by `delta` (loop boundary jump mid-drag).
    pub fn shift(&mut self, delta: f64) {
        if let State::Active(session) = &mut self.state {
            session.start_offset += delta;
        }
    }

    /// Aborts any session or momentum run without emitting events.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    fn on_down(&mut self, engine: &mut Engine, input: &PointerInput) {
        if engine.is_locked()
            || !engine.options().drag.is_enabled()
            || input.button != PointerButton::Primary
            || input.over_interactive
        {
            return;
        }
        // Takes over from whatever was moving the strip.
        self.state = State::Idle;
        engine.seize();

        let coord = engine.options().axis.coord(input.point);
        let mut samples = SmallVec::new();
        samples.push(Sample {
            coord,
            time_ms: input.time_ms,
        });
        self.state = State::Active(Session {
            start_coord: coord,
            start_offset: engine.offset(),
            samples,
        });
        engine.emit(Event::DragStart);
    }

    fn on_move(&mut self, engine: &mut Engine, input: &PointerInput) {
        let State::Active(session) = &mut self.state else {
            return;
        };
        let options = engine.options();
        let coord = options.axis.coord(input.point);
        let delta = (coord - session.start_coord) * options.drag_speed;
        let desired = session.start_offset + delta;
        let constrained = constrain(
            desired,
            engine.bounds(),
            engine.geometry().container(),
            options.rubberband,
        );

        if session.samples.len() == SAMPLE_CAPACITY {
            session.samples.remove(0);
        }
        session.samples.push(Sample {
            coord,
            time_ms: input.time_ms,
        });

        engine.override_position(constrained);
        engine.emit(Event::Drag);
    }

    fn on_up(&mut self, engine: &mut Engine, input: &PointerInput) {
        let State::Active(session) = &mut self.state else {
            return;
        };
        let velocity = release_velocity(&session.samples, engine.options().drag_speed);
        self.state = State::Idle;
        engine.emit(Event::DragEnd);

        match engine.options().drag {
            DragMode::Free | DragMode::FreeSnap => {
                let snap = engine.options().drag == DragMode::FreeSnap;
                if velocity.abs() < STOP_VELOCITY {
                    self.finish_momentum(engine, snap, input.time_ms);
                } else {
                    let mut frame = FrameRequest::default();
                    frame.schedule();
                    self.state = State::Momentum(Momentum {
                        velocity,
                        last_ms: input.time_ms,
                        snap,
                        frame,
                    });
                }
            }
            // Disabled cannot be reached with an active session.
            DragMode::Disabled | DragMode::Snap => {
                let projected = engine.offset() + velocity * FLICK_WINDOW_MS;
                let index = engine.nearest_index(projected);
                let target = i64::try_from(index).unwrap_or(i64::MAX);
                engine.scroll_to(target, false, input.time_ms);
            }
        }
    }

    fn finish_momentum(&mut self, engine: &mut Engine, snap: bool, now_ms: f64) {
        self.state = State::Idle;
        if snap {
            let index = engine.nearest_index(engine.offset());
            let target = i64::try_from(index).unwrap_or(i64::MAX);
            engine.scroll_to(target, false, now_ms);
        } else {
            engine.settle_in_place();
        }
    }
}

/// Applies travel bounds to a desired drag offset.
///
/// Inside the bounds the offset passes through. Outside, rubberband
/// resistance scales the overflow by `max(0, 1 − 2×overflow/container)²`,
/// which reaches zero pass-through half a container width past the edge.
/// With rubberband off (or a degenerate container) the offset hard-clamps.
fn constrain(desired: f64, bounds: (f64, f64), container: f64, rubberband: bool) -> f64 {
    let (min, max) = bounds;
    if desired >= min && desired <= max {
        return desired;
    }
    let (edge, overflow) = if desired < min {
        (min, min - desired)
    } else {
        (max, desired - max)
    };
    if !rubberband || container <= 0.0 {
        return edge;
    }
    let factor = (1.0 - 2.0 * overflow / container).max(0.0);
    let resisted = overflow * factor * factor;
    if desired < min {
        edge - resisted
    } else {
        edge + resisted
    }
}

/// Average release velocity in offset units per millisecond.
///
/// Computed from the oldest and newest ring samples; fewer than two samples
/// or a zero time span reads as no motion.
fn release_velocity(samples: &[Sample], drag_speed: f64) -> f64 {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return 0.0;
    };
    let dt = last.time_ms - first.time_ms;
    if samples.len() < 2 || dt <= 0.0 {
        return 0.0;
    }
    (last.coord - first.coord) * drag_speed / dt
}
