// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot tween scheduler.
//!
//! A [`TweenScheduler`] owns at most one time-based interpolation at a time.
//! Starting a new run always cancels the one in flight, so a completion is
//! never reported for a superseded run, and two runs never drive the same
//! value concurrently.
//!
//! Time is caller-supplied (`now_ms`, elapsed milliseconds as `f64`) rather
//! than sampled from a wall clock. Progress is recomputed from elapsed time on
//! every [`TweenScheduler::tick`], so a host that pauses and resumes simply
//! continues from wherever elapsed time places the run.

use crate::easing::Easing;
use crate::frame::FrameRequest;

/// Outcome of [`TweenScheduler::start`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Started {
    /// Zero (or degenerate) duration: the run completed synchronously and the
    /// carried value is final. [`TweenScheduler::is_animating`] is already
    /// `false` when the caller observes this.
    Instant(f64),
    /// A run is in flight; drive it with [`TweenScheduler::tick`].
    Animating,
}

/// One interpolated sample produced by [`TweenScheduler::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenFrame {
    /// The interpolated value for this frame.
    pub value: f64,
    /// `true` exactly once, on the frame that reaches the target.
    pub done: bool,
}

#[derive(Clone, Copy, Debug)]
struct ActiveTween {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

/// Runs one cancelable, time-based interpolation at a time.
///
/// ```
/// use gyre_tween::{TweenScheduler, Started, easing};
///
/// let mut tween = TweenScheduler::new();
/// assert_eq!(
///     tween.start(0.0, 100.0, 200.0, easing::linear, 1_000.0),
///     Started::Animating,
/// );
///
/// // Halfway through the duration, a linear tween sits halfway there.
/// let frame = tween.tick(1_100.0).unwrap();
/// assert!((frame.value - 50.0).abs() < 1e-9);
/// assert!(!frame.done);
///
/// // Past the duration it lands exactly on the target, once.
/// let frame = tween.tick(1_300.0).unwrap();
/// assert_eq!(frame.value, 100.0);
/// assert!(frame.done);
/// assert!(!tween.is_animating());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TweenScheduler {
    active: Option<ActiveTween>,
    frame: FrameRequest,
}

impl TweenScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a run from `from` to `to` over `duration_ms`, cancelling any
    /// run already in flight.
    ///
    /// A duration that is zero, negative, or non-finite takes the instant
    /// fast path: no frame is scheduled and the final value is returned in
    /// [`Started::Instant`] for the caller to apply synchronously.
    pub fn start(
        &mut self,
        from: f64,
        to: f64,
        duration_ms: f64,
        easing: Easing,
        now_ms: f64,
    ) -> Started {
        self.stop();
        if !(duration_ms > 0.0) || !duration_ms.is_finite() {
            return Started::Instant(to);
        }
        self.active = Some(ActiveTween {
            from,
            to,
            start_ms: now_ms,
            duration_ms,
            easing,
        });
        self.frame.schedule();
        Started::Animating
    }

    /// Advances the run to `now_ms`, returning the sample for this frame.
    ///
    /// Returns `None` while idle. The final frame carries the target value
    /// exactly and `done = true`; the run is idle afterwards. Timestamps
    /// earlier than the start clamp to zero progress rather than
    /// extrapolating backwards.
    pub fn tick(&mut self, now_ms: f64) -> Option<TweenFrame> {
        self.frame.take();
        let tween = self.active?;
        let elapsed = (now_ms - tween.start_ms).max(0.0);
        let progress = (elapsed / tween.duration_ms).clamp(0.0, 1.0);
        if progress >= 1.0 {
            self.active = None;
            return Some(TweenFrame {
                value: tween.to,
                done: true,
            });
        }
        let eased = (tween.easing)(progress);
        self.frame.schedule();
        Some(TweenFrame {
            value: tween.from + (tween.to - tween.from) * eased,
            done: false,
        })
    }

    /// Cancels any in-flight run without reporting completion.
    ///
    /// Idempotent; safe to call when idle.
    pub fn stop(&mut self) {
        self.active = None;
        self.frame.cancel();
    }

    /// Returns `true` while a run is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Returns `true` while a frame callback is pending.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.frame.is_scheduled()
    }

    /// The in-flight run's target value, if any.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.active.map(|t| t.to)
    }
}
