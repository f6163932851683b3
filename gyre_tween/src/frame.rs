// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit frame-request state machine.
//!
//! Cooperative frame scheduling is modeled as a tagged state rather than
//! implicit recursion: a component that wants to run again on the next visual
//! frame calls [`FrameRequest::schedule`], the host observes the request via
//! [`FrameRequest::is_scheduled`], and consumes it with [`FrameRequest::take`]
//! at the top of its frame callback. [`FrameRequest::cancel`] withdraws a
//! pending request without running it.
//!
//! At most one request is pending per `FrameRequest`; scheduling while already
//! scheduled is a no-op, which gives the "submit one pending frame request,
//! cancel on stop" discipline a single owner per animation loop.

/// One pending-frame slot with explicit Idle/Scheduled/Cancelled states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FrameRequest {
    /// No frame is requested.
    #[default]
    Idle,
    /// A frame callback is due on the next host tick.
    Scheduled,
    /// A request was withdrawn before it ran; [`FrameRequest::take`] drains
    /// this back to [`FrameRequest::Idle`] without reporting a due frame.
    Cancelled,
}

impl FrameRequest {
    /// Requests a callback on the next frame. Idempotent while scheduled.
    pub fn schedule(&mut self) {
        *self = Self::Scheduled;
    }

    /// Withdraws a pending request, if any.
    ///
    /// Idempotent; safe to call when idle.
    pub fn cancel(&mut self) {
        if *self == Self::Scheduled {
            *self = Self::Cancelled;
        }
    }

    /// Consumes the slot at the top of a frame, returning `true` if a frame
    /// callback is due. Cancelled and idle slots drain to idle and report
    /// `false`.
    pub fn take(&mut self) -> bool {
        let due = *self == Self::Scheduled;
        *self = Self::Idle;
        due
    }

    /// Returns `true` while a frame callback is pending.
    #[must_use]
    pub fn is_scheduled(self) -> bool {
        self == Self::Scheduled
    }
}
