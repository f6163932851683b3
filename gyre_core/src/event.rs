// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events published by the engine.
//!
//! For a single transition, delivery order is always
//! [`Event::BeforeSlideChange`] → [`Event::SlideChange`] → zero or more
//! [`Event::Scroll`] → [`Event::SlideChanged`]. Instant transitions skip
//! `SlideChange`/`Scroll` and settle immediately.
//!
//! Indices carried by events are logical indices: in loop mode the facade
//! translates the engine's physical indices before publishing, so observers
//! never see clone slots.

use gyre_events::Named;

/// Stable event names, for subscribing without constructing an event value.
pub mod names {
    /// Name of [`super::Event::BeforeSlideChange`].
    pub const BEFORE_SLIDE_CHANGE: &str = "before_slide_change";
    /// Name of [`super::Event::SlideChange`].
    pub const SLIDE_CHANGE: &str = "slide_change";
    /// Name of [`super::Event::SlideChanged`].
    pub const SLIDE_CHANGED: &str = "slide_changed";
    /// Name of [`super::Event::Scroll`].
    pub const SCROLL: &str = "scroll";
    /// Name of [`super::Event::DragStart`].
    pub const DRAG_START: &str = "drag_start";
    /// Name of [`super::Event::Drag`].
    pub const DRAG: &str = "drag";
    /// Name of [`super::Event::DragEnd`].
    pub const DRAG_END: &str = "drag_end";
    /// Name of [`super::Event::PositionShifted`].
    pub const POSITION_SHIFTED: &str = "position_shifted";
    /// Name of [`super::Event::Lock`].
    pub const LOCK: &str = "lock";
    /// Name of [`super::Event::Unlock`].
    pub const UNLOCK: &str = "unlock";
}

/// A notification emitted by the positioning core.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// A navigation was accepted; carries the normalized destination index.
    /// Emitted before any position change.
    BeforeSlideChange {
        /// Normalized destination index.
        index: usize,
    },
    /// An animated transition toward `index` has started.
    SlideChange {
        /// Normalized destination index.
        index: usize,
    },
    /// The position settled on `index` (animated completion or instant set).
    SlideChanged {
        /// The settled index.
        index: usize,
    },
    /// A mid-transition position tick (animation frame or momentum frame).
    Scroll,
    /// A drag session started.
    DragStart,
    /// The pointer moved within an active drag session.
    Drag,
    /// The drag session ended (release or cancel).
    DragEnd,
    /// Loop mode silently re-anchored the position mid-motion; carries the
    /// pixel delta applied, so position-tracking observers can compensate.
    PositionShifted {
        /// The pixel delta added to the position.
        delta: f64,
    },
    /// All content now fits the viewport; navigation is a no-op.
    Lock,
    /// Content no longer fits the viewport; navigation works again.
    Unlock,
}

impl Named for Event {
    fn name(&self) -> &'static str {
        match self {
            Self::BeforeSlideChange { .. } => names::BEFORE_SLIDE_CHANGE,
            Self::SlideChange { .. } => names::SLIDE_CHANGE,
            Self::SlideChanged { .. } => names::SLIDE_CHANGED,
            Self::Scroll => names::SCROLL,
            Self::DragStart => names::DRAG_START,
            Self::Drag => names::DRAG,
            Self::DragEnd => names::DRAG_END,
            Self::PositionShifted { .. } => names::POSITION_SHIFTED,
            Self::Lock => names::LOCK,
            Self::Unlock => names::UNLOCK,
        }
    }
}
