// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance configuration for the engine.
//!
//! There is no global registry: each carousel instance receives its own
//! [`Options`] at construction time and owns it for its lifetime.

use gyre_tween::{DEFAULT_EASING, Easing};
use kurbo::Point;

/// The axis along which slides are arranged and offsets computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Axis {
    /// Slides run left to right; pointer X drives dragging.
    #[default]
    Horizontal,
    /// Slides run top to bottom; pointer Y drives dragging.
    Vertical,
}

impl Axis {
    /// Extracts this axis' coordinate from a pointer position.
    #[must_use]
    pub fn coord(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }
}

/// How pointer dragging behaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DragMode {
    /// Pointer input is ignored.
    Disabled,
    /// On release, snap to the index nearest the flick-extrapolated position.
    #[default]
    Snap,
    /// On release, run a momentum decay and stop wherever it settles.
    Free,
    /// Like [`DragMode::Free`], but snap to the nearest index once momentum
    /// decays below the stop threshold.
    FreeSnap,
}

impl DragMode {
    /// Returns `true` unless dragging is disabled.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self != Self::Disabled
    }

    /// Returns `true` for the momentum-decay modes.
    #[must_use]
    pub fn is_free(self) -> bool {
        matches!(self, Self::Free | Self::FreeSnap)
    }
}

/// Configuration consumed by the positioning core.
///
/// All values are normalized defensively at use sites; a degenerate
/// configuration (zero items, zero sizes) degrades to a locked, no-op
/// carousel rather than an error.
#[derive(Clone, Debug)]
pub struct Options {
    /// Slides visible per page. Values below 1 are treated as 1.
    pub per_page: usize,
    /// Gap between adjacent slides, in the same unit as slide sizes.
    pub gap: f64,
    /// Transition duration in milliseconds. Zero means instant transitions.
    pub speed_ms: f64,
    /// Loop mode: fake unbounded scrolling over a circular item sequence.
    pub looping: bool,
    /// Drag behavior.
    pub drag: DragMode,
    /// Apply rubberband resistance when dragging past the reachable bounds.
    /// When `false`, drags clamp hard at the bounds instead.
    pub rubberband: bool,
    /// The primary axis.
    pub axis: Axis,
    /// Navigation mode: every index is addressable by `scroll_to` while the
    /// visual travel stays capped at the last full page's offset. Used by
    /// thumbnail-navigation hosts.
    pub navigation: bool,
    /// Multiplier applied to pointer displacement while dragging.
    pub drag_speed: f64,
    /// Velocity multiplier applied per momentum frame; must be in `(0, 1)`
    /// for momentum to decay. Out-of-range values fall back to the default.
    pub friction: f64,
    /// Easing applied to animated transitions.
    pub easing: Easing,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            per_page: 1,
            gap: 0.0,
            speed_ms: 400.0,
            looping: false,
            drag: DragMode::default(),
            rubberband: true,
            axis: Axis::default(),
            navigation: false,
            drag_speed: 1.0,
            friction: 0.9,
            easing: DEFAULT_EASING,
        }
    }
}

impl Options {
    /// `per_page` with the at-least-1 floor applied.
    #[must_use]
    pub fn per_page_or_1(&self) -> usize {
        self.per_page.max(1)
    }

    /// `friction` normalized into `(0, 1)`.
    #[must_use]
    pub fn friction_or_default(&self) -> f64 {
        if self.friction > 0.0 && self.friction < 1.0 {
            self.friction
        } else {
            0.9
        }
    }

    /// Sets the slides visible per page.
    #[must_use]
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets the inter-slide gap.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the transition duration in milliseconds.
    #[must_use]
    pub fn with_speed_ms(mut self, speed_ms: f64) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    /// Enables or disables loop mode.
    #[must_use]
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Sets the drag behavior.
    #[must_use]
    pub fn with_drag(mut self, drag: DragMode) -> Self {
        self.drag = drag;
        self
    }

    /// Sets the primary axis.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Enables or disables navigation mode.
    #[must_use]
    pub fn with_navigation(mut self, navigation: bool) -> Self {
        self.navigation = navigation;
        self
    }
}
