// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gyre_core --heading-base-level=0

//! Gyre Core: a headless carousel positioning and interaction engine.
//!
//! This crate decides *where* a strip of slides is and *how* it moves; it
//! renders nothing. A host owns a [`Carousel`], feeds it pointer records and
//! per-frame timestamps, and reads back a [`TrackSnapshot`] to apply to
//! whatever it draws with.
//!
//! The moving parts, each usable on its own:
//!
//! - [`Engine`]: the positioning core — a current/target scalar pair, a
//!   bounded index counter, cached [`SlideGeometry`], and a tween per
//!   transition. Emits [`Event`] values through an internal outbox.
//! - [`DragController`]: the pointer state machine, with rubberband
//!   resistance past the travel bounds and momentum decay for free-drag
//!   modes.
//! - [`LoopCoordinator`]: clone-based infinite looping over a physical strip
//!   `[0, n + 2c)`, with invisible boundary re-anchoring.
//! - [`Carousel`]: the facade wiring all of the above to an
//!   [`EventBus`](gyre_events::EventBus).
//!
//! Everything is poll-driven off caller-supplied elapsed milliseconds: no
//! wall clock, no frame callbacks, fully deterministic under test.
//!
//! ## Minimal example
//!
//! ```rust
//! use gyre_core::{Carousel, Event, Options, event::names};
//!
//! let mut carousel = Carousel::new(5, 400.0, Options::default());
//! carousel.bus_mut().on(names::SLIDE_CHANGED, |ev: &Event| {
//!     if let Event::SlideChanged { index } = ev {
//!         assert_eq!(*index, 2);
//!     }
//! });
//!
//! carousel.scroll_to(2, 0.0);
//! let mut now = 0.0;
//! while carousel.needs_frame() {
//!     now += 16.0;
//!     carousel.tick(now);
//! }
//! assert_eq!(carousel.index(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod event;

mod carousel;
mod counter;
mod drag;
mod engine;
mod geometry;
mod looping;
mod options;
mod scalar;

pub use carousel::{Carousel, MotionState, SlideSlot, TrackSnapshot};
pub use counter::IndexCounter;
pub use drag::{DragController, PointerButton, PointerInput, PointerPhase};
pub use engine::Engine;
pub use event::Event;
pub use geometry::SlideGeometry;
pub use looping::LoopCoordinator;
pub use options::{Axis, DragMode, Options};
pub use scalar::ScalarPosition;
