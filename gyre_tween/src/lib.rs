// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gyre_tween --heading-base-level=0

//! Gyre Tween: frame-request and tween scheduling primitives.
//!
//! This crate provides the cooperative animation core shared by the Gyre
//! carousel engine:
//!
//! - [`FrameRequest`]: an explicit Idle/Scheduled/Cancelled slot modeling
//!   "run this callback before the next visual frame". Each animation loop
//!   owns exactly one.
//! - [`TweenScheduler`]: a single cancelable, time-based interpolation per
//!   scheduler instance, with a synchronous zero-duration fast path.
//! - [`easing`]: pure easing functions `[0, 1] → [0, 1]`.
//!
//! Everything is poll-driven: hosts pass elapsed milliseconds into
//! [`TweenScheduler::tick`] once per frame while a frame request is pending.
//! There is no wall clock and no callback registration in this crate, which
//! keeps it `no_std` and makes animation behavior fully deterministic under
//! test.
//!
//! ## Minimal example
//!
//! ```rust
//! use gyre_tween::{Started, TweenScheduler, easing};
//!
//! let mut tween = TweenScheduler::new();
//!
//! // Instant transitions complete synchronously.
//! assert_eq!(
//!     tween.start(0.0, 40.0, 0.0, easing::linear, 0.0),
//!     Started::Instant(40.0),
//! );
//!
//! // Animated transitions are sampled per frame.
//! tween.start(40.0, 0.0, 400.0, easing::ease_out_quart, 0.0);
//! let mut now = 0.0;
//! while tween.needs_frame() {
//!     now += 16.0;
//!     let frame = tween.tick(now).unwrap();
//!     if frame.done {
//!         assert_eq!(frame.value, 0.0);
//!     }
//! }
//! assert!(!tween.is_animating());
//! ```
//!
//! This crate is `no_std` and uses `alloc`-free value types only.

#![no_std]

pub mod easing;

mod frame;
mod tween;

pub use easing::{DEFAULT_EASING, Easing};
pub use frame::FrameRequest;
pub use tween::{Started, TweenFrame, TweenScheduler};
