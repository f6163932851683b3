// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gyre_events --heading-base-level=0

//! Gyre Events: a small named-event publish/subscribe bus.
//!
//! All cross-component notification in the Gyre carousel engine flows through
//! an [`EventBus`]. The bus is generic over the event type: anything
//! implementing [`Named`] (a static name per event value) can be published.
//! Handlers are registered per name, or for every event via
//! [`EventBus::on_any`], and are invoked synchronously in subscription order.
//!
//! Handler removal is by [`HandlerId`] — closures are not comparable in Rust,
//! so the id returned at registration stands in for handler identity.
//!
//! Listener failures are contained at the bus boundary: with the `std`
//! feature enabled, a panicking handler is caught, reported through the
//! [`log`] facade, and delivery continues with the remaining handlers.
//!
//! ## Minimal example
//!
//! ```rust
//! use gyre_events::{EventBus, Named};
//!
//! #[derive(Debug)]
//! enum Ev {
//!     Moved { index: usize },
//!     Settled { index: usize },
//! }
//!
//! impl Named for Ev {
//!     fn name(&self) -> &'static str {
//!         match self {
//!             Ev::Moved { .. } => "moved",
//!             Ev::Settled { .. } => "settled",
//!         }
//!     }
//! }
//!
//! let mut bus = EventBus::new();
//! let id = bus.on("settled", |ev: &Ev| {
//!     if let Ev::Settled { index } = ev {
//!         assert_eq!(*index, 2);
//!     }
//! });
//!
//! bus.emit(&Ev::Moved { index: 2 });
//! bus.emit(&Ev::Settled { index: 2 });
//! bus.off("settled", id);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod bus;

pub use bus::{EventBus, HandlerId};

/// An event value with a static name used to route it to handlers.
pub trait Named {
    /// The name this event is published under.
    fn name(&self) -> &'static str;
}
