// Copyright 2026 the Gyre Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event bus proper: registration tables and synchronous delivery.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::Named;

/// Identifies one registered handler for later removal.
///
/// Closures are not comparable, so removal is by the id handed out at
/// registration time rather than by handler identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<E> = Box<dyn FnMut(&E)>;

struct Entry<E> {
    id: HandlerId,
    once: bool,
    handler: Handler<E>,
}

impl<E> core::fmt::Debug for Entry<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("once", &self.once)
            .field("handler", &"..")
            .finish()
    }
}

/// Named-event publish/subscribe with any-event listeners.
///
/// Generic over the event type `E`; the event's [`Named::name`] selects which
/// handlers run. Delivery is synchronous and in subscription order: named
/// handlers first, then any-event handlers.
///
/// With the `std` feature, a panic inside one handler is caught, reported via
/// [`log::error!`], and does not prevent remaining handlers from running.
/// Without `std` there is no unwinding boundary and a panicking handler
/// propagates.
#[derive(Debug)]
pub struct EventBus<E> {
    named: HashMap<&'static str, Vec<Entry<E>>>,
    any: Vec<Entry<E>>,
    next_id: u64,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            named: HashMap::new(),
            any: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E: Named> EventBus<E> {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Subscribes `handler` to events named `name`.
    pub fn on(&mut self, name: &'static str, handler: impl FnMut(&E) + 'static) -> HandlerId {
        let id = self.next_id();
        self.named.entry(name).or_default().push(Entry {
            id,
            once: false,
            handler: Box::new(handler),
        });
        id
    }

    /// Subscribes `handler` to the first event named `name`, then removes it.
    pub fn once(&mut self, name: &'static str, handler: impl FnMut(&E) + 'static) -> HandlerId {
        let id = self.next_id();
        self.named.entry(name).or_default().push(Entry {
            id,
            once: true,
            handler: Box::new(handler),
        });
        id
    }

    /// Subscribes `handler` to every emitted event, regardless of name.
    pub fn on_any(&mut self, handler: impl FnMut(&E) + 'static) -> HandlerId {
        let id = self.next_id();
        self.any.push(Entry {
            id,
            once: false,
            handler: Box::new(handler),
        });
        id
    }

    /// Removes the handler registered under `id` for `name`.
    ///
    /// Returns `true` if a handler was removed.
    pub fn off(&mut self, name: &str, id: HandlerId) -> bool {
        let Some(entries) = self.named.get_mut(name) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            self.named.remove(name);
        }
        removed
    }

    /// Removes all handlers registered for `name`.
    pub fn off_all(&mut self, name: &str) {
        self.named.remove(name);
    }

    /// Removes the any-event handler registered under `id`.
    ///
    /// Returns `true` if a handler was removed.
    pub fn off_any(&mut self, id: HandlerId) -> bool {
        let before = self.any.len();
        self.any.retain(|e| e.id != id);
        self.any.len() != before
    }

    /// Delivers `event` to all matching handlers synchronously.
    ///
    /// Named handlers run first, then any-event handlers, each group in
    /// subscription order. `once` handlers are removed after this delivery
    /// even if they panic.
    pub fn emit(&mut self, event: &E) {
        let name = event.name();
        if let Some(entries) = self.named.get_mut(name) {
            for entry in entries.iter_mut() {
                invoke(name, &mut entry.handler, event);
            }
            entries.retain(|e| !e.once);
            if entries.is_empty() {
                self.named.remove(name);
            }
        }
        for entry in self.any.iter_mut() {
            invoke(name, &mut entry.handler, event);
        }
        self.any.retain(|e| !e.once);
    }

    /// Number of handlers currently registered for `name`.
    #[must_use]
    pub fn listener_count(&self, name: &str) -> usize {
        self.named.get(name).map_or(0, Vec::len)
    }

    /// Number of any-event handlers currently registered.
    #[must_use]
    pub fn any_listener_count(&self) -> usize {
        self.any.len()
    }

    /// Event names that currently have at least one named handler.
    ///
    /// Order is unspecified.
    #[must_use]
    pub fn event_names(&self) -> Vec<&'static str> {
        self.named.keys().copied().collect()
    }

    /// Removes every handler, named and any-event alike.
    pub fn clear(&mut self) {
        self.named.clear();
        self.any.clear();
    }
}

#[cfg(feature = "std")]
fn invoke<E>(name: &str, handler: &mut Handler<E>, event: &E) {
    use std::panic::{AssertUnwindSafe, catch_unwind};
    if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
        log::error!("event handler for `{name}` panicked; continuing delivery");
    }
}

#[cfg(not(feature = "std"))]
fn invoke<E>(_name: &str, handler: &mut Handler<E>, event: &E) {
    handler(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    #[derive(Debug, PartialEq)]
    enum Ev {
        Moved(i32),
        Settled,
    }

    impl Named for Ev {
        fn name(&self) -> &'static str {
            match self {
                Self::Moved(_) => "moved",
                Self::Settled => "settled",
            }
        }
    }

    #[test]
    fn named_handlers_receive_matching_events_only() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        bus.on("moved", move |ev: &Ev| {
            if let Ev::Moved(x) = ev {
                sink.borrow_mut().push(*x);
            }
        });

        bus.emit(&Ev::Moved(1));
        bus.emit(&Ev::Settled);
        bus.emit(&Ev::Moved(2));

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn delivery_is_in_subscription_order() {
        let mut bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let sink = order.clone();
            bus.on("settled", move |_: &Ev| sink.borrow_mut().push(tag));
        }

        bus.emit(&Ev::Settled);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn once_unsubscribes_after_first_delivery() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        bus.once("settled", move |_: &Ev| *sink.borrow_mut() += 1);
        assert_eq!(bus.listener_count("settled"), 1);

        bus.emit(&Ev::Settled);
        bus.emit(&Ev::Settled);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.listener_count("settled"), 0);
    }

    #[test]
    fn off_removes_by_id_and_off_all_by_name() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let id = bus.on("moved", move |_: &Ev| *sink.borrow_mut() += 1);
        let sink = count.clone();
        bus.on("moved", move |_: &Ev| *sink.borrow_mut() += 10);

        assert!(bus.off("moved", id));
        assert!(!bus.off("moved", id));
        bus.emit(&Ev::Moved(0));
        assert_eq!(*count.borrow(), 10);

        bus.off_all("moved");
        bus.emit(&Ev::Moved(0));
        assert_eq!(*count.borrow(), 10);
        assert_eq!(bus.listener_count("moved"), 0);
    }

    #[test]
    fn any_handlers_see_every_event() {
        let mut bus = EventBus::new();
        let names = Rc::new(RefCell::new(Vec::new()));
        let sink = names.clone();
        let id = bus.on_any(move |ev: &Ev| sink.borrow_mut().push(ev.name()));

        bus.emit(&Ev::Moved(5));
        bus.emit(&Ev::Settled);
        assert_eq!(*names.borrow(), vec!["moved", "settled"]);

        assert!(bus.off_any(id));
        bus.emit(&Ev::Settled);
        assert_eq!(names.borrow().len(), 2);
    }

    #[test]
    fn any_handlers_run_after_named_handlers() {
        let mut bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let sink = order.clone();
        bus.on_any(move |_: &Ev| sink.borrow_mut().push("any"));
        let sink = order.clone();
        bus.on("settled", move |_: &Ev| sink.borrow_mut().push("named"));

        bus.emit(&Ev::Settled);
        assert_eq!(*order.borrow(), vec!["named", "any"]);
    }

    #[test]
    fn event_names_and_clear() {
        let mut bus = EventBus::new();
        bus.on("moved", |_: &Ev| {});
        bus.on("settled", |_: &Ev| {});
        bus.on_any(|_: &Ev| {});

        let mut names = bus.event_names();
        names.sort_unstable();
        assert_eq!(names, vec!["moved", "settled"]);
        assert_eq!(bus.any_listener_count(), 1);

        bus.clear();
        assert!(bus.event_names().is_empty());
        assert_eq!(bus.any_listener_count(), 0);
        bus.emit(&Ev::Settled);
    }

    #[cfg(feature = "std")]
    #[test]
    fn panicking_handler_does_not_stop_delivery() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        bus.on("settled", |_: &Ev| panic!("listener failure"));
        let sink = count.clone();
        bus.on("settled", move |_: &Ev| *sink.borrow_mut() += 1);

        bus.emit(&Ev::Settled);
        assert_eq!(*count.borrow(), 1);
    }

    #[cfg(feature = "std")]
    #[test]
    fn panicking_once_handler_is_still_removed() {
        let mut bus = EventBus::new();
        bus.once("settled", |_: &Ev| panic!("listener failure"));

        bus.emit(&Ev::Settled);
        assert_eq!(bus.listener_count("settled"), 0);
    }
}
