// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Change notifications.
//!
//! Observers register a callback and are invoked synchronously, in
//! subscription order, every time the owning entity emits an event.

use super::annotation::{AnnotationId, Color};

/// Handle returned by [`Listeners::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

/// A typed list of observers for one event type.
pub struct Listeners<E> {
    next_id: u64,
    callbacks: Vec<(ListenerId, Callback<E>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }

    /// Register a callback. It runs to completion before the next one is called.
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&E) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(lid, _)| *lid != id);
        self.callbacks.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> std::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

/// Mutations of an [`AnnotationStore`](super::store::AnnotationStore).
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    AnnotationAdded {
        id: AnnotationId,
        color: Color,
        start: f64,
        end: f64,
    },
    AnnotationRemoved {
        id: AnnotationId,
    },
    AnnotationChanged {
        id: AnnotationId,
        context: String,
        color: Color,
        start: f64,
        end: f64,
    },
    ContextAdded {
        name: String,
        color: Color,
    },
    ContextRemoved {
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<u32> = Listeners::new();

        let first = Rc::clone(&seen);
        listeners.subscribe(move |e| first.borrow_mut().push(("first", *e)));
        let second = Rc::clone(&seen);
        listeners.subscribe(move |e| second.borrow_mut().push(("second", *e)));

        listeners.emit(&3);
        assert_eq!(*seen.borrow(), vec![("first", 3), ("second", 3)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners: Listeners<()> = Listeners::new();
        let c = Rc::clone(&count);
        let id = listeners.subscribe(move |_| *c.borrow_mut() += 1);

        listeners.emit(&());
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(&());

        assert_eq!(*count.borrow(), 1);
        assert!(listeners.is_empty());
    }
}
