//! Explicit observer lists for change notifications.
//!
//! Every mutation in the core completes fully before its notification
//! fires, so observers always see a consistent post-state. Subscription is
//! symmetric: whoever subscribes is responsible for unsubscribing on
//! teardown, using the id handed back by [`Listeners::subscribe`].

use std::fmt;

/// Handle returned by [`Listeners::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// An ordered list of callbacks fired synchronously after a mutation.
pub struct Listeners<E> {
    next_id: u64,
    subscribers: Vec<(ListenerId, Box<dyn FnMut(&E)>)>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Register a callback. Callbacks fire in subscription order.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a previously registered callback. Returns `false` if the id
    /// was already removed (or never issued) — a no-op, not an error.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Fan an event out to every subscriber, in subscription order.
    pub fn emit(&mut self, event: &E) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
