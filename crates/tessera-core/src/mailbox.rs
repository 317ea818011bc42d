//! Mailboxes: shared event hubs for component messages.
//!
//! ## Learning: Reference Semantics in a Value World
//!
//! Components are plain values, but the mailbox that collects their
//! messages must be shared. A container renders its children, then
//! forwards every child mailbox into its own. Whoever ends up holding
//! the container's mailbox may subscribe *after* all of that wiring is
//! done and still needs to see every message. That only works if every
//! holder points at the same subscriber list, so `Mailbox` is a cheap
//! handle around an `Rc`. Cloning it clones the handle, not the hub.
//!
//! ## Reentrancy
//!
//! Dispatching from inside a subscriber to the *same* mailbox does not
//! recurse. The message is queued and delivered by the outer `dispatch`
//! once the current message has reached every subscriber. Each message
//! is delivered to the subscribers registered when its delivery starts,
//! so a subscriber can never see the same dispatch twice.
//!
//! Mailboxes are confined to the UI thread (`Rc` makes them `!Send`).

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

type Subscriber<M> = Rc<dyn Fn(&M)>;

/// A shared, single-threaded event hub.
pub struct Mailbox<M> {
    inner: Rc<Inner<M>>,
}

struct Inner<M> {
    subscribers: RefCell<Vec<Subscriber<M>>>,
    pending: RefCell<VecDeque<M>>,
    draining: Cell<bool>,
}

/// Ends a drain even if a subscriber panics. Messages still queued by
/// that drain are dropped with it.
struct DrainGuard<'a, M>(&'a Inner<M>);

impl<M> Drop for DrainGuard<'_, M> {
    fn drop(&mut self) {
        self.0.pending.borrow_mut().clear();
        self.0.draining.set(false);
    }
}

impl<M: 'static> Mailbox<M> {
    /// Creates an empty mailbox.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                subscribers: RefCell::new(Vec::new()),
                pending: RefCell::new(VecDeque::new()),
                draining: Cell::new(false),
            }),
        }
    }

    /// Registers a subscriber for every future message.
    pub fn subscribe(&self, subscriber: impl Fn(&M) + 'static) {
        self.inner.subscribers.borrow_mut().push(Rc::new(subscriber));
    }

    /// Delivers `message` to every subscriber, in subscription order.
    ///
    /// Returns once the message (and anything dispatched to this mailbox
    /// while delivering it) has reached all subscribers.
    pub fn dispatch(&self, message: M) {
        self.inner.pending.borrow_mut().push_back(message);
        if self.inner.draining.get() {
            return;
        }

        self.inner.draining.set(true);
        let _guard = DrainGuard(&*self.inner);

        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(message) = next else { break };

            // Snapshot so subscribers may subscribe/unregister while we iterate
            let subscribers: Vec<Subscriber<M>> = self.inner.subscribers.borrow().clone();
            for subscriber in &subscribers {
                subscriber(&message);
            }
        }
    }

    /// Re-dispatches everything this mailbox receives into `target`.
    pub fn forward(&self, target: &Mailbox<M>)
    where
        M: Clone,
    {
        if self.ptr_eq(target) {
            tracing::warn!("Ignoring request to forward a mailbox into itself");
            return;
        }
        let target = target.clone();
        self.subscribe(move |message: &M| target.dispatch(message.clone()));
    }

    /// Drops every subscriber, including forwarding links.
    ///
    /// Used right before the view subtree that fed this mailbox is rebuilt.
    pub fn unregister_subscribers(&self) {
        self.inner.subscribers.borrow_mut().clear();
    }

    /// Returns the number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Returns true if a dispatch is currently being delivered.
    pub fn is_dispatching(&self) -> bool {
        self.inner.draining.get()
    }

    /// Returns true if both handles point at the same hub.
    pub fn ptr_eq(&self, other: &Mailbox<M>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<M: 'static> Default for Mailbox<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for Mailbox<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<M> fmt::Debug for Mailbox<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mailbox")
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .field("pending", &self.inner.pending.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<M: Clone + 'static>(mailbox: &Mailbox<M>) -> Rc<RefCell<Vec<M>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        mailbox.subscribe(move |message: &M| sink.borrow_mut().push(message.clone()));
        log
    }

    #[test]
    fn test_dispatch_reaches_subscribers_in_order() {
        let mailbox = Mailbox::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for id in 0..3 {
            let order = Rc::clone(&order);
            mailbox.subscribe(move |message: &&str| order.borrow_mut().push((id, *message)));
        }

        mailbox.dispatch("hello");
        assert_eq!(*order.borrow(), vec![(0, "hello"), (1, "hello"), (2, "hello")]);
    }

    #[test]
    fn test_forward_delivers_exactly_once() {
        let child = Mailbox::new();
        let parent = Mailbox::new();
        let log = recorder(&parent);

        child.forward(&parent);
        child.dispatch(7);

        assert_eq!(*log.borrow(), vec![7]);
    }

    #[test]
    fn test_late_subscriber_sees_forwarded_messages() {
        let child = Mailbox::new();
        let parent = Mailbox::new();
        child.forward(&parent);

        // Subscription happens after the forwarding chain was wired
        let log = recorder(&parent);
        child.dispatch("tap");

        assert_eq!(*log.borrow(), vec!["tap"]);
    }

    #[test]
    fn test_unregister_subscribers() {
        let mailbox = Mailbox::new();
        let log = recorder(&mailbox);

        mailbox.dispatch(1);
        mailbox.unregister_subscribers();
        mailbox.dispatch(2);

        assert_eq!(*log.borrow(), vec![1]);
        assert_eq!(mailbox.subscriber_count(), 0);
    }

    #[test]
    fn test_reentrant_dispatch_is_queued() {
        let mailbox: Mailbox<u32> = Mailbox::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let handle = mailbox.clone();
        let first = Rc::clone(&order);
        mailbox.subscribe(move |message: &u32| {
            first.borrow_mut().push(format!("a{message}"));
            if *message == 1 {
                handle.dispatch(2);
            }
        });
        let second = Rc::clone(&order);
        mailbox.subscribe(move |message: &u32| second.borrow_mut().push(format!("b{message}")));

        mailbox.dispatch(1);

        // Message 2 waits until message 1 reached every subscriber
        assert_eq!(*order.borrow(), vec!["a1", "b1", "a2", "b2"]);
        assert!(!mailbox.is_dispatching());
    }

    #[test]
    fn test_subscriber_added_during_dispatch_skips_current_message() {
        let mailbox: Mailbox<u32> = Mailbox::new();
        let late = Rc::new(RefCell::new(Vec::new()));

        let handle = mailbox.clone();
        let late_log = Rc::clone(&late);
        let added = Rc::new(Cell::new(false));
        mailbox.subscribe(move |_: &u32| {
            if !added.replace(true) {
                let late_log = Rc::clone(&late_log);
                handle.subscribe(move |message: &u32| late_log.borrow_mut().push(*message));
            }
        });

        mailbox.dispatch(1);
        mailbox.dispatch(2);

        assert_eq!(*late.borrow(), vec![2]);
    }

    #[test]
    fn test_panicking_subscriber_drops_queued_messages() {
        let mailbox: Mailbox<u32> = Mailbox::new();
        let log = recorder(&mailbox);
        let handle = mailbox.clone();
        mailbox.subscribe(move |message: &u32| {
            if *message == 1 {
                handle.dispatch(2);
                panic!("subscriber failed");
            }
        });

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mailbox.dispatch(1)));
        assert!(result.is_err());
        assert!(!mailbox.is_dispatching());

        mailbox.dispatch(3);
        assert_eq!(*log.borrow(), vec![1, 3]);
    }

    #[test]
    fn test_clone_shares_hub() {
        let mailbox: Mailbox<()> = Mailbox::new();
        let handle = mailbox.clone();
        handle.subscribe(|_| {});

        assert!(mailbox.ptr_eq(&handle));
        assert_eq!(mailbox.subscriber_count(), 1);
    }

    #[test]
    fn test_forward_into_self_is_ignored() {
        let mailbox: Mailbox<u8> = Mailbox::new();
        mailbox.forward(&mailbox);
        assert_eq!(mailbox.subscriber_count(), 0);
    }
}
