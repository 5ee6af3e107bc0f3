//! Navigation observers.
//!
//! # Responsibilities
//! - Keep callbacks in subscription order
//! - Invoke them synchronously after every navigation
//! - Hand out `Subscription` guards that remove their observer
//!
//! # Design Decisions
//! - Single-threaded (`Rc`/`RefCell`): observers run on the navigating thread
//! - Notification iterates a snapshot, so observers may unsubscribe
//!   themselves or others mid-pass without a borrow conflict
//! - A guard releases on `unsubscribe()` or on drop; `detach()` keeps the
//!   observer for the registry's lifetime

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::navigation::state::NavigationState;

type Callback = Rc<RefCell<dyn FnMut(&NavigationState)>>;

#[derive(Default)]
struct Observers {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

impl Observers {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }
}

/// Ordered set of navigation callbacks.
#[derive(Default)]
pub struct ObserverRegistry {
    inner: Rc<RefCell<Observers>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer; it runs after every observer registered before it.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(&NavigationState) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;

        let callback: Callback = Rc::new(RefCell::new(observer));
        inner.entries.push((id, callback));
        tracing::trace!(observer = id, total = inner.entries.len(), "Observer subscribed");

        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
            active: true,
        }
    }

    /// Call every observer with `state`, in subscription order.
    pub fn notify(&self, state: &NavigationState) {
        let snapshot: Vec<(u64, Callback)> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(id, cb)| (*id, Rc::clone(cb)))
            .collect();

        for (id, callback) in snapshot {
            // Removed by an earlier observer in this pass.
            if !self.inner.borrow().contains(id) {
                continue;
            }
            (&mut *callback.borrow_mut())(state);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.len())
            .finish()
    }
}

/// Handle for a registered observer.
///
/// Calling [`Subscription::unsubscribe`] (or dropping the handle) removes the
/// observer; later navigations no longer reach it.
#[must_use = "dropping a Subscription unsubscribes the observer immediately"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Observers>>,
    active: bool,
}

impl Subscription {
    /// Remove the observer now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Keep the observer registered for as long as the registry lives.
    pub fn detach(mut self) {
        self.active = false;
    }

    /// True while the observer is still registered.
    pub fn is_active(&self) -> bool {
        self.active
            && self
                .registry
                .upgrade()
                .is_some_and(|inner| {
                    let registered = inner.borrow().contains(self.id);
                    registered
                })
    }

    fn release(&mut self) {
        if !std::mem::replace(&mut self.active, false) {
            return;
        }
        if let Some(inner) = self.registry.upgrade() {
            // Dropped outside the borrow: the callback may own other subscriptions.
            let removed = {
                let mut observers = inner.borrow_mut();
                let position = observers.entries.iter().position(|(id, _)| *id == self.id);
                position.map(|i| observers.entries.remove(i))
            };
            if removed.is_some() {
                tracing::trace!(observer = self.id, "Observer unsubscribed");
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
