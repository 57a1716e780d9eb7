//! A fan-out registry that replays the last value to new subscribers.
//!
//! The cache and the registry share one lock: registering a subscriber
//! together with seeding it from the cache is atomic, and so is updating
//! the cache together with publishing. Every subscriber therefore sees
//! a gap-free continuation without duplicates.
//!
//! Publishing never waits. Each subscriber has its own queue, so a slow
//! subscriber only delays itself. A run produces a finite number of
//! values, which bounds every queue.

use crate::error::ProducerError;
use crate::subscription::Subscription;
use derive_more::{Display, From, Into};
use fibflow_core::mpsc;
use fibflow_core::{Clony, Slot};
use fibflow_runtime::Label;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use typed_slab::TypedSlab;

#[derive(Debug, Display, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, From, Into)]
#[display("sub:{_0}")]
pub struct SubscriberId(usize);

struct Registry<T> {
    last: Slot<T>,
    subscribers: TypedSlab<SubscriberId, mpsc::UnboundedSender<T>>,
    closed: bool,
}

pub struct ReplayHub<T> {
    label: Label,
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for ReplayHub<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            registry: self.registry.clone(),
        }
    }
}

fn lock<T>(registry: &Mutex<Registry<T>>) -> MutexGuard<'_, Registry<T>> {
    // The registry stays consistent between statements, so a poisoned
    // lock is still usable.
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clony> ReplayHub<T> {
    pub fn new(label: Label) -> Self {
        let registry = Registry {
            last: Slot::empty(),
            subscribers: TypedSlab::new(),
            closed: false,
        };
        Self {
            label,
            registry: Arc::new(Mutex::new(registry)),
        }
    }

    /// Attaches a new subscriber seeded with the cached value.
    pub fn subscribe(&self) -> Result<Subscription<T>, ProducerError> {
        let mut registry = lock(&*self.registry);
        if registry.closed {
            return Err(ProducerError::Stopped);
        }
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(last) = registry.last.cloned() {
            tx.send(last).ok();
        }
        let id = registry.subscribers.insert(tx);
        log::debug!("{id} attached to {}.", self.label);
        let entry = Entry {
            id,
            label: self.label.clone(),
            registry: Arc::downgrade(&self.registry),
        };
        Ok(Subscription::new(rx, entry))
    }

    /// Caches the value and delivers it to every attached subscriber.
    ///
    /// Returns the number of subscribers that received the value.
    pub fn publish(&self, value: T) -> usize {
        let mut registry = lock(&*self.registry);
        if registry.closed {
            return 0;
        }
        registry.last.replace(value.clone());
        let mut delivered = 0;
        let mut detached = Vec::new();
        for (id, tx) in registry.subscribers.iter() {
            if tx.send(value.clone()).is_ok() {
                delivered += 1;
            } else {
                detached.push(id);
            }
        }
        for id in detached {
            registry.subscribers.remove(id);
        }
        delivered
    }

    /// Detaches everyone and refuses new subscribers.
    pub fn close(&self) {
        let mut registry = lock(&*self.registry);
        if !registry.closed {
            registry.closed = true;
            registry.last.take().ok();
            // Dropping the senders ends every subscription.
            registry.subscribers = TypedSlab::new();
            log::debug!("{} closed.", self.label);
        }
    }

    pub fn is_closed(&self) -> bool {
        lock(&*self.registry).closed
    }

    /// The most recently published value.
    pub fn last(&self) -> Option<T> {
        lock(&*self.registry).last.cloned().ok()
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&*self.registry).subscribers.len()
    }
}

/// Removes a subscriber from the registry when dropped.
pub(crate) struct Entry<T> {
    id: SubscriberId,
    label: Label,
    registry: Weak<Mutex<Registry<T>>>,
}

impl<T> Entry<T> {
    pub(crate) fn id(&self) -> SubscriberId {
        self.id
    }
}

impl<T> Drop for Entry<T> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if lock(&*registry).subscribers.remove(self.id).is_some() {
                log::debug!("{} detached from {}.", self.id, self.label);
            }
        }
    }
}
