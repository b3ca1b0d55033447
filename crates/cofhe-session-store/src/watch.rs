//! Watchable state containers.
//!
//! A [`Watchable`] is a single explicit state object exposing a snapshot
//! accessor, setter-funneled mutation, and observer registration with a
//! deterministic unsubscribe handle. All mutation goes through [`update`],
//! which notifies listeners synchronously with a complete snapshot: a
//! listener never observes partially-applied state.
//!
//! [`update`]: Watchable::update

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct ListenerTable<T> {
    next_id: u64,
    entries: HashMap<u64, Listener<T>>,
}

struct Shared<T> {
    state: RwLock<T>,
    listeners: Mutex<ListenerTable<T>>,
}

/// A reactive state container.
///
/// Cloning is cheap and shares the underlying state. Listeners are invoked
/// while the listener table is locked, which serializes notification with
/// unsubscription: once [`Subscription::unsubscribe`] (or `Drop`) returns,
/// the listener can never be invoked again. Listeners must not call back
/// into the same container.
pub struct Watchable<T> {
    inner: Arc<Shared<T>>,
}

impl<T> Clone for Watchable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Watchable<T> {
    /// Create a new container with an initial state.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Shared {
                state: RwLock::new(initial),
                listeners: Mutex::new(ListenerTable {
                    next_id: 0,
                    entries: HashMap::new(),
                }),
            }),
        }
    }

    /// Get a snapshot of the current state.
    pub fn get(&self) -> T {
        self.inner.state.read().unwrap().clone()
    }

    /// Mutate the state through a closure, then notify every listener with
    /// the fully updated snapshot.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.inner.state.write().unwrap();
            let result = f(&mut state);
            (result, state.clone())
        };

        let listeners = self.inner.listeners.lock().unwrap();
        for listener in listeners.entries.values() {
            listener(&snapshot);
        }

        result
    }

    /// Register a listener for future state changes.
    ///
    /// The listener is not called with the current state; use [`watch`] for
    /// the snapshot-first variant.
    ///
    /// [`watch`]: Watchable::watch
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let mut listeners = self.inner.listeners.lock().unwrap();
        self.register(&mut listeners, Arc::new(listener))
    }

    /// Register a listener, invoking it immediately with the current state
    /// before any external change can occur.
    pub fn watch(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let listener: Listener<T> = Arc::new(listener);

        // Seed under the listener lock so no notification can interleave
        // between the snapshot and the registration.
        let mut listeners = self.inner.listeners.lock().unwrap();
        let snapshot = self.inner.state.read().unwrap().clone();
        listener(&snapshot);
        self.register(&mut listeners, listener)
    }

    fn register(&self, listeners: &mut ListenerTable<T>, listener: Listener<T>) -> Subscription {
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.insert(id, listener);

        let weak: Weak<Shared<T>> = Arc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.listeners.lock().unwrap().entries.remove(&id);
                }
            })),
        }
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        self.inner.listeners.lock().unwrap().entries.len()
    }
}

/// Handle for a registered listener.
///
/// The listener is removed when [`unsubscribe`] is called or when the handle
/// is dropped, whichever comes first. Removal is deterministic; it never
/// depends on garbage collection of the container.
///
/// [`unsubscribe`]: Subscription::unsubscribe
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
