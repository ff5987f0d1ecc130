//! Subscription registry for process-wide UI events.
//!
//! The embedding shell owns a handful of document-level event sources
//! (pointer-down anywhere on the page, the vendor fullscreen-change events).
//! Components must attach and detach listeners in matching pairs across
//! repeated mount/unmount cycles, so attachment is modeled as a guard:
//! [`ListenerRegistry::attach`] returns a [`Subscription`] that detaches on
//! drop.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

type Callback<E> = Box<dyn Fn(&E) + Send + Sync>;

/// An observer registry keyed by subscription id.
pub struct ListenerRegistry<E> {
    listeners: Arc<Mutex<HashMap<u64, Callback<E>>>>,
    next_id: Arc<AtomicU64>,
}

impl<E> Clone for ListenerRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<E> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ListenerRegistry<E> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Registers a listener. Dropping the returned guard removes it.
    pub fn attach(&self, listener: impl Fn(&E) + Send + Sync + 'static) -> Subscription<E> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("listener registry poisoned")
            .insert(id, Box::new(listener));
        Subscription {
            id,
            listeners: Arc::clone(&self.listeners),
        }
    }

    /// Delivers an event to every currently attached listener. Listeners
    /// must not attach or detach from inside the callback; hand that work
    /// to a task instead.
    pub fn emit(&self, event: &E) {
        let guard = self.listeners.lock().expect("listener registry poisoned");
        for listener in guard.values() {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .expect("listener registry poisoned")
            .len()
    }
}

/// Guard for one attached listener; detaches when dropped.
pub struct Subscription<E> {
    id: u64,
    listeners: Arc<Mutex<HashMap<u64, Callback<E>>>>,
}

impl<E> Subscription<E> {
    /// Explicit detach, equivalent to dropping the guard.
    pub fn detach(self) {}
}

impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.listeners.lock() {
            guard.remove(&self.id);
        }
    }
}

/// A pointer-down somewhere on the page. `hit` carries the ids of the
/// elements under the pointer, outermost last, so a component can tell
/// whether the click landed inside its own container.
#[derive(Debug, Clone, Default)]
pub struct PointerDown {
    pub hit: Vec<String>,
}

impl PointerDown {
    pub fn inside(&self, element_id: &str) -> bool {
        self.hit.iter().any(|id| id == element_id)
    }
}

/// Fired by the fullscreen host whenever the fullscreen element changes.
#[derive(Debug, Clone, Copy)]
pub struct FullscreenChange;
