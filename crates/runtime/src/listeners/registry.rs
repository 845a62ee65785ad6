//! Registry of live lifecycle listeners.

use std::sync::{Arc, Weak};

use super::LifecycleListener;

/// Weak handles to every registered listener.
///
/// The registry never keeps a listener alive: once the owner drops its
/// `Arc`, the entry is pruned on the next call to [`ListenerRegistry::live`].
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Weak<dyn LifecycleListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`. Registering the same instance twice is a no-op.
    pub fn register<L: LifecycleListener + 'static>(&mut self, listener: &Arc<L>) {
        let weak: Weak<L> = Arc::downgrade(listener);
        let weak: Weak<dyn LifecycleListener> = weak;
        let ptr = Arc::as_ptr(listener) as *const ();
        if !self.listeners.iter().any(|w| w.as_ptr() as *const () == ptr) {
            self.listeners.push(weak);
        }
    }

    /// Remove `listener`. Returns whether it was registered.
    pub fn unregister<L: LifecycleListener + 'static>(&mut self, listener: &Arc<L>) -> bool {
        let ptr = Arc::as_ptr(listener) as *const ();
        let before = self.listeners.len();
        self.listeners.retain(|w| w.as_ptr() as *const () != ptr);
        self.listeners.len() != before
    }

    /// Strong handles to every listener still alive, in registration order.
    pub fn live(&mut self) -> Vec<Arc<dyn LifecycleListener>> {
        self.listeners.retain(|w| w.strong_count() > 0);
        self.listeners.iter().filter_map(Weak::upgrade).collect()
    }

    /// Number of registered entries, including ones not yet pruned.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
