//! Lifecycle notification dispatch.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;

use crate::listeners::{LifecycleEvent, LifecycleListener};

/// Delivers one [`LifecycleEvent`] to a set of listeners.
///
/// In foreground mode callbacks run inline on the caller's thread, in
/// target order. In background mode the whole batch runs on the blocking
/// pool and the caller does not wait for it; completion is not observable.
pub struct NotificationDispatcher {
    runtime: Handle,
    background: bool,
}

impl NotificationDispatcher {
    pub fn new(runtime: Handle, background: bool) -> Self {
        Self {
            runtime,
            background,
        }
    }

    pub fn set_background(&mut self, background: bool) {
        self.background = background;
    }

    pub fn is_background(&self) -> bool {
        self.background
    }

    pub fn dispatch<T>(&self, targets: Vec<Arc<T>>, event: LifecycleEvent)
    where
        T: LifecycleListener + ?Sized + 'static,
    {
        if targets.is_empty() {
            return;
        }

        debug!("Dispatching {} to {} listener(s)", event, targets.len());

        if self.background {
            // fire-and-forget
            drop(self.runtime.spawn_blocking(move || deliver(&targets, event)));
        } else {
            deliver(&targets, event);
        }
    }
}

fn deliver<T: LifecycleListener + ?Sized>(targets: &[Arc<T>], event: LifecycleEvent) {
    for target in targets {
        target.on_event(event);
    }
}
