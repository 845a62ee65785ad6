//! Lifecycle notifications delivered to game objects.
//!
//! Anything that wants to react to saves, loads and new slots implements
//! [`LifecycleListener`] and registers itself with the manager's
//! [`ListenerRegistry`]. Every callback has an empty default so listeners
//! only override the events they care about.
//!
//! # Ordering
//!
//! - `pre_*` notifications are issued before the mutation or I/O starts
//! - `post_*` notifications are issued after the I/O has been started
//! - With background events enabled, callbacks run on the worker pool and
//!   the manager does not wait for them

mod registry;

pub use registry::ListenerRegistry;

use crate::world::WorldActor;

/// Save-system lifecycle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum LifecycleEvent {
    PreSave,
    PostSave,
    PreLoad,
    PostLoad,
    NewSlotCreated,
}

/// Receives save-system lifecycle notifications.
///
/// Callbacks take `&self`; listeners that keep state use interior
/// mutability, since background dispatch calls them from worker threads.
pub trait LifecycleListener: Send + Sync {
    fn pre_save(&self) {}

    fn post_save(&self) {}

    fn pre_load(&self) {}

    fn post_load(&self) {}

    fn new_slot_created(&self) {}

    /// Registered actors return themselves so automatic actor capture can
    /// snapshot them.
    fn as_actor(&self) -> Option<&dyn WorldActor> {
        None
    }

    /// Route `event` to the matching callback.
    fn on_event(&self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::PreSave => self.pre_save(),
            LifecycleEvent::PostSave => self.post_save(),
            LifecycleEvent::PreLoad => self.pre_load(),
            LifecycleEvent::PostLoad => self.post_load(),
            LifecycleEvent::NewSlotCreated => self.new_slot_created(),
        }
    }
}
