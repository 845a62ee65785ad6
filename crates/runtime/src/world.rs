//! Seams to the host engine's live objects.
//!
//! The save system never creates game objects itself. It records what it
//! needs from [`WorldObject`]/[`WorldActor`] instances and asks a
//! [`SpawnWorld`] to bring them back on load.

use std::sync::Arc;

use save_core::{ClassRef, SpawnCollisionMethod, Transform};

use crate::listeners::LifecycleListener;

/// A live object whose class can be recorded and respawned.
pub trait WorldObject: LifecycleListener {
    /// Name used when the caller stores the object without one.
    fn debug_name(&self) -> String;

    fn class(&self) -> ClassRef;
}

/// A live object placed in the world.
pub trait WorldActor: WorldObject {
    fn transform(&self) -> Transform;

    fn is_simulating_physics(&self) -> bool;

    fn set_simulate_physics(&self, enabled: bool);
}

/// Spawn capability of the host engine.
pub trait SpawnWorld {
    /// Spawn an actor of `class` at `transform`; `None` when the engine
    /// refused (for example a collision with `DontSpawnIfColliding`).
    fn spawn_actor(
        &self,
        class: &ClassRef,
        transform: &Transform,
        collision: SpawnCollisionMethod,
    ) -> Option<Arc<dyn WorldActor>>;

    fn spawn_object(
        &self,
        class: &ClassRef,
        owner: Option<&dyn WorldObject>,
    ) -> Option<Arc<dyn WorldObject>>;
}
