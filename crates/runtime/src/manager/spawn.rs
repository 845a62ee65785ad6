//! Respawning stored actors and objects.
//!
//! Spawning touches the host world, so every call here must come from the
//! primary thread. Calls from any other thread are not forwarded to the
//! primary thread: they log an error and spawn nothing.

use std::sync::Arc;

use save_core::{ActorSnapshot, ObjectSnapshot};
use tracing::warn;

use super::SlotManager;
use crate::listeners::LifecycleEvent;
use crate::world::{SpawnWorld, WorldActor, WorldObject};

impl SlotManager {
    /// Spawn the actor stored under `name` in the active slot.
    ///
    /// Physics is switched on when the snapshot recorded it and otherwise
    /// left as the spawned class sets it. Returns `None` when called off the
    /// primary thread.
    pub fn spawn_actor(&self, world: &dyn SpawnWorld, name: &str) -> Option<Arc<dyn WorldActor>> {
        if let Err(e) = self.ensure_primary("spawn_actor") {
            self.report("spawn_actor", &e);
            return None;
        }
        let Some(snapshot) = self.current_data.get::<ActorSnapshot>(name) else {
            warn!("Unable to spawn actor {}: nothing stored under that name", name);
            return None;
        };

        let actor = spawn_snapshot(world, name, snapshot)?;
        self.dispatcher
            .dispatch(vec![Arc::clone(&actor)], LifecycleEvent::PostLoad);
        Some(actor)
    }

    /// Spawn the object stored under `name` in the active slot.
    pub fn spawn_object(
        &self,
        world: &dyn SpawnWorld,
        name: &str,
        owner: Option<&dyn WorldObject>,
    ) -> Option<Arc<dyn WorldObject>> {
        if let Err(e) = self.ensure_primary("spawn_object") {
            self.report("spawn_object", &e);
            return None;
        }
        let Some(snapshot) = self.current_data.get::<ObjectSnapshot>(name) else {
            warn!("Unable to spawn object {}: nothing stored under that name", name);
            return None;
        };

        let object = spawn_object_snapshot(world, name, snapshot, owner)?;
        self.dispatcher
            .dispatch(vec![Arc::clone(&object)], LifecycleEvent::PostLoad);
        Some(object)
    }

    /// Spawn every stored actor in the order they were first stored.
    ///
    /// Returns an empty list when called off the primary thread.
    pub fn spawn_stored_actors(&self, world: &dyn SpawnWorld) -> Vec<Arc<dyn WorldActor>> {
        if let Err(e) = self.ensure_primary("spawn_stored_actors") {
            self.report("spawn_stored_actors", &e);
            return Vec::new();
        }

        let spawned: Vec<_> = self
            .current_data
            .actors()
            .filter_map(|(name, snapshot)| spawn_snapshot(world, name, snapshot))
            .collect();
        self.dispatcher
            .dispatch(spawned.clone(), LifecycleEvent::PostLoad);
        spawned
    }

    /// Spawn every stored object.
    pub fn spawn_stored_objects(
        &self,
        world: &dyn SpawnWorld,
        owner: Option<&dyn WorldObject>,
    ) -> Vec<Arc<dyn WorldObject>> {
        if let Err(e) = self.ensure_primary("spawn_stored_objects") {
            self.report("spawn_stored_objects", &e);
            return Vec::new();
        }

        let spawned: Vec<_> = self
            .current_data
            .objects()
            .filter_map(|(name, snapshot)| spawn_object_snapshot(world, name, snapshot, owner))
            .collect();
        self.dispatcher
            .dispatch(spawned.clone(), LifecycleEvent::PostLoad);
        spawned
    }
}

fn spawn_snapshot(
    world: &dyn SpawnWorld,
    name: &str,
    snapshot: &ActorSnapshot,
) -> Option<Arc<dyn WorldActor>> {
    if snapshot.class.is_null() {
        warn!("Error spawning stored actor {}: class is invalid", name);
        return None;
    }

    let Some(actor) = world.spawn_actor(&snapshot.class, &snapshot.transform, snapshot.collision)
    else {
        warn!("Spawning actor {} of class {} failed", name, snapshot.class);
        return None;
    };
    if snapshot.simulating_physics {
        actor.set_simulate_physics(true);
    }
    Some(actor)
}

fn spawn_object_snapshot(
    world: &dyn SpawnWorld,
    name: &str,
    snapshot: &ObjectSnapshot,
    owner: Option<&dyn WorldObject>,
) -> Option<Arc<dyn WorldObject>> {
    if snapshot.class.is_null() {
        warn!("Error spawning stored object {}: class is invalid", name);
        return None;
    }

    let object = world.spawn_object(&snapshot.class, owner);
    if object.is_none() {
        warn!("Spawning object {} of class {} failed", name, snapshot.class);
    }
    object
}
