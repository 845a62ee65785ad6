//! Typed access to the active slot's values.

use save_core::{ActorSnapshot, ObjectSnapshot, SpawnCollisionMethod, StoredValue, ValueStore};
use tracing::{debug, warn};

use super::{CURRENT_LEVEL_KEY, SlotManager};
use crate::world::{WorldActor, WorldObject};

impl SlotManager {
    /// Store `value` under `name` in the active slot.
    ///
    /// Null class references are rejected with a warning.
    pub fn store<V: StoredValue>(&mut self, name: &str, value: V) -> bool {
        match self.current_data.insert(name, value) {
            Ok(()) => {
                if self.config.verbose_logging {
                    debug!("Stored {} {}", V::KIND, name);
                }
                true
            }
            Err(e) => {
                warn!("Unable to store {}: {}", name, e);
                false
            }
        }
    }

    /// Read `name` from the active slot, or the kind's zero value.
    pub fn get<V: StoredValue>(&self, name: &str) -> V {
        match self.current_data.get::<V>(name) {
            Some(value) => value.clone(),
            None => {
                warn!("No {} named {} in the active slot", V::KIND, name);
                V::zero()
            }
        }
    }

    /// Read `<base>0 .. <base>(len - 1)`; missing elements are zero values.
    pub fn get_array<V: StoredValue>(&self, base: &str, len: usize) -> Vec<V> {
        self.current_data.get_array(base, len)
    }

    /// Remove `name` from every category of the active slot.
    pub fn erase_value(&mut self, name: &str) -> bool {
        let erased = self.current_data.erase(name);
        if !erased {
            warn!("Unable to erase {}: no value stored under that name", name);
        }
        erased
    }

    /// Snapshot `actor` under `name`, or under its debug name when `name`
    /// is empty. The actor's own save hooks run around the capture.
    pub fn store_actor(
        &mut self,
        name: &str,
        actor: Option<&dyn WorldActor>,
        collision: SpawnCollisionMethod,
    ) -> bool {
        let Some(actor) = actor else {
            warn!("Unable to store actor {}: actor is null", name);
            return false;
        };

        actor.pre_save();
        let stored = self.capture_actor(name, actor, collision);
        actor.post_save();
        stored
    }

    /// Record `object`'s class under `name`, or under its debug name when
    /// `name` is empty.
    pub fn store_object(&mut self, name: &str, object: Option<&dyn WorldObject>) -> bool {
        let Some(object) = object else {
            warn!("Unable to store object {}: object is null", name);
            return false;
        };

        object.pre_save();
        let name = if name.is_empty() {
            object.debug_name()
        } else {
            name.to_owned()
        };
        let stored = self.store(&name, ObjectSnapshot::new(object.class()));
        object.post_save();
        stored
    }

    /// Remember the level the player is in.
    pub fn save_current_level(&mut self, level: &str) -> bool {
        self.store(CURRENT_LEVEL_KEY, level.to_owned())
    }

    /// Level recorded by [`SlotManager::save_current_level`].
    pub fn stored_level(&self) -> String {
        self.get::<String>(CURRENT_LEVEL_KEY)
    }

    /// Read-only view of the active slot's values.
    pub fn current_data(&self) -> &ValueStore {
        &self.current_data
    }

    pub(super) fn capture_actor(
        &mut self,
        name: &str,
        actor: &dyn WorldActor,
        collision: SpawnCollisionMethod,
    ) -> bool {
        let name = if name.is_empty() {
            actor.debug_name()
        } else {
            name.to_owned()
        };
        let snapshot = ActorSnapshot {
            class: actor.class(),
            transform: actor.transform(),
            collision,
            simulating_physics: actor.is_simulating_physics(),
        };
        self.store(&name, snapshot)
    }

    /// Snapshot every registered listener that is an actor.
    pub(super) fn capture_registered_actors(&mut self) {
        let live = self.listeners.live();
        let mut captured = 0;
        for listener in &live {
            if let Some(actor) = listener.as_actor()
                && self.capture_actor("", actor, SpawnCollisionMethod::Undefined)
            {
                captured += 1;
            }
        }
        if self.config.verbose_logging {
            debug!("Captured {} registered actor(s)", captured);
        }
    }
}
