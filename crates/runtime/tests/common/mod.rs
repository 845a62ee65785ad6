#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use save_runtime::save_core::{ClassRef, SpawnCollisionMethod, Transform, Vector3};
use save_runtime::{
    LifecycleEvent, LifecycleListener, ProjectInfo, SaveSystemConfig, SlotManager, SpawnWorld,
    WorldActor, WorldObject,
};

pub const VERSION: &str = "2.3";

/// Synchronous, quiet settings rooted at `dir`.
pub fn config(dir: &Path) -> SaveSystemConfig {
    let project = ProjectInfo::new("TestGame").with_version(VERSION);
    let mut config = SaveSystemConfig::for_project(project);
    config.save_dir = Some(dir.to_path_buf());
    config.multithreaded_saving = false;
    config.verbose_logging = false;
    config
}

pub fn manager(dir: &Path) -> SlotManager {
    manager_with(config(dir))
}

/// Playtime ticks hourly so tests observe a stable counter.
pub fn manager_with(config: SaveSystemConfig) -> SlotManager {
    SlotManager::builder()
        .config(config)
        .playtime_period(Duration::from_secs(3600))
        .build()
        .unwrap()
}

#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<LifecycleEvent>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: LifecycleEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl LifecycleListener for RecordingListener {
    fn pre_save(&self) {
        self.record(LifecycleEvent::PreSave);
    }

    fn post_save(&self) {
        self.record(LifecycleEvent::PostSave);
    }

    fn pre_load(&self) {
        self.record(LifecycleEvent::PreLoad);
    }

    fn post_load(&self) {
        self.record(LifecycleEvent::PostLoad);
    }

    fn new_slot_created(&self) {
        self.record(LifecycleEvent::NewSlotCreated);
    }
}

pub struct TestActor {
    name: String,
    class: ClassRef,
    transform: Transform,
    physics: AtomicBool,
    pub listener: RecordingListener,
}

impl TestActor {
    pub fn new(name: &str, class: &str, at: Vector3) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            class: ClassRef::new(class),
            transform: Transform::from_translation(at),
            physics: AtomicBool::new(false),
            listener: RecordingListener::default(),
        })
    }

    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.listener.events()
    }
}

impl LifecycleListener for TestActor {
    fn pre_save(&self) {
        self.listener.pre_save();
    }

    fn post_save(&self) {
        self.listener.post_save();
    }

    fn post_load(&self) {
        self.listener.post_load();
    }

    fn as_actor(&self) -> Option<&dyn WorldActor> {
        Some(self)
    }
}

impl WorldObject for TestActor {
    fn debug_name(&self) -> String {
        self.name.clone()
    }

    fn class(&self) -> ClassRef {
        self.class.clone()
    }
}

impl WorldActor for TestActor {
    fn transform(&self) -> Transform {
        self.transform
    }

    fn is_simulating_physics(&self) -> bool {
        self.physics.load(Ordering::SeqCst)
    }

    fn set_simulate_physics(&self, enabled: bool) {
        self.physics.store(enabled, Ordering::SeqCst);
    }
}

pub struct TestObject {
    name: String,
    class: ClassRef,
    pub owner: Option<String>,
    pub listener: RecordingListener,
}

impl TestObject {
    pub fn new(name: &str, class: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            class: ClassRef::new(class),
            owner: None,
            listener: RecordingListener::default(),
        })
    }
}

impl LifecycleListener for TestObject {
    fn pre_save(&self) {
        self.listener.pre_save();
    }

    fn post_save(&self) {
        self.listener.post_save();
    }

    fn post_load(&self) {
        self.listener.post_load();
    }
}

impl WorldObject for TestObject {
    fn debug_name(&self) -> String {
        self.name.clone()
    }

    fn class(&self) -> ClassRef {
        self.class.clone()
    }
}

/// Spawns test actors and remembers every spawn request.
#[derive(Default)]
pub struct TestWorld {
    pub refused_class: Option<ClassRef>,
    /// Actors of this class start with physics on.
    pub simulating_class: Option<ClassRef>,
    actors: Mutex<Vec<(Arc<TestActor>, SpawnCollisionMethod)>>,
    objects: Mutex<Vec<Arc<TestObject>>>,
}

impl TestWorld {
    pub fn spawned_actors(&self) -> Vec<(Arc<TestActor>, SpawnCollisionMethod)> {
        self.actors.lock().unwrap().clone()
    }

    pub fn spawned_objects(&self) -> Vec<Arc<TestObject>> {
        self.objects.lock().unwrap().clone()
    }
}

impl SpawnWorld for TestWorld {
    fn spawn_actor(
        &self,
        class: &ClassRef,
        transform: &Transform,
        collision: SpawnCollisionMethod,
    ) -> Option<Arc<dyn WorldActor>> {
        if self.refused_class.as_ref() == Some(class) {
            return None;
        }
        let actor = TestActor::new(
            &format!("spawned_{}", class.path()),
            class.path(),
            transform.translation,
        );
        if self.simulating_class.as_ref() == Some(class) {
            actor.set_simulate_physics(true);
        }
        self.actors
            .lock()
            .unwrap()
            .push((Arc::clone(&actor), collision));
        Some(actor as Arc<dyn WorldActor>)
    }

    fn spawn_object(
        &self,
        class: &ClassRef,
        owner: Option<&dyn WorldObject>,
    ) -> Option<Arc<dyn WorldObject>> {
        let object = Arc::new(TestObject {
            name: format!("spawned_{}", class.path()),
            class: class.clone(),
            owner: owner.map(|o| o.debug_name()),
            listener: RecordingListener::default(),
        });
        self.objects.lock().unwrap().push(Arc::clone(&object));
        Some(object as Arc<dyn WorldObject>)
    }
}
