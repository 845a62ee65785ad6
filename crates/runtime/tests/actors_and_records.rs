//! Actor/object capture, respawning and record flattening.

mod common;

use save_runtime::save_core::{ActorSnapshot, ClassRef, ObjectSnapshot, SpawnCollisionMethod, Vector3};
use save_runtime::{LifecycleEvent, WorldActor, WorldObject};
use serde::Serialize;
use tempfile::TempDir;

use common::{TestActor, TestObject, TestWorld, config, manager, manager_with};

#[test]
fn test_store_actor_runs_hooks_and_records_snapshot() {
    let temp = TempDir::new().unwrap();
    let mut manager = manager(temp.path());
    manager.new_game("A", false);

    let actor = TestActor::new("crate_01", "/Game/Crate", Vector3::new(4.0, 5.0, 6.0));
    actor.set_simulate_physics(true);

    assert!(manager.store_actor(
        "crate",
        Some(&*actor as &dyn WorldActor),
        SpawnCollisionMethod::AlwaysSpawn
    ));

    assert_eq!(
        actor.events(),
        vec![LifecycleEvent::PreSave, LifecycleEvent::PostSave]
    );
    let snapshot = manager.get::<ActorSnapshot>("crate");
    assert_eq!(snapshot.class, ClassRef::new("/Game/Crate"));
    assert_eq!(snapshot.transform.translation, Vector3::new(4.0, 5.0, 6.0));
    assert_eq!(snapshot.collision, SpawnCollisionMethod::AlwaysSpawn);
    assert!(snapshot.simulating_physics);
    assert_eq!(manager.actor_names(), ["crate"]);
}

#[test]
fn test_store_actor_rejects_missing_actor() {
    let temp = TempDir::new().unwrap();
    let mut manager = manager(temp.path());
    manager.new_game("A", false);

    assert!(!manager.store_actor("ghost", None, SpawnCollisionMethod::Undefined));
    assert!(!manager.store_object("ghost", None));
    assert!(manager.actor_names().is_empty());
}

#[test]
fn test_empty_name_falls_back_to_debug_name() {
    let temp = TempDir::new().unwrap();
    let mut manager = manager(temp.path());
    manager.new_game("A", false);

    let actor = TestActor::new("door_7", "/Game/Door", Vector3::ZERO);
    let object = TestObject::new("quest_log", "/Game/QuestLog");

    assert!(manager.store_actor("", Some(&*actor as &dyn WorldActor), SpawnCollisionMethod::Undefined));
    assert!(manager.store_object("", Some(&*object as &dyn WorldObject)));

    assert_eq!(manager.actor_names(), ["door_7"]);
    assert_eq!(
        manager.get::<ObjectSnapshot>("quest_log").class,
        ClassRef::new("/Game/QuestLog")
    );
}

#[test]
fn test_spawn_actor_reapplies_physics_and_notifies() {
    let temp = TempDir::new().unwrap();
    let mut manager = manager(temp.path());
    manager.new_game("A", false);
    let actor = TestActor::new("barrel", "/Game/Barrel", Vector3::new(1.0, 0.0, 0.0));
    actor.set_simulate_physics(true);
    manager.store_actor(
        "barrel",
        Some(&*actor as &dyn WorldActor),
        SpawnCollisionMethod::DontSpawnIfColliding,
    );

    let world = TestWorld::default();
    let spawned = manager.spawn_actor(&world, "barrel").unwrap();

    assert!(spawned.is_simulating_physics());
    assert_eq!(spawned.transform().translation, Vector3::new(1.0, 0.0, 0.0));
    let requests = world.spawned_actors();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1, SpawnCollisionMethod::DontSpawnIfColliding);
    assert_eq!(requests[0].0.events(), vec![LifecycleEvent::PostLoad]);
}

#[test]
fn test_spawn_leaves_class_physics_when_snapshot_was_still() {
    let temp = TempDir::new().unwrap();
    let mut manager = manager(temp.path());
    manager.new_game("A", false);
    let actor = TestActor::new("cart", "/Game/Cart", Vector3::ZERO);
    manager.store_actor("cart", Some(&*actor as &dyn WorldActor), SpawnCollisionMethod::Undefined);

    let mut world = TestWorld::default();
    world.simulating_class = Some(ClassRef::new("/Game/Cart"));

    let spawned = manager.spawn_actor(&world, "cart").unwrap();
    assert!(spawned.is_simulating_physics());

    let all = manager.spawn_stored_actors(&world);
    assert_eq!(all.len(), 1);
    assert!(all[0].is_simulating_physics());
}

#[test]
fn test_spawn_missing_or_refused_actor() {
    let temp = TempDir::new().unwrap();
    let mut manager = manager(temp.path());
    manager.new_game("A", false);
    let actor = TestActor::new("rock", "/Game/Rock", Vector3::ZERO);
    manager.store_actor("rock", Some(&*actor as &dyn WorldActor), SpawnCollisionMethod::Undefined);

    let mut world = TestWorld::default();
    world.refused_class = Some(ClassRef::new("/Game/Rock"));

    assert!(manager.spawn_actor(&world, "missing").is_none());
    assert!(manager.spawn_actor(&world, "rock").is_none());
    assert!(world.spawned_actors().is_empty());
}

#[test]
fn test_spawn_stored_actors_in_store_order() {
    let temp = TempDir::new().unwrap();
    let mut manager = manager(temp.path());
    manager.new_game("A", false);
    for (name, class) in [("zeta", "/Game/Z"), ("alpha", "/Game/A"), ("mid", "/Game/M")] {
        let actor = TestActor::new(name, class, Vector3::ZERO);
        manager.store_actor(name, Some(&*actor as &dyn WorldActor), SpawnCollisionMethod::AlwaysSpawn);
    }

    let world = TestWorld::default();
    let spawned = manager.spawn_stored_actors(&world);

    let classes: Vec<_> = spawned.iter().map(|a| a.class().path().to_owned()).collect();
    assert_eq!(classes, ["/Game/Z", "/Game/A", "/Game/M"]);
}

#[test]
fn test_spawn_objects_with_owner() {
    let temp = TempDir::new().unwrap();
    let mut manager = manager(temp.path());
    manager.new_game("A", false);
    let quest = TestObject::new("quest", "/Game/Quest");
    let journal = TestObject::new("journal", "/Game/Journal");
    manager.store_object("quest", Some(&*quest as &dyn WorldObject));
    manager.store_object("journal", Some(&*journal as &dyn WorldObject));

    let world = TestWorld::default();
    let owner = TestObject::new("player", "/Game/Player");

    let single = manager.spawn_object(&world, "quest", Some(&*owner as &dyn WorldObject));
    assert_eq!(single.unwrap().class(), ClassRef::new("/Game/Quest"));

    let all = manager.spawn_stored_objects(&world, None);
    assert_eq!(all.len(), 2);

    let spawned = world.spawned_objects();
    assert_eq!(spawned[0].owner.as_deref(), Some("player"));
    assert!(spawned.iter().all(|o| o.listener.events() == vec![LifecycleEvent::PostLoad]));
}

#[test]
fn test_spawn_rejected_off_primary_thread() {
    let temp = TempDir::new().unwrap();
    let mut manager = manager(temp.path());
    manager.new_game("A", false);
    let actor = TestActor::new("rock", "/Game/Rock", Vector3::ZERO);
    manager.store_actor("rock", Some(&*actor as &dyn WorldActor), SpawnCollisionMethod::Undefined);
    let world = TestWorld::default();

    std::thread::scope(|scope| {
        scope
            .spawn(|| {
                assert!(manager.spawn_actor(&world, "rock").is_none());
                assert!(manager.spawn_stored_actors(&world).is_empty());
            })
            .join()
            .unwrap();
    });

    assert!(world.spawned_actors().is_empty());
}

#[test]
fn test_automatic_actor_capture_on_save() {
    let temp = TempDir::new().unwrap();
    let mut config = config(temp.path());
    config.automatic_actor_saving = true;
    let mut manager = manager_with(config);
    manager.new_game("A", false);

    let torch = TestActor::new("torch", "/Game/Torch", Vector3::new(0.0, 0.0, 2.0));
    manager.register_listener(&torch);

    assert!(manager.save_game("A", 0));

    assert_eq!(manager.actor_names(), ["torch"]);
    assert_eq!(
        manager.get::<ActorSnapshot>("torch").collision,
        SpawnCollisionMethod::Undefined
    );
    assert_eq!(
        torch.events(),
        vec![LifecycleEvent::PreSave, LifecycleEvent::PostSave]
    );
}

#[test]
fn test_stored_actors_survive_a_session() {
    let temp = TempDir::new().unwrap();
    {
        let mut manager = manager(temp.path());
        manager.new_game("A", false);
        let actor = TestActor::new("chest", "/Game/Chest", Vector3::new(9.0, 9.0, 0.0));
        manager.store_actor("chest", Some(&*actor as &dyn WorldActor), SpawnCollisionMethod::AlwaysSpawn);
        manager.save_game("A", 0);
    }

    let mut manager = manager(temp.path());
    manager.load_game("A", 0);
    let world = TestWorld::default();

    let spawned = manager.spawn_stored_actors(&world);
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].transform().translation, Vector3::new(9.0, 9.0, 0.0));
}

#[derive(Serialize)]
struct Stats {
    strength: i32,
    agility: f32,
}

#[derive(Serialize)]
struct Player {
    name: String,
    alive: bool,
    stats: Stats,
    inventory: Vec<i32>,
    title: Option<String>,
}

#[test]
fn test_store_record_flattens_fields() {
    let temp = TempDir::new().unwrap();
    let mut manager = manager(temp.path());
    manager.new_game("A", false);
    let player = Player {
        name: "Ayla".into(),
        alive: true,
        stats: Stats {
            strength: 12,
            agility: 2.5,
        },
        inventory: vec![3, 1, 4],
        title: None,
    };

    assert_eq!(manager.store_record("Player", &player), 7);

    assert_eq!(manager.get::<String>("Playername"), "Ayla");
    assert!(manager.get::<bool>("Playeralive"));
    assert_eq!(manager.get::<i32>("Playerstatsstrength"), 12);
    assert_eq!(manager.get::<f32>("Playerstatsagility"), 2.5);
    assert_eq!(manager.get_array::<i32>("Playerinventory", 3), vec![3, 1, 4]);
    assert!(manager.get::<String>("Playertitle").is_empty());
}
