//! Slot-based save game runtime.
//!
//! This crate wires the pure data model from `save-core` to storage,
//! background workers and game-object callbacks. Consumers build one
//! [`SlotManager`], register their [`LifecycleListener`]s, and drive slots
//! through it.
//!
//! Modules are organized by responsibility:
//! - [`manager`] hosts the slot manager and its builder
//! - [`config`] defines settings and where they are re-read from
//! - [`repository`] stores and loads whole save containers
//! - [`listeners`] and [`world`] are the seams to game objects
//! - `workers` keeps background tasks internal to the crate
pub mod config;
pub mod error;
pub mod listeners;
pub mod manager;
pub mod repository;
pub mod world;

mod workers;

pub use config::{
    ContainerFormat, EnvSettings, ProjectInfo, SaveSystemConfig, SettingsSource, StaticSettings,
    default_save_dir,
};
pub use error::{ManagerError, Result};
pub use listeners::{LifecycleEvent, LifecycleListener, ListenerRegistry};
pub use manager::{CURRENT_LEVEL_KEY, SlotManager, SlotManagerBuilder};
pub use repository::{
    ContainerKey, ContainerRepository, FileContainerRepository, InMemoryContainerRepository,
    RepositoryError,
};
pub use world::{SpawnWorld, WorldActor, WorldObject};
pub use workers::{PersistenceError, PlaytimeTracker};

pub use save_core;
