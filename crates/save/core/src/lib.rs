//! Pure data model for slot-based save games.
//!
//! `save-core` defines the typed value store that game code writes into, the
//! per-slot metadata, and the [`SlotDirectory`] that groups every slot of a
//! container. Nothing here performs I/O or logging; the runtime crate owns
//! the lifecycle and persistence on top of these types.
pub mod directory;
pub mod error;
pub mod math;
pub mod playtime;
pub mod slot;
pub mod store;
pub mod value;

pub use directory::SlotDirectory;
pub use error::{DirectoryError, StoreError};
pub use math::{Rotator, Transform, Vector3};
pub use playtime::{TimeUnit, format_time_played};
pub use slot::SlotInfo;
pub use store::{StoredValue, ValueStore};
pub use value::{
    ActorSnapshot, ClassRef, Name, ObjectSnapshot, SpawnCollisionMethod, Text, ValueKind,
};
