//! Durable storage for save containers.
//!
//! A container holds a whole [`save_core::SlotDirectory`]. Repositories only
//! move containers in and out of storage; which slots live in which
//! container is decided by the slot manager.

mod codec;
mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileContainerRepository;
pub use memory::InMemoryContainerRepository;
pub use traits::{ContainerKey, ContainerRepository};
