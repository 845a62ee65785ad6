//! In-memory repository implementations for testing and development.

mod container;

pub use container::InMemoryContainerRepository;
