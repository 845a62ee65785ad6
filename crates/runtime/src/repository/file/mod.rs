//! File-based repository implementations.

mod container;

pub use container::FileContainerRepository;
