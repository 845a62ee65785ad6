//! Error types for the save data model.

use thiserror::Error;

/// Errors raised when mutating a [`crate::ValueStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("cannot store null {kind} under '{name}'")]
    NullValue {
        kind: crate::ValueKind,
        name: String,
    },
}

/// Errors raised by [`crate::SlotDirectory`] operations and decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("save slot '{0}' does not exist")]
    SlotNotFound(String),

    #[error("save slot '{0}' already exists")]
    SlotExists(String),

    #[error("slot metadata and slot data disagree on slot names: {0:?}")]
    MismatchedKeys(Vec<String>),
}
