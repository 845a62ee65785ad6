//! Error classification for slot manager operations.
//!
//! The public [`crate::SlotManager`] API reports outcomes as `bool`/`Option`;
//! these errors only exist between the internal steps and the log line that
//! is emitted at the API boundary.

use save_core::DirectoryError;
use thiserror::Error;

use crate::repository::RepositoryError;
use crate::workers::PersistenceError;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("{operation} called outside the primary thread")]
    NotPrimaryContext { operation: &'static str },

    #[error("save slot '{0}' does not exist")]
    SlotNotFound(String),

    #[error("save slot '{0}' already exists")]
    SlotExists(String),

    #[error("no container format is configured")]
    FormatUnset,

    #[error("{0} is null")]
    NullInput(String),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("failed to start background runtime: {0}")]
    RuntimeStart(#[source] std::io::Error),
}

impl ManagerError {
    /// Not-found, already-exists and null-input outcomes are expected in
    /// normal play and log at warning level; everything else is an error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::SlotNotFound(_) | Self::SlotExists(_) | Self::NullInput(_) => true,
            Self::Directory(e) => !matches!(e, DirectoryError::MismatchedKeys(_)),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ManagerError>;
