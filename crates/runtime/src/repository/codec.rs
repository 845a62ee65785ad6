//! Container encodings.

use save_core::SlotDirectory;

use crate::config::ContainerFormat;
use crate::repository::{RepositoryError, Result};

impl ContainerFormat {
    pub fn encode(self, directory: &SlotDirectory) -> Result<Vec<u8>> {
        match self {
            Self::Bincode => bincode::serialize(directory)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
            Self::Json => serde_json::to_vec_pretty(directory)
                .map_err(|e| RepositoryError::Json(e.to_string())),
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<SlotDirectory> {
        match self {
            Self::Bincode => bincode::deserialize(bytes)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
            Self::Json => {
                serde_json::from_slice(bytes).map_err(|e| RepositoryError::Json(e.to_string()))
            }
        }
    }
}
