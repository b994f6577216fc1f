//! Error types for the idea store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing the persisted document.
///
/// Read failures are normally absorbed by [`Store::load`](super::Store::load),
/// which falls back to an empty collection. Write failures always reach the
/// caller.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The collection could not be serialized.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// The document exists but is not a valid collection.
    #[error("Deserialization of {path} failed")]
    DeserializationFailed {
        /// Location of the document
        path: PathBuf,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// Reading, writing or renaming the document failed.
    #[error("File I/O error on {path}")]
    FileIo {
        /// File that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Check if this error came from the filesystem.
    pub fn is_io_error(&self) -> bool {
        matches!(self, StoreError::FileIo { .. })
    }

    /// Check if this error came from (de)serialization.
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            StoreError::SerializationFailed { .. } | StoreError::DeserializationFailed { .. }
        )
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
