//! Whole-document persistence for the idea collection.
//!
//! The store holds no state beyond a file path. Every [`Store::load`] reads
//! the document from disk and every [`Store::save`] rewrites it completely.
//! Callers that mutate the collection are responsible for serializing their
//! load-modify-save cycles; the [`Relay`](crate::relay::Relay) does this with
//! a mutex.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{Result, idea::Collection};

pub mod errors;

pub use errors::StoreError;

/// Default file name of the persisted document.
pub const DB_FILE: &str = "db.json";

/// JSON file holding the full idea collection.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// A store backed by the document at `path`. Nothing is read or written yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store using [`DB_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DB_FILE))
    }

    /// Location of the persisted document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the document holding an empty collection if it does not exist.
    ///
    /// Missing parent directories are created as well. An existing document is
    /// left untouched, even if it is unreadable.
    pub async fn ensure_exists(&self) -> Result<()> {
        match tokio::fs::try_exists(&self.path).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|source| self.io_error(source))?;
                }
                debug!("Creating empty idea store at {}", self.path.display());
                self.save(&Collection::new()).await
            }
            Err(source) => Err(self.io_error(source).into()),
        }
    }

    /// Read the collection, falling back to an empty one on any failure.
    ///
    /// A corrupt document is not repaired or backed up; the next save simply
    /// overwrites it.
    pub async fn load(&self) -> Collection {
        match self.try_load().await {
            Ok(collection) => collection,
            Err(e) => {
                warn!(
                    "Failed to load ideas from {}: {e}. Using an empty collection.",
                    self.path.display()
                );
                Collection::new()
            }
        }
    }

    /// Read the collection, reporting malformed or unreadable documents.
    ///
    /// A missing document is not an error and yields an empty collection.
    pub async fn try_load(&self) -> Result<Collection> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => serde_json::from_str(&json).map_err(|source| {
                StoreError::DeserializationFailed {
                    path: self.path.clone(),
                    source,
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Collection::new()),
            Err(source) => Err(self.io_error(source).into()),
        }
    }

    /// Overwrite the document with `collection`.
    ///
    /// The JSON is written to a sibling temporary file which is then renamed
    /// over the document, so a concurrent reader sees either the old or the
    /// new collection and never a partial write.
    pub async fn save(&self, collection: &Collection) -> Result<()> {
        let json = serde_json::to_string_pretty(collection)
            .map_err(|source| StoreError::SerializationFailed { source })?;

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|source| StoreError::FileIo {
                path: tmp_path.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DB_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::FileIo {
            path: self.path.clone(),
            source,
        }
    }
}
