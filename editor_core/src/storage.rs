//! Backing storage for documents.
//!
//! The editor state never touches storage on its own; it calls a
//! [`DocumentStorage`] at load and save boundaries only.

use crate::error::{EditorError, Result};
use crate::naming;
use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Opaque handle to a document's backing storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageRef(PathBuf);

impl StorageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Returns the location as a path.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for StorageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// File-access collaborator used when loading and saving.
pub trait DocumentStorage {
    /// Reads the full text behind `storage_ref`.
    fn read_text(&self, storage_ref: &StorageRef) -> Result<String>;

    /// Replaces the text behind `storage_ref`.
    fn write_text(&self, storage_ref: &StorageRef, text: &str) -> Result<()>;

    /// Returns the (base name, extension) a document at `storage_ref` should get.
    fn extract_name(&self, storage_ref: &StorageRef) -> (String, String);
}

/// Storage on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStorage for FsStorage {
    fn read_text(&self, storage_ref: &StorageRef) -> Result<String> {
        fs::read_to_string(storage_ref.path()).map_err(|e| EditorError::io(storage_ref.path(), e))
    }

    fn write_text(&self, storage_ref: &StorageRef, text: &str) -> Result<()> {
        let path = storage_ref.path();
        let file = fs::File::create(path).map_err(|e| EditorError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(text.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| EditorError::io(path, e))
    }

    fn extract_name(&self, storage_ref: &StorageRef) -> (String, String) {
        let file_name = storage_ref
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Unknown");
        (
            naming::file_stem(file_name).to_string(),
            naming::file_extension(file_name),
        )
    }
}
