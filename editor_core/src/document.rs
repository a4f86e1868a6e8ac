//! Document metadata and lifecycle.

use crate::naming;
use crate::storage::StorageRef;
use chrono::{DateTime, Local};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a document, regenerated on create, load and save-as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One named text artifact.
///
/// `content` is the text as of the last load or save. It is not kept in
/// sync with the live buffer, which the editor state tracks separately.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    /// Base name without extension.
    pub name: String,
    /// Lowercase file-type token, possibly empty.
    pub extension: String,
    pub content: String,
    /// Where the document is persisted. `None` until first saved.
    pub storage_ref: Option<StorageRef>,
    pub last_modified: DateTime<Local>,
    /// True iff the live buffer differs from the last persisted content.
    pub modified: bool,
}

impl Document {
    /// Creates an empty, never-saved document.
    pub fn create_new(name: &str, extension: &str) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.to_string(),
            extension: extension.to_lowercase(),
            content: String::new(),
            storage_ref: None,
            last_modified: Local::now(),
            modified: false,
        }
    }

    /// Creates a document for text that was just read from storage.
    pub fn load(
        name: &str,
        extension: &str,
        content: impl Into<String>,
        storage_ref: Option<StorageRef>,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.to_string(),
            extension: extension.to_lowercase(),
            content: content.into(),
            storage_ref,
            last_modified: Local::now(),
            modified: false,
        }
    }

    /// Returns a document bound to a new storage location, holding `content`.
    pub fn save_as(
        storage_ref: StorageRef,
        name: &str,
        extension: &str,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.to_string(),
            extension: extension.to_lowercase(),
            content: content.into(),
            storage_ref: Some(storage_ref),
            last_modified: Local::now(),
            modified: false,
        }
    }

    /// Records a successful save to the existing storage location.
    pub fn mark_saved(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.modified = false;
        self.last_modified = Local::now();
    }

    /// Returns `name.extension`, or just the name if there is no extension.
    pub fn full_name(&self) -> String {
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }

    /// Returns the MIME type implied by the extension.
    pub fn mime_type(&self) -> &'static str {
        naming::mime_type(&self.extension)
    }

    /// Returns true if the document can be saved without choosing a location.
    pub fn has_storage(&self) -> bool {
        self.storage_ref.is_some()
    }
}
