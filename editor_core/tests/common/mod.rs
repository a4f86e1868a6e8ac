// Shared helpers for integration tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use textpad_core::naming;
use textpad_core::{DocumentStorage, EditorError, Result, StorageRef};

/// Install a test logger so `log` output shows up with `--nocapture`
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// In-memory storage with switches for simulating failures
#[derive(Default)]
pub struct MemoryStorage {
    files: RefCell<HashMap<StorageRef, String>>,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
    pub writes: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, text: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(StorageRef::new(path), text.to_string());
        self
    }

    pub fn contents(&self, path: &str) -> Option<String> {
        self.files.borrow().get(&StorageRef::new(path)).cloned()
    }
}

impl DocumentStorage for MemoryStorage {
    fn read_text(&self, storage_ref: &StorageRef) -> Result<String> {
        if self.fail_reads.get() {
            return Err(EditorError::io(
                storage_ref.path(),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read refused"),
            ));
        }
        self.files
            .borrow()
            .get(storage_ref)
            .cloned()
            .ok_or_else(|| {
                EditorError::io(
                    storage_ref.path(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                )
            })
    }

    fn write_text(&self, storage_ref: &StorageRef, text: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(EditorError::io(
                storage_ref.path(),
                std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            ));
        }
        self.writes.set(self.writes.get() + 1);
        self.files
            .borrow_mut()
            .insert(storage_ref.clone(), text.to_string());
        Ok(())
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
