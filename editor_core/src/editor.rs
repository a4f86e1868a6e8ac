//! Main editor logic.
//!
//! [`EditorState`] owns the single live document together with its buffer,
//! statistics, history and search session, and keeps them consistent as
//! commands arrive. Commands take `&mut self`, so a host shares the state
//! behind whatever serializes its command dispatch (an event loop, or a
//! `Mutex` when several threads issue commands).

use crate::buffer::TextBuffer;
use crate::config::EditorConfig;
use crate::document::Document;
use crate::error::Result;
use crate::events::{ChangeKind, ChangeTracker, StateChange, SubscriptionId};
use crate::history::History;
use crate::search::{self, SearchOptions, SearchSession};
use crate::statistics::Statistics;
use crate::storage::{DocumentStorage, StorageRef};
use std::time::Duration;

/// Coarse lifecycle of the editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Offering to resume an auto-saved document or start fresh.
    #[default]
    Startup,
    /// Normal operation.
    Editing,
}

/// An owned, consistent copy of all observable state.
#[derive(Debug, Clone)]
pub struct EditorSnapshot {
    pub document: Document,
    pub text: String,
    pub statistics: Statistics,
    pub search_options: SearchOptions,
    pub search_results: Vec<usize>,
    pub current_search_index: Option<usize>,
    pub search_visible: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    pub phase: Phase,
    pub auto_save_enabled: bool,
    pub version: u64,
}

/// The editing core's state.
#[derive(Debug)]
pub struct EditorState {
    /// Settings the state was created with.
    config: EditorConfig,
    /// The current document.
    document: Document,
    /// The live text.
    buffer: TextBuffer,
    /// Statistics of the live text.
    statistics: Statistics,
    /// Undo/redo history.
    history: History,
    /// Search options, results and panel visibility.
    search: SearchSession,
    phase: Phase,
    auto_save_enabled: bool,
    /// Document the host offers to resume at startup.
    auto_saved_document: Option<Document>,
    changes: ChangeTracker,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// Creates an editor with default settings.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Creates an editor holding an empty, untitled document.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: Document::create_new(&config.untitled_name, &config.default_extension),
            buffer: TextBuffer::new(),
            statistics: Statistics::compute(""),
            history: History::with_limit(config.history_limit),
            search: SearchSession::new(),
            phase: Phase::Startup,
            auto_save_enabled: config.auto_save,
            auto_saved_document: None,
            changes: ChangeTracker::default(),
            config,
        }
    }

    // ---- Observation ----

    /// Registers a callback invoked once per state-changing command.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.changes.subscribe(Box::new(callback))
    }

    /// Removes a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changes.unsubscribe(id)
    }

    /// Returns the current state version.
    pub fn version(&self) -> u64 {
        self.changes.version()
    }

    /// Check if state has changed since a version.
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.changes.version() > version
    }

    /// Returns a copy of all observable state.
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            document: self.document.clone(),
            text: self.buffer.to_string(),
            statistics: self.statistics,
            search_options: self.search.options().clone(),
            search_results: self.search.results().to_vec(),
            current_search_index: self.search.current_index(),
            search_visible: self.search.is_visible(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            phase: self.phase,
            auto_save_enabled: self.auto_save_enabled,
            version: self.changes.version(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns a reference to the buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Returns the live text.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Returns whether the buffer has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.document.modified
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn search_options(&self) -> &SearchOptions {
        self.search.options()
    }

    pub fn search_results(&self) -> &[usize] {
        self.search.results()
    }

    pub fn current_search_index(&self) -> Option<usize> {
        self.search.current_index()
    }

    /// Returns the buffer offset of the current match.
    pub fn current_search_position(&self) -> Option<usize> {
        self.search.current_position()
    }

    /// Returns the 0-based (line, column) of the current match.
    pub fn current_match_line_col(&self) -> Option<(usize, usize)> {
        self.search
            .current_position()
            .map(|pos| self.buffer.char_to_line_col(pos))
    }

    pub fn is_search_visible(&self) -> bool {
        self.search.is_visible()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn auto_save_enabled(&self) -> bool {
        self.auto_save_enabled
    }

    /// Returns the period the host should use for its auto-save timer.
    pub fn auto_save_interval(&self) -> Duration {
        self.config.auto_save_interval()
    }

    pub fn auto_saved_document(&self) -> Option<&Document> {
        self.auto_saved_document.as_ref()
    }

    // ---- Editing ----

    /// Replaces the buffer text. Identical text is ignored.
    /// Returns true if the buffer changed.
    pub fn update_text(&mut self, new_text: &str) -> bool {
        if !self.apply_edit(new_text) {
            return false;
        }
        self.rederive_search(true);
        self.changes.publish();
        true
    }

    /// Restores the text before the last edit.
    /// The modified flag is left as it is.
    pub fn undo(&mut self) -> bool {
        let current = self.buffer.to_string();
        match self.history.undo(current) {
            Some(previous) => {
                log::debug!("Undo ({} levels left)", self.history.undo_depth());
                self.restore(&previous);
                true
            }
            None => false,
        }
    }

    /// Re-applies the last undone edit.
    /// The modified flag is left as it is.
    pub fn redo(&mut self) -> bool {
        let current = self.buffer.to_string();
        match self.history.redo(current) {
            Some(next) => {
                log::debug!("Redo ({} levels left)", self.history.redo_depth());
                self.restore(&next);
                true
            }
            None => false,
        }
    }

    /// Returns the whole buffer.
    pub fn copy_text(&self) -> String {
        self.buffer.to_string()
    }

    /// Appends `text` to the buffer as one edit.
    pub fn paste_text(&mut self, text: &str) -> bool {
        let mut new_text = self.buffer.to_string();
        new_text.push_str(text);
        self.update_text(&new_text)
    }

    /// Returns the whole buffer and clears it as one edit.
    pub fn cut_text(&mut self) -> String {
        let text = self.buffer.to_string();
        self.update_text("");
        text
    }

    // ---- Documents ----

    /// Replaces the document with an empty, untitled one.
    pub fn new_file(&mut self) {
        self.load_untitled();
        self.changes.publish();
    }

    /// Replaces the document with text supplied by the file collaborator.
    pub fn open_file(
        &mut self,
        raw_text: &str,
        name: &str,
        extension: &str,
        storage_ref: Option<StorageRef>,
    ) {
        self.document = Document::load(name, extension, raw_text, storage_ref);
        log::info!("Opened {}", self.document.full_name());
        self.reset_buffer(raw_text);
        self.changes.publish();
    }

    /// Reads `storage_ref` and opens it. Unreadable storage opens as an
    /// empty document. Returns false if the read failed.
    pub fn open_from(&mut self, storage: &dyn DocumentStorage, storage_ref: StorageRef) -> bool {
        let (text, read_ok) = match storage.read_text(&storage_ref) {
            Ok(text) => (text, true),
            Err(e) => {
                log::warn!("Failed to read {}: {}", storage_ref, e);
                (String::new(), false)
            }
        };
        let (name, extension) = storage.extract_name(&storage_ref);
        self.open_file(&text, &name, &extension, Some(storage_ref));
        read_ok
    }

    /// Writes the buffer to the document's storage.
    ///
    /// Returns `Ok(false)` without doing anything if the document has never
    /// been saved to a location. On a write failure nothing changes.
    pub fn save_file(&mut self, storage: &dyn DocumentStorage) -> Result<bool> {
        let Some(storage_ref) = self.document.storage_ref.clone() else {
            log::debug!("Save skipped: {} has no storage", self.document.full_name());
            return Ok(false);
        };

        let text = self.buffer.to_string();
        if let Err(e) = storage.write_text(&storage_ref, &text) {
            log::warn!("Failed to save {}: {}", storage_ref, e);
            return Err(e);
        }

        self.document.mark_saved(text);
        log::info!("Saved {}", storage_ref);
        self.changes.touch(ChangeKind::Document);
        self.changes.publish();
        Ok(true)
    }

    /// Writes the buffer to `storage_ref` and binds the document to it.
    /// On a write failure nothing changes.
    pub fn save_file_as(
        &mut self,
        storage: &dyn DocumentStorage,
        storage_ref: StorageRef,
    ) -> Result<()> {
        let text = self.buffer.to_string();
        if let Err(e) = storage.write_text(&storage_ref, &text) {
            log::warn!("Failed to save as {}: {}", storage_ref, e);
            return Err(e);
        }

        let (name, extension) = storage.extract_name(&storage_ref);
        log::info!("Saved as {}", storage_ref);
        self.document = Document::save_as(storage_ref, &name, &extension, text);
        self.changes.touch(ChangeKind::Document);
        self.changes.publish();
        Ok(())
    }

    // ---- Startup and auto-save ----

    /// Sets the document offered for resumption at startup.
    pub fn offer_auto_saved(&mut self, document: Document) {
        self.auto_saved_document = Some(document);
        self.changes.touch(ChangeKind::AutoSave);
        self.changes.publish();
    }

    /// Starts editing a fresh untitled document.
    pub fn start_new_file(&mut self) {
        self.load_untitled();
        self.enter_phase(Phase::Editing);
        self.changes.publish();
    }

    /// Resumes the offered auto-saved document.
    /// Returns false, staying in the current phase, if none was offered.
    pub fn continue_with_auto_save(&mut self) -> bool {
        let Some(mut document) = self.auto_saved_document.clone() else {
            return false;
        };
        log::debug!("Resuming auto-saved {}", document.full_name());
        document.modified = false;
        let text = document.content.clone();
        self.document = document;
        self.reset_buffer(&text);
        self.enter_phase(Phase::Editing);
        self.changes.publish();
        true
    }

    /// Returns to the startup phase.
    pub fn show_startup_menu(&mut self) {
        self.enter_phase(Phase::Startup);
        self.changes.publish();
    }

    /// Flips the auto-save flag. Returns the new value.
    pub fn toggle_auto_save(&mut self) -> bool {
        self.auto_save_enabled = !self.auto_save_enabled;
        self.changes.touch(ChangeKind::AutoSave);
        self.changes.publish();
        self.auto_save_enabled
    }

    /// Saves if auto-save is on, the document is modified and it has a
    /// storage location. Returns whether a save happened.
    pub fn perform_auto_save(&mut self, storage: &dyn DocumentStorage) -> Result<bool> {
        if !self.auto_save_enabled || !self.document.modified || !self.document.has_storage() {
            return Ok(false);
        }
        self.save_file(storage)
    }

    // ---- Search ----

    /// Stores new search options and searches from scratch.
    pub fn update_search_options(&mut self, options: SearchOptions) {
        log::debug!("Search for {:?}", options.query);
        let text = self.buffer.to_string();
        self.search.set_options(options, &text);
        self.changes.touch(ChangeKind::Search);
        self.changes.publish();
    }

    /// Moves to the next match, wrapping around.
    pub fn next_search_result(&mut self) -> Option<usize> {
        let position = self.search.next_match()?;
        self.changes.touch(ChangeKind::Search);
        self.changes.publish();
        Some(position)
    }

    /// Moves to the previous match, wrapping around.
    pub fn previous_search_result(&mut self) -> Option<usize> {
        let position = self.search.prev_match()?;
        self.changes.touch(ChangeKind::Search);
        self.changes.publish();
        Some(position)
    }

    /// Replaces the current match with the replacement text, then searches
    /// again from the start. Returns false if there is no current match.
    pub fn replace_current(&mut self) -> bool {
        let Some(start) = self.search.current_position() else {
            return false;
        };
        let options = self.search.options();
        let end = start + options.query_len();
        let new_text = self.buffer.spliced(start, end, &options.replacement);

        self.apply_edit(&new_text);
        self.research();
        self.changes.publish();
        true
    }

    /// Replaces every occurrence of the query in one edit, then searches
    /// again. Returns false if the query is empty.
    pub fn replace_all(&mut self) -> bool {
        let options = self.search.options();
        if options.query.is_empty() {
            return false;
        }
        let new_text = search::replace_all(
            &self.buffer.to_string(),
            &options.query,
            &options.replacement,
            options.case_sensitive,
        );

        self.apply_edit(&new_text);
        self.research();
        self.changes.publish();
        true
    }

    /// Shows or hides the search panel. Hiding drops the results.
    /// Returns the new visibility.
    pub fn toggle_search_visibility(&mut self) -> bool {
        let visible = self.search.toggle_visibility();
        self.changes.touch(ChangeKind::SearchVisibility);
        self.changes.touch(ChangeKind::Search);
        self.changes.publish();
        visible
    }

    // ---- Internal ----

    /// Records and applies an edit without publishing.
    fn apply_edit(&mut self, new_text: &str) -> bool {
        if self.buffer.matches(new_text) {
            return false;
        }
        self.history.record_edit(self.buffer.to_string());
        self.buffer.set_text(new_text);
        self.document.modified = true;
        self.statistics = Statistics::compute(new_text);
        self.changes.touch(ChangeKind::Text);
        self.changes.touch(ChangeKind::Document);
        self.changes.touch(ChangeKind::History);
        true
    }

    /// Sets the buffer from history without recording an edit.
    fn restore(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.statistics = Statistics::compute(text);
        self.changes.touch(ChangeKind::Text);
        self.changes.touch(ChangeKind::History);
        self.rederive_search(true);
        self.changes.publish();
    }

    /// Loads fresh text with empty history for a new current document.
    fn reset_buffer(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.history.clear();
        self.statistics = Statistics::compute(text);
        self.changes.touch(ChangeKind::Document);
        self.changes.touch(ChangeKind::Text);
        self.changes.touch(ChangeKind::History);
        self.rederive_search(false);
    }

    /// Brings search results in line with the buffer after it changed.
    /// Results are only maintained while the panel is shown.
    fn rederive_search(&mut self, keep_position: bool) {
        if !self.search.is_active() {
            return;
        }
        if self.search.is_visible() {
            let text = self.buffer.to_string();
            if keep_position {
                self.search.refresh(&text);
            } else {
                self.search.search(&text);
            }
        } else if !self.search.results().is_empty() {
            self.search.clear_results();
        } else {
            return;
        }
        self.changes.touch(ChangeKind::Search);
    }

    /// Searches the current text from scratch.
    fn research(&mut self) {
        let text = self.buffer.to_string();
        self.search.search(&text);
        self.changes.touch(ChangeKind::Search);
    }

    fn load_untitled(&mut self) {
        log::debug!("New file");
        self.document =
            Document::create_new(&self.config.untitled_name, &self.config.default_extension);
        self.reset_buffer("");
    }

    fn enter_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.changes.touch(ChangeKind::Phase);
        }
    }
}
