//! Undo/Redo history system.
//!
//! History is linear and snapshot based: every accepted edit stores the
//! full text that preceded it.

/// Manages undo/redo history.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Snapshots that can be restored by undo, oldest first.
    undo_stack: Vec<String>,
    /// Snapshots that can be restored by redo, oldest first.
    redo_stack: Vec<String>,
    /// Maximum number of undo levels. `None` is unbounded.
    max_size: Option<usize>,
}

impl History {
    /// Creates an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history keeping at most `max_size` undo levels.
    pub fn with_limit(max_size: Option<usize>) -> Self {
        Self {
            max_size,
            ..Self::default()
        }
    }

    /// Records the text as it was before an edit. Discards the redo branch.
    pub fn record_edit(&mut self, previous_text: impl Into<String>) {
        self.undo_stack.push(previous_text.into());
        self.redo_stack.clear();
        // Enforce size limit
        if let Some(max) = self.max_size {
            let excess = self.undo_stack.len().saturating_sub(max);
            self.undo_stack.drain(..excess);
        }
    }

    /// Returns true if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pops the last snapshot for undo, saving `current_text` for redo.
    /// Returns the text to restore, or `None` if there is nothing to undo.
    pub fn undo(&mut self, current_text: impl Into<String>) -> Option<String> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current_text.into());
        Some(previous)
    }

    /// Pops the last undone snapshot, saving `current_text` for undo.
    /// Returns the text to restore, or `None` if there is nothing to redo.
    pub fn redo(&mut self, current_text: impl Into<String>) -> Option<String> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current_text.into());
        Some(next)
    }

    /// Returns the number of undo levels available.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns the number of redo levels available.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clears all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
