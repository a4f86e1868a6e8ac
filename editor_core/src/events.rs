//! Change notifications for observers of the editor state.
//!
//! Commands collect the kinds of state they touched and publish a single
//! [`StateChange`] once all derived state has been recomputed, so an
//! observer never sees the buffer out of step with its statistics or
//! search results.

use std::fmt;

/// Which part of the observable state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Document metadata (name, storage, modified flag, timestamps).
    Document,
    /// Buffer text and its statistics.
    Text,
    /// Undo/redo availability.
    History,
    /// Search options, results or current match.
    Search,
    /// Search panel shown or hidden.
    SearchVisibility,
    /// Startup/editing phase.
    Phase,
    /// Auto-save flag or the offered auto-saved document.
    AutoSave,
}

/// A published change record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// Everything the command touched, in first-touched order.
    pub kinds: Vec<ChangeKind>,
    /// Version before the change.
    pub old_version: u64,
    /// Version after the change.
    pub new_version: u64,
}

impl StateChange {
    /// Returns true if `kind` is part of this change.
    pub fn contains(&self, kind: ChangeKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&StateChange) + Send>;

/// Version counter, pending change kinds and subscriber callbacks.
#[derive(Default)]
pub(crate) struct ChangeTracker {
    version: u64,
    pending: Vec<ChangeKind>,
    callbacks: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
}

impl fmt::Debug for ChangeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeTracker")
            .field("version", &self.version)
            .field("pending", &self.pending)
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}

impl ChangeTracker {
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn subscribe(&mut self, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sub, _)| *sub != id);
        self.callbacks.len() != before
    }

    /// Notes that `kind` changed during the current command.
    pub(crate) fn touch(&mut self, kind: ChangeKind) {
        if !self.pending.contains(&kind) {
            self.pending.push(kind);
        }
    }

    /// Bumps the version and notifies subscribers, if anything changed.
    pub(crate) fn publish(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let change = StateChange {
            kinds: std::mem::take(&mut self.pending),
            old_version: self.version,
            new_version: self.version + 1,
        };
        self.version = change.new_version;
        for (_, callback) in &mut self.callbacks {
            callback(&change);
        }
    }
}
