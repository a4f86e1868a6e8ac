//! Textpad Core - Document editing engine.
//!
//! This crate holds the live text buffer, modification tracking,
//! undo/redo history and search/replace for a single document, without
//! any dependency on rendering or platform file pickers. Hosts read state
//! through [`EditorState`] accessors, snapshots or change subscriptions,
//! and supply storage through [`DocumentStorage`].

pub mod buffer;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod events;
pub mod history;
pub mod naming;
pub mod search;
pub mod statistics;
pub mod storage;

pub use buffer::TextBuffer;
pub use config::EditorConfig;
pub use document::{Document, DocumentId};
pub use editor::{EditorSnapshot, EditorState, Phase};
pub use error::{EditorError, Result};
pub use events::{ChangeKind, StateChange, SubscriptionId};
pub use history::History;
pub use search::{SearchOptions, SearchSession};
pub use statistics::Statistics;
pub use storage::{DocumentStorage, FsStorage, StorageRef};
