//! `af-app-state` -- Editing state for the AuraFrame Studio timeline.
//!
//! This crate provides:
//!
//! - **`Editor`**: The Editor API. Owns the current timeline snapshot and routes every edit through history.
//! - **`HistoryStack`**: Snapshot-based undo/redo with gesture batching and an optional depth limit.
//! - **`SelectionState`** / **`Playhead`**: Ephemeral UI state, never recorded in history.
//! - **`EditCommand`**: Serde-tagged commands mirroring the Editor API, for scripts and event streams.
//! - **`TimelineSession`**: Save/load of the current snapshot as JSON.
//!
//! # Architecture
//!
//! ```text
//! Editor
//! ├── timeline: Arc<TimelineState>                (current immutable snapshot)
//! ├── history: HistoryStack<Arc<TimelineState>>   (past / future snapshots)
//! ├── selection: SelectionState                   (cleared on undo/redo/split)
//! ├── playhead: Playhead                          (preview + split anchor)
//! └── ids: ClipIdAllocator                        (outside history, never reuses)
//! ```

pub mod command;
pub mod editor;
pub mod error;
pub mod history;
pub mod playback;
pub mod selection;
pub mod session;

// Re-export primary types at crate root for convenience.
pub use command::EditCommand;
pub use editor::Editor;
pub use error::{SessionError, SessionResult};
pub use history::{HistoryEntry, HistoryStack};
pub use playback::Playhead;
pub use selection::SelectionState;
pub use session::{load_session, save_session, TimelineSession, SESSION_VERSION};
