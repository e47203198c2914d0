//! Snapshot-based undo/redo history.
//!
//! Two stacks of whole timeline snapshots:
//! - `past`: states before each recorded edit, most recent last
//! - `future`: states undone away, next redo last
//!
//! Recording an edit clears `future`. Undo and redo at an empty stack are
//! no-ops. A gesture (slider drag, etc.) suppresses per-edit recording and
//! collapses the whole interaction into one entry when it ends.
//!
//! # Usage
//!
//! ```ignore
//! let mut history = HistoryStack::new();
//!
//! // After computing `next` from `current`:
//! history.record_mutation("Delete clip", current.clone());
//! current = next;
//!
//! if let Some(prev) = history.undo(current.clone()) {
//!     current = prev;
//! }
//! ```

/// One snapshot with the label of the edit it belongs to.
#[derive(Clone, Debug)]
pub struct HistoryEntry<S> {
    /// Human-readable label (e.g. "Split clip").
    pub label: String,
    pub snapshot: S,
}

/// Past/future snapshot stacks.
///
/// `S` is the snapshot type; the editor uses `Arc<TimelineState>` so entries
/// are shared, never copied.
#[derive(Clone, Debug)]
pub struct HistoryStack<S> {
    past: Vec<HistoryEntry<S>>,
    future: Vec<HistoryEntry<S>>,
    /// `None` keeps every entry.
    max_depth: Option<usize>,
    /// Open gesture: its label and the snapshot from before it started.
    gesture: Option<HistoryEntry<S>>,
}

impl<S> Default for HistoryStack<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> HistoryStack<S> {
    /// Unbounded history.
    pub fn new() -> Self {
        Self::with_max_depth(None)
    }

    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_depth,
            gesture: None,
        }
    }

    /// Record the snapshot from before an edit.
    ///
    /// Clears the redo chain, also when an open gesture absorbs the edit (the
    /// gesture's entry is pushed at `end_gesture`). Returns `false` in that case.
    pub fn record_mutation(&mut self, label: &str, previous: S) -> bool {
        if self.gesture.is_some() {
            self.future.clear();
            tracing::debug!(label, "Record suppressed: gesture in progress");
            return false;
        }

        self.push_past(label.to_string(), previous);
        true
    }

    fn push_past(&mut self, label: String, snapshot: S) {
        self.future.clear();
        tracing::debug!(
            label = %label,
            undo_depth = self.past.len() + 1,
            "History entry pushed"
        );

        self.past.push(HistoryEntry { label, snapshot });
        self.trim();
    }

    fn trim(&mut self) {
        if let Some(max) = self.max_depth {
            if self.past.len() > max {
                let excess = self.past.len() - max;
                self.past.drain(..excess);
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Label of the edit the next undo reverts.
    pub fn undo_label(&self) -> Option<&str> {
        self.past.last().map(|e| e.label.as_str())
    }

    /// Label of the edit the next redo re-applies.
    pub fn redo_label(&self) -> Option<&str> {
        self.future.last().map(|e| e.label.as_str())
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Change the depth limit, evicting the oldest entries if needed.
    pub fn set_max_depth(&mut self, max_depth: Option<usize>) {
        self.max_depth = max_depth;
        self.trim();
    }

    pub fn is_in_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    /// Drop every entry and any open gesture.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.gesture = None;
        tracing::debug!("History cleared");
    }
}

impl<S: Clone + PartialEq> HistoryStack<S> {
    /// Open a gesture. `before` is the state the whole gesture undoes to.
    ///
    /// Returns `false` if a gesture is already open (the first one wins).
    pub fn begin_gesture(&mut self, label: &str, before: S) -> bool {
        if self.gesture.is_some() {
            tracing::warn!(label, "begin_gesture called while a gesture is open, ignoring");
            return false;
        }

        self.gesture = Some(HistoryEntry {
            label: label.to_string(),
            snapshot: before,
        });
        tracing::debug!(label, "Gesture started");
        true
    }

    /// Close the open gesture. One entry is recorded if `current` differs from
    /// the state at `begin_gesture`; returns whether that happened.
    pub fn end_gesture(&mut self, current: &S) -> bool {
        let Some(entry) = self.gesture.take() else {
            return false;
        };

        if entry.snapshot == *current {
            tracing::debug!(label = %entry.label, "Gesture ended without changes");
            return false;
        }

        self.push_past(entry.label, entry.snapshot);
        true
    }

    /// Step back. `current` moves onto the redo chain and the previous
    /// snapshot is returned, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: S) -> Option<S> {
        if self.gesture.is_some() {
            tracing::debug!("Closing open gesture before undo");
            self.end_gesture(&current);
        }

        let entry = self.past.pop()?;
        tracing::debug!(
            label = %entry.label,
            undo_remaining = self.past.len(),
            "Undo"
        );

        self.future.push(HistoryEntry {
            label: entry.label,
            snapshot: current,
        });
        Some(entry.snapshot)
    }

    /// Step forward again after an undo. Symmetric to [`Self::undo`].
    pub fn redo(&mut self, current: S) -> Option<S> {
        if self.gesture.is_some() {
            tracing::debug!("Closing open gesture before redo");
            // An edited gesture records an entry, which clears the redo chain.
            self.end_gesture(&current);
        }

        let entry = self.future.pop()?;
        tracing::debug!(
            label = %entry.label,
            redo_remaining = self.future.len(),
            "Redo"
        );

        self.past.push(HistoryEntry {
            label: entry.label,
            snapshot: current,
        });
        self.trim();
        Some(entry.snapshot)
    }
}
