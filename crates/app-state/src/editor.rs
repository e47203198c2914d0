//! The editor: one mutable cell holding the current immutable timeline
//! snapshot, plus undo history and the ephemeral selection and playhead.
//!
//! Every edit follows the same transaction: compute the next snapshot with a
//! pure `TimelineState` function, record the old snapshot in history, swap
//! the cell. An edit that changes nothing records nothing.

use std::sync::Arc;

use af_common::{ClipId, ClipIdAllocator, EditorConfig, MediaKind, TimeCode};
use af_timeline::{Clip, ClipSpec, ClipUpdate, Preview, TimelineResult, TimelineState};
use tracing::debug;

use crate::history::HistoryStack;
use crate::playback::Playhead;
use crate::selection::SelectionState;

const LABEL_APPEND: &str = "Append clip";
const LABEL_REMOVE: &str = "Delete clip";
const LABEL_UPDATE: &str = "Update clip";
const LABEL_SPLIT: &str = "Split clip";

/// Owns the timeline and everything needed to edit it.
///
/// Readers get `&TimelineState` (or a shared `Arc` snapshot) and can never
/// mutate clips in place; all changes go through the editing methods.
#[derive(Debug)]
pub struct Editor {
    timeline: Arc<TimelineState>,
    history: HistoryStack<Arc<TimelineState>>,
    selection: SelectionState,
    playhead: Playhead,
    /// Lives outside history so undo never causes an id to be reused.
    ids: ClipIdAllocator,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// An empty timeline with empty history.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_timeline(config, TimelineState::new(), ClipIdAllocator::new())
    }

    pub(crate) fn with_timeline(
        config: EditorConfig,
        timeline: TimelineState,
        mut ids: ClipIdAllocator,
    ) -> Self {
        if let Some(max) = timeline.max_clip_id() {
            ids.reserve_past(max);
        }
        Self {
            timeline: Arc::new(timeline),
            history: HistoryStack::with_max_depth(config.max_undo_depth),
            selection: SelectionState::new(),
            playhead: Playhead::new(),
            ids,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Close an open gesture so a structural edit gets its own undo entry
    /// instead of landing under the gesture's label.
    fn settle_gesture(&mut self) {
        if self.history.is_in_gesture() {
            debug!("Closing open gesture before structural edit");
            self.history.end_gesture(&self.timeline);
        }
    }

    /// Swap in `next` and record the previous snapshot under `label`.
    fn commit(&mut self, label: &str, next: TimelineState) {
        let previous = std::mem::replace(&mut self.timeline, Arc::new(next));
        self.history.record_mutation(label, previous);
    }

    // ── Editing ───────────────────────────────────────────────────

    /// Append a new clip built from `spec` to the track of its kind.
    ///
    /// Fails only on a non-positive duration, in which case nothing changes.
    pub fn append_clip(&mut self, spec: ClipSpec) -> TimelineResult<ClipId> {
        let id = ClipId(self.ids.peek());
        let next = self.timeline.append_clip(id, spec)?;
        self.ids.allocate();
        self.settle_gesture();
        self.commit(LABEL_APPEND, next);
        Ok(id)
    }

    /// Delete the clip with `id` from whichever track holds it. Returns
    /// `false` (and records nothing) when no clip has that id.
    pub fn remove_clip(&mut self, id: ClipId) -> bool {
        let Some(next) = self.timeline.remove_clip(id) else {
            return false;
        };
        self.selection.deselect(id);
        self.settle_gesture();
        self.commit(LABEL_REMOVE, next);
        true
    }

    /// Merge `update` into the clip with `id`. Returns `false` when the clip
    /// is unknown or the update changes nothing.
    pub fn update_clip_properties(&mut self, id: ClipId, update: &ClipUpdate) -> bool {
        let Some(next) = self.timeline.update_clip_properties(id, update) else {
            return false;
        };
        self.commit(LABEL_UPDATE, next);
        true
    }

    /// Split the clip with `id` at timeline time `at`. The second half gets a
    /// fresh id. Clears the selection on success.
    ///
    /// Returns `false` unless `at` is strictly inside the clip.
    pub fn split_clip(&mut self, id: ClipId, at: TimeCode) -> bool {
        let second_id = ClipId(self.ids.peek());
        let Some(next) = self.timeline.split_clip(id, at.as_secs(), second_id) else {
            return false;
        };
        self.ids.allocate();
        self.selection.clear();
        self.settle_gesture();
        self.commit(LABEL_SPLIT, next);
        true
    }

    /// Split the selected clip at the playhead (the toolbar action).
    pub fn split_selected_at_playhead(&mut self) -> bool {
        match self.selection.selected() {
            Some(id) => self.split_clip(id, self.playhead.position()),
            None => false,
        }
    }

    // ── History ───────────────────────────────────────────────────

    /// Revert the most recent edit. No-op at the start of history.
    /// Clears the selection when something was undone.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(Arc::clone(&self.timeline)) {
            Some(previous) => {
                self.timeline = previous;
                self.selection.clear();
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone edit. No-op when nothing was undone.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(Arc::clone(&self.timeline)) {
            Some(next) => {
                self.timeline = next;
                self.selection.clear();
                true
            }
            None => false,
        }
    }

    /// Start collapsing edits into one undo step (e.g. while a slider is
    /// dragged). Returns `false` if a gesture is already open.
    pub fn begin_gesture(&mut self, label: &str) -> bool {
        self.history.begin_gesture(label, Arc::clone(&self.timeline))
    }

    /// Finish the open gesture. Returns whether an undo entry was recorded.
    pub fn end_gesture(&mut self) -> bool {
        self.history.end_gesture(&self.timeline)
    }

    pub fn is_in_gesture(&self) -> bool {
        self.history.is_in_gesture()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    // ── Selection & playhead ──────────────────────────────────────

    /// Select a clip, or clear the selection with `None`. Selecting an id
    /// that is not on the timeline is ignored. Returns whether the selection
    /// changed.
    pub fn select_clip(&mut self, id: Option<ClipId>) -> bool {
        let before = self.selection.selected();
        match id {
            Some(id) if self.timeline.contains(id) => self.selection.select(id),
            Some(id) => {
                debug!(clip_id = %id, "Select ignored: clip not found");
                return false;
            }
            None => self.selection.clear(),
        }
        before != self.selection.selected()
    }

    pub fn selected_clip_id(&self) -> Option<ClipId> {
        self.selection.selected()
    }

    pub fn selected_clip(&self) -> Option<&Clip> {
        self.selection
            .selected()
            .and_then(|id| self.timeline.find_clip(id))
    }

    /// Move the playhead. Negative times clamp to 0; non-finite input is
    /// ignored.
    pub fn set_playhead(&mut self, time: TimeCode) -> bool {
        self.playhead.seek(time)
    }

    pub fn playhead(&self) -> TimeCode {
        self.playhead.position()
    }

    // ── Queries ───────────────────────────────────────────────────

    pub fn timeline(&self) -> &TimelineState {
        &self.timeline
    }

    /// Shared handle to the current snapshot. Stays valid after later edits.
    pub fn snapshot(&self) -> Arc<TimelineState> {
        Arc::clone(&self.timeline)
    }

    pub fn find_clip(&self, id: ClipId) -> Option<&Clip> {
        self.timeline.find_clip(id)
    }

    pub fn clip_start(&self, id: ClipId) -> Option<f64> {
        self.timeline.clip_start(id)
    }

    pub fn total_duration(&self) -> f64 {
        self.timeline.total_duration()
    }

    /// Active clip on each track at `time`.
    pub fn resolve_preview(&self, time: TimeCode) -> Preview<'_> {
        af_timeline::resolve_preview(&self.timeline, time)
    }

    /// Active clip on each track at the playhead.
    pub fn preview_at_playhead(&self) -> Preview<'_> {
        self.resolve_preview(self.playhead.position())
    }

    /// Media shown in the preview monitor: the selected clip's source, else
    /// the first video clip's.
    pub fn preview_source(&self) -> Option<&str> {
        self.selected_clip()
            .or_else(|| self.timeline.track(MediaKind::Video).clips().first())
            .map(Clip::source)
    }

    /// Whether the selected clip can be split at the playhead.
    pub fn can_split(&self) -> bool {
        self.selection
            .selected()
            .is_some_and(|id| self.can_split_at(id, self.playhead.position()))
    }

    pub fn can_split_at(&self, id: ClipId, at: TimeCode) -> bool {
        self.timeline.can_split(id, at.as_secs())
    }

    /// Id the next created clip will receive.
    pub fn next_clip_id(&self) -> ClipId {
        ClipId(self.ids.peek())
    }
}
