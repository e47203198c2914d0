//! Clip selection. Ephemeral UI state, never part of undo history.

use af_common::ClipId;
use serde::{Deserialize, Serialize};

/// The single selected clip, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected_clip: Option<ClipId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, replacing any previous selection.
    pub fn select(&mut self, id: ClipId) {
        self.selected_clip = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected_clip = None;
    }

    /// Deselect `id` if it is the selected clip.
    pub fn deselect(&mut self, id: ClipId) {
        if self.selected_clip == Some(id) {
            self.selected_clip = None;
        }
    }

    pub fn selected(&self) -> Option<ClipId> {
        self.selected_clip
    }

    pub fn is_selected(&self, id: ClipId) -> bool {
        self.selected_clip == Some(id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected_clip.is_none()
    }
}
