//! Serializable edit commands.
//!
//! One variant per Editor API call, so a UI event stream or a script file can
//! drive an `Editor` without linking against its methods directly.
//!
//! ```json
//! [
//!   { "op": "append", "asset_id": 1700000000000 },
//!   { "op": "split", "clip": 0, "at": 4.0 },
//!   { "op": "update", "clip": 0, "effects": { "grayscale": 0.5 } },
//!   { "op": "undo" }
//! ]
//! ```

use af_common::{AssetProvider, ClipId, TimeCode};
use af_timeline::{ClipSpec, ClipUpdate, VisualEffects};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::editor::Editor;

/// A single editing step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    /// Append the history item `asset_id` to the track of its kind
    Append { asset_id: u64 },

    /// Delete a clip
    Remove { clip: ClipId },

    /// Change volume and/or effects of a clip
    Update {
        clip: ClipId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        volume: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        effects: Option<VisualEffects>,
    },

    /// Split a clip at a timeline time (seconds)
    Split { clip: ClipId, at: f64 },

    /// Split the selected clip at the playhead
    SplitAtPlayhead,

    Undo,

    Redo,

    /// Move the playhead (seconds)
    Seek { time: f64 },

    /// Select a clip; omit `clip` to clear the selection
    Select {
        #[serde(default)]
        clip: Option<ClipId>,
    },

    /// Open a gesture; edits until `end_gesture` undo as one step
    BeginGesture {
        #[serde(default = "default_gesture_label")]
        label: String,
    },

    EndGesture,
}

fn default_gesture_label() -> String {
    "Adjust clip".to_string()
}

impl EditCommand {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            EditCommand::Append { .. } => "append",
            EditCommand::Remove { .. } => "remove",
            EditCommand::Update { .. } => "update",
            EditCommand::Split { .. } => "split",
            EditCommand::SplitAtPlayhead => "split_at_playhead",
            EditCommand::Undo => "undo",
            EditCommand::Redo => "redo",
            EditCommand::Seek { .. } => "seek",
            EditCommand::Select { .. } => "select",
            EditCommand::BeginGesture { .. } => "begin_gesture",
            EditCommand::EndGesture => "end_gesture",
        }
    }
}

impl Editor {
    /// Execute one command. `assets` resolves the ids referenced by `append`.
    ///
    /// Returns whether anything changed (timeline, selection, playhead or
    /// gesture state). Like the methods it forwards to, this never fails: an
    /// unknown asset or an invalid duration is logged and skipped.
    pub fn apply<P>(&mut self, command: &EditCommand, assets: &P) -> bool
    where
        P: AssetProvider + ?Sized,
    {
        let changed = match command {
            EditCommand::Append { asset_id } => match assets.asset(*asset_id) {
                Some(asset) => match self.append_clip(ClipSpec::from(asset)) {
                    Ok(id) => {
                        debug!(asset_id, clip_id = %id, "Appended asset");
                        true
                    }
                    Err(e) => {
                        warn!(asset_id, error = %e, "Append skipped");
                        false
                    }
                },
                None => {
                    warn!(asset_id, "Append skipped: unknown asset");
                    false
                }
            },
            EditCommand::Remove { clip } => self.remove_clip(*clip),
            EditCommand::Update {
                clip,
                volume,
                effects,
            } => {
                let update = ClipUpdate {
                    volume: *volume,
                    effects: *effects,
                };
                self.update_clip_properties(*clip, &update)
            }
            EditCommand::Split { clip, at } => self.split_clip(*clip, TimeCode::from_secs(*at)),
            EditCommand::SplitAtPlayhead => self.split_selected_at_playhead(),
            EditCommand::Undo => self.undo(),
            EditCommand::Redo => self.redo(),
            EditCommand::Seek { time } => self.set_playhead(TimeCode::from_secs(*time)),
            EditCommand::Select { clip } => self.select_clip(*clip),
            EditCommand::BeginGesture { label } => self.begin_gesture(label),
            EditCommand::EndGesture => self.end_gesture(),
        };

        debug!(op = command.name(), changed, "Command applied");
        changed
    }
}
