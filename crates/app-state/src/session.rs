//! Session files: the current timeline snapshot written to disk as JSON.
//!
//! History, selection and gesture state are not persisted. A loaded session
//! starts with empty undo/redo stacks.

use std::path::Path;

use af_common::{ClipIdAllocator, EditorConfig, TimeCode};
use af_timeline::TimelineState;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::editor::Editor;
use crate::error::{SessionError, SessionResult};

/// Current session format version.
pub const SESSION_VERSION: u32 = 1;

/// On-disk shape of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineSession {
    pub version: u32,
    pub timeline: TimelineState,
    #[serde(default)]
    pub playhead: TimeCode,
    /// Next id the allocator hands out. Never below `max id + 1` once loaded.
    #[serde(default)]
    pub next_clip_id: u64,
}

impl TimelineSession {
    /// Check version and timeline invariants, repairing out-of-range clip
    /// properties and an invalid playhead.
    pub fn validated(self) -> SessionResult<Self> {
        if self.version != SESSION_VERSION {
            return Err(SessionError::UnsupportedVersion {
                version: self.version,
            });
        }

        let timeline = self
            .timeline
            .validated()
            .map_err(|e| SessionError::InvalidSession {
                reason: e.to_string(),
            })?;

        let secs = self.playhead.as_secs();
        let playhead = if secs.is_finite() && secs >= 0.0 {
            self.playhead
        } else {
            TimeCode::ZERO
        };

        let mut ids = ClipIdAllocator::starting_at(self.next_clip_id);
        if let Some(max) = timeline.max_clip_id() {
            ids.reserve_past(max);
        }

        Ok(Self {
            version: self.version,
            timeline,
            playhead,
            next_clip_id: ids.peek(),
        })
    }
}

/// Serialize a session to pretty JSON.
pub fn to_json_string(session: &TimelineSession) -> SessionResult<String> {
    let json = serde_json::to_string_pretty(session)?;
    debug!(
        clips = session.timeline.clip_count(),
        json_len = json.len(),
        "Serialized session to JSON"
    );
    Ok(json)
}

/// Parse and validate a session from JSON.
pub fn from_json_str(json: &str) -> SessionResult<TimelineSession> {
    let session: TimelineSession = serde_json::from_str(json)?;
    session.validated()
}

/// Write a session atomically: temp file in the same directory, then rename.
pub fn save_session(session: &TimelineSession, path: &Path) -> SessionResult<()> {
    let json = to_json_string(session)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, json.as_bytes()).map_err(|e| {
        error!(path = %temp_path.display(), error = %e, "Failed to write temp file");
        SessionError::Io(e)
    })?;

    std::fs::rename(&temp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        error!(
            from = %temp_path.display(),
            to = %path.display(),
            error = %e,
            "Failed to rename temp file to target"
        );
        SessionError::Io(e)
    })?;

    info!(
        path = %path.display(),
        clips = session.timeline.clip_count(),
        "Session saved"
    );
    Ok(())
}

/// Read and validate a session file.
pub fn load_session(path: &Path) -> SessionResult<TimelineSession> {
    let json = std::fs::read_to_string(path)?;
    let session = from_json_str(&json)?;
    info!(
        path = %path.display(),
        clips = session.timeline.clip_count(),
        "Session loaded"
    );
    Ok(session)
}

impl Editor {
    /// Resume editing a saved session, with empty history.
    pub fn from_session(config: EditorConfig, session: TimelineSession) -> SessionResult<Self> {
        let session = session.validated()?;
        let mut editor = Editor::with_timeline(
            config,
            session.timeline,
            ClipIdAllocator::starting_at(session.next_clip_id),
        );
        editor.set_playhead(session.playhead);
        Ok(editor)
    }

    /// Capture the current snapshot and playhead.
    pub fn to_session(&self) -> TimelineSession {
        TimelineSession {
            version: SESSION_VERSION,
            timeline: self.timeline().clone(),
            playhead: self.playhead(),
            next_clip_id: self.next_clip_id().0,
        }
    }
}
