//! Playhead position. Ephemeral, like selection.

use af_common::TimeCode;
use serde::{Deserialize, Serialize};

/// Time cursor used for preview and as the split anchor.
///
/// Always finite and `>= 0`. There is no upper bound: a playhead past the end
/// of both tracks simply resolves to no preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Playhead {
    position: TimeCode,
}

impl Playhead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> TimeCode {
        self.position
    }

    /// Move the playhead. Negative times clamp to zero; non-finite input is
    /// ignored. Returns whether the position changed.
    pub fn seek(&mut self, time: TimeCode) -> bool {
        let secs = time.as_secs();
        if !secs.is_finite() {
            tracing::debug!(time = secs, "Seek ignored: non-finite time");
            return false;
        }

        let clamped = TimeCode::from_secs(secs.max(0.0));
        if clamped == self.position {
            return false;
        }
        self.position = clamped;
        tracing::debug!(time = %self.position, "Playhead moved");
        true
    }
}
