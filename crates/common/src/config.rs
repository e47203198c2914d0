//! Configuration structs for the editor and the studio front end.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::types::MediaKind;

/// File name of the persisted generation history.
const HISTORY_FILE: &str = "history.json";

/// Editing-core configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum undo depth. `None` keeps every snapshot.
    pub max_undo_depth: Option<usize>,
    /// Duration (seconds) given to video assets that carry no duration hint.
    pub default_video_duration: f64,
    /// Duration (seconds) given to audio assets that carry no duration hint.
    pub default_audio_duration: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_undo_depth: None,
            default_video_duration: 10.0,
            default_audio_duration: 5.0,
        }
    }
}

impl EditorConfig {
    /// Fallback duration for an asset of the given kind.
    pub fn default_duration(&self, kind: MediaKind) -> f64 {
        match kind {
            MediaKind::Video => self.default_video_duration,
            MediaKind::Audio => self.default_audio_duration,
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [
            ("default_video_duration", self.default_video_duration),
            ("default_audio_duration", self.default_audio_duration),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    reason: format!("{name} must be a positive number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Top-level studio configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub editor: EditorConfig,
    /// Where the generation history lives. `None` uses the platform data directory.
    pub history_path: Option<PathBuf>,
}

impl StudioConfig {
    /// Load configuration from a JSON file.
    ///
    /// A missing file yields the defaults; anything else that goes wrong is an error.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Self = serde_json::from_str(&json)?;
        config.editor.validate()?;
        debug!(path = %path.display(), "Loaded studio config");
        Ok(config)
    }

    /// Resolved history file location.
    pub fn history_path(&self) -> PathBuf {
        self.history_path
            .clone()
            .unwrap_or_else(default_history_path)
    }
}

/// Default location of the persisted generation history: `AuraFrame/history.json`
/// under the platform data directory, or the working directory when the
/// platform has none.
pub fn default_history_path() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| {
        warn!("No platform data directory, keeping history in the working directory");
        PathBuf::from(".")
    });
    base.join("AuraFrame").join(HISTORY_FILE)
}
