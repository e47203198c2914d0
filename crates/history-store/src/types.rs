//! History item types.

use af_common::{AssetRecord, EditorConfig, MediaKind};
use serde::{Deserialize, Serialize};

/// What a generation produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryItemKind {
    Image,
    Video,
    Audio,
    Text,
}

impl HistoryItemKind {
    /// Timeline track this kind of media goes on. Images and text have none.
    pub fn media_kind(self) -> Option<MediaKind> {
        match self {
            HistoryItemKind::Video => Some(MediaKind::Video),
            HistoryItemKind::Audio => Some(MediaKind::Audio),
            HistoryItemKind::Image | HistoryItemKind::Text => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HistoryItemKind::Image => "image",
            HistoryItemKind::Video => "video",
            HistoryItemKind::Audio => "audio",
            HistoryItemKind::Text => "text",
        }
    }
}

impl std::fmt::Display for HistoryItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HistoryItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "image" => Ok(HistoryItemKind::Image),
            "video" => Ok(HistoryItemKind::Video),
            "audio" => Ok(HistoryItemKind::Audio),
            "text" => Ok(HistoryItemKind::Text),
            other => Err(format!("unknown history item kind: {other}")),
        }
    }
}

/// One generated artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Creation time in epoch milliseconds, bumped when needed to stay unique.
    pub id: u64,
    /// ISO-8601 UTC creation time, e.g. `2026-10-15T08:30:00.000Z`.
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: HistoryItemKind,
    pub prompt: String,
    /// Media URL/path, or the text itself for text items.
    pub data: String,
    /// Free-form generation details (model, duration, voice...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl HistoryItem {
    /// `metadata.duration` when it is a positive number.
    pub fn duration_hint(&self) -> Option<f64> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("duration"))
            .and_then(serde_json::Value::as_f64)
            .filter(|d| d.is_finite() && *d > 0.0)
    }

    /// The item as a timeline asset. `None` for images and text.
    ///
    /// Items without a usable duration hint get the configured default for
    /// their kind.
    pub fn to_asset(&self, config: &EditorConfig) -> Option<AssetRecord> {
        let kind = self.kind.media_kind()?;
        let name = if self.prompt.trim().is_empty() {
            format!("Untitled {kind}")
        } else {
            self.prompt.clone()
        };

        Some(AssetRecord {
            id: self.id,
            kind,
            source: self.data.clone(),
            name,
            duration_hint: self
                .duration_hint()
                .unwrap_or_else(|| config.default_duration(kind)),
        })
    }
}

/// Input for [`crate::HistoryStore::add`]; id and timestamp are assigned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewHistoryItem {
    pub kind: HistoryItemKind,
    pub prompt: String,
    pub data: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Which items a listing shows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HistoryFilter {
    #[default]
    All,
    Kind(HistoryItemKind),
}

impl HistoryFilter {
    pub fn matches(&self, item: &HistoryItem) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Kind(kind) => item.kind == *kind,
        }
    }
}
