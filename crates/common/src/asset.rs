//! Generated media as handed to the editing core by the history store.

use serde::{Deserialize, Serialize};

use crate::types::MediaKind;

/// A previously generated artifact the user chose to place on the timeline.
///
/// `duration_hint` is trusted as authoritative: the core never probes media
/// headers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Id of the entry in the history store this asset came from.
    pub id: u64,
    pub kind: MediaKind,
    /// URL or path of the media.
    pub source: String,
    /// Display label (the generation prompt, usually).
    pub name: String,
    /// Duration in seconds.
    pub duration_hint: f64,
}

/// Source of assets the editor can place on the timeline.
///
/// Implemented by the history store's media bin; a plain slice of records
/// also works, which keeps editing tests free of any storage.
pub trait AssetProvider {
    /// The asset with history id `id`, if it exists and is placeable media.
    fn asset(&self, id: u64) -> Option<AssetRecord>;
}

impl AssetProvider for [AssetRecord] {
    fn asset(&self, id: u64) -> Option<AssetRecord> {
        self.iter().find(|a| a.id == id).cloned()
    }
}

impl AssetProvider for Vec<AssetRecord> {
    fn asset(&self, id: u64) -> Option<AssetRecord> {
        self.as_slice().asset(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_provider_finds_by_id() {
        let assets = vec![
            AssetRecord {
                id: 1,
                kind: MediaKind::Video,
                source: "a.mp4".into(),
                name: "a".into(),
                duration_hint: 10.0,
            },
            AssetRecord {
                id: 2,
                kind: MediaKind::Audio,
                source: "b.wav".into(),
                name: "b".into(),
                duration_hint: 5.0,
            },
        ];
        assert_eq!(assets.asset(2).map(|a| a.kind), Some(MediaKind::Audio));
        assert!(assets.asset(3).is_none());
    }
}
