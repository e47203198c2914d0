//! The persisted history list.
//!
//! Items are kept most recent first and stored as a JSON array in a
//! platform-appropriate data directory. A corrupt file is discarded rather
//! than blocking startup.

use std::path::{Path, PathBuf};

use af_common::time::{iso_timestamp, now_millis};
use af_common::{AssetProvider, AssetRecord, EditorConfig};
use tracing::{debug, error, info, warn};

use crate::error::{HistoryStoreError, HistoryStoreResult};
use crate::types::{HistoryFilter, HistoryItem, NewHistoryItem};

/// Generated artifacts, most recent first.
#[derive(Clone, Debug)]
pub struct HistoryStore {
    items: Vec<HistoryItem>,
    storage_path: PathBuf,
}

impl HistoryStore {
    /// Load the history from the default storage location.
    pub fn load() -> Self {
        Self::load_from(&af_common::config::default_history_path())
    }

    /// Load the history from `path`.
    ///
    /// A missing file is an empty history. An unparsable file is logged,
    /// deleted and treated as empty.
    pub fn load_from(path: &Path) -> Self {
        let items = match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Vec<HistoryItem>>(&json) {
                Ok(items) => {
                    debug!(count = items.len(), "Loaded history");
                    items
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to parse history file, discarding it"
                    );
                    if let Err(e) = std::fs::remove_file(path) {
                        warn!(error = %e, "Failed to remove corrupt history file");
                    }
                    Vec::new()
                }
            },
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(error = %e, "Failed to read history file");
                }
                Vec::new()
            }
        };

        Self {
            items,
            storage_path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Record a new item at the front of the list.
    ///
    /// The id is the current epoch time in milliseconds, raised above every
    /// existing id when two items land in the same millisecond.
    pub fn add(&mut self, new: NewHistoryItem) -> &HistoryItem {
        let now = now_millis();
        let id = match self.items.iter().map(|i| i.id).max() {
            Some(max) if max >= now => max + 1,
            _ => now,
        };

        let item = HistoryItem {
            id,
            timestamp: iso_timestamp(now),
            kind: new.kind,
            prompt: new.prompt,
            data: new.data,
            metadata: new.metadata,
        };
        debug!(id, kind = %item.kind, "Added history item");

        self.items.insert(0, item);
        &self.items[0]
    }

    /// Delete the item with `id`.
    pub fn remove(&mut self, id: u64) -> HistoryStoreResult<HistoryItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(HistoryStoreError::ItemNotFound { id })?;

        debug!(id, "Removed history item");
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        let count = self.items.len();
        self.items.clear();
        debug!(count, "Cleared history");
    }

    /// All items, most recent first.
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: u64) -> Option<&HistoryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn filtered(&self, filter: HistoryFilter) -> impl Iterator<Item = &HistoryItem> + '_ {
        self.items.iter().filter(move |i| filter.matches(i))
    }

    /// Items that can go on the timeline (video and audio).
    pub fn media_items(&self) -> impl Iterator<Item = &HistoryItem> + '_ {
        self.items.iter().filter(|i| i.kind.media_kind().is_some())
    }

    /// The media items as assets, sized with `config`'s fallback durations.
    pub fn media_bin<'a>(&'a self, config: &'a EditorConfig) -> MediaBin<'a> {
        MediaBin {
            store: self,
            config,
        }
    }

    /// Write the list to disk atomically, creating the directory if needed.
    pub fn save(&self) -> HistoryStoreResult<()> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    error!(
                        path = %parent.display(),
                        error = %e,
                        "Failed to create history directory"
                    );
                    HistoryStoreError::Io(e)
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&self.items)?;
        let temp_path = self.storage_path.with_extension("json.tmp");
        std::fs::write(&temp_path, json.as_bytes())?;
        std::fs::rename(&temp_path, &self.storage_path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            error!(
                to = %self.storage_path.display(),
                error = %e,
                "Failed to rename temp history file"
            );
            HistoryStoreError::Io(e)
        })?;

        info!(
            count = self.items.len(),
            path = %self.storage_path.display(),
            "Saved history"
        );
        Ok(())
    }
}

/// Read-only view of the store's video and audio items as timeline assets.
#[derive(Clone, Copy, Debug)]
pub struct MediaBin<'a> {
    store: &'a HistoryStore,
    config: &'a EditorConfig,
}

impl MediaBin<'_> {
    pub fn assets(&self) -> Vec<AssetRecord> {
        self.store
            .media_items()
            .filter_map(|i| i.to_asset(self.config))
            .collect()
    }
}

impl AssetProvider for MediaBin<'_> {
    fn asset(&self, id: u64) -> Option<AssetRecord> {
        self.store.find(id)?.to_asset(self.config)
    }
}
