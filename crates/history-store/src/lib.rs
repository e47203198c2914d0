//! `af-history-store` -- Persistent history of generated artifacts.
//!
//! Every image, video, audio or text result the studio produces is recorded
//! here, most recent first, and saved as JSON in the user's data directory.
//! Video and audio items double as the timeline's media bin:
//!
//! - **`HistoryStore`**: load / add / remove / clear / filter / save
//! - **`HistoryItem`**: one artifact, convertible to an `AssetRecord`
//! - **`MediaBin`**: an `AssetProvider` over the store's video and audio items
//!
//! # Usage
//!
//! ```rust,no_run
//! use af_common::EditorConfig;
//! use af_history_store::{HistoryItemKind, HistoryStore, NewHistoryItem};
//!
//! let mut store = HistoryStore::load();
//! let id = store
//!     .add(NewHistoryItem {
//!         kind: HistoryItemKind::Video,
//!         prompt: "Drone shot over a fjord".into(),
//!         data: "https://cdn.example/fjord.mp4".into(),
//!         metadata: None,
//!     })
//!     .id;
//! store.save().unwrap();
//!
//! let config = EditorConfig::default();
//! let asset = store.find(id).and_then(|item| item.to_asset(&config));
//! ```

pub mod error;
pub mod store;
pub mod types;

pub use error::{HistoryStoreError, HistoryStoreResult};
pub use store::{HistoryStore, MediaBin};
pub use types::{HistoryFilter, HistoryItem, HistoryItemKind, NewHistoryItem};
