//! `af-common` -- Shared types, configuration, and errors for AuraFrame Studio.
//!
//! This crate is the foundation the editing crates depend on:
//!
//! - **Types**: `ClipId`, `MediaKind`, `TimeCode` (newtypes for safety)
//! - **Assets**: `AssetRecord` and `AssetProvider`, how generated media reaches the timeline
//! - **Config**: `StudioConfig`, `EditorConfig`
//! - **Errors**: `ConfigError` (thiserror-based)
//! - **Time**: epoch milliseconds and ISO-8601 timestamps

pub mod asset;
pub mod config;
pub mod error;
pub mod time;
pub mod types;

// Re-export commonly used items at crate root
pub use asset::{AssetProvider, AssetRecord};
pub use config::{EditorConfig, StudioConfig};
pub use error::{ConfigError, ConfigResult};
pub use types::{ClipId, ClipIdAllocator, MediaKind, TimeCode};
