//! `af-timeline` -- The timeline editing model for AuraFrame Studio.
//!
//! Two independent tracks (video, audio), each a gapless edit list of clips
//! built from previously generated assets. Every editing function takes a
//! `&TimelineState` and returns a brand new state, so older snapshots stay
//! valid for the undo history kept by `af-app-state`.
//!
//! # Architecture
//!
//! ```text
//! TimelineState
//! ├── video: Track  (ordered clips, start = sum of predecessor durations)
//! └── audio: Track
//!
//! Clip
//! ├── id / source_asset_id / kind / source / name   (immutable)
//! ├── duration                                      (changed only by split)
//! └── volume, effects                               (clamped property updates)
//! ```
//!
//! Remove, update and split return `Option<TimelineState>`: `None` means
//! nothing changed (unknown id, split point not strictly inside the clip) and
//! the caller must not record a history entry. Append can only fail on a bad
//! duration and returns a `TimelineResult`.

pub mod clip;
pub mod effects;
pub mod error;
pub mod preview;
pub mod state;
pub mod track;

pub use clip::{Clip, ClipSpec, ClipUpdate};
pub use effects::{ResolvedEffects, VisualEffects};
pub use error::{TimelineError, TimelineResult};
pub use preview::{resolve_preview, resolve_track, ActiveClip, Preview};
pub use state::TimelineState;
pub use track::Track;
