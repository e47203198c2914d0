//! Error types for the timeline crate (thiserror-based).
//!
//! Editing operations never fail loudly; these errors only come from clip
//! construction and from invariant checks on timelines built elsewhere
//! (e.g. a deserialized session).

use af_common::{ClipId, MediaKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// Clip durations must be finite and strictly positive.
    #[error("Invalid clip duration: {duration}")]
    InvalidDuration { duration: f64 },

    /// The same id appears twice across the two tracks.
    #[error("Duplicate clip id: {id}")]
    DuplicateClipId { id: ClipId },

    /// A clip sits on the track of the other media kind.
    #[error("Clip {id} is a {kind} clip on the wrong track")]
    MisplacedClip { id: ClipId, kind: MediaKind },
}

/// Convenience Result type for timeline operations.
pub type TimelineResult<T> = Result<T, TimelineError>;
