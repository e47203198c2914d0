//! Core types with newtype pattern for type safety.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Identity of a clip placed on the timeline.
///
/// Ids are handed out by a [`ClipIdAllocator`] and never reused, even when the
/// clip carrying one is later removed or undone away.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub u64);

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clip-{}", self.0)
    }
}

/// Monotonic source of fresh clip ids.
#[derive(Clone, Debug, Default)]
pub struct ClipIdAllocator {
    next: u64,
}

impl ClipIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start allocating at `next` (used when resuming a saved session).
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Hand out the next id.
    pub fn allocate(&mut self) -> ClipId {
        let id = ClipId(self.next);
        self.next += 1;
        id
    }

    /// Value the next call to `allocate` will return.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Make sure `id` (and everything below it) is never handed out.
    pub fn reserve_past(&mut self, id: ClipId) {
        if id.0 >= self.next {
            self.next = id.0 + 1;
        }
    }
}

/// Kind of media a clip carries. Fixed at creation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
        }
    }
}

/// Time code in seconds (f64 precision).
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeCode(pub f64);

impl TimeCode {
    pub const ZERO: Self = Self(0.0);

    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> f64 {
        self.0
    }

    pub fn as_millis(self) -> f64 {
        self.0 * 1000.0
    }
}

impl Add for TimeCode {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TimeCode {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_millis = self.as_millis().max(0.0).round() as u64;
        let hours = total_millis / 3_600_000;
        let mins = (total_millis / 60_000) % 60;
        let secs = (total_millis / 1000) % 60;
        let millis = total_millis % 1000;
        write!(f, "{hours:02}:{mins:02}:{secs:02}.{millis:03}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_is_monotonic() {
        let mut ids = ClipIdAllocator::new();
        assert_eq!(ids.allocate(), ClipId(0));
        assert_eq!(ids.allocate(), ClipId(1));
        assert_eq!(ids.peek(), 2);
    }

    #[test]
    fn reserve_past_skips_existing_ids() {
        let mut ids = ClipIdAllocator::starting_at(3);
        ids.reserve_past(ClipId(7));
        assert_eq!(ids.allocate(), ClipId(8));

        // Reserving something already behind us changes nothing
        ids.reserve_past(ClipId(2));
        assert_eq!(ids.allocate(), ClipId(9));
    }

    #[test]
    fn clip_id_display() {
        assert_eq!(ClipId(42).to_string(), "clip-42");
    }

    #[test]
    fn media_kind_serde_is_lowercase() {
        let json = serde_json::to_string(&MediaKind::Video).unwrap();
        assert_eq!(json, "\"video\"");
        let kind: MediaKind = serde_json::from_str("\"audio\"").unwrap();
        assert_eq!(kind, MediaKind::Audio);
    }

    #[test]
    fn timecode_display() {
        assert_eq!(TimeCode::from_secs(3661.5).to_string(), "01:01:01.500");
        assert_eq!(TimeCode::ZERO.to_string(), "00:00:00.000");
    }

    #[test]
    fn timecode_arithmetic() {
        let a = TimeCode::from_secs(1.5);
        let b = TimeCode::from_secs(2.5);
        assert_eq!((a + b).as_secs(), 4.0);
        assert_eq!((b - a).as_secs(), 1.0);
    }
}
