//! Timeline state: an immutable snapshot of both tracks, and the pure editing
//! functions that derive new snapshots from it.

use std::collections::HashSet;

use af_common::{ClipId, MediaKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clip::{Clip, ClipSpec, ClipUpdate};
use crate::error::{TimelineError, TimelineResult};
use crate::track::Track;

/// Both tracks of the timeline. The tracks are independent of each other.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineState {
    video: Track,
    audio: Track,
}

impl TimelineState {
    /// An empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn video(&self) -> &Track {
        &self.video
    }

    pub fn audio(&self) -> &Track {
        &self.audio
    }

    /// The track holding clips of `kind`.
    pub fn track(&self, kind: MediaKind) -> &Track {
        match kind {
            MediaKind::Video => &self.video,
            MediaKind::Audio => &self.audio,
        }
    }

    fn with_track(&self, kind: MediaKind, track: Track) -> Self {
        match kind {
            MediaKind::Video => Self {
                video: track,
                audio: self.audio.clone(),
            },
            MediaKind::Audio => Self {
                video: self.video.clone(),
                audio: track,
            },
        }
    }

    /// Longest of the two tracks, in seconds.
    pub fn total_duration(&self) -> f64 {
        self.video.duration().max(self.audio.duration())
    }

    pub fn clip_count(&self) -> usize {
        self.video.len() + self.audio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.video.is_empty() && self.audio.is_empty()
    }

    /// Every clip, video track first.
    pub fn clips(&self) -> impl Iterator<Item = &Clip> + '_ {
        self.video.iter().chain(self.audio.iter())
    }

    /// Find a clip on either track.
    pub fn find_clip(&self, id: ClipId) -> Option<&Clip> {
        self.video.get(id).or_else(|| self.audio.get(id))
    }

    pub fn contains(&self, id: ClipId) -> bool {
        self.find_clip(id).is_some()
    }

    /// Kind of track, index and start time of the clip with `id`.
    pub fn locate(&self, id: ClipId) -> Option<(MediaKind, usize, f64)> {
        if let Some((index, start)) = self.video.locate(id) {
            return Some((MediaKind::Video, index, start));
        }
        self.audio
            .locate(id)
            .map(|(index, start)| (MediaKind::Audio, index, start))
    }

    /// Start time of the clip with `id` on its track.
    pub fn clip_start(&self, id: ClipId) -> Option<f64> {
        self.locate(id).map(|(_, _, start)| start)
    }

    /// Highest clip id present, if any.
    pub fn max_clip_id(&self) -> Option<ClipId> {
        self.clips().map(Clip::id).max()
    }

    /// New clip from `spec` with id `id`, appended to the end of its track.
    /// The other track is carried over unchanged.
    ///
    /// Fails on a non-positive duration or an id already in use.
    pub fn append_clip(&self, id: ClipId, spec: ClipSpec) -> TimelineResult<Self> {
        if self.contains(id) {
            return Err(TimelineError::DuplicateClipId { id });
        }

        let clip = Clip::new(id, spec)?;
        let kind = clip.kind();
        debug!(clip_id = %id, %kind, duration = clip.duration(), "Appending clip");

        let track = self.track(kind).with_appended(clip);
        Ok(self.with_track(kind, track))
    }

    /// Remove the clip with `id` from whichever track holds it.
    ///
    /// Returns `None` when no clip has that id.
    pub fn remove_clip(&self, id: ClipId) -> Option<Self> {
        let Some((kind, index, _)) = self.locate(id) else {
            debug!(clip_id = %id, "Remove skipped: clip not found");
            return None;
        };

        debug!(clip_id = %id, %kind, index, "Removing clip");
        let track = self.track(kind).without_index(index);
        Some(self.with_track(kind, track))
    }

    /// Merge `update` into the clip with `id`.
    ///
    /// Returns `None` when no clip has that id, or when the merged clip is
    /// identical to the current one.
    pub fn update_clip_properties(&self, id: ClipId, update: &ClipUpdate) -> Option<Self> {
        let Some((kind, index, _)) = self.locate(id) else {
            debug!(clip_id = %id, "Update skipped: clip not found");
            return None;
        };

        let current = &self.track(kind).clips()[index];
        let updated = current.with_update(update);
        if &updated == current {
            debug!(clip_id = %id, "Update skipped: nothing changed");
            return None;
        }

        debug!(clip_id = %id, volume = updated.volume(), "Updating clip properties");
        let track = self.track(kind).with_replaced(index, [updated]);
        Some(self.with_track(kind, track))
    }

    /// Whether `split_clip(id, at, _)` would succeed: `at` (timeline seconds)
    /// lies strictly inside the clip.
    ///
    /// Tested on the clip-relative offset, the same value the split uses.
    pub fn can_split(&self, id: ClipId, at: f64) -> bool {
        match self.locate(id) {
            Some((kind, index, start)) => {
                self.track(kind).clips()[index].can_split_at(at - start)
            }
            None => false,
        }
    }

    /// Split the clip with `id` at timeline time `at`.
    ///
    /// The first half keeps `id`, the second half gets `second_id`; both
    /// replace the original at its position. Returns `None` when the clip is
    /// unknown, `at` is not strictly inside it, or `second_id` is taken.
    pub fn split_clip(&self, id: ClipId, at: f64, second_id: ClipId) -> Option<Self> {
        let Some((kind, index, start)) = self.locate(id) else {
            debug!(clip_id = %id, "Split skipped: clip not found");
            return None;
        };

        if !self.can_split(id, at) {
            debug!(clip_id = %id, at, start, "Split skipped: not strictly inside clip");
            return None;
        }

        if self.contains(second_id) {
            warn!(clip_id = %id, second_id = %second_id, "Split skipped: id already in use");
            return None;
        }

        let clip = &self.track(kind).clips()[index];
        let (first, second) = clip.split_at(at - start, second_id)?;
        debug!(
            clip_id = %id,
            second_id = %second_id,
            first = first.duration(),
            second = second.duration(),
            "Splitting clip"
        );

        let track = self.track(kind).with_replaced(index, [first, second]);
        Some(self.with_track(kind, track))
    }

    /// Check the structural invariants: positive durations, unique ids, each
    /// clip on the track of its kind. Ranges (volume, effects) are repaired
    /// rather than rejected.
    pub fn validated(&self) -> TimelineResult<Self> {
        let mut seen = HashSet::new();
        let mut clean = Self::new();

        for kind in [MediaKind::Video, MediaKind::Audio] {
            let mut clips = Vec::with_capacity(self.track(kind).len());
            for clip in self.track(kind) {
                if clip.kind() != kind {
                    return Err(TimelineError::MisplacedClip {
                        id: clip.id(),
                        kind: clip.kind(),
                    });
                }
                if !seen.insert(clip.id()) {
                    return Err(TimelineError::DuplicateClipId { id: clip.id() });
                }
                let sanitized = clip.sanitized().ok_or(TimelineError::InvalidDuration {
                    duration: clip.duration(),
                })?;
                clips.push(sanitized);
            }
            clean = clean.with_track(kind, Track::from_clips(clips));
        }

        Ok(clean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::VisualEffects;

    fn spec(kind: MediaKind, source: &str, duration: f64) -> ClipSpec {
        ClipSpec {
            source_asset_id: 1,
            kind,
            source: source.to_string(),
            name: source.to_string(),
            duration,
        }
    }

    /// Video [0: 10s, 1: 4s], audio [2: 5s].
    fn sample() -> TimelineState {
        TimelineState::new()
            .append_clip(ClipId(0), spec(MediaKind::Video, "a.mp4", 10.0))
            .unwrap()
            .append_clip(ClipId(1), spec(MediaKind::Video, "b.mp4", 4.0))
            .unwrap()
            .append_clip(ClipId(2), spec(MediaKind::Audio, "c.wav", 5.0))
            .unwrap()
    }

    #[test]
    fn append_is_track_exclusive() {
        let before = sample();
        let after = before
            .append_clip(ClipId(3), spec(MediaKind::Video, "d.mp4", 2.0))
            .unwrap();
        assert_eq!(after.audio(), before.audio());
        assert_eq!(after.video().len(), 3);
        assert_eq!(after.video().clips()[2].id(), ClipId(3));

        let after = before
            .append_clip(ClipId(3), spec(MediaKind::Audio, "e.wav", 2.0))
            .unwrap();
        assert_eq!(after.video(), before.video());
        assert_eq!(after.audio().len(), 2);
    }

    #[test]
    fn append_leaves_original_snapshot_intact() {
        let before = sample();
        let copy = before.clone();
        let _ = before.append_clip(ClipId(3), spec(MediaKind::Video, "d.mp4", 2.0));
        assert_eq!(before, copy);
    }

    #[test]
    fn append_rejects_duplicate_id_and_bad_duration() {
        let state = sample();
        assert!(matches!(
            state.append_clip(ClipId(1), spec(MediaKind::Audio, "x.wav", 1.0)),
            Err(TimelineError::DuplicateClipId { .. })
        ));
        assert!(matches!(
            state.append_clip(ClipId(9), spec(MediaKind::Audio, "x.wav", 0.0)),
            Err(TimelineError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn total_duration_is_longest_track() {
        let state = sample();
        assert_eq!(state.video().duration(), 14.0);
        assert_eq!(state.audio().duration(), 5.0);
        assert_eq!(state.total_duration(), 14.0);
        assert_eq!(TimelineState::new().total_duration(), 0.0);
    }

    #[test]
    fn remove_searches_both_tracks() {
        let state = sample();

        let no_audio = state.remove_clip(ClipId(2)).unwrap();
        assert!(no_audio.audio().is_empty());
        assert_eq!(no_audio.video(), state.video());

        let no_first = state.remove_clip(ClipId(0)).unwrap();
        assert_eq!(no_first.video().len(), 1);
        assert_eq!(no_first.clip_start(ClipId(1)), Some(0.0));
    }

    #[test]
    fn remove_unknown_is_none() {
        assert!(sample().remove_clip(ClipId(42)).is_none());
    }

    #[test]
    fn update_merges_effects() {
        let state = sample()
            .update_clip_properties(
                ClipId(0),
                &ClipUpdate::effects(VisualEffects::new().with_blur(5.0).with_brightness(1.2)),
            )
            .unwrap();
        let state = state
            .update_clip_properties(
                ClipId(0),
                &ClipUpdate::effects(VisualEffects::new().with_grayscale(0.5)),
            )
            .unwrap();

        let effects = state.find_clip(ClipId(0)).unwrap().effects();
        assert_eq!(effects.blur, Some(5.0));
        assert_eq!(effects.brightness, Some(1.2));
        assert_eq!(effects.grayscale, Some(0.5));
    }

    #[test]
    fn update_unknown_or_unchanged_is_none() {
        let state = sample();
        assert!(state
            .update_clip_properties(ClipId(42), &ClipUpdate::volume(0.5))
            .is_none());
        // Volume is already 1.0
        assert!(state
            .update_clip_properties(ClipId(0), &ClipUpdate::volume(1.0))
            .is_none());
        assert!(state
            .update_clip_properties(ClipId(0), &ClipUpdate::default())
            .is_none());
    }

    #[test]
    fn split_in_middle_of_second_clip() {
        let state = sample();
        // Clip 1 spans [10, 14)
        let split = state.split_clip(ClipId(1), 11.5, ClipId(3)).unwrap();

        let ids: Vec<ClipId> = split.video().iter().map(Clip::id).collect();
        assert_eq!(ids, vec![ClipId(0), ClipId(1), ClipId(3)]);
        assert_eq!(split.find_clip(ClipId(1)).unwrap().duration(), 1.5);
        assert_eq!(split.find_clip(ClipId(3)).unwrap().duration(), 2.5);
        assert_eq!(split.clip_start(ClipId(3)), Some(11.5));
        assert_eq!(split.video().duration(), state.video().duration());
        assert_eq!(split.audio(), state.audio());
    }

    #[test]
    fn split_rejects_boundaries_and_outside_points() {
        let state = sample();
        for at in [10.0, 14.0, 9.0, 15.0, -1.0] {
            assert!(state.split_clip(ClipId(1), at, ClipId(3)).is_none(), "at = {at}");
            assert!(!state.can_split(ClipId(1), at));
        }
        assert!(state.can_split(ClipId(1), 12.0));
        assert!(state.split_clip(ClipId(42), 1.0, ClipId(3)).is_none());
    }

    #[test]
    fn can_split_agrees_with_split_on_rounding_edge() {
        let state = TimelineState::new()
            .append_clip(ClipId(0), spec(MediaKind::Video, "a.mp4", 6.450150416074041))
            .unwrap()
            .append_clip(ClipId(1), spec(MediaKind::Video, "b.mp4", 9.058860864765442))
            .unwrap();
        let at = 15.509011280839482;

        let split = state.split_clip(ClipId(1), at, ClipId(2));
        assert_eq!(state.can_split(ClipId(1), at), split.is_some());
        assert!(split.is_none());
    }

    #[test]
    fn split_rejects_taken_second_id() {
        assert!(sample().split_clip(ClipId(0), 5.0, ClipId(2)).is_none());
    }

    #[test]
    fn max_clip_id_spans_both_tracks() {
        assert_eq!(sample().max_clip_id(), Some(ClipId(2)));
        assert_eq!(TimelineState::new().max_clip_id(), None);
    }

    #[test]
    fn validated_accepts_well_formed_state() {
        let state = sample();
        assert_eq!(state.validated().unwrap(), state);
    }

    #[test]
    fn validated_rejects_misplaced_and_duplicate_clips() {
        let json = r#"{
            "video": [{ "id": 1, "source_asset_id": 1, "kind": "audio", "source": "a.wav",
                        "name": "a", "duration": 1.0, "volume": 1.0 }],
            "audio": []
        }"#;
        let state: TimelineState = serde_json::from_str(json).unwrap();
        assert!(matches!(
            state.validated(),
            Err(TimelineError::MisplacedClip { .. })
        ));

        let json = r#"{
            "video": [{ "id": 1, "source_asset_id": 1, "kind": "video", "source": "a.mp4",
                        "name": "a", "duration": 1.0, "volume": 1.0 }],
            "audio": [{ "id": 1, "source_asset_id": 2, "kind": "audio", "source": "b.wav",
                        "name": "b", "duration": 1.0, "volume": 1.0 }]
        }"#;
        let state: TimelineState = serde_json::from_str(json).unwrap();
        assert!(matches!(
            state.validated(),
            Err(TimelineError::DuplicateClipId { .. })
        ));
    }
}
