//! Playhead resolution: which clip is active on each track at a given time.

use af_common::TimeCode;

use crate::clip::Clip;
use crate::state::TimelineState;
use crate::track::Track;

/// The clip under the playhead on one track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveClip<'a> {
    pub clip: &'a Clip,
    /// Position of the clip within its track.
    pub index: usize,
    /// Timeline time at which the clip starts.
    pub start: f64,
    /// Playhead offset into the clip, in `[0, duration)`.
    pub offset: f64,
}

/// Per-track preview resolution. Either side may be `None` independently.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Preview<'a> {
    pub video: Option<ActiveClip<'a>>,
    pub audio: Option<ActiveClip<'a>>,
}

impl Preview<'_> {
    pub fn is_empty(&self) -> bool {
        self.video.is_none() && self.audio.is_none()
    }
}

/// Find the clip with `start <= position < start + duration`.
///
/// Linear scan. Positions past the end of the track, negative or NaN
/// positions resolve to `None`.
pub fn resolve_track(track: &Track, position: f64) -> Option<ActiveClip<'_>> {
    if position.is_nan() || position < 0.0 {
        return None;
    }

    track
        .starts()
        .enumerate()
        .find(|(_, (start, clip))| *start <= position && position < start + clip.duration())
        .map(|(index, (start, clip))| ActiveClip {
            clip,
            index,
            start,
            offset: position - start,
        })
}

/// Resolve both tracks at `time`.
pub fn resolve_preview(state: &TimelineState, time: TimeCode) -> Preview<'_> {
    let position = time.as_secs();
    Preview {
        video: resolve_track(state.video(), position),
        audio: resolve_track(state.audio(), position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipSpec;
    use af_common::{ClipId, MediaKind};

    fn spec(kind: MediaKind, duration: f64) -> ClipSpec {
        ClipSpec {
            source_asset_id: 0,
            kind,
            source: "media".to_string(),
            name: "media".to_string(),
            duration,
        }
    }

    /// Video [0: 4s, 1: 6s] (10s total), audio [2: 5s].
    fn sample() -> TimelineState {
        TimelineState::new()
            .append_clip(ClipId(0), spec(MediaKind::Video, 4.0))
            .unwrap()
            .append_clip(ClipId(1), spec(MediaKind::Video, 6.0))
            .unwrap()
            .append_clip(ClipId(2), spec(MediaKind::Audio, 5.0))
            .unwrap()
    }

    #[test]
    fn resolves_at_track_end() {
        let state = sample();
        assert!(resolve_track(state.video(), 10.001).is_none());
        assert!(resolve_track(state.video(), 10.0).is_none());

        let last = resolve_track(state.video(), 9.999).unwrap();
        assert_eq!(last.clip.id(), ClipId(1));
        assert_eq!(last.index, 1);
        assert_eq!(last.start, 4.0);
    }

    #[test]
    fn boundary_belongs_to_next_clip() {
        let state = sample();
        assert_eq!(resolve_track(state.video(), 0.0).unwrap().clip.id(), ClipId(0));
        let at_four = resolve_track(state.video(), 4.0).unwrap();
        assert_eq!(at_four.clip.id(), ClipId(1));
        assert_eq!(at_four.offset, 0.0);
    }

    #[test]
    fn offset_is_relative_to_clip_start() {
        let state = sample();
        let active = resolve_track(state.video(), 7.5).unwrap();
        assert_eq!(active.offset, 3.5);
    }

    #[test]
    fn invalid_positions_resolve_to_none() {
        let state = sample();
        assert!(resolve_track(state.video(), -0.5).is_none());
        assert!(resolve_track(state.video(), f64::NAN).is_none());
        assert!(resolve_track(&Track::new(), 0.0).is_none());
    }

    #[test]
    fn tracks_resolve_independently() {
        let state = sample();

        let both = resolve_preview(&state, TimeCode::from_secs(2.0));
        assert_eq!(both.video.unwrap().clip.id(), ClipId(0));
        assert_eq!(both.audio.unwrap().clip.id(), ClipId(2));

        let video_only = resolve_preview(&state, TimeCode::from_secs(7.0));
        assert_eq!(video_only.video.unwrap().clip.id(), ClipId(1));
        assert!(video_only.audio.is_none());

        assert!(resolve_preview(&state, TimeCode::from_secs(12.0)).is_empty());
    }
}
