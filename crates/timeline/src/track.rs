//! Track: an ordered, gapless sequence of clips of one media kind.

use af_common::ClipId;
use serde::{Deserialize, Serialize};

use crate::clip::Clip;

/// An edit list. Playback order is vector order and the start of clip `i` is
/// the sum of the durations before it, so there are never gaps or overlaps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Track {
    clips: Vec<Clip>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_clips(clips: Vec<Clip>) -> Self {
        Self { clips }
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clip> {
        self.clips.iter()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Total duration in seconds (0 for an empty track).
    pub fn duration(&self) -> f64 {
        self.clips.iter().map(Clip::duration).sum()
    }

    pub fn get(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id() == id)
    }

    pub fn position(&self, id: ClipId) -> Option<usize> {
        self.clips.iter().position(|c| c.id() == id)
    }

    /// Start time of the clip at `index`: sum of its predecessors' durations.
    pub fn start_of_index(&self, index: usize) -> f64 {
        self.clips[..index.min(self.clips.len())]
            .iter()
            .map(Clip::duration)
            .sum()
    }

    /// Index and start time of the clip with `id`.
    pub fn locate(&self, id: ClipId) -> Option<(usize, f64)> {
        let mut start = 0.0;
        for (index, clip) in self.clips.iter().enumerate() {
            if clip.id() == id {
                return Some((index, start));
            }
            start += clip.duration();
        }
        None
    }

    /// Start times of every clip, in order.
    pub fn starts(&self) -> impl Iterator<Item = (f64, &Clip)> + '_ {
        self.clips.iter().scan(0.0, |start, clip| {
            let this = *start;
            *start += clip.duration();
            Some((this, clip))
        })
    }

    pub(crate) fn with_appended(&self, clip: Clip) -> Self {
        let mut clips = Vec::with_capacity(self.clips.len() + 1);
        clips.extend(self.clips.iter().cloned());
        clips.push(clip);
        Self { clips }
    }

    pub(crate) fn without_index(&self, index: usize) -> Self {
        let mut clips = self.clips.clone();
        clips.remove(index);
        Self { clips }
    }

    /// Copy of the track with the clip at `index` replaced by `replacement`
    /// (any number of clips, inserted in order).
    pub(crate) fn with_replaced(
        &self,
        index: usize,
        replacement: impl IntoIterator<Item = Clip>,
    ) -> Self {
        let mut clips = self.clips.clone();
        clips.splice(index..=index, replacement);
        Self { clips }
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a Clip;
    type IntoIter = std::slice::Iter<'a, Clip>;

    fn into_iter(self) -> Self::IntoIter {
        self.clips.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipSpec;
    use af_common::MediaKind;

    fn clip(id: u64, duration: f64) -> Clip {
        Clip::new(
            ClipId(id),
            ClipSpec {
                source_asset_id: id,
                kind: MediaKind::Video,
                source: format!("{id}.mp4"),
                name: format!("Clip {id}"),
                duration,
            },
        )
        .unwrap()
    }

    fn track(durations: &[f64]) -> Track {
        Track::from_clips(
            durations
                .iter()
                .enumerate()
                .map(|(i, d)| clip(i as u64, *d))
                .collect(),
        )
    }

    #[test]
    fn empty_track() {
        let t = Track::new();
        assert!(t.is_empty());
        assert_eq!(t.duration(), 0.0);
        assert!(t.locate(ClipId(0)).is_none());
    }

    #[test]
    fn duration_is_sum_of_clips() {
        assert_eq!(track(&[2.0, 3.5, 4.5]).duration(), 10.0);
    }

    #[test]
    fn locate_returns_cumulative_start() {
        let t = track(&[2.0, 3.0, 4.0]);
        assert_eq!(t.locate(ClipId(0)), Some((0, 0.0)));
        assert_eq!(t.locate(ClipId(1)), Some((1, 2.0)));
        assert_eq!(t.locate(ClipId(2)), Some((2, 5.0)));
        assert_eq!(t.locate(ClipId(9)), None);
        assert_eq!(t.start_of_index(2), 5.0);
    }

    #[test]
    fn starts_iterates_in_order() {
        let t = track(&[1.0, 2.0, 3.0]);
        let starts: Vec<f64> = t.starts().map(|(s, _)| s).collect();
        assert_eq!(starts, vec![0.0, 1.0, 3.0]);
    }

    #[test]
    fn copies_leave_original_untouched() {
        let t = track(&[1.0, 2.0]);

        let appended = t.with_appended(clip(5, 4.0));
        assert_eq!(appended.len(), 3);
        assert_eq!(t.len(), 2);

        let removed = t.without_index(0);
        assert_eq!(removed.clips()[0].id(), ClipId(1));
        assert_eq!(t.clips()[0].id(), ClipId(0));
    }

    #[test]
    fn replace_inserts_in_place() {
        let t = track(&[1.0, 2.0, 3.0]);
        let replaced = t.with_replaced(1, [clip(7, 0.5), clip(8, 1.5)]);
        let ids: Vec<u64> = replaced.iter().map(|c| c.id().0).collect();
        assert_eq!(ids, vec![0, 7, 8, 2]);
        assert_eq!(replaced.duration(), t.duration());
    }
}
