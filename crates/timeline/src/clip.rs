//! Clip data structure: one placed media segment on a track.

use af_common::{AssetRecord, ClipId, MediaKind};
use serde::{Deserialize, Serialize};

use crate::effects::VisualEffects;
use crate::error::{TimelineError, TimelineResult};

/// Everything needed to place a new clip, minus the id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipSpec {
    /// History store entry the media came from (reference, not ownership).
    pub source_asset_id: u64,
    pub kind: MediaKind,
    /// URL or path of the media.
    pub source: String,
    pub name: String,
    /// Duration in seconds.
    pub duration: f64,
}

impl From<&AssetRecord> for ClipSpec {
    fn from(asset: &AssetRecord) -> Self {
        Self {
            source_asset_id: asset.id,
            kind: asset.kind,
            source: asset.source.clone(),
            name: asset.name.clone(),
            duration: asset.duration_hint,
        }
    }
}

impl From<AssetRecord> for ClipSpec {
    fn from(asset: AssetRecord) -> Self {
        Self {
            source_asset_id: asset.id,
            kind: asset.kind,
            source: asset.source,
            name: asset.name,
            duration: asset.duration_hint,
        }
    }
}

/// Partial property update for a clip.
///
/// `volume` replaces the current value; `effects` merges key by key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<VisualEffects>,
}

impl ClipUpdate {
    pub fn volume(volume: f64) -> Self {
        Self {
            volume: Some(volume),
            effects: None,
        }
    }

    pub fn effects(effects: VisualEffects) -> Self {
        Self {
            volume: None,
            effects: Some(effects),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.volume.is_none() && self.effects.is_none()
    }
}

/// A clip placed on a track.
///
/// Clips are values: editing never mutates one in place, it builds a
/// replacement. Fields are read through accessors so that the duration and
/// range invariants cannot be bypassed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    id: ClipId,
    source_asset_id: u64,
    kind: MediaKind,
    source: String,
    name: String,
    duration: f64,
    volume: f64,
    #[serde(default, skip_serializing_if = "VisualEffects::is_empty")]
    effects: VisualEffects,
}

pub(crate) fn is_valid_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

impl Clip {
    /// Create a clip at full volume with no effects.
    ///
    /// Fails if `spec.duration` is not a finite positive number.
    pub fn new(id: ClipId, spec: ClipSpec) -> TimelineResult<Self> {
        if !is_valid_duration(spec.duration) {
            return Err(TimelineError::InvalidDuration {
                duration: spec.duration,
            });
        }

        Ok(Self {
            id,
            source_asset_id: spec.source_asset_id,
            kind: spec.kind,
            source: spec.source,
            name: spec.name,
            duration: spec.duration,
            volume: 1.0,
            effects: VisualEffects::default(),
        })
    }

    pub fn id(&self) -> ClipId {
        self.id
    }

    pub fn source_asset_id(&self) -> u64 {
        self.source_asset_id
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Duration in seconds. Always > 0.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Volume in [0, 1].
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Effect parameters. Always empty on audio clips.
    pub fn effects(&self) -> &VisualEffects {
        &self.effects
    }

    /// Copy of this clip with `update` applied.
    ///
    /// Volume is clamped into [0, 1]; non-finite volumes are ignored. Effects
    /// merge key by key and are ignored entirely on audio clips.
    pub fn with_update(&self, update: &ClipUpdate) -> Self {
        let mut next = self.clone();
        if let Some(volume) = update.volume.filter(|v| v.is_finite()) {
            next.volume = volume.clamp(0.0, 1.0);
        }
        if let Some(effects) = &update.effects {
            if self.kind == MediaKind::Video {
                next.effects = self.effects.merged(effects);
            }
        }
        next
    }

    /// Whether `offset` (seconds from the clip start) lies strictly inside.
    pub fn can_split_at(&self, offset: f64) -> bool {
        offset > 0.0 && offset < self.duration
    }

    /// Cut the clip `offset` seconds after its start.
    ///
    /// The first half keeps this clip's id; the second half takes `second_id`.
    /// Both keep kind, source, name, volume and effects. Returns `None` unless
    /// `0 < offset < duration`.
    pub fn split_at(&self, offset: f64, second_id: ClipId) -> Option<(Self, Self)> {
        if !self.can_split_at(offset) {
            return None;
        }

        let first = Self {
            duration: offset,
            ..self.clone()
        };
        let second = Self {
            id: second_id,
            duration: self.duration - offset,
            ..self.clone()
        };
        Some((first, second))
    }

    /// Re-apply range rules to a clip that did not come through the
    /// constructor (e.g. deserialized). Returns `None` for a bad duration.
    pub(crate) fn sanitized(&self) -> Option<Self> {
        if !is_valid_duration(self.duration) {
            return None;
        }
        let mut clean = self.clone();
        clean.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        clean.effects = match self.kind {
            MediaKind::Video => VisualEffects::default().merged(&self.effects),
            MediaKind::Audio => VisualEffects::default(),
        };
        Some(clean)
    }
}
