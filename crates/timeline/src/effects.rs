//! Visual effect parameters for video clips.
//!
//! The parameter set is closed: five independently optional numeric values.
//! An absent parameter means the identity value. The same struct doubles as a
//! partial update, where only the `Some` fields are applied.

use serde::{Deserialize, Serialize};

/// Valid range for blur radius (pixels).
pub const BLUR_RANGE: (f64, f64) = (0.0, f64::INFINITY);
/// Valid range for grayscale amount.
pub const GRAYSCALE_RANGE: (f64, f64) = (0.0, 1.0);
/// Valid range for brightness, contrast and saturation multipliers.
pub const MULTIPLIER_RANGE: (f64, f64) = (0.0, 2.0);

/// Effect parameters attached to a clip, or a partial update to them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualEffects {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grayscale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturate: Option<f64>,
}

/// Effect parameters with every default filled in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedEffects {
    pub blur: f64,
    pub grayscale: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub saturate: f64,
}

impl ResolvedEffects {
    pub const IDENTITY: Self = Self {
        blur: 0.0,
        grayscale: 0.0,
        brightness: 1.0,
        contrast: 1.0,
        saturate: 1.0,
    };
}

/// Clamp a slider value into `range`. Non-finite input is dropped.
fn sanitize(value: f64, range: (f64, f64)) -> Option<f64> {
    value.is_finite().then(|| value.clamp(range.0, range.1))
}

impl VisualEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blur(mut self, value: f64) -> Self {
        self.blur = Some(value);
        self
    }

    pub fn with_grayscale(mut self, value: f64) -> Self {
        self.grayscale = Some(value);
        self
    }

    pub fn with_brightness(mut self, value: f64) -> Self {
        self.brightness = Some(value);
        self
    }

    pub fn with_contrast(mut self, value: f64) -> Self {
        self.contrast = Some(value);
        self
    }

    pub fn with_saturate(mut self, value: f64) -> Self {
        self.saturate = Some(value);
        self
    }

    /// Apply `update` key by key. Parameters absent from the update are left
    /// untouched; present ones are clamped into range, or ignored when not finite.
    pub fn merged(&self, update: &VisualEffects) -> Self {
        let pick = |current: Option<f64>, incoming: Option<f64>, range| {
            match incoming.map(|v| sanitize(v, range)) {
                Some(Some(v)) => Some(v),
                _ => current,
            }
        };

        Self {
            blur: pick(self.blur, update.blur, BLUR_RANGE),
            grayscale: pick(self.grayscale, update.grayscale, GRAYSCALE_RANGE),
            brightness: pick(self.brightness, update.brightness, MULTIPLIER_RANGE),
            contrast: pick(self.contrast, update.contrast, MULTIPLIER_RANGE),
            saturate: pick(self.saturate, update.saturate, MULTIPLIER_RANGE),
        }
    }

    /// Concrete values, absent parameters replaced by identity.
    pub fn resolved(&self) -> ResolvedEffects {
        let id = ResolvedEffects::IDENTITY;
        ResolvedEffects {
            blur: self.blur.unwrap_or(id.blur),
            grayscale: self.grayscale.unwrap_or(id.grayscale),
            brightness: self.brightness.unwrap_or(id.brightness),
            contrast: self.contrast.unwrap_or(id.contrast),
            saturate: self.saturate.unwrap_or(id.saturate),
        }
    }

    /// True when no parameter is set at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when the parameters render the same as no effects.
    pub fn is_identity(&self) -> bool {
        self.resolved() == ResolvedEffects::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_untouched_parameters() {
        let current = VisualEffects::new().with_blur(5.0).with_brightness(1.2);
        let merged = current.merged(&VisualEffects::new().with_grayscale(0.5));

        assert_eq!(merged.blur, Some(5.0));
        assert_eq!(merged.brightness, Some(1.2));
        assert_eq!(merged.grayscale, Some(0.5));
        assert_eq!(merged.contrast, None);
        assert_eq!(merged.saturate, None);
    }

    #[test]
    fn merge_clamps_out_of_range_values() {
        let update = VisualEffects {
            blur: Some(-3.0),
            grayscale: Some(1.7),
            brightness: Some(2.5),
            contrast: Some(-0.1),
            saturate: Some(0.4),
        };
        let merged = VisualEffects::new().merged(&update);

        assert_eq!(merged.blur, Some(0.0));
        assert_eq!(merged.grayscale, Some(1.0));
        assert_eq!(merged.brightness, Some(2.0));
        assert_eq!(merged.contrast, Some(0.0));
        assert_eq!(merged.saturate, Some(0.4));
    }

    #[test]
    fn merge_ignores_non_finite_values() {
        let current = VisualEffects::new().with_contrast(1.5);
        let update = VisualEffects::new()
            .with_contrast(f64::NAN)
            .with_blur(f64::INFINITY);
        let merged = current.merged(&update);

        assert_eq!(merged.contrast, Some(1.5));
        assert_eq!(merged.blur, None);
    }

    #[test]
    fn resolved_uses_identity_defaults() {
        assert_eq!(VisualEffects::new().resolved(), ResolvedEffects::IDENTITY);

        let resolved = VisualEffects::new().with_saturate(0.0).resolved();
        assert_eq!(resolved.saturate, 0.0);
        assert_eq!(resolved.brightness, 1.0);
    }

    #[test]
    fn identity_vs_empty() {
        let explicit_identity = VisualEffects::new().with_brightness(1.0).with_blur(0.0);
        assert!(explicit_identity.is_identity());
        assert!(!explicit_identity.is_empty());

        assert!(VisualEffects::new().is_empty());
        assert!(!VisualEffects::new().with_grayscale(0.2).is_identity());
    }

    #[test]
    fn absent_keys_are_not_serialized() {
        let json = serde_json::to_string(&VisualEffects::new().with_blur(2.0)).unwrap();
        assert_eq!(json, r#"{"blur":2.0}"#);

        let parsed: VisualEffects = serde_json::from_str(r#"{"grayscale":0.5}"#).unwrap();
        assert_eq!(parsed, VisualEffects::new().with_grayscale(0.5));
    }
}
