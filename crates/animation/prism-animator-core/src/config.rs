//! Core configuration for prism-animator-core.

use serde::{Deserialize, Serialize};

use crate::clock::AnimationMode;

/// Initial timeline settings for a new animator and editor hints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Initial total timeline length in seconds.
    pub animation_time: f32,
    /// Initial wrap policy.
    pub mode: AnimationMode,
    /// Whether a new animator starts driving its properties.
    pub enabled: bool,
    /// Segments used when sampling a curve for a preview plot
    /// (`preview_segments + 1` points).
    pub preview_segments: usize,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            animation_time: 10.0,
            mode: AnimationMode::Once,
            enabled: false,
            preview_segments: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_json_falls_back_to_defaults() {
        let cfg: AnimatorConfig = serde_json::from_str(r#"{ "enabled": true }"#).unwrap();
        assert!(cfg.enabled);
        assert_eq!(cfg.animation_time, 10.0);
        assert_eq!(cfg.mode, AnimationMode::Once);
        assert_eq!(cfg.preview_segments, 20);
    }
}
