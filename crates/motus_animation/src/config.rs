//! Preset tuning
//!
//! The constants baked into the view presets, exposed as a serde/TOML
//! table so an app can retune them without code changes. Every field is
//! optional in TOML and falls back to the stock value.

use serde::{Deserialize, Serialize};

use crate::easing::DEFAULT_TENSION;
use crate::error::{AnimationError, Result};

/// Tunable constants for [`ViewAnimations`](crate::presets::ViewAnimations)
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PresetConfig {
    /// Duration of the disappear shrink
    pub disappear_duration_ms: u32,
    /// Start delay of the disappear shrink
    pub disappear_delay_ms: u32,
    /// Duration of the appear grow
    pub appear_duration_ms: u32,
    /// Tension for the appear/disappear easings
    pub appear_tension: f32,
    /// Length of one flicker pass in flip-ascend-disappear
    pub flicker_period_ms: u32,
    /// Default duration of flip-ascend-disappear
    pub flip_ascend_duration_ms: u32,
    /// Default upward travel of flip-ascend-disappear, in pixels
    pub flip_ascend_pixels: f32,
    /// Default duration of flip
    pub flip_duration_ms: u32,
    /// Default duration of one pulse pass
    pub pulse_duration_ms: u32,
    /// Peak scale of the pulse
    pub pulse_scale: f32,
    /// Default duration of rotate-on-y
    pub rotate_duration_ms: u32,
    /// Default duration of compress-and-expand
    pub compress_duration_ms: u32,
    /// Horizontal scale at the compressed point
    pub compress_scale_x: f32,
    /// Vertical scale at the compressed point
    pub compress_scale_y: f32,
    /// Anticipate tension of the compress stage
    pub compress_tension: f32,
    /// Default duration of bounce
    pub bounce_duration_ms: u32,
    /// Scale bounce starts from
    pub bounce_scale: f32,
    /// Default speed of move-to-position, in pixels per millisecond
    pub move_speed: f32,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            disappear_duration_ms: 350,
            disappear_delay_ms: 50,
            appear_duration_ms: 350,
            appear_tension: DEFAULT_TENSION,
            flicker_period_ms: 100,
            flip_ascend_duration_ms: 1500,
            flip_ascend_pixels: 100.0,
            flip_duration_ms: 500,
            pulse_duration_ms: 500,
            pulse_scale: 1.1,
            rotate_duration_ms: 500,
            compress_duration_ms: 1000,
            compress_scale_x: 1.3,
            compress_scale_y: 0.3,
            compress_tension: 4.0,
            bounce_duration_ms: 1000,
            bounce_scale: 1.5,
            move_speed: 1.0,
        }
    }
}

impl PresetConfig {
    /// Parse a (possibly partial) TOML table
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: PresetConfig = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the presets cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.flicker_period_ms == 0 {
            return Err(AnimationError::InvalidValue {
                field: "flicker_period_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        for (field, value) in [
            ("appear_tension", self.appear_tension),
            ("compress_tension", self.compress_tension),
            ("pulse_scale", self.pulse_scale),
            ("bounce_scale", self.bounce_scale),
            ("move_speed", self.move_speed),
        ] {
            if !value.is_finite() {
                return Err(AnimationError::InvalidValue {
                    field,
                    reason: format!("{value} is not finite"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PresetConfig::from_toml_str("pulse_scale = 1.25\nflip_duration_ms = 800\n")
            .unwrap();
        assert_eq!(config.pulse_scale, 1.25);
        assert_eq!(config.flip_duration_ms, 800);
        assert_eq!(config.disappear_duration_ms, 350);
        assert_eq!(config.disappear_delay_ms, 50);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(PresetConfig::from_toml_str("").unwrap(), PresetConfig::default());
    }

    #[test]
    fn test_rejects_zero_flicker_period() {
        let err = PresetConfig::from_toml_str("flicker_period_ms = 0").unwrap_err();
        assert!(matches!(
            err,
            AnimationError::InvalidValue {
                field: "flicker_period_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = PresetConfig::from_toml_str("pulse_scale = \"big\"").unwrap_err();
        assert!(matches!(err, AnimationError::Config(_)));
    }
}
