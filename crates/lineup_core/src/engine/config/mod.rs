//! # Layout Configuration
//!
//! Pitch geometry used by the coordinate mapper, with one preset per
//! presentation mode.
//!
//! ## Usage
//! ```rust
//! use lineup_core::engine::config::{LayoutConfig, PresentationMode};
//!
//! let panels = LayoutConfig::default();
//! let pitch = LayoutConfig::for_mode(PresentationMode::FullPitch);
//! assert!(pitch.goalkeeper_y > panels.goalkeeper_y);
//! ```

use crate::engine::mirror::MirrorAxis;
use crate::error::{LayoutError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the two teams share the diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// Each team drawn in its own panel, both attacking upward.
    #[default]
    SplitPanels,
    /// Both teams on one pitch; the reference team defends the bottom half.
    FullPitch,
}

impl PresentationMode {
    /// Reflection applied to the non-reference side.
    pub fn mirror_axis(&self) -> MirrorAxis {
        match self {
            PresentationMode::SplitPanels => MirrorAxis::LeftRight,
            PresentationMode::FullPitch => MirrorAxis::NearFar,
        }
    }
}

/// Outfield bands, evenly spaced between goalkeeper and attack line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Defence,
    DefensiveMidfield,
    AttackingMidfield,
    Attack,
}

impl Band {
    pub const ALL: [Band; 4] =
        [Band::Defence, Band::DefensiveMidfield, Band::AttackingMidfield, Band::Attack];

    /// Share of the goalkeeper→attack distance (k/4).
    pub fn fraction(&self) -> f32 {
        match self {
            Band::Defence => 0.25,
            Band::DefensiveMidfield => 0.5,
            Band::AttackingMidfield => 0.75,
            Band::Attack => 1.0,
        }
    }
}

/// Geometry in percent of the diagram (see `FieldPosition`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub mode: PresentationMode,
    /// Goalkeeper y, the near extreme for the reference side
    pub goalkeeper_y: f32,
    /// Forward line y, the far extreme
    pub attack_y: f32,
    /// Inset x range used for evenly spread players
    pub span_min: f32,
    pub span_max: f32,
    /// Distance of wide (left/right tagged) players from their touchline
    pub wide_x: f32,
    /// Inward step for a second wide player on the same side of one line
    pub wide_step: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::split_panels()
    }
}

impl LayoutConfig {
    pub fn split_panels() -> Self {
        Self {
            mode: PresentationMode::SplitPanels,
            goalkeeper_y: 92.0,
            attack_y: 14.0,
            span_min: 12.0,
            span_max: 88.0,
            wide_x: 8.0,
            wide_step: 8.0,
        }
    }

    /// Attack line stays short of halfway so the two teams never overlap.
    pub fn full_pitch() -> Self {
        Self {
            mode: PresentationMode::FullPitch,
            goalkeeper_y: 95.0,
            attack_y: 56.0,
            ..Self::split_panels()
        }
    }

    pub fn for_mode(mode: PresentationMode) -> Self {
        match mode {
            PresentationMode::SplitPanels => Self::split_panels(),
            PresentationMode::FullPitch => Self::full_pitch(),
        }
    }

    pub fn mirror_axis(&self) -> MirrorAxis {
        self.mode.mirror_axis()
    }

    /// y at `fraction` of the way from the goalkeeper to the attack line.
    pub fn y_at(&self, fraction: f32) -> f32 {
        self.goalkeeper_y + (self.attack_y - self.goalkeeper_y) * fraction
    }

    pub fn band_y(&self, band: Band) -> f32 {
        self.y_at(band.fraction())
    }

    /// Neutral midfield line, midway between the two midfield bands.
    pub fn midfield_y(&self) -> f32 {
        let dm = Band::DefensiveMidfield.fraction();
        let am = Band::AttackingMidfield.fraction();
        self.y_at((dm + am) / 2.0)
    }

    pub fn wide_left_x(&self) -> f32 {
        self.wide_x
    }

    pub fn wide_right_x(&self) -> f32 {
        100.0 - self.wide_x
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("goalkeeper_y", self.goalkeeper_y),
            ("attack_y", self.attack_y),
            ("span_min", self.span_min),
            ("span_max", self.span_max),
            ("wide_x", self.wide_x),
        ];
        for (name, value) in fields {
            if !(0.0..=100.0).contains(&value) {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be within 0..=100, got {value}"
                )));
            }
        }
        if self.span_min >= self.span_max {
            return Err(LayoutError::InvalidConfig(format!(
                "span_min ({}) must be below span_max ({})",
                self.span_min, self.span_max
            )));
        }
        if (self.goalkeeper_y - self.attack_y).abs() < f32::EPSILON {
            return Err(LayoutError::InvalidConfig(
                "goalkeeper_y and attack_y must differ".to_string(),
            ));
        }
        if !(0.0..=50.0).contains(&self.wide_step) {
            return Err(LayoutError::InvalidConfig(format!(
                "wide_step must be within 0..=50, got {}",
                self.wide_step
            )));
        }
        Ok(())
    }

    /// Load from JSON. Missing fields take the preset of the given (or default) mode.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let overrides: ConfigOverrides = serde_json::from_str(json)?;
        overrides.resolve()
    }

    /// Load from YAML. Missing fields take the preset of the given (or default) mode.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let overrides: ConfigOverrides = serde_yaml::from_str(yaml)?;
        overrides.resolve()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigOverrides {
    mode: Option<PresentationMode>,
    goalkeeper_y: Option<f32>,
    attack_y: Option<f32>,
    span_min: Option<f32>,
    span_max: Option<f32>,
    wide_x: Option<f32>,
    wide_step: Option<f32>,
}

impl ConfigOverrides {
    fn resolve(self) -> Result<LayoutConfig> {
        let mut cfg = LayoutConfig::for_mode(self.mode.unwrap_or_default());
        if let Some(v) = self.goalkeeper_y {
            cfg.goalkeeper_y = v;
        }
        if let Some(v) = self.attack_y {
            cfg.attack_y = v;
        }
        if let Some(v) = self.span_min {
            cfg.span_min = v;
        }
        if let Some(v) = self.span_max {
            cfg.span_max = v;
        }
        if let Some(v) = self.wide_x {
            cfg.wide_x = v;
        }
        if let Some(v) = self.wide_step {
            cfg.wide_step = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for mode in [PresentationMode::SplitPanels, PresentationMode::FullPitch] {
            let cfg = LayoutConfig::for_mode(mode);
            assert!(cfg.validate().is_ok(), "{mode:?} preset should validate");
            assert_eq!(cfg.mode, mode);
        }
    }

    #[test]
    fn test_full_pitch_stays_in_own_half() {
        let cfg = LayoutConfig::full_pitch();
        assert!(cfg.attack_y > 50.0);
        assert!(cfg.goalkeeper_y > cfg.attack_y);
        assert_eq!(cfg.mirror_axis(), MirrorAxis::NearFar);
        assert_eq!(LayoutConfig::default().mirror_axis(), MirrorAxis::LeftRight);
    }

    #[test]
    fn test_yaml_overrides_apply_on_mode_preset() {
        let cfg = LayoutConfig::from_yaml_str("mode: full_pitch\nwide_x: 5.0\n").unwrap();
        assert_eq!(cfg.mode, PresentationMode::FullPitch);
        assert_eq!(cfg.goalkeeper_y, 95.0);
        assert_eq!(cfg.wide_x, 5.0);
    }

    #[test]
    fn test_json_overrides_default_to_split_panels() {
        let cfg = LayoutConfig::from_json_str(r#"{"attack_y": 20.0}"#).unwrap();
        assert_eq!(cfg.mode, PresentationMode::SplitPanels);
        assert_eq!(cfg.attack_y, 20.0);
        assert_eq!(cfg.goalkeeper_y, 92.0);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let err = LayoutConfig::from_json_str(r#"{"span_min": 90.0, "span_max": 10.0}"#);
        assert!(matches!(err, Err(LayoutError::InvalidConfig(_))));

        let err = LayoutConfig::from_json_str(r#"{"goalkeeper_y": 120.0}"#);
        assert!(matches!(err, Err(LayoutError::InvalidConfig(_))));

        let err = LayoutConfig::from_json_str(r#"{"goalkeeper_y": 40.0, "attack_y": 40.0}"#);
        assert!(matches!(err, Err(LayoutError::InvalidConfig(_))));

        let err = LayoutConfig::from_yaml_str("unknown_key: 1\n");
        assert!(matches!(err, Err(LayoutError::Yaml(_))));

        let err = LayoutConfig::from_json_str("{");
        assert!(matches!(err, Err(LayoutError::Deserialization(_))));
    }

    #[test]
    fn test_y_at_interpolates_between_extremes() {
        let cfg = LayoutConfig::split_panels();
        assert_eq!(cfg.y_at(0.0), 92.0);
        assert_eq!(cfg.y_at(1.0), 14.0);
        assert_eq!(cfg.y_at(0.5), 53.0);
    }

    #[test]
    fn test_bands_move_towards_attack() {
        let cfg = LayoutConfig::split_panels();
        assert_eq!(cfg.band_y(Band::Defence), 72.5);
        assert_eq!(cfg.band_y(Band::Attack), 14.0);
        let ys: Vec<f32> = Band::ALL.iter().map(|b| cfg.band_y(*b)).collect();
        assert!(ys.windows(2).all(|w| w[0] > w[1]));

        let mid = cfg.midfield_y();
        assert!(mid < cfg.band_y(Band::DefensiveMidfield));
        assert!(mid > cfg.band_y(Band::AttackingMidfield));
    }
}
