//! Album configuration.
//!
//! Everything tunable about the engine lives in `AlbumConfig`: drag
//! physics, pack size and cooldown, battle pacing and the timeout
//! fallbacks that keep the state machines moving when an animation never
//! reports completion. The card set itself is configured separately via
//! `CatalogConfig`.
//!
//! ```
//! use sticker_album::core::AlbumConfig;
//!
//! let config = AlbumConfig::from_json_str(r#"{ "pack_size": 3, "seed": 7 }"#).unwrap();
//! assert_eq!(config.pack_size, 3);
//! assert_eq!(config.drag_threshold, 6.0);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Which cards a pack may contain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPolicy {
    /// Draw from the whole catalog. Duplicates are expected.
    #[default]
    AllowDuplicates,
    /// Draw only cards the collection does not own yet.
    ExcludeOwned,
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumConfig {
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Pointer travel (px) that must be strictly exceeded before a press
    /// becomes a drag.
    pub drag_threshold: f64,

    /// Bound for the velocity-derived tilt (degrees, symmetric).
    pub max_tilt_deg: f64,

    /// Cards per pack.
    pub pack_size: usize,

    /// Wait between packs. 0 disables the cooldown.
    pub pack_cooldown_ms: u64,

    /// Which cards packs are drawn from.
    pub draw_policy: DrawPolicy,

    /// Fewest rounds in a battle.
    pub battle_min_turns: u32,

    /// Most rounds in a battle.
    pub battle_max_turns: u32,

    /// Shortest pause after a round.
    pub round_pause_min_ms: u64,

    /// Longest pause after a round (exclusive).
    pub round_pause_max_ms: u64,

    /// Intro cue length before the first round.
    pub intro_ms: u64,

    /// Hold after the victory animation before the winner fades.
    pub victory_settle_ms: u64,

    /// Winner fade-out before the arena is cleared.
    pub fade_out_ms: u64,

    /// Fallback for any animation-completion signal.
    pub animation_timeout_ms: u64,

    /// Delay before a failed drag springs back from its overshoot.
    pub return_overshoot_ms: u64,

    /// Length of the spring-back animation.
    pub return_settle_ms: u64,
}

impl Default for AlbumConfig {
    fn default() -> Self {
        Self {
            seed: None,
            drag_threshold: 6.0,
            max_tilt_deg: 6.0,
            pack_size: 5,
            pack_cooldown_ms: 30_000,
            draw_policy: DrawPolicy::AllowDuplicates,
            battle_min_turns: 4,
            battle_max_turns: 5,
            round_pause_min_ms: 1_000,
            round_pause_max_ms: 2_000,
            intro_ms: 300,
            victory_settle_ms: 600,
            fade_out_ms: 400,
            animation_timeout_ms: 2_500,
            return_overshoot_ms: 50,
            return_settle_ms: 500,
        }
    }
}

impl AlbumConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.drag_threshold.is_finite() && self.drag_threshold >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "drag_threshold",
                reason: format!("must be a non-negative number, got {}", self.drag_threshold),
            });
        }
        if !(self.max_tilt_deg.is_finite() && self.max_tilt_deg >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "max_tilt_deg",
                reason: format!("must be a non-negative number, got {}", self.max_tilt_deg),
            });
        }
        if self.pack_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pack_size",
                reason: "must be at least 1".into(),
            });
        }
        if self.battle_min_turns == 0 || self.battle_min_turns > self.battle_max_turns {
            return Err(ConfigError::InvalidValue {
                field: "battle_min_turns",
                reason: format!(
                    "need 1 <= min ({}) <= max ({})",
                    self.battle_min_turns, self.battle_max_turns
                ),
            });
        }
        if self.round_pause_min_ms > self.round_pause_max_ms {
            return Err(ConfigError::InvalidValue {
                field: "round_pause_min_ms",
                reason: format!(
                    "min ({}) exceeds max ({})",
                    self.round_pause_min_ms, self.round_pause_max_ms
                ),
            });
        }
        Ok(())
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the drag activation threshold.
    #[must_use]
    pub fn with_drag_threshold(mut self, px: f64) -> Self {
        self.drag_threshold = px;
        self
    }

    /// Set the number of cards per pack.
    #[must_use]
    pub fn with_pack_size(mut self, size: usize) -> Self {
        self.pack_size = size;
        self
    }

    /// Set the wait between packs.
    #[must_use]
    pub fn with_pack_cooldown(mut self, ms: u64) -> Self {
        self.pack_cooldown_ms = ms;
        self
    }

    /// Set the draw policy.
    #[must_use]
    pub fn with_draw_policy(mut self, policy: DrawPolicy) -> Self {
        self.draw_policy = policy;
        self
    }

    /// Set the animation fallback timeout.
    #[must_use]
    pub fn with_animation_timeout(mut self, ms: u64) -> Self {
        self.animation_timeout_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AlbumConfig::default();
        assert_eq!(config.drag_threshold, 6.0);
        assert_eq!(config.max_tilt_deg, 6.0);
        assert_eq!(config.pack_size, 5);
        assert_eq!((config.battle_min_turns, config.battle_max_turns), (4, 5));
        assert_eq!((config.round_pause_min_ms, config.round_pause_max_ms), (1_000, 2_000));
        assert_eq!(config.draw_policy, DrawPolicy::AllowDuplicates);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = AlbumConfig::default()
            .with_seed(42)
            .with_pack_size(3)
            .with_pack_cooldown(7_000)
            .with_draw_policy(DrawPolicy::ExcludeOwned)
            .with_drag_threshold(10.0)
            .with_animation_timeout(100);

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.pack_size, 3);
        assert_eq!(config.pack_cooldown_ms, 7_000);
        assert_eq!(config.draw_policy, DrawPolicy::ExcludeOwned);
        assert_eq!(config.drag_threshold, 10.0);
        assert_eq!(config.animation_timeout_ms, 100);
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            AlbumConfig::from_json_str(r#"{ "draw_policy": "exclude_owned", "pack_cooldown_ms": 0 }"#)
                .unwrap();
        assert_eq!(config.draw_policy, DrawPolicy::ExcludeOwned);
        assert_eq!(config.pack_cooldown_ms, 0);
        assert_eq!(config.pack_size, 5);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            AlbumConfig::from_json_str(r#"{ "pack_size": 0 }"#),
            Err(ConfigError::InvalidValue { field: "pack_size", .. })
        ));
        assert!(matches!(
            AlbumConfig::from_json_str(r#"{ "battle_min_turns": 6 }"#),
            Err(ConfigError::InvalidValue { field: "battle_min_turns", .. })
        ));
        assert!(matches!(
            AlbumConfig::from_json_str(r#"{ "drag_threshold": -1.0 }"#),
            Err(ConfigError::InvalidValue { field: "drag_threshold", .. })
        ));
        assert!(matches!(AlbumConfig::from_json_str("{"), Err(ConfigError::Json(_))));
    }
}
